use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use serde_json::json;
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

use shared_database::{DatabaseError, SupabaseClient};

use crate::models::UserToken;

#[async_trait]
pub trait UserTokensRepository: Send + Sync {
    async fn generate(&self, user_id: Uuid) -> Result<UserToken, DatabaseError>;

    async fn find_by_token(&self, token: Uuid) -> Result<Option<UserToken>, DatabaseError>;
}

pub struct SupabaseUserTokensRepository {
    supabase: Arc<SupabaseClient>,
}

impl SupabaseUserTokensRepository {
    pub fn new(supabase: Arc<SupabaseClient>) -> Self {
        Self { supabase }
    }
}

#[async_trait]
impl UserTokensRepository for SupabaseUserTokensRepository {
    async fn generate(&self, user_id: Uuid) -> Result<UserToken, DatabaseError> {
        debug!("Generating reset token for user {}", user_id);

        self.supabase.insert("user_tokens", json!({
            "token": Uuid::new_v4(),
            "user_id": user_id,
        })).await
    }

    async fn find_by_token(&self, token: Uuid) -> Result<Option<UserToken>, DatabaseError> {
        self.supabase.select_one("user_tokens", &format!("token=eq.{}", token)).await
    }
}

#[derive(Default)]
pub struct InMemoryUserTokensRepository {
    tokens: RwLock<Vec<UserToken>>,
}

impl InMemoryUserTokensRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserTokensRepository for InMemoryUserTokensRepository {
    async fn generate(&self, user_id: Uuid) -> Result<UserToken, DatabaseError> {
        let now = Utc::now();
        let token = UserToken {
            id: Uuid::new_v4(),
            token: Uuid::new_v4(),
            user_id,
            created_at: now,
            updated_at: now,
        };

        self.tokens.write().await.push(token.clone());
        Ok(token)
    }

    async fn find_by_token(&self, token: Uuid) -> Result<Option<UserToken>, DatabaseError> {
        Ok(self.tokens.read().await.iter().find(|t| t.token == token).cloned())
    }
}
