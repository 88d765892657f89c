use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use serde_json::json;
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

use shared_database::{filter_value, DatabaseError, SupabaseClient};

use crate::models::{CreateUser, User};

#[async_trait]
pub trait UsersRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DatabaseError>;

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DatabaseError>;

    /// Every user, optionally leaving one out.
    async fn find_all_providers(&self, except_user_id: Option<Uuid>) -> Result<Vec<User>, DatabaseError>;

    async fn create(&self, data: CreateUser) -> Result<User, DatabaseError>;

    async fn save(&self, user: User) -> Result<User, DatabaseError>;
}

pub struct SupabaseUsersRepository {
    supabase: Arc<SupabaseClient>,
}

impl SupabaseUsersRepository {
    pub fn new(supabase: Arc<SupabaseClient>) -> Self {
        Self { supabase }
    }
}

#[async_trait]
impl UsersRepository for SupabaseUsersRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DatabaseError> {
        self.supabase.select_one("users", &format!("id=eq.{}", id)).await
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DatabaseError> {
        self.supabase
            .select_one("users", &format!("email=eq.{}", filter_value(email)))
            .await
    }

    async fn find_all_providers(&self, except_user_id: Option<Uuid>) -> Result<Vec<User>, DatabaseError> {
        let query = match except_user_id {
            Some(id) => format!("id=neq.{}&order=name.asc", id),
            None => "order=name.asc".to_string(),
        };

        self.supabase.select("users", &query).await
    }

    async fn create(&self, data: CreateUser) -> Result<User, DatabaseError> {
        debug!("Creating user {}", data.email);

        self.supabase.insert("users", json!({
            "name": data.name,
            "email": data.email,
            "password": data.password,
        })).await
    }

    async fn save(&self, user: User) -> Result<User, DatabaseError> {
        self.supabase.update("users", &format!("id=eq.{}", user.id), json!({
            "name": user.name,
            "email": user.email,
            "password": user.password,
            "avatar": user.avatar,
            "updated_at": Utc::now(),
        })).await
    }
}

#[derive(Default)]
pub struct InMemoryUsersRepository {
    users: RwLock<Vec<User>>,
}

impl InMemoryUsersRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UsersRepository for InMemoryUsersRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DatabaseError> {
        Ok(self.users.read().await.iter().find(|u| u.id == id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DatabaseError> {
        Ok(self.users.read().await.iter().find(|u| u.email == email).cloned())
    }

    async fn find_all_providers(&self, except_user_id: Option<Uuid>) -> Result<Vec<User>, DatabaseError> {
        Ok(self.users
            .read()
            .await
            .iter()
            .filter(|u| Some(u.id) != except_user_id)
            .cloned()
            .collect())
    }

    async fn create(&self, data: CreateUser) -> Result<User, DatabaseError> {
        let now = Utc::now();
        let user = User {
            id: Uuid::new_v4(),
            name: data.name,
            email: data.email,
            password: data.password,
            avatar: None,
            created_at: now,
            updated_at: now,
        };

        self.users.write().await.push(user.clone());
        Ok(user)
    }

    async fn save(&self, mut user: User) -> Result<User, DatabaseError> {
        let mut users = self.users.write().await;
        let slot = users
            .iter_mut()
            .find(|u| u.id == user.id)
            .ok_or_else(|| DatabaseError::EmptyResult("users".to_string()))?;

        user.updated_at = Utc::now();
        *slot = user.clone();
        Ok(user)
    }
}
