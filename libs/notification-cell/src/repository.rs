use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use serde_json::json;
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

use shared_database::{DatabaseError, SupabaseClient};

use crate::models::{CreateNotification, Notification};

#[async_trait]
pub trait NotificationsRepository: Send + Sync {
    async fn create(&self, data: CreateNotification) -> Result<Notification, DatabaseError>;
}

pub struct SupabaseNotificationsRepository {
    supabase: Arc<SupabaseClient>,
}

impl SupabaseNotificationsRepository {
    pub fn new(supabase: Arc<SupabaseClient>) -> Self {
        Self { supabase }
    }
}

#[async_trait]
impl NotificationsRepository for SupabaseNotificationsRepository {
    async fn create(&self, data: CreateNotification) -> Result<Notification, DatabaseError> {
        debug!("Creating notification for {}", data.recipient_id);

        self.supabase.insert("notifications", json!({
            "recipient_id": data.recipient_id,
            "content": data.content,
            "read": false,
        })).await
    }
}

#[derive(Default)]
pub struct InMemoryNotificationsRepository {
    notifications: RwLock<Vec<Notification>>,
}

impl InMemoryNotificationsRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn all(&self) -> Vec<Notification> {
        self.notifications.read().await.clone()
    }
}

#[async_trait]
impl NotificationsRepository for InMemoryNotificationsRepository {
    async fn create(&self, data: CreateNotification) -> Result<Notification, DatabaseError> {
        let now = Utc::now();
        let notification = Notification {
            id: Uuid::new_v4(),
            recipient_id: data.recipient_id,
            content: data.content,
            read: false,
            created_at: now,
            updated_at: now,
        };

        self.notifications.write().await.push(notification.clone());
        Ok(notification)
    }
}
