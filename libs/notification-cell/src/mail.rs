use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::sync::RwLock;
use tracing::info;

use shared_models::error::AppError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MailContact {
    pub name: String,
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SendMail {
    pub to: MailContact,
    pub from: Option<MailContact>,
    pub subject: String,
    pub body: String,
}

#[derive(Error, Debug)]
#[error("Failed to send mail: {0}")]
pub struct MailError(pub String);

impl From<MailError> for AppError {
    fn from(err: MailError) -> Self {
        AppError::ExternalService(err.to_string())
    }
}

#[async_trait]
pub trait MailProvider: Send + Sync {
    async fn send_mail(&self, message: SendMail) -> Result<(), MailError>;
}

/// Writes outgoing mail to the log instead of delivering it.
pub struct LogMailProvider {
    default_from: MailContact,
}

impl LogMailProvider {
    pub fn new(default_from: MailContact) -> Self {
        Self { default_from }
    }
}

impl Default for LogMailProvider {
    fn default() -> Self {
        Self::new(MailContact {
            name: "Equipe GoBarber".to_string(),
            email: "equipe@gobarber.com.br".to_string(),
        })
    }
}

#[async_trait]
impl MailProvider for LogMailProvider {
    async fn send_mail(&self, message: SendMail) -> Result<(), MailError> {
        let from = message.from.as_ref().unwrap_or(&self.default_from);

        info!(
            from = %from.email,
            to = %message.to.email,
            subject = %message.subject,
            "Mail message:\n{}",
            message.body
        );

        Ok(())
    }
}

#[derive(Default)]
pub struct InMemoryMailProvider {
    messages: RwLock<Vec<SendMail>>,
}

impl InMemoryMailProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn sent(&self) -> Vec<SendMail> {
        self.messages.read().await.clone()
    }
}

#[async_trait]
impl MailProvider for InMemoryMailProvider {
    async fn send_mail(&self, message: SendMail) -> Result<(), MailError> {
        self.messages.write().await.push(message);
        Ok(())
    }
}
