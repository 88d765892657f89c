pub mod mail;
pub mod models;
pub mod repository;

pub use mail::{InMemoryMailProvider, LogMailProvider, MailContact, MailError, MailProvider, SendMail};
pub use models::{CreateNotification, Notification};
pub use repository::{InMemoryNotificationsRepository, NotificationsRepository, SupabaseNotificationsRepository};
