pub mod error;
pub mod handlers;
pub mod models;
pub mod repository;
pub mod router;
pub mod services;
pub mod storage;

pub use error::UserError;
pub use models::{CreateUser, User, UserProfile};
pub use repository::{InMemoryUsersRepository, SupabaseUsersRepository, UsersRepository};
pub use router::{profile_routes, user_routes, UserState};
pub use storage::{DiskStorageProvider, InMemoryStorageProvider, StorageError, StorageProvider};
