pub mod error;
pub mod handlers;
pub mod models;
pub mod repository;
pub mod router;
pub mod services;

pub use error::AuthError;
pub use models::UserToken;
pub use repository::{InMemoryUserTokensRepository, SupabaseUserTokensRepository, UserTokensRepository};
pub use router::{password_routes, session_routes, AuthState};
