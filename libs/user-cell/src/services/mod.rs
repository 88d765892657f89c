pub mod avatar;
pub mod create_user;
pub mod profile;

pub use avatar::UpdateUserAvatarService;
pub use create_user::CreateUserService;
pub use profile::{ShowProfileService, UpdateProfileService};
