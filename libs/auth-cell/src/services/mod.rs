pub mod forgot_password;
pub mod reset_password;
pub mod session;

pub use forgot_password::SendForgotPasswordEmailService;
pub use reset_password::ResetPasswordService;
pub use session::AuthenticateUserService;
