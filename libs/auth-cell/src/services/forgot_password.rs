use std::sync::Arc;

use tracing::{info, instrument};

use notification_cell::{MailContact, MailProvider, SendMail};
use user_cell::UsersRepository;

use crate::error::AuthError;
use crate::repository::UserTokensRepository;

pub struct SendForgotPasswordEmailService {
    users: Arc<dyn UsersRepository>,
    user_tokens: Arc<dyn UserTokensRepository>,
    mail: Arc<dyn MailProvider>,
    web_url: String,
}

impl SendForgotPasswordEmailService {
    pub fn new(
        users: Arc<dyn UsersRepository>,
        user_tokens: Arc<dyn UserTokensRepository>,
        mail: Arc<dyn MailProvider>,
        web_url: impl Into<String>,
    ) -> Self {
        Self { users, user_tokens, mail, web_url: web_url.into() }
    }

    #[instrument(skip(self))]
    pub async fn execute(&self, email: &str) -> Result<(), AuthError> {
        let user = self.users
            .find_by_email(email)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        let user_token = self.user_tokens.generate(user.id).await?;
        let link = format!(
            "{}/reset-password?token={}",
            self.web_url.trim_end_matches('/'),
            user_token.token
        );

        self.mail.send_mail(SendMail {
            to: MailContact { name: user.name.clone(), email: user.email.clone() },
            from: None,
            subject: "[GoBarber] Recuperação de senha".to_string(),
            body: format!(
                "Olá, {}\n\nRecebemos uma solicitação de troca de senha para sua conta.\n\
                 Para escolher uma nova senha, acesse o link abaixo:\n\n{}\n\n\
                 Se não foi você, ignore este e-mail.\n\nEquipe GoBarber",
                user.name, link
            ),
        }).await?;

        info!("Password recovery mail sent to user {}", user.id);
        Ok(())
    }
}
