use crate::application::ports::user_repository::UserRepository;
use crate::application::use_cases::auth::register::{Register, RegisterError, RegisterRequest};

/// Seeds the administrator account configured at startup.
pub struct EnsureAdmin<'a, R: UserRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: UserRepository + ?Sized> EnsureAdmin<'a, R> {
    /// Returns true when a new account was created.
    pub async fn execute(&self, email: &str, name: &str, password: &str) -> anyhow::Result<bool> {
        let uc = Register { repo: self.repo };
        let req = RegisterRequest {
            email: email.to_string(),
            name: name.to_string(),
            password: password.to_string(),
        };
        match uc.execute(&req).await {
            Ok(user) => {
                tracing::info!(user_id = %user.id, email = %user.email, "admin_account_created");
                Ok(true)
            }
            Err(RegisterError::EmailTaken) => Ok(false),
            Err(RegisterError::Invalid(reason)) => {
                anyhow::bail!("invalid admin account configuration: {reason}")
            }
            Err(RegisterError::Internal(err)) => Err(err),
        }
    }
}
