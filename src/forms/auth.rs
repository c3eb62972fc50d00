use crate::constants::MIN_PASSWORD_LEN;
use crate::error::{TalkError, TalkResult};

#[derive(Debug, Clone, Default)]
pub struct RegisterForm {
    pub username: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

impl RegisterForm {
    pub fn validate(&self) -> TalkResult<()> {
        if self.username.trim().is_empty() || self.email.trim().is_empty() || self.password.is_empty() {
            return Err(TalkError::InvalidInput(
                "Username, email, and password required".to_string(),
            ));
        }
        if self.password != self.confirm_password {
            return Err(TalkError::InvalidInput("Passwords do not match".to_string()));
        }
        if self.password.chars().count() < MIN_PASSWORD_LEN {
            return Err(TalkError::InvalidInput(format!(
                "Password must be at least {} characters long",
                MIN_PASSWORD_LEN
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

impl LoginForm {
    pub fn validate(&self) -> TalkResult<()> {
        if self.username.trim().is_empty() || self.password.is_empty() {
            return Err(TalkError::InvalidInput(
                "Username and password required".to_string(),
            ));
        }
        Ok(())
    }
}
