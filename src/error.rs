#![allow(dead_code)]

use thiserror::Error;

#[derive(Error, Debug)]
pub enum TalkError {
    #[error("Authentication required. Please run 'testertalk login' first.")]
    AuthRequired,

    #[error("Access denied. {0}")]
    AccessDenied(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Non-2xx responses and transport failures share this variant so callers
    /// report them the same way. `status` is `None` for transport errors.
    #[error("Request failed: {message}")]
    RequestFailed { status: Option<u16>, message: String },

    #[error("Please fill in all required fields: {}", .0.join(", "))]
    Validation(Vec<String>),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Terminal error: {0}")]
    TerminalError(String),

    #[error("State error: {0}")]
    StateError(String),

    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl TalkError {
    pub fn request_failed(status: Option<u16>, message: impl Into<String>) -> Self {
        TalkError::RequestFailed {
            status,
            message: message.into(),
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            TalkError::RequestFailed { status, .. } => *status,
            _ => None,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, TalkError::AuthRequired) || self.status() == Some(401)
    }

    pub fn is_forbidden(&self) -> bool {
        matches!(self, TalkError::AccessDenied(_)) || self.status() == Some(403)
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}

impl From<reqwest::Error> for TalkError {
    fn from(err: reqwest::Error) -> Self {
        TalkError::RequestFailed {
            status: err.status().map(|s| s.as_u16()),
            message: err.to_string(),
        }
    }
}

pub type TalkResult<T> = Result<T, TalkError>;

pub trait ErrorContext<T> {
    fn context(self, msg: &str) -> TalkResult<T>;
    fn with_context<F>(self, f: F) -> TalkResult<T>
    where
        F: FnOnce() -> String;
}

impl<T, E> ErrorContext<T> for Result<T, E>
where
    E: std::error::Error + 'static,
{
    fn context(self, msg: &str) -> TalkResult<T> {
        self.map_err(|e| TalkError::Unknown(format!("{}: {}", msg, e)))
    }

    fn with_context<F>(self, f: F) -> TalkResult<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| TalkError::Unknown(format!("{}: {}", f(), e)))
    }
}

impl<T> ErrorContext<T> for Option<T> {
    fn context(self, msg: &str) -> TalkResult<T> {
        self.ok_or_else(|| TalkError::Unknown(msg.to_string()))
    }

    fn with_context<F>(self, f: F) -> TalkResult<T>
    where
        F: FnOnce() -> String,
    {
        self.ok_or_else(|| TalkError::Unknown(f()))
    }
}

#[macro_export]
macro_rules! talk_error {
    ($error_type:ident, $msg:expr) => {
        $crate::error::TalkError::$error_type($msg.to_string())
    };
    ($error_type:ident, $fmt:expr, $($arg:tt)*) => {
        $crate::error::TalkError::$error_type(format!($fmt, $($arg)*))
    };
}
