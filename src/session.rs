use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::constants::SESSION_FILE;
use crate::error::{TalkError, TalkResult};
use crate::logging::log_debug;
use crate::models::User;

/// What survives between invocations: the backend's session cookie and the
/// identity last reported by `/api/auth/me`. The user is only a display hint;
/// the backend decides what the cookie is allowed to do.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub cookie: Option<String>,
    pub current_user: Option<User>,
}

impl Session {
    pub fn is_admin(&self) -> bool {
        self.current_user.as_ref().is_some_and(User::is_admin)
    }
}

pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store under the user's home directory.
    pub fn default_location() -> TalkResult<Self> {
        let home = dirs::home_dir()
            .ok_or_else(|| TalkError::ConfigError("Could not find home directory".to_string()))?;
        Ok(Self::new(home.join(SESSION_FILE)))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// A missing or corrupt file is an empty session.
    pub fn load(&self) -> Session {
        match fs::read_to_string(&self.path) {
            Ok(raw) => serde_json::from_str(&raw).unwrap_or_else(|e| {
                log_debug(&format!("Ignoring unreadable session file: {}", e));
                Session::default()
            }),
            Err(_) => Session::default(),
        }
    }

    pub fn save(&self, session: &Session) -> TalkResult<()> {
        let raw = serde_json::to_string_pretty(session)?;
        fs::write(&self.path, raw)?;
        Ok(())
    }

    pub fn clear(&self) -> TalkResult<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    pub fn update_user(&self, user: Option<User>) -> TalkResult<()> {
        let mut session = self.load();
        session.current_user = user;
        self.save(&session)
    }
}
