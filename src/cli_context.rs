use std::sync::Arc;

use crate::client::TalkClient;
use crate::config::{get_server_url, load_config, Config};
use crate::error::{TalkError, TalkResult};
use crate::models::User;
use crate::session::{Session, SessionStore};

/// Central context for CLI operations: configuration, the persisted session
/// and a lazily built client.
pub struct CliContext {
    config: Config,
    server_url: String,
    store: SessionStore,
    session: Session,
    client: Option<Arc<TalkClient>>,
}

impl CliContext {
    /// Load context from the saved configuration and session.
    pub fn load() -> TalkResult<Self> {
        CliContextBuilder::new().build()
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn server_url(&self) -> &str {
        &self.server_url
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn session_store(&self) -> &SessionStore {
        &self.store
    }

    /// Name used for comments and reports when none is given.
    pub fn default_reporter(&self) -> Option<String> {
        self.config.reporter_name.clone().or_else(|| {
            self.session
                .current_user
                .as_ref()
                .map(|u| u.username.clone())
        })
    }

    /// Get or create the client, carrying the stored session cookie.
    pub fn client(&mut self) -> TalkResult<Arc<TalkClient>> {
        if let Some(client) = &self.client {
            return Ok(client.clone());
        }

        let client = Arc::new(TalkClient::new(
            &self.server_url,
            self.session.cookie.as_deref(),
        )?);
        self.client = Some(client.clone());
        Ok(client)
    }

    /// Persists the client's cookies together with `user`.
    pub fn remember(&mut self, user: Option<User>) -> TalkResult<()> {
        let cookie = self
            .client
            .as_ref()
            .and_then(|c| c.session_cookie())
            .or_else(|| self.session.cookie.clone());
        self.session = Session {
            cookie,
            current_user: user,
        };
        self.store.save(&self.session)
    }

    /// Drops the stored session.
    pub fn forget(&mut self) -> TalkResult<()> {
        self.session = Session::default();
        self.client = None;
        self.store.clear()
    }

    /// Asks the backend who is logged in. A 401 means nobody.
    pub async fn require_user(&mut self) -> TalkResult<User> {
        if self.session.cookie.is_none() {
            return Err(TalkError::AuthRequired);
        }

        let client = self.client()?;
        match client.current_user().await {
            Ok(user) => {
                self.remember(Some(user.clone()))?;
                Ok(user)
            }
            Err(e) if e.is_unauthorized() => {
                self.session.current_user = None;
                self.store.save(&self.session)?;
                Err(TalkError::AuthRequired)
            }
            Err(e) => Err(e),
        }
    }

    pub async fn require_admin(&mut self) -> TalkResult<User> {
        let user = self.require_user().await?;
        if !user.is_admin() {
            return Err(TalkError::AccessDenied(
                "Admin privileges required.".to_string(),
            ));
        }
        Ok(user)
    }
}

/// Builder for contexts with overridden configuration or session location.
pub struct CliContextBuilder {
    config: Option<Config>,
    server_url: Option<String>,
    store: Option<SessionStore>,
}

impl CliContextBuilder {
    pub fn new() -> Self {
        Self {
            config: None,
            server_url: None,
            store: None,
        }
    }

    pub fn with_config(mut self, config: Config) -> Self {
        self.config = Some(config);
        self
    }

    pub fn with_server_url(mut self, url: impl Into<String>) -> Self {
        self.server_url = Some(url.into());
        self
    }

    pub fn with_session_store(mut self, store: SessionStore) -> Self {
        self.store = Some(store);
        self
    }

    pub fn build(self) -> TalkResult<CliContext> {
        let config = self.config.unwrap_or_else(load_config);
        let server_url = self
            .server_url
            .unwrap_or_else(|| get_server_url(&config));
        let store = match self.store {
            Some(store) => store,
            None => SessionStore::default_location()?,
        };
        let session = store.load();

        Ok(CliContext {
            config,
            server_url,
            store,
            session,
            client: None,
        })
    }
}

impl Default for CliContextBuilder {
    fn default() -> Self {
        Self::new()
    }
}
