use std::fs;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use tracing::{debug, info, warn};

use crate::api::traits::EstateApi;
use crate::error::{ApiError, LoginError};
use crate::models::{AdminUser, Session};

/// Durable home for the one piece of state that survives a restart:
/// the opaque session token.
pub trait TokenStore: Send + Sync {
    fn load(&self) -> Option<String>;
    fn save(&self, token: &str) -> anyhow::Result<()>;
    fn clear(&self) -> anyhow::Result<()>;
}

/// Token persisted as a single file, replaced atomically
/// (write-temp-then-rename).
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl TokenStore for FileTokenStore {
    fn load(&self) -> Option<String> {
        let raw = fs::read_to_string(&self.path).ok()?;
        let token = raw.trim();
        if token.is_empty() {
            None
        } else {
            Some(token.to_string())
        }
    }

    fn save(&self, token: &str) -> anyhow::Result<()> {
        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, token)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    fn clear(&self) -> anyhow::Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}

/// In-memory token store for tests and demos.
#[derive(Default)]
pub struct MemoryTokenStore {
    slot: Mutex<Option<String>>,
}

impl MemoryTokenStore {
    pub fn with_token(token: &str) -> Self {
        Self {
            slot: Mutex::new(Some(token.to_string())),
        }
    }
}

impl TokenStore for MemoryTokenStore {
    fn load(&self) -> Option<String> {
        self.slot.lock().unwrap().clone()
    }

    fn save(&self, token: &str) -> anyhow::Result<()> {
        *self.slot.lock().unwrap() = Some(token.to_string());
        Ok(())
    }

    fn clear(&self) -> anyhow::Result<()> {
        *self.slot.lock().unwrap() = None;
        Ok(())
    }
}

/// Holds the current authenticated admin identity, or none.
///
/// The presence of a session is the sole gate for admin-only views and
/// operations; there is no finer-grained permission model. Constructed
/// once and shared by reference with every consumer.
pub struct SessionStore {
    api: Arc<dyn EstateApi>,
    tokens: Box<dyn TokenStore>,
    session: Mutex<Option<Session>>,
}

impl SessionStore {
    /// Builds the store, restoring any persisted token. A restored
    /// session is optimistically considered active; the first admin
    /// call the service rejects will clear it.
    pub fn new(api: Arc<dyn EstateApi>, tokens: Box<dyn TokenStore>) -> Self {
        let session = tokens.load().map(|token| {
            debug!("restored persisted session token");
            Session {
                user: AdminUser::default(),
                token,
            }
        });
        Self {
            api,
            tokens,
            session: Mutex::new(session),
        }
    }

    /// Exchanges credentials for a session. Every expected failure
    /// (bad credentials, transport trouble, server error) comes back
    /// as a `LoginError` carrying a message to show; the prior session,
    /// if any, is left untouched.
    pub async fn login(&self, email: &str, password: &str) -> Result<AdminUser, LoginError> {
        match self.api.login(email, password).await {
            Ok(reply) => {
                if let Err(err) = self.tokens.save(&reply.token) {
                    warn!(error = %err, "failed to persist session token");
                }
                let user = reply.user.clone();
                *self.session.lock().unwrap() = Some(Session {
                    user: reply.user,
                    token: reply.token,
                });
                info!(email, "admin signed in");
                Ok(user)
            }
            Err(ApiError::Unauthorized(message)) => {
                debug!(email, "login rejected");
                Err(LoginError::InvalidCredentials(message))
            }
            Err(other) => Err(LoginError::Transport(other.to_string())),
        }
    }

    /// Clears the session unconditionally. Always succeeds; a failure
    /// to remove the persisted token is logged, not surfaced.
    pub fn logout(&self) {
        *self.session.lock().unwrap() = None;
        if let Err(err) = self.tokens.clear() {
            warn!(error = %err, "failed to clear persisted session token");
        }
        info!("admin signed out");
    }

    /// Implicit logout after the remote service rejected our token on
    /// an admin-only call.
    pub fn force_logout(&self) {
        warn!("session token rejected by the service, signing out");
        self.logout();
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.lock().unwrap().is_some()
    }

    pub fn current_user(&self) -> Option<AdminUser> {
        self.session.lock().unwrap().as_ref().map(|s| s.user.clone())
    }

    pub fn token(&self) -> Option<String> {
        self.session.lock().unwrap().as_ref().map(|s| s.token.clone())
    }
}
