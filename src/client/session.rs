//! Session storage
//!
//! The bearer token and the account it belongs to, kept between calls (and,
//! for the CLI, between runs). [`ApiClient`](super::api::ApiClient) takes any
//! [`SessionStore`], so tests can use the in-memory one.

use std::path::{Path, PathBuf};
use std::sync::RwLock;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::client::error::ClientError;
use crate::shared::auth::{AuthResponse, UserResponse};

/// File name under the `parkeasy` config directory
pub const SESSION_FILE: &str = "session.toml";

/// A logged-in owner
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub token: String,
    pub user: UserResponse,
}

impl From<&AuthResponse> for Session {
    fn from(response: &AuthResponse) -> Self {
        Self {
            token: response.token.clone(),
            user: response.user.clone(),
        }
    }
}

/// Where the current session lives
pub trait SessionStore: Send + Sync {
    /// The stored session, if any
    fn load(&self) -> Result<Option<Session>, ClientError>;

    /// Replace the stored session
    fn save(&self, session: &Session) -> Result<(), ClientError>;

    /// Forget the stored session (logout). Clearing an empty store is not an error.
    fn clear(&self) -> Result<(), ClientError>;
}

/// Session held for the lifetime of the process
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    session: RwLock<Option<Session>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-loaded with `session`
    pub fn with_session(session: Session) -> Self {
        Self {
            session: RwLock::new(Some(session)),
        }
    }
}

fn poisoned<T>(_: T) -> ClientError {
    ClientError::Session("session lock poisoned".to_string())
}

impl SessionStore for MemorySessionStore {
    fn load(&self) -> Result<Option<Session>, ClientError> {
        Ok(self.session.read().map_err(poisoned)?.clone())
    }

    fn save(&self, session: &Session) -> Result<(), ClientError> {
        *self.session.write().map_err(poisoned)? = Some(session.clone());
        Ok(())
    }

    fn clear(&self) -> Result<(), ClientError> {
        *self.session.write().map_err(poisoned)? = None;
        Ok(())
    }
}

/// Session persisted as TOML, by default at `<config dir>/parkeasy/session.toml`
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at the platform config directory
    pub fn default_location() -> Result<Self, ClientError> {
        let dir = dirs::config_dir()
            .ok_or_else(|| ClientError::Session("no config directory on this platform".to_string()))?;
        Ok(Self::new(dir.join("parkeasy").join(SESSION_FILE)))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SessionStore for FileSessionStore {
    fn load(&self) -> Result<Option<Session>, ClientError> {
        if !self.path.exists() {
            return Ok(None);
        }
        let contents = std::fs::read_to_string(&self.path)?;
        Ok(Some(toml::from_str(&contents)?))
    }

    fn save(&self, session: &Session) -> Result<(), ClientError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, toml::to_string(session)?)?;
        debug!("Session saved to {}", self.path.display());
        Ok(())
    }

    fn clear(&self) -> Result<(), ClientError> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}
