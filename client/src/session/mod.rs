//! # Session Storage
//!
//! The signed-in state of the client: access token, user record, login time and
//! the remembered username for the login form.
//!
//! ```text
//! session/
//! ├── mod.rs     - Session: typed accessors over a SessionStore
//! ├── store.rs   - SessionStore trait and MemoryStore
//! └── file.rs    - FileStore (JSON file, used by the console)
//! ```
//!
//! ## Keys
//!
//! | key                  | value                          |
//! |----------------------|--------------------------------|
//! | `accessToken`        | bearer token                   |
//! | `user`               | `UserInfo` serialized as JSON  |
//! | `loginTimestamp`     | RFC 3339 UTC timestamp         |
//! | `rememberedUsername` | email to prefill at login      |
//! | `cookies`            | `name=value; ...` cookie header for the API origin |
//!
//! Nothing is cached in memory: every accessor reads the store, so a token
//! replaced by a refresh on one task is what the next request on any task sends.
//!
//! Saved payout wallets are deliberately not a session key. Withdrawal
//! addresses are business data and are passed explicitly on every withdrawal.

mod file;
mod store;

pub use file::FileStore;
pub use store::{MemoryStore, SessionStore};

use chrono::{DateTime, Utc};
use shared::UserInfo;
use std::sync::Arc;

use crate::core::error::{ApiError, Result};

pub const TOKEN_KEY: &str = "accessToken";
pub const USER_KEY: &str = "user";
pub const LOGIN_TIMESTAMP_KEY: &str = "loginTimestamp";
pub const REMEMBERED_USERNAME_KEY: &str = "rememberedUsername";
pub const COOKIES_KEY: &str = "cookies";

/// Typed view over a [`SessionStore`]. Cheap to clone.
#[derive(Clone)]
pub struct Session {
    store: Arc<dyn SessionStore>,
}

impl Session {
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        Self { store }
    }

    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStore::new()))
    }

    pub fn token(&self) -> Result<Option<String>> {
        self.store.get(TOKEN_KEY)
    }

    pub fn set_token(&self, token: &str) -> Result<()> {
        self.store.set(TOKEN_KEY, token)
    }

    /// Stored user, or `None` when absent or unreadable.
    ///
    /// A user record that no longer parses is treated as signed out rather than
    /// failing every role check.
    pub fn user(&self) -> Result<Option<UserInfo>> {
        let Some(raw) = self.store.get(USER_KEY)? else {
            return Ok(None);
        };
        match serde_json::from_str(&raw) {
            Ok(user) => Ok(Some(user)),
            Err(e) => {
                tracing::warn!(error = %e, "Discarding unreadable stored user");
                Ok(None)
            }
        }
    }

    pub fn set_user(&self, user: &UserInfo) -> Result<()> {
        let raw = serde_json::to_string(user).map_err(|e| ApiError::Storage(e.to_string()))?;
        self.store.set(USER_KEY, &raw)
    }

    pub fn login_timestamp(&self) -> Result<Option<DateTime<Utc>>> {
        Ok(self
            .store
            .get(LOGIN_TIMESTAMP_KEY)?
            .and_then(|raw| DateTime::parse_from_rfc3339(&raw).ok())
            .map(|ts| ts.with_timezone(&Utc)))
    }

    /// Start (or renew) a session: token, optional user, and a fresh timestamp.
    pub fn begin(&self, token: &str, user: Option<&UserInfo>) -> Result<()> {
        self.set_token(token)?;
        if let Some(user) = user {
            self.set_user(user)?;
        }
        self.store.set(LOGIN_TIMESTAMP_KEY, &Utc::now().to_rfc3339())
    }

    pub fn remembered_username(&self) -> Result<Option<String>> {
        self.store.get(REMEMBERED_USERNAME_KEY)
    }

    pub fn remember_username(&self, username: Option<&str>) -> Result<()> {
        match username {
            Some(name) => self.store.set(REMEMBERED_USERNAME_KEY, name),
            None => self.store.remove(REMEMBERED_USERNAME_KEY),
        }
    }

    /// Cookies the backend set for the API origin, as a `Cookie` header value.
    /// Carries the refresh token between processes.
    pub fn cookies(&self) -> Result<Option<String>> {
        self.store.get(COOKIES_KEY)
    }

    pub fn set_cookies(&self, cookies: Option<&str>) -> Result<()> {
        match cookies.filter(|c| !c.trim().is_empty()) {
            Some(header) => self.store.set(COOKIES_KEY, header),
            None => self.store.remove(COOKIES_KEY),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self.token(), Ok(Some(_)))
    }

    pub fn has_role(&self, role: &str) -> bool {
        matches!(self.user(), Ok(Some(user)) if user.has_role(role))
    }

    pub fn is_admin(&self) -> bool {
        matches!(self.user(), Ok(Some(user)) if user.is_admin())
    }

    /// Wipe token, user, timestamp and saved cookies. The remembered username
    /// is kept.
    pub fn clear(&self) -> Result<()> {
        self.store.remove(TOKEN_KEY)?;
        self.store.remove(USER_KEY)?;
        self.store.remove(LOGIN_TIMESTAMP_KEY)?;
        self.store.remove(COOKIES_KEY)
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("authenticated", &self.is_authenticated())
            .finish()
    }
}
