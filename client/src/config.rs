//! # Client Configuration
//!
//! Configuration loaded from environment variables (a `.env` file is honoured
//! through `dotenvy` by the console binary). Validated before the client is
//! built so a bad URL fails at startup instead of on the first request.
//!
//! | variable                  | default                        |
//! |---------------------------|--------------------------------|
//! | `INVEST_API_URL`          | `http://localhost:5000/api/`   |
//! | `INVEST_API_KEY`          | required                       |
//! | `INVEST_API_TIMEOUT_SECS` | unset (transport default)      |
//! | `INVEST_SESSION_FILE`     | `data/session.json`            |

use reqwest::Url;
use std::env;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_API_URL: &str = "http://localhost:5000/api/";
pub const DEFAULT_SESSION_FILE: &str = "data/session.json";

/// API client configuration.
#[derive(Clone, Debug)]
pub struct ClientConfig {
    /// Backend base URL including the `/api/` prefix
    pub base_url: String,

    /// Static key sent as `x-api-key` on every request
    pub api_key: String,

    /// Optional whole-request timeout. `None` leaves it to the transport.
    pub request_timeout: Option<Duration>,

    /// Where the console persists the session
    pub session_file: PathBuf,
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: api_key.into(),
            request_timeout: None,
            session_file: PathBuf::from(DEFAULT_SESSION_FILE),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }

    pub fn with_session_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.session_file = path.into();
        self
    }

    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, String> {
        let base_url = env::var("INVEST_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());

        let api_key = env::var("INVEST_API_KEY")
            .map_err(|_| "INVEST_API_KEY must be set in environment".to_string())?;

        let request_timeout = match env::var("INVEST_API_TIMEOUT_SECS") {
            Ok(raw) => Some(Duration::from_secs(raw.parse().map_err(|e| {
                format!("INVEST_API_TIMEOUT_SECS must be a whole number of seconds: {}", e)
            })?)),
            Err(_) => None,
        };

        let session_file = env::var("INVEST_SESSION_FILE")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_SESSION_FILE));

        Ok(Self {
            base_url,
            api_key,
            request_timeout,
            session_file,
        })
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), String> {
        let url = Url::parse(&self.base_url)
            .map_err(|e| format!("INVEST_API_URL is not a valid URL: {}", e))?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(format!("INVEST_API_URL must be http or https, got {}", url.scheme()));
        }

        if self.api_key.trim().is_empty() {
            return Err("INVEST_API_KEY must not be empty".to_string());
        }

        if self.request_timeout == Some(Duration::ZERO) {
            return Err("INVEST_API_TIMEOUT_SECS must be greater than 0".to_string());
        }

        Ok(())
    }

    /// Absolute URL for a relative endpoint.
    ///
    /// Exactly one slash separates the base and the endpoint regardless of how
    /// either is written.
    pub fn endpoint_url(&self, endpoint: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            endpoint.trim_start_matches('/')
        )
    }
}
