//! Client configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `PLUMCOT_API_URL` - Origin of the shop backend (e.g. `http://localhost:8000`)
//!
//! ## Optional
//! - `PLUMCOT_PROFILE_PATH` - Durable profile store location
//!   (default: `.plumcot/profile.json`)
//! - `PLUMCOT_ADMIN_USER` / `PLUMCOT_ADMIN_PASSWORD` - Administrator login
//!   for tooling that calls the admin API

use std::path::PathBuf;

use secrecy::SecretString;
use thiserror::Error;
use url::Url;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Gateway client configuration.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// Origin of the shop backend; base paths from the endpoint policy are
    /// appended per call.
    pub base_url: Url,
    /// Durable profile store location.
    pub profile_path: PathBuf,
}

impl GatewayConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if `PLUMCOT_API_URL` is missing or not a
    /// valid URL.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let base_url = get_required_env("PLUMCOT_API_URL")?
            .parse::<Url>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("PLUMCOT_API_URL".to_string(), e.to_string())
            })?;
        let profile_path =
            get_env_or_default("PLUMCOT_PROFILE_PATH", ".plumcot/profile.json").into();

        Ok(Self {
            base_url,
            profile_path,
        })
    }
}

/// Administrator login pair for tooling.
pub struct AdminLogin {
    /// Administrator username.
    pub username: String,
    /// Administrator password.
    pub password: SecretString,
}

impl AdminLogin {
    /// Load the admin login from the environment, if configured.
    ///
    /// Returns `Ok(None)` when neither variable is set; the admin surface
    /// then runs unauthenticated and the backend rejects it.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` when only one of the two variables is set.
    pub fn from_env() -> Result<Option<Self>, ConfigError> {
        let username = get_optional_env("PLUMCOT_ADMIN_USER");
        let password = get_optional_env("PLUMCOT_ADMIN_PASSWORD");
        match (username, password) {
            (Some(username), Some(password)) => Ok(Some(Self {
                username,
                password: SecretString::from(password),
            })),
            (None, None) => Ok(None),
            (Some(_), None) => Err(ConfigError::MissingEnvVar(
                "PLUMCOT_ADMIN_PASSWORD".to_string(),
            )),
            (None, Some(_)) => Err(ConfigError::MissingEnvVar(
                "PLUMCOT_ADMIN_USER".to_string(),
            )),
        }
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get a required environment variable.
fn get_required_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
