//! Suite configuration and test-data generators.
//!
//! Configuration is an explicit value handed to flow objects at construction;
//! there is no process-wide config state.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Static configuration for one suite run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuiteConfig {
    /// Storefront base URL
    pub base_url: String,
    /// Credentials of an account known to exist and log in successfully
    pub valid_username: String,
    /// Password paired with `valid_username`
    pub valid_password: String,
    /// A username known to be taken (for duplicate-signup scenarios)
    pub existing_username: String,
}

impl Default for SuiteConfig {
    fn default() -> Self {
        Self {
            base_url: "https://www.demoblaze.com/".to_string(),
            valid_username: "user1231231".to_string(),
            valid_password: "user1231231".to_string(),
            existing_username: "user123".to_string(),
        }
    }
}

impl SuiteConfig {
    /// Create the default configuration
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the base URL
    #[must_use]
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Override the known-valid credentials
    #[must_use]
    pub fn with_valid_credentials(
        mut self,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        self.valid_username = username.into();
        self.valid_password = password.into();
        self
    }
}

/// Generate a unique username: `<prefix>_<timestamp>_<4 random chars>`.
///
/// Timestamped so a username collides with an earlier run only if generated
/// within the same second with the same random suffix.
#[must_use]
pub fn random_username(prefix: &str) -> String {
    let timestamp = Utc::now().format("%Y%m%d%H%M%S");
    let entropy = Uuid::new_v4().simple().to_string();
    format!("{prefix}_{timestamp}_{}", &entropy[..4])
}

/// Generate a random alphanumeric password of `length` characters.
#[must_use]
pub fn random_password(length: usize) -> String {
    let mut password = String::with_capacity(length);
    while password.len() < length {
        password.push_str(&Uuid::new_v4().simple().to_string());
    }
    password.truncate(length);
    password
}
