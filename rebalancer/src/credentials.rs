//! API credentials from the environment.
//!
//! `APCA_API_KEY_ID` and `APCA_API_SECRET_KEY` are read from the process
//! environment, optionally seeded from a `.env` file in the working
//! directory. Blank values count as missing.

use log::{debug, warn};
use zeroize::Zeroizing;

use crate::error::{Error, Result};

pub const KEY_ID_VAR: &str = "APCA_API_KEY_ID";
pub const SECRET_KEY_VAR: &str = "APCA_API_SECRET_KEY";

/// Alpaca API key pair. The secret is wiped from memory on drop.
pub struct Credentials {
    pub key_id: String,
    pub secret_key: Zeroizing<String>,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("key_id", &self.key_id)
            .field("secret_key", &"<redacted>")
            .finish()
    }
}

/// Load a `.env` file into the environment if one exists.
///
/// Variables already set in the environment win over the file.
pub fn load_dotenv() {
    match dotenvy::dotenv() {
        Ok(path) => debug!("Loaded environment from {}", path.display()),
        Err(e) if e.not_found() => {}
        Err(e) => warn!("Ignoring unreadable .env file: {e}"),
    }
}

impl Credentials {
    /// Read credentials from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read credentials through an arbitrary lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let require = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .ok_or_else(|| Error::Credentials(format!("missing {key} in environment (.env)")))
        };
        Ok(Self {
            key_id: require(KEY_ID_VAR)?,
            secret_key: Zeroizing::new(require(SECRET_KEY_VAR)?),
        })
    }
}
