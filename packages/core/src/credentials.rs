//! On-disk credential store.
//!
//! Two small JSON documents live next to the tool:
//!
//! - the **session** file (`user_credentials.json`), written by `login` and
//!   `select`. A missing or unreadable session is not an error: it simply
//!   means nobody has logged in yet.
//! - the **registration** file (`agent_credentials.json`), provisioned
//!   out-of-band. Without it no request can be signed, so failing to read it
//!   is always an error.
//!
//! Writes overwrite the whole file. There is no locking; the last writer wins.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

use crate::config::Config;

/// Errors returned by [`CredentialStore`].
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("unable to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("unable to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("unable to serialize credentials: {0}")]
    Serialize(#[source] serde_json::Error),

    #[error("unable to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Tokens issued to the logged-in user, plus the selected agent.
///
/// Every field defaults when absent from the file, so a partially written
/// session still loads.
///
/// ```json
/// { "access_token": "tok", "expires_in": 3600, "refresh_token": "r", "agent_guid": "G-1" }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserSession {
    pub access_token: String,

    /// Token lifetime in seconds as reported by the API. Not enforced.
    pub expires_in: i64,

    pub refresh_token: String,

    /// Guid of the agent chosen with `select`. Omitted from the file when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub agent_guid: Option<String>,
}

impl UserSession {
    /// `true` when an access token is present.
    pub fn is_authenticated(&self) -> bool {
        !self.access_token.is_empty()
    }

    /// The selected agent guid, treating an empty string as unset.
    pub fn selected_agent(&self) -> Option<&str> {
        self.agent_guid.as_deref().filter(|guid| !guid.is_empty())
    }
}

/// Static per-installation registration data.
///
/// Fields absent from the file load as empty strings; only unreadable or
/// non-JSON files are rejected.
///
/// ```json
/// {
///   "api_secret": "s",
///   "client_id": "1",
///   "client_secret": "c",
///   "scope": "basic",
///   "pc_name": "demo",
///   "build_version": "1.0"
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentRegistration {
    /// Shared HMAC key for request signatures.
    pub api_secret: String,
    pub client_id: String,
    pub client_secret: String,
    pub scope: String,
    /// Host label reported to the API at login.
    pub pc_name: String,
    /// Packet-capture build the downloaded config must match.
    pub build_version: String,
}

/// Reads and writes the two credential files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CredentialStore {
    user_path: PathBuf,
    agent_path: PathBuf,
}

impl CredentialStore {
    pub fn new(user_path: impl Into<PathBuf>, agent_path: impl Into<PathBuf>) -> Self {
        Self {
            user_path: user_path.into(),
            agent_path: agent_path.into(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config.user_credentials.clone(),
            config.agent_credentials.clone(),
        )
    }

    pub fn user_path(&self) -> &Path {
        &self.user_path
    }

    pub fn agent_path(&self) -> &Path {
        &self.agent_path
    }

    /// Load the session, or an empty one if the file is missing or corrupt.
    pub fn load_user_session(&self) -> UserSession {
        match read_json(&self.user_path) {
            Ok(session) => session,
            Err(e) => {
                info!("{e}; using an empty session");
                UserSession::default()
            }
        }
    }

    /// Overwrite the session file.
    pub fn save_user_session(&self, session: &UserSession) -> Result<(), StoreError> {
        write_json(&self.user_path, session)
    }

    /// Load the registration file.
    ///
    /// # Errors
    ///
    /// - [`StoreError::Read`] if the file is missing or unreadable.
    /// - [`StoreError::Parse`] if it is not a valid JSON object.
    pub fn load_agent_registration(&self) -> Result<AgentRegistration, StoreError> {
        read_json(&self.agent_path)
    }

    /// Overwrite the registration file.
    pub fn save_agent_registration(
        &self,
        registration: &AgentRegistration,
    ) -> Result<(), StoreError> {
        write_json(&self.agent_path, registration)
    }
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, StoreError> {
    let data = fs::read(path).map_err(|source| StoreError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_slice(&data).map_err(|source| StoreError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<(), StoreError> {
    let data = serde_json::to_vec(value).map_err(StoreError::Serialize)?;
    fs::write(path, data).map_err(|source| StoreError::Write {
        path: path.to_path_buf(),
        source,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
