//! URL helpers for the three API endpoints.
//!
//! Pure string computation; [`crate::client::ApiClient`] performs the calls.

use urlencoding::encode;

/// Endpoint URLs rooted at one API base.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Routes {
    /// e.g. `https://api.simplerity.com`, never with a trailing slash.
    pub api_base: String,
}

impl Routes {
    pub fn new(api_base: impl Into<String>) -> Self {
        Self {
            api_base: api_base.into().trim_end_matches('/').to_string(),
        }
    }

    /// `{api_base}/access_token`
    pub fn access_token_url(&self) -> String {
        format!("{}/access_token", self.api_base)
    }

    /// `{api_base}/api/v2/agents/select`
    pub fn select_agent_url(&self) -> String {
        format!("{}/api/v2/agents/select", self.api_base)
    }

    /// `{api_base}/api/v2/{agent_guid_encoded}/packetbeat/config`
    pub fn packetbeat_config_url(&self, agent_guid: &str) -> String {
        format!(
            "{}/api/v2/{}/packetbeat/config",
            self.api_base,
            encode(agent_guid)
        )
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
