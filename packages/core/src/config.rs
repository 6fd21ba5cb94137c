//! Client configuration.

use std::path::PathBuf;

/// Production API host.
pub const DEFAULT_API_BASE: &str = "https://api.simplerity.com";

/// Session credentials file, relative to the working directory.
pub const DEFAULT_USER_CREDENTIALS: &str = "user_credentials.json";

/// Registration credentials file, relative to the working directory.
pub const DEFAULT_AGENT_CREDENTIALS: &str = "agent_credentials.json";

/// Group filter sent with every agent selection.
pub const DEFAULT_GROUP_FILTER: &str = "ua,office-10";

/// Configuration tier requested from the config endpoint.
pub const DEFAULT_CONFIG_TIER: &str = "mid";

/// Where the workflow reads and writes state, and which API it talks to.
///
/// `Config::default()` reproduces the deployed behaviour. The CLI overrides
/// the first three fields from flags or environment variables:
///
/// | Field | Flag | Variable | Default |
/// |-------|------|----------|---------|
/// | `api_base` | `--api-base` | `SIMPLERITY_API_BASE` | `https://api.simplerity.com` |
/// | `user_credentials` | `--user-credentials` | `SIMPLERITY_USER_CREDENTIALS` | `user_credentials.json` |
/// | `agent_credentials` | `--agent-credentials` | `SIMPLERITY_AGENT_CREDENTIALS` | `agent_credentials.json` |
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Scheme and host of the API. A trailing slash is tolerated; see
    /// [`crate::routes::Routes::new`].
    pub api_base: String,

    /// Path of the session credentials file.
    pub user_credentials: PathBuf,

    /// Path of the registration credentials file.
    pub agent_credentials: PathBuf,

    pub group_filter: String,

    pub config_tier: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.into(),
            user_credentials: DEFAULT_USER_CREDENTIALS.into(),
            agent_credentials: DEFAULT_AGENT_CREDENTIALS.into(),
            group_filter: DEFAULT_GROUP_FILTER.into(),
            config_tier: DEFAULT_CONFIG_TIER.into(),
        }
    }
}

impl Config {
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    /// Replace both credential file paths.
    pub fn with_credentials(
        mut self,
        user_credentials: impl Into<PathBuf>,
        agent_credentials: impl Into<PathBuf>,
    ) -> Self {
        self.user_credentials = user_credentials.into();
        self.agent_credentials = agent_credentials.into();
        self
    }
}
