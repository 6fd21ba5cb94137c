//! Form field names and fixed values understood by the remote API.
//!
//! The names are part of the deployed contract: the server recomputes the
//! request signature over exactly these keys.

/// Field carrying the HMAC signature of every other field.
pub const SIGNATURE: &str = "signature";

// ── POST /access_token ────────────────────────────────────────────────────────

pub const GRANT_TYPE: &str = "grant_type";
pub const USERNAME: &str = "username";
pub const PASSWORD: &str = "password";
pub const CLIENT_ID: &str = "client_id";
pub const CLIENT_SECRET: &str = "client_secret";
pub const SCOPE: &str = "scope";
pub const PC_NAME: &str = "pcName";

/// The only grant this client performs.
pub const GRANT_PASSWORD: &str = "password";

// ── POST /api/v2/agents/select ────────────────────────────────────────────────

pub const AGENT_ID: &str = "agentId";
pub const GROUP_NAME: &str = "group_name";

// ── POST /api/v2/{guid}/packetbeat/config ─────────────────────────────────────

pub const BUILD_VERSION: &str = "build_version";
pub const CONFIG: &str = "config";
