//! Agent selection — `POST /api/v2/agents/select`.

use serde::{Deserialize, Serialize};

/// Response to an agent selection request.
///
/// `ok: false` is an application-level refusal; the whole document is then
/// echoed back to the user, so unknown fields are kept in `extra`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SelectAgentResponse {
    #[serde(default)]
    pub ok: bool,

    /// Identifier used in the per-agent config path. Empty on refusal.
    #[serde(default)]
    pub guid: String,

    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}
