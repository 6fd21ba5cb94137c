//! Packet-capture configuration — `POST /api/v2/{guid}/packetbeat/config`.

use serde::{Deserialize, Serialize};

/// The configuration file content, delivered as a single string.
///
/// ```json
/// { "data": "packetbeat.interfaces.device: any\n..." }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ConfigResponse {
    pub data: String,
}
