//! Password grant — `POST /access_token`.

use std::fmt;

use serde::{Deserialize, Serialize};

/// An agent the authenticated user may select.
///
/// Rendered as `"{id}: {title}"`, the form the user copies into
/// `select --agent`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Endpoint {
    pub id: String,
    pub title: String,
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.id, self.title)
    }
}

/// Successful response to the password grant.
///
/// # Example
///
/// ```json
/// {
///   "access_token": "tok",
///   "expires_in": 3600,
///   "refresh_token": "r",
///   "endpoints": [{ "id": "42", "title": "Agent42" }]
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AccessTokenResponse {
    pub access_token: String,

    /// Token lifetime in seconds. Informational only; nothing enforces it.
    pub expires_in: i64,

    pub refresh_token: String,

    /// Agents visible to the user. Absent means none.
    #[serde(default)]
    pub endpoints: Vec<Endpoint>,
}
