//! Request and response types for the Simplerity control-plane API.
//!
//! Every endpoint takes a form-encoded `POST` body whose fields are listed in
//! [`fields`], and answers with a JSON document modelled by one of the types
//! below.
//!
//! # Endpoints covered
//!
//! | Method | Path | Response |
//! |--------|------|----------|
//! | POST | `/access_token` | [`AccessTokenResponse`] |
//! | POST | `/api/v2/agents/select` | [`SelectAgentResponse`] |
//! | POST | `/api/v2/{guid}/packetbeat/config` | [`ConfigResponse`] |

pub mod agent;
pub mod fields;
pub mod packetbeat;
pub mod token;

pub use agent::SelectAgentResponse;
pub use packetbeat::ConfigResponse;
pub use token::{AccessTokenResponse, Endpoint};
