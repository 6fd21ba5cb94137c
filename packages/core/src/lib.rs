//! Command-line integration with the Simplerity control-plane.
//!
//! This crate signs and sends API requests, keeps the two local credential
//! files, and implements the three steps a user runs to fetch a packet-capture
//! configuration for a managed agent: `login`, `select`, `load`. The `simplerity`
//! binary in `simplerity-cli` is a thin wrapper around [`Simplerity`].
//!
//! # Crate layout
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`payload`] | [`Payload`]: sorted field map of [`Scalar`] values |
//! | [`signing`] | HMAC-SHA256 request signatures via [`sign`] |
//! | [`routes`] | Endpoint URL construction |
//! | [`client`] | [`ApiClient`] and the [`Transport`] seam |
//! | [`credentials`] | [`CredentialStore`], [`UserSession`], [`AgentRegistration`] |
//! | [`workflow`] | [`Simplerity`]: `login`, `select_agent`, `load_config` |
//! | [`render`] | Messages printed after each step |
//! | [`config`] | [`Config`]: API base and file locations |
//! | [`error`] | [`WorkflowError`] |
//!
//! # Quick start
//!
//! ```rust,ignore
//! use simplerity::{Config, Simplerity};
//!
//! let workflow = Simplerity::connect(Config::default())?;
//! let outcome = workflow.login("user", "secret")?;
//! print!("{}", simplerity::render::render_login(&outcome.endpoints));
//! ```

pub mod client;
pub mod config;
pub mod credentials;
pub mod error;
pub mod payload;
pub mod render;
pub mod routes;
pub mod signing;
pub mod workflow;

pub use client::{ApiClient, ClientError, HttpTransport, RawResponse, Transport};
pub use config::Config;
pub use credentials::{AgentRegistration, CredentialStore, StoreError, UserSession};
pub use error::WorkflowError;
pub use payload::{Payload, Scalar};
pub use routes::Routes;
pub use signing::sign;
pub use workflow::{LoadOutcome, LoginOutcome, SelectOutcome, Simplerity};
