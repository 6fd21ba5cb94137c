//! Error type returned by the workflow operations.
//!
//! Every failure surfaces as a [`WorkflowError`]; the binary prints it and
//! exits non-zero. The precondition variants carry the command the user has
//! to run first.

use std::path::PathBuf;

use thiserror::Error;

use crate::client::ClientError;
use crate::credentials::StoreError;

/// A failed `login`, `select`, or `load`.
#[derive(Debug, Error)]
pub enum WorkflowError {
    /// The registration file is missing or malformed.
    #[error("unable to load agent credentials: {0}")]
    Registration(#[source] StoreError),

    /// The updated session could not be written.
    #[error("unable to save user credentials: {0}")]
    Session(#[source] StoreError),

    /// No access token in the session.
    #[error("you should run `simplerity login --login YOUR_LOGIN --password YOUR_PASSWORD` first")]
    NotLoggedIn,

    /// No agent guid in the session.
    #[error("you should run `simplerity select --agent AGENT_ID` first")]
    NoAgentSelected,

    /// The HTTP client could not be created.
    #[error("unable to initialise http client: {0}")]
    Client(#[source] ClientError),

    /// The API call failed at the transport, status, or decode stage.
    #[error("unable to {operation}: {source}")]
    Request {
        operation: &'static str,
        #[source]
        source: ClientError,
    },

    /// The API answered but refused the operation. `response` is the
    /// answer as JSON.
    #[error("unable to {operation}: {response}")]
    Rejected {
        operation: &'static str,
        response: String,
    },

    /// The downloaded configuration could not be written.
    #[error("unable to save packetbeat config to {}: {source}", path.display())]
    WriteConfig {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl WorkflowError {
    /// `true` for errors raised before any request was sent because an
    /// earlier step has not been run.
    pub fn is_precondition(&self) -> bool {
        matches!(self, WorkflowError::NotLoggedIn | WorkflowError::NoAgentSelected)
    }
}
