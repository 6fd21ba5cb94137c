//! The three workflow operations: `login`, `select_agent`, `load_config`.
//!
//! Each call is one step of a linear state machine
//! (logged out → logged in → agent selected). Nothing is held in memory
//! between steps: every operation reloads the credential files, makes at most
//! one signed request, and writes its result back to disk.
//!
//! ```text
//! login(user, pass)   → session.{access_token, expires_in, refresh_token}
//! select_agent(id)    → session.agent_guid          (requires access_token)
//! load_config(path)   → config file at `path`       (requires access_token + agent_guid)
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use reqwest::Method;
use simplerity_api::{fields, AccessTokenResponse, ConfigResponse, Endpoint, SelectAgentResponse};
use tracing::info;

use crate::client::{ApiClient, HttpTransport, Transport};
use crate::config::Config;
use crate::credentials::{AgentRegistration, CredentialStore, UserSession};
use crate::error::WorkflowError;
use crate::payload::Payload;
use crate::routes::Routes;

/// Result of a successful [`Simplerity::login`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginOutcome {
    /// The session as saved.
    pub session: UserSession,
    /// Agents available for [`Simplerity::select_agent`].
    pub endpoints: Vec<Endpoint>,
}

/// Result of a successful [`Simplerity::select_agent`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOutcome {
    pub guid: String,
}

/// Result of a successful [`Simplerity::load_config`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadOutcome {
    pub path: PathBuf,
    pub bytes: usize,
}

/// Workflow entry point, bound to one [`Config`] and one [`Transport`].
pub struct Simplerity<T> {
    config: Config,
    store: CredentialStore,
    routes: Routes,
    client: ApiClient<T>,
}

impl Simplerity<HttpTransport> {
    /// Use the real HTTP transport.
    pub fn connect(config: Config) -> Result<Self, WorkflowError> {
        let transport = HttpTransport::new().map_err(WorkflowError::Client)?;
        Ok(Self::with_transport(config, transport))
    }
}

impl<T: Transport> Simplerity<T> {
    pub fn with_transport(config: Config, transport: T) -> Self {
        Self {
            store: CredentialStore::from_config(&config),
            routes: Routes::new(config.api_base.clone()),
            client: ApiClient::new(transport),
            config,
        }
    }

    /// Exchange a username and password for session tokens.
    ///
    /// Sends a password grant signed with the registration's `api_secret`,
    /// then stores the three token fields. A previously selected agent is
    /// kept.
    pub fn login(&self, username: &str, password: &str) -> Result<LoginOutcome, WorkflowError> {
        let registration = self.registration()?;
        let mut session = self.store.load_user_session();

        let payload = Payload::new()
            .with(fields::GRANT_TYPE, fields::GRANT_PASSWORD)
            .with(fields::USERNAME, username)
            .with(fields::PASSWORD, password)
            .with(fields::CLIENT_ID, &registration.client_id)
            .with(fields::CLIENT_SECRET, &registration.client_secret)
            .with(fields::SCOPE, &registration.scope)
            .with(fields::PC_NAME, &registration.pc_name);

        let resp: AccessTokenResponse = self
            .client
            .request(
                Method::POST,
                &self.routes.access_token_url(),
                "",
                payload,
                &registration.api_secret,
            )
            .map_err(|source| WorkflowError::Request {
                operation: "request access_token",
                source,
            })?;

        session.access_token = resp.access_token;
        session.expires_in = resp.expires_in;
        session.refresh_token = resp.refresh_token;
        self.store
            .save_user_session(&session)
            .map_err(WorkflowError::Session)?;

        info!(endpoints = resp.endpoints.len(), "logged in");
        Ok(LoginOutcome {
            session,
            endpoints: resp.endpoints,
        })
    }

    /// Select the agent whose configuration `load_config` will fetch.
    ///
    /// # Errors
    ///
    /// [`WorkflowError::NotLoggedIn`] without sending anything if the session
    /// has no access token; [`WorkflowError::Rejected`] if the API answers
    /// `ok: false`.
    pub fn select_agent(&self, agent_id: &str) -> Result<SelectOutcome, WorkflowError> {
        let registration = self.registration()?;
        let mut session = self.store.load_user_session();
        if !session.is_authenticated() {
            return Err(WorkflowError::NotLoggedIn);
        }

        let payload = Payload::new()
            .with(fields::AGENT_ID, agent_id)
            .with(fields::GROUP_NAME, &self.config.group_filter);

        let resp: SelectAgentResponse = self
            .client
            .request(
                Method::POST,
                &self.routes.select_agent_url(),
                &session.access_token,
                payload,
                &registration.api_secret,
            )
            .map_err(|source| WorkflowError::Request {
                operation: "select agent",
                source,
            })?;

        if !resp.ok {
            return Err(WorkflowError::Rejected {
                operation: "select agent",
                response: serde_json::to_string(&resp).unwrap_or_else(|_| format!("{resp:?}")),
            });
        }

        session.agent_guid = Some(resp.guid.clone());
        self.store
            .save_user_session(&session)
            .map_err(WorkflowError::Session)?;

        info!(agent_id, guid = %resp.guid, "agent selected");
        Ok(SelectOutcome { guid: resp.guid })
    }

    /// Download the selected agent's configuration and write it to `output`
    /// verbatim.
    ///
    /// # Errors
    ///
    /// [`WorkflowError::NotLoggedIn`] or [`WorkflowError::NoAgentSelected`]
    /// without sending anything when the session lacks the matching field.
    pub fn load_config(&self, output: &Path) -> Result<LoadOutcome, WorkflowError> {
        let registration = self.registration()?;
        let session = self.store.load_user_session();
        if !session.is_authenticated() {
            return Err(WorkflowError::NotLoggedIn);
        }
        let guid = session
            .selected_agent()
            .ok_or(WorkflowError::NoAgentSelected)?;

        let payload = Payload::new()
            .with(fields::BUILD_VERSION, &registration.build_version)
            .with(fields::CONFIG, &self.config.config_tier);

        let resp: ConfigResponse = self
            .client
            .request(
                Method::POST,
                &self.routes.packetbeat_config_url(guid),
                &session.access_token,
                payload,
                &registration.api_secret,
            )
            .map_err(|source| WorkflowError::Request {
                operation: "request packetbeat config",
                source,
            })?;

        fs::write(output, resp.data.as_bytes()).map_err(|source| WorkflowError::WriteConfig {
            path: output.to_path_buf(),
            source,
        })?;

        info!(path = %output.display(), bytes = resp.data.len(), "config saved");
        Ok(LoadOutcome {
            path: output.to_path_buf(),
            bytes: resp.data.len(),
        })
    }

    fn registration(&self) -> Result<AgentRegistration, WorkflowError> {
        self.store
            .load_agent_registration()
            .map_err(WorkflowError::Registration)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
