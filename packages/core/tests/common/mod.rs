//! In-process mock of the Simplerity API for integration tests.
//!
//! [`spawn_mock_api`] binds an ephemeral port on `127.0.0.1`, serves canned
//! JSON per path from a background thread, verifies every request signature
//! with the shared secret, and records what it received so tests can assert
//! on the exact form body and headers.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{mpsc, Arc, Mutex};

use axum::extract::State;
use axum::http::{HeaderMap, Method, StatusCode, Uri};
use axum::{Form, Router};
use simplerity::{
    sign, AgentRegistration, Config, CredentialStore, HttpTransport, Payload, Scalar, Simplerity,
};

/// One request as the mock saw it.
#[derive(Debug, Clone)]
pub struct Captured {
    pub method: Method,
    pub path: String,
    pub authorization: Option<String>,
    pub content_type: Option<String>,
    pub form: HashMap<String, String>,
}

struct MockState {
    secret: String,
    routes: HashMap<String, (u16, String)>,
    captured: Mutex<Vec<Captured>>,
}

/// Handle to a running mock API.
pub struct MockApi {
    pub base_url: String,
    state: Arc<MockState>,
}

impl MockApi {
    pub fn captured(&self) -> Vec<Captured> {
        self.state.captured.lock().unwrap().clone()
    }
}

/// Start a mock API that answers `routes` (`(path, status, body)`) and
/// rejects requests not signed with `secret` with `403`.
pub fn spawn_mock_api(secret: &str, routes: &[(&str, u16, &str)]) -> MockApi {
    let state = Arc::new(MockState {
        secret: secret.to_string(),
        routes: routes
            .iter()
            .map(|(path, status, body)| (path.to_string(), (*status, body.to_string())))
            .collect(),
        captured: Mutex::new(Vec::new()),
    });

    let (tx, rx) = mpsc::channel();
    let server_state = Arc::clone(&state);
    std::thread::spawn(move || {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .expect("build mock api runtime");
        runtime.block_on(async move {
            let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
                .await
                .expect("bind ephemeral port");
            tx.send(listener.local_addr().expect("get local addr"))
                .expect("report mock api address");
            let app = Router::new().fallback(handle).with_state(server_state);
            axum::serve(listener, app).await.expect("mock api error");
        });
    });

    let addr = rx.recv().expect("mock api address");
    MockApi {
        base_url: format!("http://{addr}"),
        state,
    }
}

async fn handle(
    State(state): State<Arc<MockState>>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    Form(form): Form<HashMap<String, String>>,
) -> (StatusCode, String) {
    let header = |name: &str| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    };
    state.captured.lock().unwrap().push(Captured {
        method,
        path: uri.path().to_string(),
        authorization: header("authorization"),
        content_type: header("content-type"),
        form: form.clone(),
    });

    let mut fields: Payload = form.into_iter().collect();
    let provided = fields.remove("signature");
    if provided != Some(Scalar::Str(sign(&fields, &state.secret))) {
        return (
            StatusCode::FORBIDDEN,
            r#"{"error":"invalid signature"}"#.to_string(),
        );
    }

    match state.routes.get(uri.path()) {
        Some((status, body)) => (
            StatusCode::from_u16(*status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
            body.clone(),
        ),
        None => (StatusCode::NOT_FOUND, r#"{"error":"not found"}"#.to_string()),
    }
}

/// A config rooted in `dir`, pointed at `api`.
pub fn config_for(dir: &tempfile::TempDir, api: &MockApi) -> Config {
    Config::default()
        .with_api_base(api.base_url.clone())
        .with_credentials(
            dir.path().join("user_credentials.json"),
            dir.path().join("agent_credentials.json"),
        )
}

/// Write the standard test registration (`api_secret = "s"`).
pub fn seed_registration(config: &Config) {
    CredentialStore::from_config(config)
        .save_agent_registration(&AgentRegistration {
            api_secret: "s".into(),
            client_id: "1".into(),
            client_secret: "c".into(),
            scope: "basic".into(),
            pc_name: "demo".into(),
            build_version: "1.0".into(),
        })
        .expect("seed registration");
}

/// The workflow over the real HTTP transport, ignoring any proxy settings in
/// the environment so requests reach the local mock.
pub fn connect(config: Config) -> Simplerity<HttpTransport> {
    let client = reqwest::blocking::Client::builder()
        .no_proxy()
        .build()
        .expect("build http client");
    Simplerity::with_transport(config, HttpTransport::with_client(client))
}
