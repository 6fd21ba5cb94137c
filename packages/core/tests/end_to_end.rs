//! End-to-end tests: the real blocking HTTP transport against an in-process
//! mock API, with credential files in a temporary directory.
//!
//! | Test | Step |
//! |------|------|
//! | `login_persists_tokens_and_lists_agents` | login |
//! | `login_request_is_form_encoded_and_signed` | login |
//! | `select_persists_guid` | select |
//! | `load_writes_config_bytes` | load |
//! | `full_flow_login_select_load` | all three |
//! | `wrong_secret_is_rejected_with_status` | signing |
//! | `non_json_error_page_is_unexpected_status` | client |
//! | `unreachable_api_is_transport_error` | client |

mod common;

use std::fs;

use common::{config_for, connect, seed_registration, spawn_mock_api};
use simplerity::render::render_login;
use simplerity::{ClientError, CredentialStore, UserSession, WorkflowError};

const TOKEN_BODY: &str = r#"{"access_token":"tok","expires_in":3600,"refresh_token":"r","endpoints":[{"id":"42","title":"Agent42"}]}"#;

#[test]
fn login_persists_tokens_and_lists_agents() {
    let dir = tempfile::tempdir().unwrap();
    let api = spawn_mock_api("s", &[("/access_token", 200, TOKEN_BODY)]);
    let config = config_for(&dir, &api);
    seed_registration(&config);

    let workflow = connect(config.clone());
    let outcome = workflow.login("u", "p").unwrap();

    let saved: serde_json::Value =
        serde_json::from_slice(&fs::read(&config.user_credentials).unwrap()).unwrap();
    assert_eq!(
        saved,
        serde_json::json!({"access_token": "tok", "expires_in": 3600, "refresh_token": "r"})
    );
    assert!(render_login(&outcome.endpoints)
        .lines()
        .any(|line| line == "42: Agent42"));
}

#[test]
fn login_request_is_form_encoded_and_signed() {
    let dir = tempfile::tempdir().unwrap();
    let api = spawn_mock_api("s", &[("/access_token", 200, TOKEN_BODY)]);
    let config = config_for(&dir, &api);
    seed_registration(&config);

    connect(config).login("u", "p").unwrap();

    let captured = api.captured();
    assert_eq!(captured.len(), 1);
    let req = &captured[0];
    assert_eq!(req.method, axum::http::Method::POST);
    assert_eq!(req.path, "/access_token");
    assert_eq!(req.authorization.as_deref().unwrap_or_default(), "");
    assert_eq!(
        req.content_type.as_deref(),
        Some("application/x-www-form-urlencoded")
    );
    assert_eq!(req.form.get("grant_type").map(String::as_str), Some("password"));
    assert_eq!(req.form.get("pcName").map(String::as_str), Some("demo"));
    assert_eq!(
        req.form.get("signature").map(String::as_str),
        Some("760f0fa57780d464bc898615624b7b77be270f4226d79c55edd62ae8510ee916")
    );
}

#[test]
fn select_persists_guid() {
    let dir = tempfile::tempdir().unwrap();
    let api = spawn_mock_api(
        "s",
        &[("/api/v2/agents/select", 200, r#"{"ok":true,"guid":"G-1"}"#)],
    );
    let config = config_for(&dir, &api);
    seed_registration(&config);
    let store = CredentialStore::from_config(&config);
    let before = UserSession {
        access_token: "tok".into(),
        expires_in: 3600,
        refresh_token: "r".into(),
        agent_guid: None,
    };
    store.save_user_session(&before).unwrap();

    connect(config).select_agent("42").unwrap();

    let after = store.load_user_session();
    assert_eq!(
        after,
        UserSession {
            agent_guid: Some("G-1".into()),
            ..before
        }
    );
    let req = &api.captured()[0];
    assert_eq!(req.authorization.as_deref(), Some("tok"));
    assert_eq!(req.form.get("agentId").map(String::as_str), Some("42"));
    assert_eq!(
        req.form.get("group_name").map(String::as_str),
        Some("ua,office-10")
    );
}

#[test]
fn load_writes_config_bytes() {
    let dir = tempfile::tempdir().unwrap();
    let api = spawn_mock_api(
        "s",
        &[("/api/v2/G-1/packetbeat/config", 200, r#"{"data":"key: value"}"#)],
    );
    let config = config_for(&dir, &api);
    seed_registration(&config);
    fs::write(
        &config.user_credentials,
        br#"{"access_token":"tok","agent_guid":"G-1"}"#,
    )
    .unwrap();
    let out = dir.path().join("out.yml");

    connect(config).load_config(&out).unwrap();

    assert_eq!(fs::read(&out).unwrap(), b"key: value");
    let req = &api.captured()[0];
    assert_eq!(req.form.get("build_version").map(String::as_str), Some("1.0"));
    assert_eq!(req.form.get("config").map(String::as_str), Some("mid"));
}

#[test]
fn full_flow_login_select_load() {
    let dir = tempfile::tempdir().unwrap();
    let api = spawn_mock_api(
        "s",
        &[
            ("/access_token", 200, TOKEN_BODY),
            ("/api/v2/agents/select", 200, r#"{"ok":true,"guid":"G-1"}"#),
            (
                "/api/v2/G-1/packetbeat/config",
                200,
                r#"{"data":"packetbeat.interfaces.device: any\n"}"#,
            ),
        ],
    );
    let config = config_for(&dir, &api);
    seed_registration(&config);
    let out = dir.path().join("packetbeat.yml");

    // Separate instances: each step recovers its state from disk.
    connect(config.clone()).login("u", "p").unwrap();
    connect(config.clone()).select_agent("42").unwrap();
    connect(config).load_config(&out).unwrap();

    assert_eq!(
        fs::read_to_string(&out).unwrap(),
        "packetbeat.interfaces.device: any\n"
    );
    let paths: Vec<String> = api.captured().into_iter().map(|c| c.path).collect();
    assert_eq!(
        paths,
        vec![
            "/access_token",
            "/api/v2/agents/select",
            "/api/v2/G-1/packetbeat/config"
        ]
    );
}

#[test]
fn wrong_secret_is_rejected_with_status() {
    let dir = tempfile::tempdir().unwrap();
    let api = spawn_mock_api("a-different-secret", &[("/access_token", 200, TOKEN_BODY)]);
    let config = config_for(&dir, &api);
    seed_registration(&config);

    let err = connect(config).login("u", "p").unwrap_err();

    match err {
        WorkflowError::Request {
            source: ClientError::UnexpectedStatus { status, body },
            ..
        } => {
            assert_eq!(status, 403);
            assert!(body.contains("invalid signature"));
        }
        other => panic!("expected UnexpectedStatus, got {other:?}"),
    }
}

#[test]
fn non_json_error_page_is_unexpected_status() {
    let dir = tempfile::tempdir().unwrap();
    let api = spawn_mock_api(
        "s",
        &[("/access_token", 500, "<html>Internal Server Error</html>")],
    );
    let config = config_for(&dir, &api);
    seed_registration(&config);

    let err = connect(config).login("u", "p").unwrap_err();

    assert!(matches!(
        err,
        WorkflowError::Request {
            source: ClientError::UnexpectedStatus { status: 500, .. },
            ..
        }
    ));
}

#[test]
fn unreachable_api_is_transport_error() {
    let dir = tempfile::tempdir().unwrap();
    // Reserve a port, then free it so nothing is listening there.
    let port = std::net::TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap()
        .port();
    let config = simplerity::Config::default()
        .with_api_base(format!("http://127.0.0.1:{port}"))
        .with_credentials(
            dir.path().join("user_credentials.json"),
            dir.path().join("agent_credentials.json"),
        );
    seed_registration(&config);

    let err = connect(config).login("u", "p").unwrap_err();

    assert!(matches!(
        err,
        WorkflowError::Request {
            source: ClientError::Transport(_),
            ..
        }
    ));
}
