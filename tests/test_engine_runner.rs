use std::fs;
use std::os::unix::fs::PermissionsExt;

use serde_json::json;
use tempfile::TempDir;
use weir::config::EngineConfig;
use weir::errors::Error;
use weir::runner::{EngineMode, EngineRunner};

/// Stands in for the compiled sync engine: a shell script honoring the
/// stdio contract (JSON request on stdin, one JSON reply on stdout).
fn fake_engine(dir: &TempDir, body: &str) -> String {
    let path = dir.path().join("datasync");
    fs::write(&path, format!("#!/bin/sh\n{}\n", body)).unwrap();

    let mut perms = fs::metadata(&path).unwrap().permissions();
    perms.set_mode(0o755);
    fs::set_permissions(&path, perms).unwrap();

    path.to_str().unwrap().to_string()
}

fn runner(binary_path: String, timeout_secs: u64) -> EngineRunner {
    EngineRunner::new(&EngineConfig {
        binary_path,
        timeout_secs,
    })
}

#[tokio::test]
async fn test_reply_round_trips_with_mode_flag() {
    let dir = TempDir::new().unwrap();
    let path = fake_engine(
        &dir,
        r#"cat >/dev/null; echo '{"success":true,"mode":"'"$1"'","rows":42}'"#,
    );

    let reply = runner(path, 5)
        .run(EngineMode::Catalog, &json!({ "operation": "refresh_stats" }))
        .await
        .unwrap();

    assert_eq!(reply["mode"], "--catalog");
    assert_eq!(reply["rows"], 42);
}

#[tokio::test]
async fn test_reported_failure_becomes_upstream_error() {
    let dir = TempDir::new().unwrap();
    let path = fake_engine(
        &dir,
        r#"cat >/dev/null; echo '{"success":false,"error":"catalog is locked"}'"#,
    );

    let err = runner(path, 5)
        .run(EngineMode::Catalog, &json!({ "operation": "compact" }))
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Upstream(_)));
    assert!(err.to_string().contains("catalog is locked"));
}

#[tokio::test]
async fn test_nonzero_exit_surfaces_stderr() {
    let dir = TempDir::new().unwrap();
    let path = fake_engine(
        &dir,
        r#"cat >/dev/null; echo 'maintenance aborted: lock held' >&2; exit 3"#,
    );

    let err = runner(path, 5)
        .run(EngineMode::Maintenance, &json!({ "operation": "vacuum" }))
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Upstream(_)));
    assert!(err.to_string().contains("maintenance aborted: lock held"));
}

#[tokio::test]
async fn test_unparseable_reply_is_rejected() {
    let dir = TempDir::new().unwrap();
    let path = fake_engine(&dir, r#"cat >/dev/null; echo 'this is not json'"#);

    let err = runner(path, 5)
        .run(EngineMode::Monitoring, &json!({ "operation": "stats" }))
        .await
        .unwrap_err();

    assert!(err.to_string().contains("invalid engine reply"));
}

#[tokio::test]
async fn test_reply_missing_success_field_is_rejected() {
    let dir = TempDir::new().unwrap();
    let path = fake_engine(&dir, r#"cat >/dev/null; echo '{"rows":1}'"#);

    let err = runner(path, 5)
        .run(EngineMode::Security, &json!({ "operation": "audit" }))
        .await
        .unwrap_err();

    assert!(err.to_string().contains("success"));
}

#[tokio::test]
async fn test_missing_binary_is_upstream_error() {
    let err = runner("/nonexistent/datasync".to_string(), 5)
        .run(EngineMode::Security, &json!({ "operation": "audit" }))
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Upstream(_)));
    assert!(err.to_string().contains("failed to spawn"));
}

#[tokio::test]
async fn test_deadline_kills_hung_engine() {
    let dir = TempDir::new().unwrap();
    let path = fake_engine(&dir, "sleep 30");

    let started = std::time::Instant::now();
    let err = runner(path, 1)
        .run(EngineMode::Monitoring, &json!({ "operation": "stats" }))
        .await
        .unwrap_err();

    assert!(matches!(err, Error::UpstreamTimeout(_)));
    // The call returned at the deadline instead of waiting out the sleep
    assert!(started.elapsed() < std::time::Duration::from_secs(10));
}
