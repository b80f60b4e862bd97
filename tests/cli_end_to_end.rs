#![deny(clippy::all, clippy::pedantic)]

use assert_cmd::Command;
use httpmock::MockServer;
use predicates::prelude::*;
use predicates::str::contains;
use serde_json::json;
use std::io::Write;
use tempfile::{NamedTempFile, TempDir};

fn penpost(server: &MockServer, store: &TempDir) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("penpost"));
    cmd.env_remove("RUST_LOG")
        .env_remove("PENPOST_CONFIG_FILE")
        .arg("--backend-url")
        .arg(server.base_url())
        .arg("--token-store")
        .arg(store.path().join("storage.json"));
    cmd
}

fn store_token(server: &MockServer, store: &TempDir, token: &str) {
    penpost(server, store)
        .args(["token", "set", token])
        .assert()
        .success();
}

#[test]
fn edit_prints_detail_route() {
    let server = MockServer::start();
    let store = TempDir::new().expect("tmp dir");
    store_token(&server, &store, "secret");

    let fetch = server.mock(|when, then| {
        when.method("GET")
            .path("/api/v1/blog/42")
            .header("authorization", "secret");
        then.status(200)
            .header("content-type", "application/json")
            .body(r#"{"id":42,"title":"Hi","content":"World"}"#);
    });
    let update = server.mock(|when, then| {
        when.method("PUT")
            .path("/api/v1/blog/update/42")
            .header("authorization", "secret")
            .json_body(json!({"title": "Hello", "content": "World"}));
        then.status(200);
    });

    penpost(&server, &store)
        .args(["edit", "42", "--title", "Hello"])
        .assert()
        .success()
        .stdout(contains("/blog/42"));

    fetch.assert();
    update.assert();
}

#[test]
fn edit_reads_content_from_file() {
    let server = MockServer::start();
    let store = TempDir::new().expect("tmp dir");
    let mut body = NamedTempFile::new().expect("tmp file");
    body.write_all(b"From disk").expect("write body");

    let update = server.mock(|when, then| {
        when.method("PUT")
            .path("/api/v1/blog/update/5")
            .json_body(json!({"title": "T", "content": "From disk"}));
        then.status(204);
    });

    penpost(&server, &store)
        .args(["edit", "5", "--title", "T", "--content-file"])
        .arg(body.path())
        .assert()
        .success()
        .stdout(contains("/blog/5"));

    update.assert();
}

#[test]
fn denied_update_exits_with_failure() {
    let server = MockServer::start();
    let store = TempDir::new().expect("tmp dir");
    server.mock(|when, then| {
        when.method("PUT").path("/api/v1/blog/update/3");
        then.status(401);
    });

    penpost(&server, &store)
        .args(["edit", "3", "--title", "T", "--content", "C"])
        .assert()
        .code(1)
        .stderr(contains(
            "Access denied: You do not have permission to update this blog.",
        ));
}

#[test]
fn denied_update_message_survives_silenced_logging() {
    let server = MockServer::start();
    let store = TempDir::new().expect("tmp dir");
    server.mock(|when, then| {
        when.method("PUT").path("/api/v1/blog/update/7");
        then.status(403);
    });

    penpost(&server, &store)
        .args(["--log-level", "off", "edit", "7", "--title", "T", "--content", "C"])
        .assert()
        .code(1)
        .stdout("")
        .stderr(contains(
            "Access denied: You do not have permission to update this blog.",
        ));
}

#[test]
fn delete_with_yes_prints_listing_route() {
    let server = MockServer::start();
    let store = TempDir::new().expect("tmp dir");
    let mock = server.mock(|when, then| {
        when.method("DELETE").path("/api/v1/blog/delete/42");
        then.status(200);
    });

    penpost(&server, &store)
        .args(["delete", "42", "--yes"])
        .assert()
        .success()
        .stdout(contains("/blogs"));

    mock.assert();
}

#[test]
fn delete_declined_at_prompt_is_cancelled() {
    let server = MockServer::start();
    let store = TempDir::new().expect("tmp dir");

    penpost(&server, &store)
        .args(["delete", "42"])
        .write_stdin("no\n")
        .assert()
        .code(1)
        .stdout(contains("/blogs").not());
}

#[test]
fn publish_prints_created_route() {
    let server = MockServer::start();
    let store = TempDir::new().expect("tmp dir");
    let mock = server.mock(|when, then| {
        when.method("POST")
            .path("/api/v1/blog/create")
            .json_body(json!({"title": "Fresh", "content": "Post"}));
        then.status(201)
            .header("content-type", "application/json")
            .body(r#"{"id":"p-9"}"#);
    });

    penpost(&server, &store)
        .args(["publish", "--title", "Fresh", "--content", "Post"])
        .assert()
        .success()
        .stdout(contains("/blog/p-9"));

    mock.assert();
}

#[test]
fn publish_failure_reports_alert() {
    let server = MockServer::start();
    let store = TempDir::new().expect("tmp dir");
    server.mock(|when, then| {
        when.method("POST").path("/api/v1/blog/create");
        then.status(500).body("boom");
    });

    penpost(&server, &store)
        .args(["publish", "--title", "Fresh", "--content", "Post"])
        .assert()
        .code(1)
        .stderr(contains("Failed to publish the post. Please try again."));
}

#[test]
fn publish_failure_alert_is_printed_once() {
    let server = MockServer::start();
    let store = TempDir::new().expect("tmp dir");
    server.mock(|when, then| {
        when.method("POST").path("/api/v1/blog/create");
        then.status(500);
    });

    let assert = penpost(&server, &store)
        .args(["publish", "--title", "Fresh", "--content", "Post"])
        .assert()
        .code(1);

    let stderr = String::from_utf8_lossy(&assert.get_output().stderr);
    assert_eq!(
        stderr
            .matches("Failed to publish the post. Please try again.")
            .count(),
        1,
        "stderr: {stderr}"
    );
}

#[test]
fn token_show_prints_stored_token() {
    let server = MockServer::start();
    let store = TempDir::new().expect("tmp dir");
    store_token(&server, &store, "abc123");

    penpost(&server, &store)
        .args(["token", "show"])
        .assert()
        .success()
        .stdout(contains("abc123"));
}

#[test]
fn invalid_backend_url_is_a_config_error() {
    let store = TempDir::new().expect("tmp dir");
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("penpost"));
    cmd.env_remove("RUST_LOG")
        .arg("--backend-url")
        .arg("ftp://example.com")
        .arg("--token-store")
        .arg(store.path().join("storage.json"))
        .args(["token", "show"])
        .assert()
        .code(2)
        .stderr(contains("backend.base_url"));
}
