use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::tempdir;

const XNODE_FUNCTIONS: [(&str, &str); 9] = [
    ("createXnode", "POST"),
    ("pushXnodeHeartbeat", "POST"),
    ("getXnodeServices", "GET"),
    ("storeXnodeSigningMessage", "POST"),
    ("updateXnode", "PUT"),
    ("getXnode", "GET"),
    ("getNodesValidatorsStats", "GET"),
    ("getXnodesWithNodesValidatorsStats", "POST"),
    ("getXnodes", "GET"),
];

fn write_env(dir: &Path, app_id: &str, token: &str) -> PathBuf {
    let path = dir.join(".env");
    let contents = format!("APPID={app_id}\nSESSIONTOKEN={token}\n");
    fs::write(&path, contents).expect("failed to write env file");
    path
}

fn write_table(dir: &Path, contents: &str) -> PathBuf {
    let path = dir.join("endpoints.yaml");
    fs::write(&path, contents).expect("failed to write table");
    path
}

/// Command with the process environment scrubbed of anything the prober reads
fn probe_cmd() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("xnode-probe"));
    for key in [
        "APPID",
        "SESSIONTOKEN",
        "XNODE_PROBE_BASE_URL",
        "XNODE_PROBE_ENV_FILE",
        "XNODE_PROBE_FORMAT",
        "XNODE_PROBE_DEBUG",
        "RUST_LOG",
    ] {
        cmd.env_remove(key);
    }
    cmd
}

#[test]
fn version_prints_package_version() -> Result<(), Box<dyn std::error::Error>> {
    probe_cmd()
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
    Ok(())
}

#[test]
fn list_shows_builtin_table_in_order() -> Result<(), Box<dyn std::error::Error>> {
    let assert = probe_cmd()
        .arg("list")
        .arg("--base-url")
        .arg("http://localhost:3003/xnodes/functions/")
        .assert()
        .success();

    let stdout = String::from_utf8_lossy(&assert.get_output().stdout);
    let lines: Vec<&str> = stdout.lines().collect();

    // Create call first, then one line per table entry
    assert_eq!(lines.len(), 10);
    assert!(lines[0].contains("http://localhost:3003/xnodes/functions/createXnode"));
    assert!(lines[0].contains("with body"));
    for (line, (name, method)) in lines[1..].iter().zip(XNODE_FUNCTIONS) {
        assert!(line.starts_with(method), "{line} should start with {method}");
        assert!(line.ends_with(&format!("/xnodes/functions/{name}")), "{line}");
    }

    Ok(())
}

#[test]
fn list_json_contains_urls() -> Result<(), Box<dyn std::error::Error>> {
    let assert = probe_cmd()
        .args(["list", "--skip-create", "--format", "json"])
        .arg("--base-url")
        .arg("http://example.test/xnodes/functions")
        .assert()
        .success();

    let stdout = String::from_utf8_lossy(&assert.get_output().stdout);
    let value: serde_json::Value = serde_json::from_str(&stdout)?;
    let data = value["data"].as_array().expect("data array");

    assert_eq!(data.len(), 9);
    assert_eq!(data[4]["endpoint"], "updateXnode");
    assert_eq!(data[4]["request"]["method"], "PUT");
    assert_eq!(
        data[4]["request"]["url"],
        "http://example.test/xnodes/functions/updateXnode"
    );
    assert!(data.iter().all(|d| d["request"].get("body").is_none()));

    Ok(())
}

#[test]
fn unknown_method_rejects_table_by_default() -> Result<(), Box<dyn std::error::Error>> {
    let temp = tempdir()?;
    let table = write_table(temp.path(), "getXnode: GET\ndeleteXnode: DELETE\n");

    probe_cmd()
        .args(["run", "--dry-run", "--table"])
        .arg(&table)
        .assert()
        .failure()
        .stderr(predicate::str::contains("DELETE"));

    Ok(())
}

#[test]
fn unknown_method_is_skipped_on_request() -> Result<(), Box<dyn std::error::Error>> {
    let temp = tempdir()?;
    let table = write_table(temp.path(), "getXnode: GET\ndeleteXnode: DELETE\n");

    let assert = probe_cmd()
        .args(["run", "--dry-run", "--skip-create", "--skip-unknown-methods", "--table"])
        .arg(&table)
        .assert()
        .success();

    let stdout = String::from_utf8_lossy(&assert.get_output().stdout);
    assert!(stdout.contains("getXnode"));
    assert!(!stdout.contains("deleteXnode"));

    Ok(())
}

#[test]
fn invalid_base_url_fails_before_sending() -> Result<(), Box<dyn std::error::Error>> {
    probe_cmd()
        .args(["run", "--base-url", "ftp://localhost/xnodes"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid base URL"));
    Ok(())
}

#[test]
fn show_headers_masks_secrets_by_default() -> Result<(), Box<dyn std::error::Error>> {
    let temp = tempdir()?;
    let env_file = write_env(temp.path(), "app-secret-1", "r:session-secret");

    let assert = probe_cmd()
        .args(["run", "--dry-run", "--show-headers", "--env-file"])
        .arg(&env_file)
        .assert()
        .success();

    let stdout = String::from_utf8_lossy(&assert.get_output().stdout);
    assert!(stdout.contains("x-parse-application-id: <redacted>"));
    assert!(!stdout.contains("app-secret-1"));
    assert!(!stdout.contains("r:session-secret"));

    Ok(())
}

#[test]
fn reveal_secrets_prints_values() -> Result<(), Box<dyn std::error::Error>> {
    let temp = tempdir()?;
    let env_file = write_env(temp.path(), "app-secret-1", "r:session-secret");

    let assert = probe_cmd()
        .args(["run", "--dry-run", "--show-headers", "--reveal-secrets", "--env-file"])
        .arg(&env_file)
        .assert()
        .success();

    let stdout = String::from_utf8_lossy(&assert.get_output().stdout);
    assert!(stdout.contains("x-parse-application-id: app-secret-1"));
    assert!(stdout.contains("x-parse-session-token: r:session-secret"));

    Ok(())
}

#[test]
fn env_file_dollar_signs_are_sent_verbatim() -> Result<(), Box<dyn std::error::Error>> {
    let temp = tempdir()?;
    let env_file = write_env(temp.path(), "app$HOME", "r:ab${USER}cd");

    let assert = probe_cmd()
        .env("HOME", "/home/ci-runner")
        .env("USER", "ci-runner")
        .args(["run", "--dry-run", "--show-headers", "--reveal-secrets", "--env-file"])
        .arg(&env_file)
        .assert()
        .success();

    let stdout = String::from_utf8_lossy(&assert.get_output().stdout);
    assert!(stdout.contains("x-parse-application-id: app$HOME"));
    assert!(stdout.contains("x-parse-session-token: r:ab${USER}cd"));
    assert!(!stdout.contains("ci-runner"));

    Ok(())
}

#[test]
fn missing_env_file_is_not_fatal() -> Result<(), Box<dyn std::error::Error>> {
    let temp = tempdir()?;

    let assert = probe_cmd()
        .args(["run", "--dry-run", "--show-headers", "--env-file"])
        .arg(temp.path().join("missing.env"))
        .assert()
        .success();

    let stdout = String::from_utf8_lossy(&assert.get_output().stdout);
    assert!(stdout.contains("x-parse-application-id: <empty>"));
    assert!(stdout.contains("x-parse-session-token: <empty>"));

    Ok(())
}

#[test]
fn transport_failures_do_not_abort_the_sweep() -> Result<(), Box<dyn std::error::Error>> {
    let temp = tempdir()?;
    let table = write_table(temp.path(), "getXnode: GET\ngetXnodes: GET\n");

    let assert = probe_cmd()
        .args(["run", "--skip-create", "--timeout", "2", "--base-url"])
        .arg("http://127.0.0.1:9/xnodes/functions/")
        .arg("--table")
        .arg(&table)
        .assert()
        .success();

    let stdout = String::from_utf8_lossy(&assert.get_output().stdout);
    assert!(stdout.contains("GET http://127.0.0.1:9/xnodes/functions/getXnode"));
    assert!(stdout.contains("GET http://127.0.0.1:9/xnodes/functions/getXnodes"));
    assert!(stdout.contains("2 transport failures"));

    Ok(())
}

#[test]
fn strict_mode_exits_non_zero_on_transport_failure() -> Result<(), Box<dyn std::error::Error>> {
    let temp = tempdir()?;
    let table = write_table(temp.path(), "getXnode: GET\n");

    probe_cmd()
        .args(["run", "--strict", "--skip-create", "--timeout", "2", "--base-url"])
        .arg("http://127.0.0.1:9/xnodes/functions/")
        .arg("--table")
        .arg(&table)
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed at the transport level"));

    Ok(())
}

// ============================================================================
// Live HTTP Tests (local mock server)
// ============================================================================

#[cfg_attr(not(feature = "http-tests"), ignore)]
#[test]
fn run_sends_one_request_per_endpoint() -> Result<(), Box<dyn std::error::Error>> {
    let mut server = mockito::Server::new();
    let base_url = format!("{}/xnodes/functions/", server.url());

    let temp = tempdir()?;
    let env_file = write_env(temp.path(), "app-123", "r:token-456");

    let create = server
        .mock("POST", "/xnodes/functions/createXnode")
        .match_header("x-parse-application-id", "app-123")
        .match_header("x-parse-session-token", "r:token-456")
        .match_header("content-type", "application/json")
        // The table's own createXnode entry hits the same path with an empty body
        .match_body(mockito::Matcher::AllOf(vec![
            mockito::Matcher::Regex(r#""name":"config.name""#.to_string()),
            mockito::Matcher::Regex(r#""description":"config.desc""#.to_string()),
            mockito::Matcher::Regex(r#""isUnit":true"#.to_string()),
            mockito::Matcher::Regex(r#""deployment_auth":"001124""#.to_string()),
            mockito::Matcher::Regex(r#""services":"\{\}""#.to_string()),
        ]))
        .with_status(201)
        .with_body(r#"{"id":"xnode-1"}"#)
        .expect(1)
        .create();

    let endpoints: Vec<mockito::Mock> = XNODE_FUNCTIONS
        .iter()
        .map(|(name, method)| {
            server
                .mock(method, format!("/xnodes/functions/{name}").as_str())
                .match_header("x-parse-application-id", "app-123")
                .match_header("x-parse-session-token", "r:token-456")
                .match_body(mockito::Matcher::Exact(String::new()))
                .with_status(401)
                .with_body(format!("unauthorized {name}"))
                .expect(1)
                .create()
        })
        .collect();

    let assert = probe_cmd()
        .args(["run", "--base-url", base_url.as_str(), "--env-file"])
        .arg(&env_file)
        .assert()
        .success();

    create.assert();
    for mock in &endpoints {
        mock.assert();
    }

    let stdout = String::from_utf8_lossy(&assert.get_output().stdout);
    assert!(stdout.contains(r#"{"id":"xnode-1"}"#));
    assert!(stdout.contains("unauthorized getXnodesWithNodesValidatorsStats"));
    assert!(stdout.contains("10 requests, 10 answered, 0 transport failures"));

    Ok(())
}

#[cfg_attr(not(feature = "http-tests"), ignore)]
#[test]
fn create_sends_only_the_create_call() -> Result<(), Box<dyn std::error::Error>> {
    let mut server = mockito::Server::new();
    let base_url = format!("{}/xnodes/functions", server.url());

    let create = server
        .mock("POST", "/xnodes/functions/createXnode")
        .match_header("x-parse-application-id", "")
        .with_status(400)
        .with_body("missing app id")
        .expect(1)
        .create();
    let others = server
        .mock("GET", mockito::Matcher::Any)
        .expect(0)
        .create();

    let temp = tempdir()?;
    let assert = probe_cmd()
        .args(["create", "--format", "json", "--base-url", base_url.as_str(), "--env-file"])
        .arg(temp.path().join("missing.env"))
        .assert()
        .success();

    create.assert();
    others.assert();

    let stdout = String::from_utf8_lossy(&assert.get_output().stdout);
    let value: serde_json::Value = serde_json::from_str(&stdout)?;
    assert_eq!(value["data"][0]["status"], 400);
    assert_eq!(value["data"][0]["body"], "missing app id");

    Ok(())
}
