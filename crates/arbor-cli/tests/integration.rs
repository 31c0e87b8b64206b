//! Integration tests for CLI commands.

use std::process::Command;
use tempfile::TempDir;

const UNIT_JSON: &str = r#"{
    "owner": "org:acme",
    "created_at": "2024-01-01T00:00:00Z",
    "nonce": "deadbeefdeadbeef",
    "credential": "cred_tok_1",
    "data": { "name": "ada", "age": 36, "tags": ["a", "b"] }
}"#;

const SCHEMA_JSON: &str = r#"{
    "name": "string",
    "age": "int",
    "tags": "list[string]"
}"#;

fn run_cli(args: &[&str]) -> (bool, String, String) {
    let output = Command::new("cargo")
        .args(["run", "--bin", "arbor", "--"])
        .args(args)
        .output()
        .expect("Failed to execute CLI");

    let stdout = String::from_utf8(output.stdout).unwrap();
    let stderr = String::from_utf8(output.stderr).unwrap();
    let success = output.status.success();

    (success, stdout, stderr)
}

fn write_file(dir: &TempDir, name: &str, contents: &str) -> String {
    let path = dir.path().join(name);
    std::fs::write(&path, contents).unwrap();
    path.to_string_lossy().to_string()
}

#[test]
fn test_hash_scalar() {
    let dir = TempDir::new().unwrap();
    let input = write_file(&dir, "value.json", "\"hello\"");

    let (success, stdout, _) = run_cli(&["hash", &input, "--json"]);
    assert!(success);
    let parsed: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(parsed["kind"], "str");
    assert_eq!(parsed["digest"].as_str().unwrap().len(), 64);
}

#[test]
fn test_hash_container() {
    let dir = TempDir::new().unwrap();
    let input = write_file(&dir, "list.json", r#"["a", "b", "c"]"#);

    let (success, stdout, _) = run_cli(&["hash", &input, "--json"]);
    assert!(success);
    let parsed: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(parsed["shape"], "list");
    assert_eq!(parsed["leaves"], 3);
    assert_eq!(parsed["root"].as_str().unwrap().len(), 64);
}

#[test]
fn test_hash_is_deterministic_across_runs() {
    let dir = TempDir::new().unwrap();
    let input = write_file(&dir, "value.json", "42");

    let (_, first, _) = run_cli(&["hash", &input]);
    let (_, second, _) = run_cli(&["hash", &input]);
    assert_eq!(first, second);
    assert!(first.contains("int"));
}

#[test]
fn test_hash_rejects_nested_container() {
    let dir = TempDir::new().unwrap();
    let input = write_file(&dir, "nested.json", r#"[1, [2, 3]]"#);

    let (success, _, stderr) = run_cli(&["hash", &input]);
    assert!(!success);
    assert!(stderr.contains("Error"));
}

#[test]
fn test_check_schema_valid() {
    let dir = TempDir::new().unwrap();
    let input = write_file(&dir, "schema.json", SCHEMA_JSON);

    let (success, stdout, _) = run_cli(&["check-schema", &input]);
    assert!(success);
    assert!(stdout.contains("valid"));
    assert!(!stdout.contains("invalid"));
}

#[test]
fn test_check_schema_invalid_reports_every_bad_token() {
    let dir = TempDir::new().unwrap();
    let input = write_file(
        &dir,
        "schema.json",
        r#"{ "a": "int9", "b": "list[string100]" }"#,
    );

    let (success, stdout, _) = run_cli(&["check-schema", &input, "--json"]);
    assert!(success);
    let parsed: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(parsed["valid"], false);
    let detail = parsed["detail"].as_str().unwrap();
    assert!(detail.contains("Key type 'int9' is not valid. "));
    assert!(detail.contains("Key type 'string100' is not valid. "));
}

#[test]
fn test_check_schema_strict_exits_nonzero() {
    let dir = TempDir::new().unwrap();
    let input = write_file(&dir, "schema.json", r#"{ "a": "int9" }"#);

    let (success, _, _) = run_cli(&["check-schema", &input, "--strict"]);
    assert!(!success);
}

#[test]
fn test_unit_emits_document_with_hash() {
    let dir = TempDir::new().unwrap();
    let input = write_file(&dir, "unit.json", UNIT_JSON);

    let (success, stdout, _) = run_cli(&["unit", &input]);
    assert!(success);
    let parsed: serde_json::Value = serde_json::from_str(stdout.trim()).unwrap();
    assert_eq!(parsed["owner"], "org:acme");
    assert_eq!(parsed["hash"]["alg"], "sha-256");
    assert_eq!(parsed["hash"]["hex"].as_str().unwrap().len(), 64);
}

#[test]
fn test_unit_with_schema_gate() {
    let dir = TempDir::new().unwrap();
    let unit_path = write_file(&dir, "unit.json", UNIT_JSON);
    let schema_path = write_file(&dir, "schema.json", SCHEMA_JSON);

    let (success, stdout, _) = run_cli(&["unit", &unit_path, "--schema", &schema_path]);
    assert!(success);
    assert!(stdout.contains("\"hash\""));

    // A schema that does not declare the unit's fields rejects it.
    let narrow = write_file(&dir, "narrow.json", r#"{ "name": "string" }"#);
    let (success, _, stderr) = run_cli(&["unit", &unit_path, "--schema", &narrow]);
    assert!(!success);
    assert!(stderr.contains("Unit rejected"));
}

#[test]
fn test_unit_then_verify_round_trip() {
    let dir = TempDir::new().unwrap();
    let unit_path = write_file(&dir, "unit.json", UNIT_JSON);

    let (success, stdout, _) = run_cli(&["unit", &unit_path]);
    assert!(success);

    let doc_path = write_file(&dir, "doc.json", stdout.trim());
    let (success, stdout, _) = run_cli(&["verify", &doc_path]);
    assert!(success);
    assert!(stdout.contains("ok"));
}

#[test]
fn test_verify_strict_fails_on_tampered_document() {
    let dir = TempDir::new().unwrap();
    let unit_path = write_file(&dir, "unit.json", UNIT_JSON);

    let (success, stdout, _) = run_cli(&["unit", &unit_path]);
    assert!(success);

    let mut doc: serde_json::Value = serde_json::from_str(stdout.trim()).unwrap();
    doc["data"]["name"] = serde_json::Value::String("eve".to_string());
    let doc_path = write_file(&dir, "tampered.json", &doc.to_string());

    let (success, stdout, _) = run_cli(&["verify", &doc_path]);
    assert!(success, "non-strict verify reports without failing");
    assert!(stdout.contains("mismatch"));

    let (success, _, _) = run_cli(&["verify", &doc_path, "--strict"]);
    assert!(!success);
}
