use std::fs;
use std::path::PathBuf;
use std::process::Command;
use std::time::{SystemTime, UNIX_EPOCH};

use dt_test_example::demo_dialogue_path;

fn temp_dir(name: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("time should move forward")
        .as_nanos();
    let dir = std::env::temp_dir().join(format!("dt-cli-validate-{}-{}", name, nanos));
    fs::create_dir_all(&dir).expect("temp dir should be created");
    dir
}

fn run_cli(args: &[&str]) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_dt-cli"))
        .args(args)
        .output()
        .expect("cli should run")
}

#[test]
fn validate_clean_demo_exits_zero() {
    let dialogue = demo_dialogue_path("01-vault-quest");
    let output = run_cli(&[
        "validate",
        "--file",
        dialogue.to_str().expect("path should be utf-8"),
    ]);
    assert!(output.status.success(), "clean demo should validate");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("|VALID"));
    assert!(!stdout.contains("ERROR:"));
    assert!(!stdout.contains("WARNING:"));
    assert!(stdout.contains("SUMMARY:checked=1|valid=1|invalid=0"));
}

#[test]
fn validate_broken_demo_reports_errors_and_warnings() {
    let dialogue = demo_dialogue_path("03-broken-ledger");
    let output = run_cli(&[
        "validate",
        "--file",
        dialogue.to_str().expect("path should be utf-8"),
        "--verbose",
    ]);
    assert_eq!(output.status.code(), Some(1));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("|INVALID"));
    for code in ["DANGLING_REFERENCE", "QUEST_MISSING"] {
        assert!(stdout.contains(&format!("ERROR:{}|", code)), "missing {}", code);
    }
    for code in [
        "UNREACHABLE_NODE",
        "CYCLE",
        "NAMING_NODE_ID",
        "RESPONSE_PREFIX",
        "QUEST_UNUSED",
        "QUEST_STAGE_SEQUENCE",
        "MISSING_FIELD",
    ] {
        assert!(stdout.contains(&format!("WARNING:{}|", code)), "missing {}", code);
    }
    assert!(stdout.contains("WARNING_STAT:"));
}

#[test]
fn validate_quiet_prints_only_summary() {
    let dialogue = demo_dialogue_path("03-broken-ledger");
    let output = run_cli(&[
        "validate",
        "--file",
        dialogue.to_str().expect("path should be utf-8"),
        "--quiet",
    ]);
    assert_eq!(output.status.code(), Some(1));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(!stdout.contains("FILE:"));
    assert!(stdout.starts_with("SUMMARY:checked=1|valid=0|invalid=1"));
}

#[test]
fn validate_fix_writes_upgraded_copy_into_output_dir() {
    let dialogue = demo_dialogue_path("03-broken-ledger");
    let out_dir = temp_dir("fix");
    let output = run_cli(&[
        "validate",
        "--file",
        dialogue.to_str().expect("path should be utf-8"),
        "--fix",
        "--output-dir",
        out_dir.to_str().expect("path should be utf-8"),
    ]);
    assert_eq!(output.status.code(), Some(1));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("SUGGESTION_JSON:"));
    assert!(stdout.contains("FIXED:"));

    let fixed = out_dir.join("dialogue.json");
    let recheck = run_cli(&[
        "validate",
        "--file",
        fixed.to_str().expect("path should be utf-8"),
    ]);
    let recheck_stdout = String::from_utf8_lossy(&recheck.stdout);
    assert!(!recheck_stdout.contains("WARNING:MISSING_FIELD"));
    assert!(recheck_stdout.contains("ERROR:DANGLING_REFERENCE"));
}

#[test]
fn validate_directory_applies_pattern() {
    let dir = temp_dir("dir");
    fs::copy(demo_dialogue_path("01-vault-quest"), dir.join("vault.json")).expect("copy vault");
    fs::copy(demo_dialogue_path("03-broken-ledger"), dir.join("ledger.json"))
        .expect("copy ledger");

    let all = run_cli(&["validate", "--dir", dir.to_str().expect("utf-8")]);
    assert_eq!(all.status.code(), Some(1));
    let all_stdout = String::from_utf8_lossy(&all.stdout);
    assert!(all_stdout.contains("SUMMARY:checked=2|valid=1|invalid=1|valid_percent=50.0"));

    let vault_only = run_cli(&[
        "validate",
        "--dir",
        dir.to_str().expect("utf-8"),
        "--pattern",
        "vault*.json",
    ]);
    assert!(vault_only.status.success());
}

#[test]
fn new_template_validates_cleanly() {
    let dir = temp_dir("new");
    let target = dir.join("fresh.json");
    let created = run_cli(&[
        "new",
        "--output",
        target.to_str().expect("utf-8"),
        "--title",
        "Fresh",
    ]);
    assert!(created.status.success());

    let output = run_cli(&["validate", "--file", target.to_str().expect("utf-8")]);
    assert!(output.status.success());
    assert!(!String::from_utf8_lossy(&output.stdout).contains("WARNING:"));
}

#[test]
fn validate_with_custom_schema_enforces_or_rejects_keywords() {
    let dir = temp_dir("custom-schema");
    let dialogue = demo_dialogue_path("01-vault-quest");
    let dialogue = dialogue.to_str().expect("path should be utf-8");

    let strict = dir.join("strict.schema.json");
    fs::write(
        &strict,
        r#"{"type": "object", "properties": {"starting_dialogue": {"pattern": "^intro_"}}}"#,
    )
    .expect("schema should be written");
    let output = run_cli(&[
        "validate",
        "--file",
        dialogue,
        "--schema",
        strict.to_str().expect("path should be utf-8"),
    ]);
    assert_eq!(output.status.code(), Some(1));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("ERROR:SCHEMA|"), "{}", stdout);

    let unsupported = dir.join("unsupported.schema.json");
    fs::write(&unsupported, r#"{"anyOf": [{"type": "object"}]}"#)
        .expect("schema should be written");
    let output = run_cli(&[
        "validate",
        "--file",
        dialogue,
        "--schema",
        unsupported.to_str().expect("path should be utf-8"),
    ]);
    assert_eq!(output.status.code(), Some(1));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("RESULT:ERROR"));
    assert!(stdout.contains("ERROR_CODE:VALIDATOR_SCHEMA_INVALID"));
}
