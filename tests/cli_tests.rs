use assert_cmd::cargo::cargo_bin_cmd;
use serde_json::{Value, json};
use std::fs;
use tempfile::TempDir;

fn run_cmd(args: &[&str]) -> String {
    let output = cargo_bin_cmd!("searchbox")
        .args(args)
        .output()
        .expect("run command");
    assert!(output.status.success(), "command failed: {:?}", output);
    String::from_utf8(output.stdout).expect("utf8")
}

fn run_cmd_json(args: &[&str]) -> Value {
    serde_json::from_str(&run_cmd(args)).expect("parse json")
}

fn run_cmd_err(args: &[&str]) -> String {
    let output = cargo_bin_cmd!("searchbox")
        .args(args)
        .output()
        .expect("run command");
    assert!(!output.status.success(), "command unexpectedly succeeded: {:?}", output);
    String::from_utf8(output.stderr).expect("utf8")
}

#[test]
fn cli_check_prints_filter() {
    let filter = run_cmd_json(&["check", "status:active count:>5"]);
    assert_eq!(filter, json!({ "status": "active", "count": { "$gt": 5 } }));
}

#[test]
fn cli_check_pretty() {
    let out = run_cmd(&["check", "--pretty", "a:1"]);
    assert_eq!(out, "{\n  \"a\": 1\n}\n");
}

#[test]
fn cli_check_blank_query_prints_null() {
    assert_eq!(run_cmd(&["check", "   "]), "null\n");
}

#[test]
fn cli_check_options_file() {
    let temp = TempDir::new().expect("temp dir");
    let path = temp.path().join("fields.json");
    fs::write(
        &path,
        r#"{
            "fields": {
                "title": { "type": "string", "fulltext": true, "searchable": true },
                "tags": { "type": "string", "array": true, "searchable": true }
            }
        }"#,
    )
    .expect("write options");

    let filter = run_cmd_json(&["check", "--options", path.to_str().expect("path"), "rust"]);
    assert_eq!(
        filter,
        json!({ "$or": [
            { "title": { "$fulltext": "rust" } },
            { "tags": { "$contains": ["rust"] } }
        ]})
    );
}

#[test]
fn cli_check_inline_options() {
    let filter = run_cmd_json(&[
        "check",
        "--options-json",
        r#"{"fields": {"id": {"type": "number"}}, "aliases": {"i": "id"}}"#,
        "i:1,2",
    ]);
    assert_eq!(filter, json!({ "id": { "$in": [1, 2] } }));
}

#[test]
fn cli_check_reads_stdin() {
    let output = cargo_bin_cmd!("searchbox")
        .arg("check")
        .write_stdin("-status:archived\n")
        .output()
        .expect("run command");
    assert!(output.status.success(), "command failed: {:?}", output);
    let filter: Value = serde_json::from_slice(&output.stdout).expect("parse json");
    assert_eq!(filter, json!({ "$not": { "status": "archived" } }));
}

#[test]
fn cli_check_syntax_only() {
    assert_eq!(run_cmd(&["check", "--syntax-only", "hello world"]), "Syntax is valid\n");

    let stderr = run_cmd_err(&["check", "--syntax-only", "(a:1"]);
    assert!(stderr.contains("Syntax error"), "{stderr}");
}

#[test]
fn cli_check_reports_errors() {
    let stderr = run_cmd_err(&["check", "a:1 OR"]);
    assert!(stderr.contains("Parse error"), "{stderr}");

    let stderr = run_cmd_err(&["check", "hello"]);
    assert!(stderr.contains("searchable: true"), "{stderr}");
}

#[test]
fn cli_check_rejects_bad_options() {
    let stderr = run_cmd_err(&[
        "check",
        "--options-json",
        r#"{"fields": {"n": {"type": "number", "fulltext": true}}}"#,
        "n:1",
    ]);
    assert!(stderr.contains("Invalid options"), "{stderr}");

    let stderr = run_cmd_err(&["check", "--options", "/does/not/exist.json", "a:1"]);
    assert!(stderr.contains("/does/not/exist.json"), "{stderr}");
}

#[test]
fn cli_tokens_lists_kinds() {
    let out = run_cmd(&["tokens", "user.name:>=5"]);
    let kinds: Vec<&str> = out
        .lines()
        .filter_map(|line| line.split_whitespace().next())
        .collect();
    assert_eq!(kinds, vec!["NestedField", "GreaterThanOrEqual", "Number"]);
}

#[test]
fn cli_docs() {
    let overview = run_cmd(&["docs"]);
    assert!(overview.contains("DOCUMENTATION CATEGORIES"));

    let wildcards = run_cmd(&["doc", "wildcards"]);
    assert!(wildcards.contains("$like"));

    let stderr = run_cmd_err(&["doc", "nope"]);
    assert!(stderr.contains("Unknown category"), "{stderr}");
}
