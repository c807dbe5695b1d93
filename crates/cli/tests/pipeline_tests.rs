// Integration tests for the full reconciliation run.
// Run with: cargo test -p namereserve-cli --test pipeline_tests -- --nocapture

use std::path::Path;
use std::process::Command;

use tempfile::TempDir;

fn namereserve() -> Command {
    Command::new(env!("CARGO_BIN_EXE_namereserve"))
}

const EMPTY_GRANT: &str = "[]";
const EMPTY_ICP123: &str = r#"{"pageProps": {"projectData": []}}"#;
const EMPTY_ICAPP: &str = r#"{"valueRanges": [{"values": []}]}"#;
const EMPTY_SHOWCASE: &str = r#"{"result": {"data": {"page": {"projects": []}}}}"#;

fn write(dir: &Path, rel: &str, text: &str) {
    std::fs::write(dir.join(rel), text).unwrap();
}

fn read(dir: &Path, rel: &str) -> String {
    std::fs::read_to_string(dir.join(rel)).unwrap()
}

/// Fresh working directory with all four feeds present but empty.
fn workspace() -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    std::fs::create_dir(dir.path().join("projects")).unwrap();
    write(dir.path(), "projects/grant_20240101.json", EMPTY_GRANT);
    write(dir.path(), "projects/icp123_20240101.json", EMPTY_ICP123);
    write(dir.path(), "projects/icapp_20240101.json", EMPTY_ICAPP);
    write(dir.path(), "projects/showcase_20240101.json", EMPTY_SHOWCASE);
    dir
}

fn run_in(dir: &TempDir) -> std::process::Output {
    namereserve()
        .args(["run", "--dir", dir.path().to_str().unwrap()])
        .output()
        .expect("namereserve run")
}

#[test]
fn reserved_names_only_end_to_end() {
    let dir = workspace();
    write(dir.path(), "reserved.txt", "alice\nbob\n");

    let output = run_in(&dir);
    assert!(
        output.status.success(),
        "exit: {:?}\nstderr: {}",
        output.status,
        String::from_utf8_lossy(&output.stderr)
    );

    let state: serde_json::Value = serde_json::from_str(&read(dir.path(), "reserved.json")).unwrap();
    let records = state.as_array().unwrap();
    assert_eq!(records.len(), 2);
    for (record, name) in records.iter().zip(["alice", "bob"]) {
        assert_eq!(record["id"], *name);
        assert_eq!(record["icnaming"], *name);
        assert_eq!(record["recommend_url"], *name);
        assert_eq!(record["type"], "reserved");
        assert_eq!(record["title"], "");
    }

    assert_eq!(
        read(dir.path(), "reserved_list.csv"),
        "icnaming,id\nalice,alice\nbob,bob\n"
    );
    assert_eq!(
        read(dir.path(), "reserved_list.rs"),
        "pub const RESERVED_NAMES: &[&str] = &[\n    \"alice\",\n    \"bob\",\n];\n"
    );

    let csv = read(dir.path(), "reserved.csv");
    assert!(csv.starts_with("id,title,summary,grant,icnaming,recommend_url,type,url\n"));
    assert!(csv.contains("alice,,,,alice,alice,reserved,\n"));

    // No prior state, so no backup either.
    assert!(!dir.path().join("reserved.json.bak").exists());
}

#[test]
fn second_run_is_byte_identical_and_backs_up_state() {
    let dir = workspace();
    write(
        dir.path(),
        "projects/grant_20240101.json",
        r#"[{"grantee": "Foo Bar", "summary": "infra", "grant": 50000}]"#,
    );
    write(dir.path(), "reserved.txt", "alice\n");

    assert!(run_in(&dir).status.success());
    let first_json = read(dir.path(), "reserved.json");
    let first_csv = read(dir.path(), "reserved.csv");

    assert!(run_in(&dir).status.success());
    assert_eq!(read(dir.path(), "reserved.json"), first_json);
    assert_eq!(read(dir.path(), "reserved.csv"), first_csv);

    // Second run backed up the first run's state before overwriting it.
    assert_eq!(read(dir.path(), "reserved.json.bak"), first_json);
}

#[test]
fn invalid_key_aborts_before_reserved_list_artifacts() {
    let dir = workspace();
    write(dir.path(), "reserved.txt", "Alice\n");

    let output = run_in(&dir);
    assert_eq!(output.status.code(), Some(5));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Alice"), "diagnostic should name the key: {stderr}");

    // Canonical artifacts from this run are on disk; the reserved-list
    // files were never written.
    assert!(dir.path().join("reserved.json").exists());
    assert!(dir.path().join("reserved.csv").exists());
    assert!(!dir.path().join("reserved_list.csv").exists());
    assert!(!dir.path().join("reserved_list.rs").exists());
}

#[test]
fn stale_reserved_list_survives_validation_failure() {
    let dir = workspace();
    write(dir.path(), "reserved.txt", "alice\n");
    assert!(run_in(&dir).status.success());
    let good_list = read(dir.path(), "reserved_list.csv");

    write(dir.path(), "reserved.txt", "alice\nBAD KEY\n");
    let output = run_in(&dir);
    assert_eq!(output.status.code(), Some(5));
    assert_eq!(read(dir.path(), "reserved_list.csv"), good_list);
}

#[test]
fn corrupt_state_file_is_fatal_but_backed_up_first() {
    let dir = workspace();
    write(dir.path(), "reserved.json", "{not json");

    let output = run_in(&dir);
    assert_eq!(output.status.code(), Some(4));
    // The backup is taken before the state is parsed.
    assert_eq!(read(dir.path(), "reserved.json.bak"), "{not json");
}

#[test]
fn missing_feed_is_fatal() {
    let dir = workspace();
    std::fs::remove_file(dir.path().join("projects/grant_20240101.json")).unwrap();

    let output = run_in(&dir);
    assert_eq!(output.status.code(), Some(3));
    assert!(String::from_utf8_lossy(&output.stderr).contains("grant"));
}

#[test]
fn malformed_feed_is_fatal() {
    let dir = workspace();
    write(dir.path(), "projects/grant_20240101.json", r#"{"oops": 1}"#);

    let output = run_in(&dir);
    assert_eq!(output.status.code(), Some(4));
}

#[test]
fn prior_state_wins_over_fresh_feed() {
    let dir = workspace();
    write(
        dir.path(),
        "reserved.json",
        r#"[{"id":"x","title":"Old","summary":"","grant":"","icnaming":"","recommend_url":"","type":"grant","url":""}]"#,
    );
    write(
        dir.path(),
        "projects/grant_20240101.json",
        r#"[{"grantee": "X", "summary": "fresh", "grant": 100}]"#,
    );

    assert!(run_in(&dir).status.success());
    let state: serde_json::Value = serde_json::from_str(&read(dir.path(), "reserved.json")).unwrap();
    let records = state.as_array().unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0]["title"], "Old");
}

#[test]
fn multiple_dated_exports_merge_in_path_order() {
    let dir = workspace();
    write(
        dir.path(),
        "projects/grant_20240101.json",
        r#"[{"grantee": "early", "summary": "first", "grant": ""}]"#,
    );
    write(
        dir.path(),
        "projects/grant_20240201.json",
        r#"[{"grantee": "early", "summary": "second", "grant": ""}, {"grantee": "late", "summary": "", "grant": ""}]"#,
    );

    assert!(run_in(&dir).status.success());
    let state: serde_json::Value = serde_json::from_str(&read(dir.path(), "reserved.json")).unwrap();
    let records = state.as_array().unwrap();
    assert_eq!(records.len(), 2);
    let early = records.iter().find(|r| r["id"] == "early").unwrap();
    assert_eq!(early["summary"], "first");
}

#[test]
fn config_file_overrides_paths() {
    let dir = workspace();
    std::fs::rename(dir.path().join("projects"), dir.path().join("feeds")).unwrap();
    write(dir.path(), "paths.toml", "projects_dir = \"feeds\"\n");
    write(dir.path(), "reserved.txt", "alice\n");

    let output = namereserve()
        .args(["run", "--dir", dir.path().to_str().unwrap()])
        .arg("--config")
        .arg(dir.path().join("paths.toml"))
        .output()
        .expect("namereserve run --config");
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    assert!(dir.path().join("reserved_list.csv").exists());
}

#[test]
fn bare_invocation_uses_fixed_paths() {
    let dir = workspace();
    write(dir.path(), "reserved.txt", "solo\n");

    let output = namereserve()
        .current_dir(dir.path())
        .output()
        .expect("namereserve");
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    assert_eq!(read(dir.path(), "reserved_list.csv"), "icnaming,id\nsolo,solo\n");
}

#[test]
fn validate_accepts_defaults_and_rejects_bad_toml() {
    let ok = namereserve().arg("validate").output().expect("validate");
    assert!(ok.status.success());

    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "bad.toml", "records_csv = \"same\"\nrecords_json = \"same\"\n");
    let bad = namereserve()
        .arg("validate")
        .arg("--config")
        .arg(dir.path().join("bad.toml"))
        .output()
        .expect("validate --config");
    assert_eq!(bad.status.code(), Some(2));

    write(dir.path(), "typo.toml", "project_dir = \"feeds\"\n");
    let typo = namereserve()
        .arg("validate")
        .arg("--config")
        .arg(dir.path().join("typo.toml"))
        .output()
        .expect("validate --config");
    assert_eq!(typo.status.code(), Some(2));
}
