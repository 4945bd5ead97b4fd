#![cfg(feature = "cli")]

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

fn schedctl(args: &[&str], dir: &Path) -> Output {
    Command::new(PathBuf::from(env!("CARGO_BIN_EXE_schedctl")))
        .args(args)
        .current_dir(dir)
        .env_remove("SCHEDCTL_CONFIG")
        .env_remove("RUST_LOG")
        .output()
        .unwrap()
}

fn write_layers(dir: &Path) {
    std::fs::write(
        dir.join("org.yaml"),
        "kind: Scheduler\nmetadata:\n  name: org\nspec:\n  plugins:\n    items: [approve, lgtm]\n",
    )
    .unwrap();
    std::fs::write(dir.join("repo.json"), r#"{"plugins":{"items":["hold"]}}"#).unwrap();
}

#[test]
fn resolve_json_with_fingerprint_keeps_stdout_parseable() {
    let dir = tempfile::tempdir().unwrap();
    write_layers(dir.path());

    let out = schedctl(
        &["resolve", "org.yaml", "repo.json", "-o", "json", "--fingerprint"],
        dir.path(),
    );
    assert!(out.status.success(), "stderr: {}", String::from_utf8_lossy(&out.stderr));

    let doc: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(doc["plugins"]["items"], serde_json::json!(["hold", "approve", "lgtm"]));

    let stderr = String::from_utf8_lossy(&out.stderr);
    let line = stderr
        .lines()
        .find(|l| l.starts_with("fingerprint: "))
        .unwrap();
    assert_eq!(line.trim_start_matches("fingerprint: ").len(), 64);
}

#[test]
fn resolve_yaml_is_default_output() {
    let dir = tempfile::tempdir().unwrap();
    write_layers(dir.path());

    let out = schedctl(&["resolve", "org.yaml", "repo.json"], dir.path());
    assert!(out.status.success());

    let doc: serde_yaml::Value = serde_yaml::from_slice(&out.stdout).unwrap();
    assert_eq!(doc["plugins"]["items"][0].as_str(), Some("hold"));
}

#[test]
fn validate_rejects_unknown_section() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("typo.yaml"), "presubmit:\n  items: []\n").unwrap();

    let out = schedctl(&["validate", "typo.yaml"], dir.path());
    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("typo.yaml"));
}
