// The built binary talks to the registry store on Windows; these
// process-level tests drive it against the file-tree store only.
#![cfg(not(target_os = "windows"))]

use std::fs;
use std::path::Path;
use std::process::{Command, Output};

use pm_agent_config::settings::{AGENT_KEY, PATCH_KEY};
use tempfile::TempDir;

fn run_tool(store_root: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_pm-agent-config"))
        .args(args)
        .env("PM_AGENT_STORE_ROOT", store_root)
        .output()
        .expect("run pm-agent-config")
}

fn stored_value(root: &Path, namespace: &str, name: &str) -> Option<String> {
    let mut path = root.to_path_buf();
    for segment in namespace.split('\\') {
        path.push(segment);
    }
    fs::read_to_string(path.join(name))
        .ok()
        .map(|raw| raw.trim().to_string())
}

#[test]
fn status_on_a_pristine_store_reports_not_set_and_exits_zero() {
    let dir = TempDir::new().expect("create temp store root");
    let output = run_tool(dir.path(), &["--status"]);

    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Patch Scan Timeout: Not set"));
    assert!(stdout.contains("Thread Max CPU Usage: Not set"));
}

#[test]
fn mode_low_persists_the_preset_and_exits_zero() {
    let dir = TempDir::new().expect("create temp store root");
    let output = run_tool(dir.path(), &["--mode", "low"]);

    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("✓ Configuration applied successfully!"));

    assert_eq!(
        stored_value(dir.path(), PATCH_KEY, "Patch_scan_timeout").as_deref(),
        Some("200")
    );
    assert_eq!(
        stored_value(dir.path(), AGENT_KEY, "THRDMAXCPUUSAGE_2C").as_deref(),
        Some("15")
    );
}

#[test]
fn failed_apply_reports_the_failure_and_exits_one() {
    // A regular file where the store root should be makes every write fail.
    let dir = TempDir::new().expect("create temp dir");
    let blocked_root = dir.path().join("blocked");
    fs::write(&blocked_root, "a file, not a directory").expect("create blocking file");

    let output = run_tool(&blocked_root, &["--mode", "high"]);

    assert_eq!(output.status.code(), Some(1));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("✗ Configuration failed."));
}

#[test]
fn status_wins_when_combined_with_mode() {
    let dir = TempDir::new().expect("create temp store root");
    let output = run_tool(dir.path(), &["--status", "--mode", "high"]);

    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Thread Max CPU Usage: Not set"));
    assert!(!stdout.contains("Configuring PM Agent"));

    // The combined invocation must not touch the store.
    assert_eq!(
        stored_value(dir.path(), AGENT_KEY, "THRDMAXCPUUSAGE_2C"),
        None
    );
}

#[test]
fn no_arguments_prints_usage_and_exits_zero() {
    let dir = TempDir::new().expect("create temp store root");
    let output = run_tool(dir.path(), &[]);

    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Usage:"));
}
