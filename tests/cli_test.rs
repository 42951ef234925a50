//! Runs the built binary against a failing `oiiotool` stand-in.
#![cfg(unix)]

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::process::Command;
use tempfile::TempDir;

const FRAME_001: &str = "DanceOfTheSugarPlumFairy_EVEE_v41_001.exr";
const FRAME_002: &str = "DanceOfTheSugarPlumFairy_EVEE_v41_002.exr";

#[test]
fn test_binary_skips_existing_and_exits_with_tool_status() {
    let tool_dir = TempDir::new().unwrap();
    let tool = tool_dir.path().join("oiiotool");
    fs::write(&tool, "#!/bin/sh\necho \"oiiotool ERROR: cannot read $1\" >&2\nexit 7\n").unwrap();
    fs::set_permissions(&tool, fs::Permissions::from_mode(0o755)).unwrap();

    let frames = TempDir::new().unwrap();
    fs::write(frames.path().join(FRAME_001), b"frame 001").unwrap();
    fs::write(frames.path().join(FRAME_002), b"frame 002").unwrap();
    fs::write(frames.path().join(format!("dark_{}", FRAME_001)), b"tagged").unwrap();

    let output = Command::new(env!("CARGO_BIN_EXE_interop-tag"))
        .arg("dark")
        .arg("--dir")
        .arg(frames.path())
        .arg("--tool")
        .arg(&tool)
        .env_remove("RUST_LOG")
        .output()
        .unwrap();

    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert_eq!(output.status.code(), Some(7), "stderr: {}", stderr);
    assert!(
        stdout.contains(&format!("Skipping {}", frames.path().join(FRAME_001).display())),
        "stdout: {}",
        stdout
    );
    assert!(stderr.contains("oiiotool ERROR: cannot read"));
    assert!(stderr.contains("exit code 7"));
    assert!(!frames.path().join(format!("dark_{}", FRAME_002)).exists());
}
