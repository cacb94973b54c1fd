//! End-to-end tests for input-source dispatch.
//!
//! These run the real binary and point `--tool` at small shell scripts
//! so the external comparator is observable and deterministic.

#![cfg(unix)]

use std::fs;
use std::io::Write;
use std::os::unix::fs::PermissionsExt;
use std::path::PathBuf;
use std::process::{Command, Stdio};

use tempfile::TempDir;

fn anydiff_cmd(config_home: &TempDir) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_anydiff"));
    // Keep the test hermetic: never pick up the developer's real config.
    cmd.env("XDG_CONFIG_HOME", config_home.path());
    cmd.env_remove("ANYDIFF_TOOL");
    cmd
}

fn write_script(dir: &TempDir, name: &str, body: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();
    fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
    path
}

/// Tool that prints `arg:<first-arg>` when given an argument, otherwise
/// echoes its stdin.
fn recording_tool(dir: &TempDir) -> PathBuf {
    write_script(
        dir,
        "record.sh",
        "if [ $# -gt 0 ]; then printf 'arg:%s\\n' \"$1\"; else cat; fi",
    )
}

#[test]
fn file_argument_is_passed_to_the_tool() {
    let dir = TempDir::new().unwrap();
    let tool = recording_tool(&dir);
    let file = dir.path().join("a.txt");
    fs::write(&file, "contents\n").unwrap();

    let output = anydiff_cmd(&dir)
        .arg("--tool")
        .arg(&tool)
        .arg(&file)
        .stdin(Stdio::null())
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success(), "stderr: {:?}", output.stderr);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(stdout, format!("arg:{}\n", file.display()));
}

#[test]
fn piped_stdin_is_forwarded_verbatim() {
    let dir = TempDir::new().unwrap();
    let tool = recording_tool(&dir);

    let mut child = anydiff_cmd(&dir)
        .arg("--tool")
        .arg(&tool)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .spawn()
        .expect("Failed to execute command");

    child
        .stdin
        .take()
        .unwrap()
        .write_all(b"line1\nline2\n")
        .unwrap();
    let output = child.wait_with_output().unwrap();

    assert!(output.status.success());
    assert_eq!(output.stdout, b"line1\nline2\n");
}

#[test]
fn redirected_file_counts_as_a_stream() {
    let dir = TempDir::new().unwrap();
    let tool = recording_tool(&dir);
    let input = dir.path().join("input.txt");
    fs::write(&input, "from a redirect\n").unwrap();

    let output = anydiff_cmd(&dir)
        .arg("--tool")
        .arg(&tool)
        .stdin(fs::File::open(&input).unwrap())
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    assert_eq!(output.stdout, b"from a redirect\n");
}

#[test]
fn dev_null_stdin_selects_nothing() {
    let dir = TempDir::new().unwrap();
    let tool = recording_tool(&dir);

    let output = anydiff_cmd(&dir)
        .arg("--tool")
        .arg(&tool)
        .stdin(Stdio::null())
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(2));
    assert!(output.stdout.is_empty(), "tool must not be invoked");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("no input source"), "stderr: {stderr}");
}

#[test]
fn tool_exit_code_is_mirrored() {
    let dir = TempDir::new().unwrap();
    let tool = write_script(&dir, "fail.sh", "exit 42");
    let file = dir.path().join("a.txt");
    fs::write(&file, "x\n").unwrap();

    let output = anydiff_cmd(&dir)
        .arg("--tool")
        .arg(&tool)
        .arg(&file)
        .stdin(Stdio::null())
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(42));
}

#[test]
fn missing_tool_exits_with_command_not_found() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("a.txt");
    fs::write(&file, "x\n").unwrap();

    let output = anydiff_cmd(&dir)
        .arg("--tool")
        .arg("/nonexistent/anydiff-tool")
        .arg(&file)
        .stdin(Stdio::null())
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(127));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("failed to start"), "stderr: {stderr}");
}

#[test]
fn env_var_selects_the_tool() {
    let dir = TempDir::new().unwrap();
    let tool = recording_tool(&dir);
    let file = dir.path().join("a.txt");
    fs::write(&file, "x\n").unwrap();

    let output = anydiff_cmd(&dir)
        .env("ANYDIFF_TOOL", &tool)
        .arg(&file)
        .stdin(Stdio::null())
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success(), "stderr: {:?}", output.stderr);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(stdout, format!("arg:{}\n", file.display()));
}

#[test]
fn config_file_selects_the_tool() {
    let dir = TempDir::new().unwrap();
    let tool = recording_tool(&dir);

    let config_dir = dir.path().join("anydiff");
    fs::create_dir_all(&config_dir).unwrap();
    fs::write(
        config_dir.join("config.toml"),
        format!("[tool]\ncommand = \"{}\"\n", tool.display()),
    )
    .unwrap();

    let mut child = anydiff_cmd(&dir)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .spawn()
        .expect("Failed to execute command");

    child.stdin.take().unwrap().write_all(b"via config\n").unwrap();
    let output = child.wait_with_output().unwrap();

    assert!(output.status.success());
    assert_eq!(output.stdout, b"via config\n");
}

#[test]
fn malformed_config_is_reported() {
    let dir = TempDir::new().unwrap();
    let config_dir = dir.path().join("anydiff");
    fs::create_dir_all(&config_dir).unwrap();
    fs::write(config_dir.join("config.toml"), "[tool\n").unwrap();

    let output = anydiff_cmd(&dir)
        .arg("whatever.txt")
        .stdin(Stdio::null())
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("failed to parse config file"), "stderr: {stderr}");
}
