//! Binary-level tests: argument parsing and offline (`--mock`) runs.

use std::process::Command;

fn run_toolloop(args: &[&str]) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_toolloop"))
        .args(args)
        .env_remove("LOG_FILE")
        .env_remove("TOOLLOOP_STRATEGY")
        .env_remove("TOOLLOOP_MAX_ITERATIONS")
        .output()
        .expect("failed to run toolloop binary")
}

#[test]
fn help_succeeds() {
    let out = run_toolloop(&["--help"]);
    assert!(out.status.success());
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("--strategy"));
    assert!(stdout.contains("--max-iterations"));
}

#[test]
fn unknown_strategy_is_usage_error() {
    let out = run_toolloop(&["--strategy", "xml"]);
    assert!(!out.status.success());
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("unknown strategy"), "{}", stderr);
}

/// **Scenario**: the default demo, scripted, prints the trace and the discounted price.
#[test]
fn mock_run_prints_trace_and_answer() {
    let out = run_toolloop(&["--mock"]);
    assert!(out.status.success());
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.starts_with("Iteration: 1\n"), "{}", stdout);
    assert!(stdout.contains("Tool call: get_product_price with args {\"product\":\"laptop\"}"));
    assert!(stdout.contains("Tool observation: 849.15"));
    assert!(stdout.trim_end().ends_with("849.15."), "{}", stdout);
}

#[test]
fn mock_react_run_succeeds() {
    let out = run_toolloop(&["--mock", "--strategy", "react"]);
    assert!(out.status.success());
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("Agent response:  I now know the final answer"), "{}", stdout);
}

/// **Scenario**: exhaustion still exits 0 and prints the fixed message.
#[test]
fn exhausted_run_exits_zero() {
    let out = run_toolloop(&["--mock", "-n", "1"]);
    assert!(out.status.success());
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("Max iterations reached without a final answer."));
}

/// **Scenario**: with LOG_FILE set, log lines go to the file (with the run's span path)
/// and stdout still carries only the trace.
#[test]
fn log_file_receives_span_path() {
    let dir = tempfile::tempdir().unwrap();
    let log = dir.path().join("toolloop.log");
    let out = Command::new(env!("CARGO_BIN_EXE_toolloop"))
        .arg("--mock")
        .env("LOG_FILE", &log)
        .env("RUST_LOG", "info")
        .env_remove("TOOLLOOP_STRATEGY")
        .env_remove("TOOLLOOP_MAX_ITERATIONS")
        .output()
        .expect("failed to run toolloop binary");
    assert!(out.status.success());
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(!stdout.contains("logging to file"));

    let text = std::fs::read_to_string(&log).unwrap();
    assert!(text.contains("logging to file"), "{}", text);
    assert!(text.contains("tool_loop{strategy=\"json\"}:"), "{}", text);
    assert!(text.contains("trace_id="), "{}", text);
}

#[test]
fn support_bot_quits_on_eof() {
    use std::io::Write;
    use std::process::Stdio;

    let mut child = Command::new(env!("CARGO_BIN_EXE_support-bot"))
        .env_remove("LOG_FILE")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .spawn()
        .expect("failed to run support-bot binary");
    child
        .stdin
        .take()
        .expect("stdin")
        .write_all(b"quit\n")
        .unwrap();
    let out = child.wait_with_output().unwrap();
    assert!(out.status.success());
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("Bot: Goodbye!"), "{}", stdout);
}
