//! End-to-end sessions against the compiled binary.
//!
//! Stdin is piped in every test, so the shell runs its non-interactive
//! path: no prompts, no terminal handoff, but the full tokenize → builtin
//! → resolve → redirect → fork/exec/wait pipeline.

use std::io::Write;
use std::path::Path;
use std::process::{Command, Output, Stdio};

fn run_session(dir: &Path, input: &str) -> Output {
    let mut child = Command::new(env!("CARGO_BIN_EXE_jobsh"))
        .current_dir(dir)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("spawn jobsh");
    child
        .stdin
        .take()
        .expect("piped stdin")
        .write_all(input.as_bytes())
        .expect("write script");
    child.wait_with_output().expect("collect output")
}

fn stdout_of(output: &Output) -> String {
    String::from_utf8(output.stdout.clone()).expect("utf-8 stdout")
}

fn stderr_of(output: &Output) -> String {
    String::from_utf8(output.stderr.clone()).expect("utf-8 stderr")
}

#[test]
fn pwd_prints_the_working_directory() {
    let dir = tempfile::tempdir().unwrap();
    let canonical = dir.path().canonicalize().unwrap();

    let output = run_session(&canonical, "pwd\n");
    assert!(output.status.success());
    assert_eq!(stdout_of(&output), format!("{}\n", canonical.display()));
}

#[test]
fn cd_changes_the_directory_for_later_lines() {
    let dir = tempfile::tempdir().unwrap();
    let sub = dir.path().join("sub");
    std::fs::create_dir(&sub).unwrap();
    let canonical_sub = sub.canonicalize().unwrap();

    let output = run_session(dir.path(), "cd sub\npwd\n");
    assert!(output.status.success());
    assert_eq!(stdout_of(&output), format!("{}\n", canonical_sub.display()));
}

#[test]
fn cd_without_argument_reports_and_continues() {
    let dir = tempfile::tempdir().unwrap();
    let canonical = dir.path().canonicalize().unwrap();

    let output = run_session(&canonical, "cd\npwd\n");
    assert!(output.status.success());
    assert!(stderr_of(&output).contains("cd: missing dir argument"));
    // The working directory did not change and the session kept going.
    assert_eq!(stdout_of(&output), format!("{}\n", canonical.display()));
}

#[test]
fn output_redirection_writes_the_file() {
    let dir = tempfile::tempdir().unwrap();

    let output = run_session(dir.path(), "echo hi > out.txt\n");
    assert!(output.status.success());
    assert_eq!(stdout_of(&output), "");
    assert_eq!(
        std::fs::read_to_string(dir.path().join("out.txt")).unwrap(),
        "hi\n"
    );
}

#[test]
fn output_redirection_truncates_an_existing_file() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("out.txt"), "something much longer\n").unwrap();

    let output = run_session(dir.path(), "echo hi > out.txt\n");
    assert!(output.status.success());
    assert_eq!(
        std::fs::read_to_string(dir.path().join("out.txt")).unwrap(),
        "hi\n"
    );
}

#[test]
fn input_redirection_feeds_the_file_to_stdin() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("in.txt"), "hello").unwrap();

    let output = run_session(dir.path(), "cat < in.txt\n");
    assert!(output.status.success());
    assert_eq!(stdout_of(&output), "hello");
}

#[test]
fn input_redirection_from_missing_file_aborts_only_that_line() {
    let dir = tempfile::tempdir().unwrap();

    let output = run_session(dir.path(), "cat < absent.txt\necho still here\n");
    assert!(output.status.success());
    assert!(stderr_of(&output).contains("absent.txt"));
    assert_eq!(stdout_of(&output), "still here\n");
}

#[test]
fn double_redirection_is_rejected_without_touching_files() {
    let dir = tempfile::tempdir().unwrap();

    let output = run_session(dir.path(), "echo hi > a.txt > b.txt\n");
    assert!(output.status.success());
    assert!(stderr_of(&output).contains("at most one redirection"));
    assert!(!dir.path().join("a.txt").exists());
    assert!(!dir.path().join("b.txt").exists());
}

#[test]
fn unknown_command_keeps_the_session_alive() {
    let dir = tempfile::tempdir().unwrap();

    let output = run_session(dir.path(), "not_a_real_command\necho after\n");
    assert!(output.status.success());
    assert!(stderr_of(&output).contains("not_a_real_command"));
    assert!(stderr_of(&output).contains("command not found"));
    assert_eq!(stdout_of(&output), "after\n");
}

#[test]
fn exit_terminates_immediately_with_status_zero() {
    let dir = tempfile::tempdir().unwrap();

    let output = run_session(dir.path(), "exit\necho never runs\n");
    assert_eq!(output.status.code(), Some(0));
    assert_eq!(stdout_of(&output), "");
}

#[test]
fn eof_ends_the_session_with_status_zero() {
    let dir = tempfile::tempdir().unwrap();

    let output = run_session(dir.path(), "");
    assert_eq!(output.status.code(), Some(0));
    assert_eq!(stdout_of(&output), "");
}

#[test]
fn no_prompt_is_printed_when_not_interactive() {
    let dir = tempfile::tempdir().unwrap();

    let output = run_session(dir.path(), "echo only this\n");
    assert_eq!(stdout_of(&output), "only this\n");
}

#[test]
fn question_mark_lists_the_builtins() {
    let dir = tempfile::tempdir().unwrap();

    let output = run_session(dir.path(), "?\n");
    assert!(output.status.success());
    let stdout = stdout_of(&output);
    for name in ["? -", "exit -", "pwd -", "cd -"] {
        assert!(stdout.contains(name), "missing {name:?} in {stdout:?}");
    }
}

#[test]
fn blank_lines_are_ignored() {
    let dir = tempfile::tempdir().unwrap();

    let output = run_session(dir.path(), "\n   \necho done\n");
    assert!(output.status.success());
    assert_eq!(stdout_of(&output), "done\n");
}

#[test]
fn absolute_paths_run_without_path_lookup() {
    let dir = tempfile::tempdir().unwrap();

    let output = run_session(dir.path(), "/bin/echo direct\n");
    assert!(output.status.success());
    assert_eq!(stdout_of(&output), "direct\n");
}

#[test]
fn exec_failure_of_a_literal_path_aborts_only_that_line() {
    let dir = tempfile::tempdir().unwrap();

    let output = run_session(dir.path(), "./does_not_exist\necho recovered\n");
    assert!(output.status.success());
    assert!(stderr_of(&output).contains("does_not_exist"));
    assert_eq!(stdout_of(&output), "recovered\n");
}

#[test]
fn unterminated_quote_is_reported_and_skipped() {
    let dir = tempfile::tempdir().unwrap();

    let output = run_session(dir.path(), "echo 'oops\necho fine\n");
    assert!(output.status.success());
    assert!(stderr_of(&output).contains("unterminated quote"));
    assert_eq!(stdout_of(&output), "fine\n");
}
