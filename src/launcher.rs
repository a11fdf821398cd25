//! Forks, prepares and reaps the single foreground child.
//!
//! `fork` is one call with two control paths, so the two sides live in
//! separate functions: [`run_child`] never returns into shell logic (it
//! ends in exec or a non-zero exit), and [`wait_in_parent`] blocks until
//! the child is gone and then unconditionally gives the terminal back to
//! the shell.

use std::ffi::CString;
use std::fs::File;
use std::os::fd::AsRawFd;
use std::path::PathBuf;

use nix::errno::Errno;
use nix::libc::{STDIN_FILENO, STDOUT_FILENO};
use nix::sys::wait::{WaitStatus, waitpid};
use nix::unistd::{ForkResult, Pid, dup2, execv, fork, getpid, setpgid};
use tracing::{debug, warn};

use crate::error::ShellError;
use crate::redirect::{Direction, RedirectionPlan};
use crate::signals;
use crate::terminal::TerminalState;

/// Everything needed to launch one external command: the resolved
/// executable, the redirection-stripped argument list (argv\[0\] is the
/// name as typed) and the optional redirection.
#[derive(Debug)]
pub struct ResolvedCommand {
    pub executable: PathBuf,
    pub argv: Vec<String>,
    pub redirection: Option<RedirectionPlan>,
}

/// Run `command` as a foreground child and block until it is reaped.
///
/// The redirection target is opened before the fork, so a bad target never
/// creates a child. A fork failure aborts this command line only.
pub fn launch(command: ResolvedCommand, term: &TerminalState) -> Result<WaitStatus, ShellError> {
    let redirection = match &command.redirection {
        Some(plan) => Some((plan.open()?, plan.direction)),
        None => None,
    };

    let path = cstring(command.executable.as_os_str().as_encoded_bytes())?;
    let argv = command
        .argv
        .iter()
        .map(|arg| cstring(arg.as_bytes()))
        .collect::<Result<Vec<_>, _>>()?;

    match unsafe { fork() }.map_err(ShellError::Fork)? {
        ForkResult::Child => {
            let err = run_child(term, &path, &argv, redirection);
            // exec did not happen; report and die without returning into
            // the shell's control flow.
            eprintln!("jobsh: {err}");
            std::process::exit(127);
        }
        ForkResult::Parent { child } => {
            drop(redirection);
            wait_in_parent(child, term)
        }
    }
}

fn cstring(bytes: &[u8]) -> Result<CString, ShellError> {
    CString::new(bytes).map_err(|_| ShellError::NulInArgument)
}

/// Child side, between fork and exec. Only returns on failure.
fn run_child(
    term: &TerminalState,
    path: &CString,
    argv: &[CString],
    redirection: Option<(File, Direction)>,
) -> ShellError {
    // Leave the shell's signal-ignoring group before the terminal handoff
    // so keyboard signals reach this process and not the shell.
    let pid = getpid();
    if let Err(source) = setpgid(pid, pid) {
        return ShellError::GroupAssign {
            pid: pid.as_raw(),
            source,
        };
    }
    if let Err(source) = term.hand_foreground(pid) {
        return ShellError::ChildSetup {
            op: "take terminal control",
            source,
        };
    }
    if let Err(source) = signals::restore_defaults() {
        return ShellError::ChildSetup {
            op: "restore default signal dispositions",
            source,
        };
    }

    if let Some((file, direction)) = &redirection {
        let target = match direction {
            Direction::Input => STDIN_FILENO,
            Direction::Output => STDOUT_FILENO,
        };
        if let Err(source) = dup2(file.as_raw_fd(), target) {
            return ShellError::ChildSetup {
                op: "redirect standard stream",
                source,
            };
        }
        // The original descriptor is close-on-exec; only the dup survives.
    }

    match execv(path, argv) {
        Ok(infallible) => match infallible {},
        Err(source) => ShellError::Exec {
            path: PathBuf::from(path.to_string_lossy().into_owned()),
            source,
        },
    }
}

/// Parent side: put the child in its own group, hand it the terminal,
/// block until it is reaped, then always reclaim the terminal.
fn wait_in_parent(child: Pid, term: &TerminalState) -> Result<WaitStatus, ShellError> {
    // Both sides call setpgid so the group exists before either continues.
    // Losing the race is fine: EACCES means the child already exec'd,
    // ESRCH that it already exited.
    match setpgid(child, child) {
        Ok(()) | Err(Errno::EACCES) | Err(Errno::ESRCH) => {}
        Err(e) => warn!(pid = child.as_raw(), error = %e, "could not set child process group"),
    }
    if let Err(e) = term.hand_foreground(child) {
        warn!(pid = child.as_raw(), error = %e, "could not hand terminal to child");
    }

    let status = waitpid(child, None);
    // The reclaim is what keeps the shell usable after a command that
    // crashed or was killed, so it precedes any error propagation.
    term.reclaim_foreground();

    let status = status.map_err(ShellError::Wait)?;
    debug!(pid = child.as_raw(), ?status, "reaped foreground child");
    Ok(status)
}
