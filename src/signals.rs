//! Signal dispositions for job control.
//!
//! Exactly two configurations exist and each is applied at exactly one
//! point: the shell ignores the job-control signals when it starts up
//! interactively, and a forked child restores the defaults right before
//! exec so the launched program gets ordinary keyboard signal semantics.
//! No other code touches signal dispositions.

use nix::errno::Errno;
use nix::sys::signal::{SigHandler, Signal, signal};

/// The signals whose disposition the shell manages.
///
/// Ignoring these keeps the shell alive through Ctrl-C/Ctrl-\/Ctrl-Z and
/// stops the kernel from suspending it for terminal access while a child
/// temporarily owns the terminal.
pub const JOB_CONTROL_SIGNALS: [Signal; 5] = [
    Signal::SIGINT,
    Signal::SIGQUIT,
    Signal::SIGTSTP,
    Signal::SIGTTIN,
    Signal::SIGTTOU,
];

/// Applied once, during interactive startup.
pub fn ignore_job_control() -> Result<(), Errno> {
    set_all(SigHandler::SigIgn)
}

/// Applied once, in the child between fork and exec.
pub fn restore_defaults() -> Result<(), Errno> {
    set_all(SigHandler::SigDfl)
}

fn set_all(handler: SigHandler) -> Result<(), Errno> {
    for sig in JOB_CONTROL_SIGNALS {
        unsafe { signal(sig, handler) }?;
    }
    Ok(())
}
