//! Ownership of the controlling terminal.
//!
//! At any instant exactly one process group holds foreground control of the
//! terminal: the shell's own group while idle, or the running child's group
//! while a command executes. [`TerminalState`] is the only place that
//! transfers it.

use std::io::IsTerminal;
use std::os::fd::{AsRawFd, BorrowedFd, RawFd};

use nix::errno::Errno;
use nix::sys::signal::{Signal, killpg};
use nix::sys::termios::{SetArg, Termios, tcgetattr, tcsetattr};
use nix::unistd::{Pid, getpgrp, getpid, setpgid, tcgetpgrp, tcsetpgrp};
use tracing::{debug, warn};

use crate::error::ShellError;
use crate::signals;

/// The terminal descriptor, the shell's process group and the terminal
/// mode saved at startup. Created once; mutated only by the operations
/// below; lives until the process exits.
#[derive(Debug)]
pub struct TerminalState {
    terminal: RawFd,
    shell_pgid: Pid,
    saved_modes: Option<Termios>,
    interactive: bool,
}

fn startup(op: &'static str) -> impl Fn(Errno) -> ShellError {
    move |source| ShellError::Startup { op, source }
}

impl TerminalState {
    /// Acquire the terminal for the shell.
    ///
    /// When stdin is not a terminal (script mode) there is no job control
    /// and nothing to acquire. Otherwise: wait until this process group is
    /// the foreground group (a shell launched as a stopped background job
    /// signals itself with SIGTTIN until it is continued in the
    /// foreground), start ignoring the job-control signals, move into a
    /// fresh process group, take the terminal for it and snapshot the
    /// terminal mode. Every failure here is fatal — the shell cannot run
    /// safely without its own group and the terminal.
    pub fn initialize() -> Result<Self, ShellError> {
        let stdin = std::io::stdin();
        let terminal = stdin.as_raw_fd();
        if !stdin.is_terminal() {
            return Ok(TerminalState {
                terminal,
                shell_pgid: getpgrp(),
                saved_modes: None,
                interactive: false,
            });
        }

        let fd = unsafe { BorrowedFd::borrow_raw(terminal) };
        // The wait relies on the default SIGTTIN disposition, so it must
        // precede ignore_job_control().
        loop {
            let foreground = tcgetpgrp(fd).map_err(startup("read foreground group"))?;
            let own = getpgrp();
            if foreground == own {
                break;
            }
            killpg(own, Signal::SIGTTIN).map_err(startup("stop until foregrounded"))?;
        }

        signals::ignore_job_control().map_err(startup("ignore job-control signals"))?;

        let shell_pgid = getpid();
        setpgid(shell_pgid, shell_pgid).map_err(startup("create shell process group"))?;
        tcsetpgrp(fd, shell_pgid).map_err(startup("take terminal control"))?;
        let saved_modes = tcgetattr(fd).map_err(startup("save terminal modes"))?;

        debug!(pgid = shell_pgid.as_raw(), "shell owns the terminal");
        Ok(TerminalState {
            terminal,
            shell_pgid,
            saved_modes: Some(saved_modes),
            interactive: true,
        })
    }

    pub fn is_interactive(&self) -> bool {
        self.interactive
    }

    fn fd(&self) -> BorrowedFd<'_> {
        unsafe { BorrowedFd::borrow_raw(self.terminal) }
    }

    /// Give foreground terminal control to `pgid`. No-op in script mode.
    pub fn hand_foreground(&self, pgid: Pid) -> Result<(), Errno> {
        if !self.interactive {
            return Ok(());
        }
        tcsetpgrp(self.fd(), pgid)
    }

    /// Put the shell's group back in the foreground and reapply the saved
    /// terminal mode, draining pending output first.
    ///
    /// Runs after every foreground child, on every path, so it never
    /// propagates an error; the shell staying usable matters more than
    /// reporting a failed tcsetattr.
    pub fn reclaim_foreground(&self) {
        if !self.interactive {
            return;
        }
        if let Err(e) = tcsetpgrp(self.fd(), self.shell_pgid) {
            warn!(error = %e, "failed to reclaim terminal foreground");
        }
        if let Some(modes) = &self.saved_modes {
            if let Err(e) = tcsetattr(self.fd(), SetArg::TCSADRAIN, modes) {
                warn!(error = %e, "failed to restore terminal modes");
            }
        }
    }
}
