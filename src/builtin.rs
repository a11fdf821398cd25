//! Built-in commands.
//!
//! `cd` and `exit` only make sense when they mutate or terminate the shell
//! itself, so built-ins always run in the shell's own process, never in a
//! forked child. The set is closed: dispatch is an exhaustive match over
//! [`Builtin`] instead of a runtime table scan. Argument parsing uses
//! `argh`, shell conventions for the result: 0 on success, 1 on a locally
//! detected error.

use std::io::Write;

use argh::{EarlyExit, FromArgs};

/// Conventional process exit code: 0 is success, non-zero is failure.
pub type ExitCode = i32;

/// Name and one-line description of every built-in, in the order `?`
/// prints them.
const HELP_TABLE: [(&str, &str); 4] = [
    ("?", "show this help menu"),
    ("exit", "exit the command shell"),
    ("pwd", "print the current working directory"),
    ("cd", "change the current working directory"),
];

/// The fixed set of commands the shell runs in-process.
pub enum Builtin {
    Help(Help),
    Exit(Exit),
    Pwd(Pwd),
    Cd(Cd),
}

impl Builtin {
    /// Exact first-token match against the built-in names. `None` means
    /// the command falls through to the external pipeline; `Some(Err(_))`
    /// means the name matched but the arguments did not parse.
    pub fn parse(name: &str, args: &[&str]) -> Option<Result<Builtin, EarlyExit>> {
        let cmd = &[name];
        match name {
            "?" => Some(Help::from_args(cmd, args).map(Builtin::Help)),
            "exit" => Some(Exit::from_args(cmd, args).map(Builtin::Exit)),
            "pwd" => Some(Pwd::from_args(cmd, args).map(Builtin::Pwd)),
            "cd" => Some(Cd::from_args(cmd, args).map(Builtin::Cd)),
            _ => None,
        }
    }

    pub fn run(self) -> ExitCode {
        match self {
            Builtin::Help(cmd) => cmd.run(),
            Builtin::Exit(cmd) => cmd.run(),
            Builtin::Pwd(cmd) => cmd.run(),
            Builtin::Cd(cmd) => cmd.run(),
        }
    }
}

#[derive(FromArgs)]
/// Show this help menu.
pub struct Help {}

impl Help {
    fn run(self) -> ExitCode {
        let mut stdout = std::io::stdout().lock();
        for (name, doc) in HELP_TABLE {
            let _ = writeln!(stdout, "{name} - {doc}");
        }
        0
    }
}

#[derive(FromArgs)]
/// Exit the command shell.
pub struct Exit {}

impl Exit {
    fn run(self) -> ExitCode {
        // Terminates the whole shell immediately, status 0.
        std::process::exit(0)
    }
}

#[derive(FromArgs)]
/// Print the current working directory.
pub struct Pwd {}

impl Pwd {
    fn run(self) -> ExitCode {
        match std::env::current_dir() {
            Ok(dir) => {
                println!("{}", dir.display());
                0
            }
            Err(e) => {
                eprintln!("pwd: {e}");
                1
            }
        }
    }
}

#[derive(FromArgs)]
/// Change the current working directory.
pub struct Cd {
    #[argh(positional)]
    /// directory to switch to
    pub target: Option<String>,
}

impl Cd {
    fn run(self) -> ExitCode {
        let Some(target) = self.target else {
            eprintln!("cd: missing dir argument");
            return 1;
        };
        match std::env::set_current_dir(&target) {
            Ok(()) => 0,
            Err(e) => {
                eprintln!("cd: {target}: {e}");
                1
            }
        }
    }
}
