//! The read-eval loop.
//!
//! One iteration: print the numbered prompt (interactive only), read a
//! line, tokenize it, run a built-in in-process or send everything else
//! through resolve → plan → launch. Per-line errors go to stderr and the
//! loop keeps going; the token sequence dies with the iteration.

use std::io::{BufRead, Write};

use nix::sys::wait::WaitStatus;
use tracing::debug;

use crate::builtin::Builtin;
use crate::error::ShellError;
use crate::launcher::{self, ResolvedCommand};
use crate::terminal::TerminalState;
use crate::{path, redirect, tokenizer};

pub struct Interpreter {
    term: TerminalState,
}

impl Interpreter {
    pub fn new(term: TerminalState) -> Self {
        Interpreter { term }
    }

    /// Read and evaluate lines until end of input.
    ///
    /// The prompt is `"<line_number>: "`, counting from 0 and incremented
    /// after each processed line. Only I/O failures on the shell's own
    /// stdin/stdout end the loop early; command failures never do.
    pub fn repl(&mut self) -> anyhow::Result<()> {
        let stdin = std::io::stdin();
        let mut line = String::new();
        let mut line_num: u32 = 0;

        loop {
            if self.term.is_interactive() {
                print!("{line_num}: ");
                std::io::stdout().flush()?;
            }

            line.clear();
            if stdin.lock().read_line(&mut line)? == 0 {
                break; // EOF
            }

            if let Err(e) = self.eval(&line) {
                eprintln!("jobsh: {e}");
            }
            line_num += 1;
        }
        Ok(())
    }

    /// Evaluate one line. Errors abort this line only.
    fn eval(&mut self, line: &str) -> Result<(), ShellError> {
        let tokens = tokenizer::tokenize(line)?;
        let Some(name) = tokens.get(0) else {
            return Ok(());
        };

        let args: Vec<&str> = tokens.iter().skip(1).collect();
        if let Some(parsed) = Builtin::parse(name, &args) {
            match parsed {
                Ok(builtin) => {
                    let code = builtin.run();
                    debug!(command = name, code, "builtin finished");
                }
                Err(early_exit) => {
                    // argh already rendered the usage or error text.
                    eprintln!("{}", early_exit.output.trim_end());
                }
            }
            return Ok(());
        }

        let (argv, redirection) = redirect::plan(&tokens)?;
        let executable = path::resolve(&argv[0])?;
        let status = launcher::launch(
            ResolvedCommand {
                executable,
                argv,
                redirection,
            },
            &self.term,
        )?;

        // The child's exit code is informational; a signal death is worth
        // telling the user about, but neither changes the shell's state.
        match status {
            WaitStatus::Exited(pid, code) => {
                debug!(pid = pid.as_raw(), code, "command exited");
            }
            WaitStatus::Signaled(pid, sig, _core_dumped) => {
                eprintln!("jobsh: process {} terminated by {sig}", pid.as_raw());
            }
            other => debug!(?other, "unexpected wait status"),
        }
        Ok(())
    }
}
