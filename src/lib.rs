//! A small interactive shell with single-foreground-job control.
//!
//! This crate implements the hard part of an interactive command
//! interpreter: resolving a command name to an executable, wiring up
//! `<`/`>` redirection, forking a child and handing the controlling
//! terminal and signal dispositions over to it, then reclaiming both once
//! it is reaped. There is exactly one foreground child at a time; there is
//! no job table, no pipelines and no backgrounding.
//!
//! The entry point is [`Interpreter`], driven by the `jobsh` binary after
//! [`TerminalState::initialize`] has acquired the terminal.

pub mod builtin;
pub mod error;
mod interpreter;
pub mod launcher;
pub mod path;
pub mod redirect;
pub mod signals;
pub mod terminal;
pub mod tokenizer;

pub use interpreter::Interpreter;
pub use terminal::TerminalState;
