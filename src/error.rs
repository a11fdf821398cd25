//! Error types shared across the shell.
//!
//! Everything that can go wrong while handling a single input line is a
//! [`ShellError`]; the loop prints it to stderr and moves on to the next
//! prompt. Only [`ShellError::Startup`] is fatal to the whole process.

use std::path::PathBuf;

use nix::errno::Errno;
use thiserror::Error;

use crate::redirect::RedirectionError;
use crate::tokenizer::TokenizeError;

#[derive(Debug, Error)]
pub enum ShellError {
    #[error("{0}: command not found")]
    CommandNotFound(String),

    #[error(transparent)]
    Tokenize(#[from] TokenizeError),

    #[error(transparent)]
    Redirection(#[from] RedirectionError),

    #[error("fork failed: {0}")]
    Fork(#[source] Errno),

    #[error("exec {}: {}", .path.display(), .source)]
    Exec { path: PathBuf, source: Errno },

    #[error("cannot move process {pid} into its own group: {source}")]
    GroupAssign { pid: i32, source: Errno },

    #[error("wait failed: {0}")]
    Wait(#[source] Errno),

    #[error("command arguments may not contain NUL bytes")]
    NulInArgument,

    #[error("child setup: {op}: {source}")]
    ChildSetup { op: &'static str, source: Errno },

    #[error("startup: {op}: {source}")]
    Startup { op: &'static str, source: Errno },
}
