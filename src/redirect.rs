//! Detects and strips `>`/`<` from a token sequence.
//!
//! The planner only decides *what* to redirect; the target is opened in the
//! parent before any fork happens, so an unopenable file never costs a
//! child process, and the descriptor is moved onto stdin/stdout inside the
//! child by the launcher.

use std::fs::File;

use thiserror::Error;

use crate::tokenizer::Tokens;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RedirectionError {
    #[error("syntax error: `{0}` is missing a target filename")]
    MissingTarget(String),

    #[error("at most one redirection per command is supported")]
    MultipleRedirections,

    #[error("redirection without a command")]
    NoCommand,

    #[error("cannot open {path}: {kind}")]
    Open {
        path: String,
        kind: std::io::ErrorKind,
    },
}

/// Which standard stream the redirection rebinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// `<`: the child reads its stdin from the target file.
    Input,
    /// `>`: the child writes its stdout to the target file.
    Output,
}

#[derive(Debug, PartialEq, Eq)]
pub struct RedirectionPlan {
    pub direction: Direction,
    pub target: String,
}

impl RedirectionPlan {
    /// Open the target: create-and-truncate for output, existing-only for
    /// input. Called in the parent, before fork.
    pub fn open(&self) -> Result<File, RedirectionError> {
        let result = match self.direction {
            Direction::Output => File::options()
                .write(true)
                .create(true)
                .truncate(true)
                .open(&self.target),
            Direction::Input => File::open(&self.target),
        };
        result.map_err(|e| RedirectionError::Open {
            path: self.target.clone(),
            kind: e.kind(),
        })
    }
}

fn operator_direction(token: &str) -> Option<Direction> {
    match token {
        "<" => Some(Direction::Input),
        ">" => Some(Direction::Output),
        _ => None,
    }
}

/// Scan `tokens` once, returning the argument list with any redirection
/// operator and its filename removed, plus the plan they described.
///
/// A second operator of either kind is rejected rather than silently
/// letting the last one win.
pub fn plan(tokens: &Tokens) -> Result<(Vec<String>, Option<RedirectionPlan>), RedirectionError> {
    let mut argv = Vec::with_capacity(tokens.len());
    let mut plan = None;

    let mut index = 0;
    while let Some(token) = tokens.get(index) {
        if let Some(direction) = operator_direction(token) {
            if plan.is_some() {
                return Err(RedirectionError::MultipleRedirections);
            }
            let target = tokens
                .get(index + 1)
                .filter(|t| operator_direction(t).is_none())
                .ok_or_else(|| RedirectionError::MissingTarget(token.to_owned()))?;
            plan = Some(RedirectionPlan {
                direction,
                target: target.to_owned(),
            });
            index += 2;
        } else {
            argv.push(token.to_owned());
            index += 1;
        }
    }

    if argv.is_empty() && plan.is_some() {
        return Err(RedirectionError::NoCommand);
    }
    Ok((argv, plan))
}
