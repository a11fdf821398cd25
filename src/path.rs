//! Resolves a bare command name to an executable path.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use nix::unistd::{AccessFlags, access};

use crate::error::ShellError;

/// Resolve `name` to the executable the shell should run.
///
/// Names that already denote a path (`/...`, `./...`, `../...`) are returned
/// verbatim without an existence check; a bad path surfaces later at exec
/// time. Anything else is searched for in `PATH`, read fresh for each
/// resolution.
pub fn resolve(name: &str) -> Result<PathBuf, ShellError> {
    if denotes_path(name) {
        return Ok(PathBuf::from(name));
    }
    let search_paths = std::env::var_os("PATH")
        .ok_or_else(|| ShellError::CommandNotFound(name.to_owned()))?;
    find_in_path(&search_paths, name).ok_or_else(|| ShellError::CommandNotFound(name.to_owned()))
}

fn denotes_path(name: &str) -> bool {
    name.starts_with('/') || name.starts_with("./") || name.starts_with("../")
}

/// Search each directory of `search_paths` in order and return the first
/// entry with execute permission. First match wins, mirroring standard
/// shell semantics even when a later directory also has a match.
fn find_in_path(search_paths: &OsStr, name: &str) -> Option<PathBuf> {
    std::env::split_paths(search_paths)
        .map(|dir| dir.join(name))
        .find(|candidate| is_executable(candidate))
}

fn is_executable(path: &Path) -> bool {
    access(path, AccessFlags::X_OK).is_ok()
}
