//! # feedlint-cli - Registry Record Gate
//!
//! Provides the `feedlint` command. Run from anywhere inside the registry
//! repository, it checks every record under `authorizations/` and
//! `price-feeds/`, prints one workflow annotation per check, and exits
//! nonzero when any record is out of bounds:
//!
//! ```bash
//! feedlint
//! feedlint --root ../registry -v
//! feedlint --dir price-feeds
//! ```
//!
//! Rule logic lives in `feedlint-schema`; this crate only wires arguments,
//! logging and the exit code.

pub mod check;

use std::path::{Path, PathBuf};

use feedlint_schema::DEFAULT_DIRECTORIES;

/// Walk up from `start` to the first directory holding a record directory.
pub fn find_repo_root(start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .find(|dir| DEFAULT_DIRECTORIES.iter().any(|sub| dir.join(sub).is_dir()))
        .map(Path::to_path_buf)
}
