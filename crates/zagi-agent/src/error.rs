use std::path::PathBuf;

use thiserror::Error;

/// Reasons a session transcript could not be read. Never surfaced to the
/// user; [`crate::read_session`] turns them into `None`.
#[derive(Error, Debug)]
pub enum SessionError {
    #[error("home directory is not known")]
    NoHome,

    #[error("no session files under {0}")]
    NotFound(PathBuf),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
