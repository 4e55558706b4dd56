use std::path::Path;

use git2::{ErrorCode, Repository};
use tracing::debug;

use crate::GitError;

/// Open the repository containing `working_dir`.
///
/// The returned handle owns every tree, index and diff borrowed from it, so
/// dropping it at the end of a command releases all engine resources.
pub fn open_repo(working_dir: &Path) -> Result<Repository, GitError> {
    match Repository::discover(working_dir) {
        Ok(repo) => {
            debug!(path = %repo.path().display(), "Opened repository");
            Ok(repo)
        }
        Err(e) if e.code() == ErrorCode::NotFound => {
            Err(GitError::NotARepo(working_dir.display().to_string()))
        }
        Err(e) => Err(GitError::InitFailed(e)),
    }
}
