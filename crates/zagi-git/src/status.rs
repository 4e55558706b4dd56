use git2::{Repository, StatusOptions};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::GitError;

/// Status of the git working directory
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GitStatus {
    /// Changes already in the index
    pub staged: Vec<String>,
    /// Tracked files modified in the working tree but not staged
    pub modified: Vec<String>,
    /// Tracked files deleted from the working tree but not staged
    pub deleted: Vec<String>,
    pub untracked: Vec<String>,
}

impl GitStatus {
    /// Capture the current index and working tree status
    pub fn capture(repo: &Repository) -> Result<Self, GitError> {
        let mut opts = StatusOptions::new();
        opts.include_untracked(true).recurse_untracked_dirs(true);

        let statuses = repo.statuses(Some(&mut opts)).map_err(GitError::StatusFailed)?;

        let mut status = GitStatus::default();

        for entry in statuses.iter() {
            let path = entry.path().unwrap_or("").to_string();
            let st = entry.status();

            if st.is_index_new()
                || st.is_index_modified()
                || st.is_index_deleted()
                || st.is_index_renamed()
                || st.is_index_typechange()
            {
                status.staged.push(path.clone());
            }
            if st.is_wt_modified() || st.is_wt_typechange() || st.is_wt_renamed() {
                status.modified.push(path.clone());
            }
            if st.is_wt_deleted() {
                status.deleted.push(path.clone());
            }
            if st.is_wt_new() {
                status.untracked.push(path);
            }
        }

        debug!(
            staged = status.staged.len(),
            modified = status.modified.len(),
            deleted = status.deleted.len(),
            untracked = status.untracked.len(),
            "Captured git status"
        );

        Ok(status)
    }

    pub fn is_clean(&self) -> bool {
        self.staged.is_empty() && !self.has_outstanding()
    }

    /// Whether anything in the working tree is left out of the index
    pub fn has_outstanding(&self) -> bool {
        !(self.modified.is_empty() && self.deleted.is_empty() && self.untracked.is_empty())
    }

    /// Unstaged and untracked paths, labelled the way they are reported
    pub fn outstanding(&self) -> impl Iterator<Item = (&'static str, &str)> {
        let modified = self.modified.iter().map(|p| ("modified", p.as_str()));
        let deleted = self.deleted.iter().map(|p| ("deleted", p.as_str()));
        let untracked = self.untracked.iter().map(|p| ("untracked", p.as_str()));
        modified.chain(deleted).chain(untracked)
    }

    pub fn total_changes(&self) -> usize {
        self.staged.len() + self.modified.len() + self.deleted.len() + self.untracked.len()
    }
}
