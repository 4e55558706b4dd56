use git2::{Commit, ErrorCode, Oid, Repository};
use tracing::{debug, info};

use crate::GitError;

/// What was written by [`create_commit`] or [`amend_head`]
#[derive(Debug, Clone)]
pub struct CommitSummary {
    pub id: Oid,
    pub message: String,
    pub tree: Oid,
    /// Tree of the first parent; `None` for a root commit
    pub parent_tree: Option<Oid>,
}

impl CommitSummary {
    fn from_commit(commit: &Commit<'_>) -> Result<Self, GitError> {
        let parent_tree = if commit.parent_count() == 0 {
            None
        } else {
            Some(commit.parent(0).map_err(GitError::RevwalkFailed)?.tree_id())
        };
        Ok(Self {
            id: commit.id(),
            message: commit.message().unwrap_or("").to_string(),
            tree: commit.tree_id(),
            parent_tree,
        })
    }

    pub fn short_id(&self) -> String {
        let mut id = self.id.to_string();
        id.truncate(7);
        id
    }

    /// First line of the message
    pub fn subject(&self) -> &str {
        self.message.lines().next().unwrap_or("")
    }
}

/// The commit HEAD points at, or `None` on an unborn branch.
pub fn head_commit(repo: &Repository) -> Result<Option<Commit<'_>>, GitError> {
    match repo.head() {
        Ok(head) => Ok(Some(head.peel_to_commit()?)),
        Err(e) if e.code() == ErrorCode::UnbornBranch || e.code() == ErrorCode::NotFound => Ok(None),
        Err(e) => Err(GitError::GitOperationFailed(e)),
    }
}

/// Stage modifications and deletions of tracked files. Untracked files are
/// left alone.
pub fn stage_tracked(repo: &Repository) -> Result<(), GitError> {
    let mut index = repo.index().map_err(GitError::AddFailed)?;
    index.update_all(["*"], None).map_err(GitError::AddFailed)?;
    index.write().map_err(GitError::IndexWriteFailed)?;
    debug!("Staged tracked changes");
    Ok(())
}

/// Serialize the index into a tree object.
pub fn write_index_tree(repo: &Repository) -> Result<Oid, GitError> {
    let mut index = repo.index().map_err(GitError::IndexWriteFailed)?;
    index.write().map_err(GitError::IndexWriteFailed)?;
    index.write_tree().map_err(GitError::IndexWriteFailed)
}

/// Id of the empty tree, written to the object store if needed.
pub fn empty_tree_id(repo: &Repository) -> Result<Oid, GitError> {
    let builder = repo.treebuilder(None)?;
    Ok(builder.write()?)
}

/// Create a commit of `tree_id` on top of HEAD.
pub fn create_commit(
    repo: &Repository,
    tree_id: Oid,
    message: &str,
) -> Result<CommitSummary, GitError> {
    let sig = repo.signature().map_err(GitError::CommitFailed)?;
    let tree = repo.find_tree(tree_id).map_err(GitError::CommitFailed)?;
    let parent = head_commit(repo)?;
    let parents: Vec<&Commit<'_>> = parent.iter().collect();

    let id = repo
        .commit(Some("HEAD"), &sig, &sig, message, &tree, &parents)
        .map_err(GitError::CommitFailed)?;
    info!(commit = %id, "Created commit");

    let commit = repo.find_commit(id).map_err(GitError::CommitFailed)?;
    CommitSummary::from_commit(&commit)
}

/// Rewrite HEAD with `tree_id`, keeping its message unless one is given.
pub fn amend_head(
    repo: &Repository,
    tree_id: Oid,
    message: Option<&str>,
) -> Result<CommitSummary, GitError> {
    let head = head_commit(repo)?.ok_or_else(|| {
        GitError::CommitFailed(git2::Error::from_str("nothing to amend: HEAD has no commits"))
    })?;
    let tree = repo.find_tree(tree_id).map_err(GitError::CommitFailed)?;

    let id = head
        .amend(Some("HEAD"), None, None, None, message, Some(&tree))
        .map_err(GitError::CommitFailed)?;
    info!(commit = %id, amended = %head.id(), "Amended commit");

    let commit = repo.find_commit(id).map_err(GitError::CommitFailed)?;
    CommitSummary::from_commit(&commit)
}
