use git2::{ErrorCode, Oid, Repository};
use tracing::debug;

use crate::GitError;

pub const AGENT_NOTES_REF: &str = "refs/notes/agent";
pub const PROMPT_NOTES_REF: &str = "refs/notes/prompt";
pub const SESSION_NOTES_REF: &str = "refs/notes/session";

/// Reads and writes notes under arbitrary namespaces of one repository.
pub struct NoteStore<'repo> {
    repo: &'repo Repository,
}

impl<'repo> NoteStore<'repo> {
    pub fn new(repo: &'repo Repository) -> Self {
        Self { repo }
    }

    /// Attach `payload` to `commit` under `notes_ref`. Existing notes are
    /// never overwritten.
    pub fn write(&self, notes_ref: &str, commit: Oid, payload: &str) -> Result<Oid, GitError> {
        let sig = self
            .repo
            .signature()
            .map_err(|e| GitError::NoteWriteFailed(notes_ref.to_string(), e))?;
        let id = self
            .repo
            .note(&sig, &sig, Some(notes_ref), commit, payload, false)
            .map_err(|e| GitError::NoteWriteFailed(notes_ref.to_string(), e))?;
        debug!(notes_ref, commit = %commit, bytes = payload.len(), "Wrote note");
        Ok(id)
    }

    pub fn read(&self, notes_ref: &str, commit: Oid) -> Result<Option<String>, GitError> {
        match self.repo.find_note(Some(notes_ref), commit) {
            Ok(note) => Ok(note.message().map(str::to_string)),
            Err(e) if e.code() == ErrorCode::NotFound => Ok(None),
            Err(e) => Err(GitError::GitOperationFailed(e)),
        }
    }
}
