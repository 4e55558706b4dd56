use thiserror::Error;

#[derive(Error, Debug)]
pub enum GitError {
    #[error("not a git repository: {0}")]
    NotARepo(String),

    #[error("failed to open repository: {0}")]
    InitFailed(#[source] git2::Error),

    #[error("unknown revision: {0}")]
    RevisionNotFound(String),

    #[error("no merge base between {0} and {1}")]
    NoMergeBase(String, String),

    #[error("failed to walk history: {0}")]
    RevwalkFailed(#[source] git2::Error),

    #[error("failed to read status: {0}")]
    StatusFailed(#[source] git2::Error),

    #[error("failed to compute diff: {0}")]
    DiffFailed(#[source] git2::Error),

    #[error("failed to stage changes: {0}")]
    AddFailed(#[source] git2::Error),

    #[error("failed to write index: {0}")]
    IndexWriteFailed(#[source] git2::Error),

    #[error("failed to create commit: {0}")]
    CommitFailed(#[source] git2::Error),

    #[error("failed to write note to {0}: {1}")]
    NoteWriteFailed(String, #[source] git2::Error),

    #[error("git operation failed: {0}")]
    GitOperationFailed(#[from] git2::Error),

    #[error("io error: {0}")]
    IoError(#[from] std::io::Error),
}
