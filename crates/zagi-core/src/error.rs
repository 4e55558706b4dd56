use thiserror::Error;
use zagi_git::{GitError, GitStatus};

#[derive(Error, Debug)]
pub enum CommandError {
    #[error("{message}")]
    Usage {
        message: String,
        hint: Option<String>,
    },

    /// A flag git understands but zagi does not implement
    #[error("unsupported flag: {0} (use git directly)")]
    UnsupportedFlag(String),

    /// The index matches HEAD. `status` lists what was left unstaged.
    #[error("nothing to commit")]
    NothingToCommit { status: GitStatus },

    #[error(transparent)]
    Git(#[from] GitError),
}

impl CommandError {
    pub fn usage(message: impl Into<String>) -> Self {
        Self::Usage {
            message: message.into(),
            hint: None,
        }
    }

    pub fn usage_with_hint(message: impl Into<String>, hint: impl Into<String>) -> Self {
        Self::Usage {
            message: message.into(),
            hint: Some(hint.into()),
        }
    }

    pub fn hint(&self) -> Option<&str> {
        match self {
            Self::Usage { hint, .. } => hint.as_deref(),
            _ => None,
        }
    }
}
