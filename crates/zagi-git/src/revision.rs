//! Revision-spec parsing and resolution.

use git2::{ErrorCode, Object, Repository, Tree};
use tracing::debug;

use crate::diff::Comparison;
use crate::GitError;

/// How the two sides of a revision spec relate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevisionMode {
    /// `rev`: compare one revision against the working state
    Single,
    /// `a..b`: compare two trees directly
    Range,
    /// `a...b`: compare the merge base of `a` and `b` against `b`
    MergeBaseRange,
}

/// A parsed revision argument such as `main`, `HEAD~2..HEAD` or `main...feature`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RevisionSpec {
    pub left: String,
    pub right: Option<String>,
    pub mode: RevisionMode,
}

impl RevisionSpec {
    /// Split a revision argument into its sides.
    ///
    /// `...` must be checked before `..`, otherwise `a...b` would split into
    /// `a` and `.b`.
    pub fn parse(spec: &str) -> Self {
        if let Some((left, right)) = spec.split_once("...") {
            return Self {
                left: left.to_string(),
                right: Some(right.to_string()),
                mode: RevisionMode::MergeBaseRange,
            };
        }

        if let Some((left, right)) = spec.split_once("..") {
            return Self {
                left: left.to_string(),
                right: Some(right.to_string()),
                mode: RevisionMode::Range,
            };
        }

        Self {
            left: spec.to_string(),
            right: None,
            mode: RevisionMode::Single,
        }
    }

    /// Resolve both sides to trees owned by `repo`.
    ///
    /// A single revision is compared against the working tree, or against the
    /// index when `staged` is set. Empty range endpoints default to `HEAD`.
    pub fn resolve<'repo>(
        &self,
        repo: &'repo Repository,
        staged: bool,
    ) -> Result<Comparison<'repo>, GitError> {
        match self.mode {
            RevisionMode::Single => {
                let tree = resolve_tree(repo, &self.left)?;
                if staged {
                    Ok(Comparison::TreeToIndex(tree))
                } else {
                    Ok(Comparison::TreeToWorkdir(tree))
                }
            }
            RevisionMode::Range => {
                let left = resolve_tree(repo, or_head(&self.left))?;
                let right = resolve_tree(repo, or_head(self.right_str()))?;
                Ok(Comparison::TreeToTree(left, right))
            }
            RevisionMode::MergeBaseRange => {
                let left_rev = or_head(&self.left);
                let right_rev = or_head(self.right_str());
                let left = resolve_object(repo, left_rev)?
                    .peel_to_commit()
                    .map_err(|_| GitError::RevisionNotFound(left_rev.to_string()))?;
                let right = resolve_object(repo, right_rev)?
                    .peel_to_commit()
                    .map_err(|_| GitError::RevisionNotFound(right_rev.to_string()))?;

                let base_id = match repo.merge_base(left.id(), right.id()) {
                    Ok(id) => id,
                    Err(e) if e.code() == ErrorCode::NotFound => {
                        return Err(GitError::NoMergeBase(
                            left_rev.to_string(),
                            right_rev.to_string(),
                        ))
                    }
                    Err(e) => return Err(GitError::RevwalkFailed(e)),
                };
                debug!(base = %base_id, left = left_rev, right = right_rev, "Found merge base");

                let base_tree = repo
                    .find_commit(base_id)
                    .and_then(|c| c.tree())
                    .map_err(GitError::RevwalkFailed)?;
                let right_tree = right.tree()?;
                Ok(Comparison::TreeToTree(base_tree, right_tree))
            }
        }
    }

    fn right_str(&self) -> &str {
        self.right.as_deref().unwrap_or("")
    }
}

fn or_head(rev: &str) -> &str {
    if rev.is_empty() {
        "HEAD"
    } else {
        rev
    }
}

fn resolve_object<'repo>(repo: &'repo Repository, rev: &str) -> Result<Object<'repo>, GitError> {
    repo.revparse_single(rev)
        .map_err(|_| GitError::RevisionNotFound(rev.to_string()))
}

fn resolve_tree<'repo>(repo: &'repo Repository, rev: &str) -> Result<Tree<'repo>, GitError> {
    resolve_object(repo, rev)?
        .peel_to_tree()
        .map_err(|_| GitError::RevisionNotFound(rev.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_single() {
        let spec = RevisionSpec::parse("main");
        assert_eq!(spec.mode, RevisionMode::Single);
        assert_eq!(spec.left, "main");
        assert_eq!(spec.right, None);
    }

    #[test]
    fn test_parse_range() {
        let spec = RevisionSpec::parse("HEAD~3..HEAD");
        assert_eq!(spec.mode, RevisionMode::Range);
        assert_eq!(spec.left, "HEAD~3");
        assert_eq!(spec.right.as_deref(), Some("HEAD"));
    }

    #[test]
    fn test_parse_merge_base_range_takes_priority() {
        let spec = RevisionSpec::parse("main...feature");
        assert_eq!(spec.mode, RevisionMode::MergeBaseRange);
        assert_eq!(spec.left, "main");
        assert_eq!(spec.right.as_deref(), Some("feature"));
    }

    #[test]
    fn test_parse_merge_base_range_splits_at_first_triple_dot() {
        let spec = RevisionSpec::parse("a..b...c");
        assert_eq!(spec.mode, RevisionMode::MergeBaseRange);
        assert_eq!(spec.left, "a..b");
        assert_eq!(spec.right.as_deref(), Some("c"));
    }

    #[test]
    fn test_parse_range_splits_at_first_double_dot() {
        let spec = RevisionSpec::parse("a..b..c");
        assert_eq!(spec.mode, RevisionMode::Range);
        assert_eq!(spec.left, "a");
        assert_eq!(spec.right.as_deref(), Some("b..c"));
    }

    #[test]
    fn test_parse_open_ended_range() {
        let spec = RevisionSpec::parse("main..");
        assert_eq!(spec.mode, RevisionMode::Range);
        assert_eq!(spec.left, "main");
        assert_eq!(spec.right.as_deref(), Some(""));
        assert_eq!(or_head(spec.right_str()), "HEAD");
    }
}
