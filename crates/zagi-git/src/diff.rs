use git2::{DiffFindOptions, DiffOptions, ErrorCode, Patch, Repository, Tree};
use tracing::debug;

use crate::model::{DeltaStatus, Diff, DiffDelta, DiffLine, DiffStats, Hunk, LineOrigin};
use crate::GitError;

/// Which two states a diff compares. Always chosen by the caller.
pub enum Comparison<'repo> {
    /// Working tree against the index (unstaged changes)
    WorkdirToIndex,
    /// Index against the HEAD tree (staged changes)
    IndexToHead,
    /// A resolved tree against the working tree
    TreeToWorkdir(Tree<'repo>),
    /// A resolved tree against the index
    TreeToIndex(Tree<'repo>),
    /// Two resolved trees, old then new
    TreeToTree(Tree<'repo>, Tree<'repo>),
}

/// Computes zero-context diffs and materializes them into a [`Diff`].
#[derive(Debug, Clone, Default)]
pub struct DiffEngine {
    pathspecs: Vec<String>,
}

impl DiffEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Restrict the diff to the given pathspecs. Empty means the whole tree.
    pub fn with_pathspecs(mut self, pathspecs: Vec<String>) -> Self {
        self.pathspecs = pathspecs;
        self
    }

    pub fn compute(&self, repo: &Repository, comparison: &Comparison<'_>) -> Result<Diff, GitError> {
        let mut opts = self.options();

        let mut diff = match comparison {
            Comparison::WorkdirToIndex => repo.diff_index_to_workdir(None, Some(&mut opts)),
            Comparison::IndexToHead => {
                let head_tree = head_tree(repo)?;
                repo.diff_tree_to_index(head_tree.as_ref(), None, Some(&mut opts))
            }
            Comparison::TreeToWorkdir(tree) => {
                repo.diff_tree_to_workdir_with_index(Some(tree), Some(&mut opts))
            }
            Comparison::TreeToIndex(tree) => repo.diff_tree_to_index(Some(tree), None, Some(&mut opts)),
            Comparison::TreeToTree(old, new) => {
                repo.diff_tree_to_tree(Some(old), Some(new), Some(&mut opts))
            }
        }
        .map_err(GitError::DiffFailed)?;

        if !matches!(comparison, Comparison::WorkdirToIndex) {
            detect_renames(&mut diff)?;
        }

        let diff = materialize(&diff)?;
        debug!(files = diff.deltas.len(), "Computed diff");
        Ok(diff)
    }

    /// Line statistics between two trees. `None` on the old side means the
    /// empty tree, as for a root commit.
    pub fn stats_between(
        &self,
        repo: &Repository,
        old: Option<&Tree<'_>>,
        new: &Tree<'_>,
    ) -> Result<DiffStats, GitError> {
        let mut opts = self.options();
        let mut git_diff = repo
            .diff_tree_to_tree(old, Some(new), Some(&mut opts))
            .map_err(GitError::DiffFailed)?;
        detect_renames(&mut git_diff)?;
        Ok(materialize(&git_diff)?.stats())
    }

    fn options(&self) -> DiffOptions {
        let mut opts = DiffOptions::new();
        opts.context_lines(0).include_typechange(true);
        for spec in &self.pathspecs {
            opts.pathspec(spec.as_str());
        }
        opts
    }
}

/// The HEAD tree, or `None` on an unborn branch.
pub fn head_tree(repo: &Repository) -> Result<Option<Tree<'_>>, GitError> {
    match repo.head() {
        Ok(head) => Ok(Some(head.peel_to_tree()?)),
        Err(e) if e.code() == ErrorCode::UnbornBranch || e.code() == ErrorCode::NotFound => Ok(None),
        Err(e) => Err(GitError::GitOperationFailed(e)),
    }
}

fn detect_renames(diff: &mut git2::Diff<'_>) -> Result<(), GitError> {
    diff.find_similar(Some(DiffFindOptions::new().renames(true)))
        .map_err(GitError::DiffFailed)
}

/// Pull every delta, hunk and line out of libgit2 into owned values.
fn materialize(diff: &git2::Diff<'_>) -> Result<Diff, GitError> {
    let mut deltas = Vec::new();

    for (idx, delta) in diff.deltas().enumerate() {
        let mut out = DiffDelta {
            old_path: delta.old_file().path().map(|p| p.to_string_lossy().into_owned()),
            new_path: delta.new_file().path().map(|p| p.to_string_lossy().into_owned()),
            status: DeltaStatus::from_git(delta.status()),
            binary: delta.flags().is_binary(),
            hunks: Vec::new(),
        };

        // None for binary or otherwise unloadable content
        if let Some(patch) = Patch::from_diff(diff, idx).map_err(GitError::DiffFailed)? {
            out.binary |= patch.delta().flags().is_binary();
            out.hunks = read_hunks(&patch)?;
        }

        deltas.push(out);
    }

    Ok(Diff { deltas })
}

fn read_hunks(patch: &Patch<'_>) -> Result<Vec<Hunk>, GitError> {
    let mut hunks = Vec::with_capacity(patch.num_hunks());

    for hunk_idx in 0..patch.num_hunks() {
        let (header, line_count) = patch.hunk(hunk_idx).map_err(GitError::DiffFailed)?;
        let mut hunk = Hunk {
            old_start: header.old_start(),
            old_lines: header.old_lines(),
            new_start: header.new_start(),
            new_lines: header.new_lines(),
            lines: Vec::with_capacity(line_count),
        };

        for line_idx in 0..line_count {
            let line = patch
                .line_in_hunk(hunk_idx, line_idx)
                .map_err(GitError::DiffFailed)?;
            let origin = match line.origin() {
                '+' => LineOrigin::Addition,
                '-' => LineOrigin::Deletion,
                ' ' => LineOrigin::Context,
                // "no newline at end of file" markers and friends
                _ => continue,
            };
            hunk.lines.push(DiffLine::new(origin, line.content()));
        }

        hunks.push(hunk);
    }

    Ok(hunks)
}
