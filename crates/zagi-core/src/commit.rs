use std::path::{Path, PathBuf};

use tracing::{debug, info};
use zagi_agent::{detect, is_agent_mode, read_session, Env};
use zagi_git::{commit, open_repo, CommitSummary, DiffEngine, DiffStats, GitError, GitStatus, NoteStore, Oid, Repository};

use crate::message::{strip_coauthors, STRIP_COAUTHORS_VAR};
use crate::provenance::{ProvenanceRecorder, RecordReport};
use crate::CommandError;

/// The subset of `git commit` zagi implements
#[derive(Debug, Clone, Default)]
pub struct CommitOptions {
    pub message: Option<String>,
    pub all: bool,
    pub amend: bool,
    pub prompt: Option<String>,
}

/// Result of a successful commit
#[derive(Debug, Clone)]
pub struct CommitOutcome {
    pub commit: CommitSummary,
    pub stats: DiffStats,
    /// Present when `--prompt` was given
    pub provenance: Option<RecordReport>,
}

/// Runs one `zagi commit` from validated options to the final stats.
pub struct CommitRunner<'a> {
    working_dir: PathBuf,
    env: &'a dyn Env,
    strip_coauthors: bool,
}

impl<'a> CommitRunner<'a> {
    pub fn new(working_dir: PathBuf, env: &'a dyn Env) -> Self {
        Self {
            working_dir,
            env,
            strip_coauthors: false,
        }
    }

    /// Strip co-author trailers even when `ZAGI_STRIP_COAUTHORS` is unset
    pub fn with_strip_coauthors(mut self, strip: bool) -> Self {
        self.strip_coauthors = strip;
        self
    }

    pub fn working_dir(&self) -> &Path {
        &self.working_dir
    }

    pub fn run(&self, opts: &CommitOptions) -> Result<CommitOutcome, CommandError> {
        let message = self.validate_message(opts)?;
        self.check_agent_gate(opts)?;

        let repo = open_repo(&self.working_dir)?;

        if opts.all {
            commit::stage_tracked(&repo)?;
        }

        let tree_id = commit::write_index_tree(&repo)?;
        debug!(tree = %tree_id, "Wrote index tree");

        if !opts.amend {
            self.check_no_op(&repo, tree_id)?;
        }

        let summary = if opts.amend {
            commit::amend_head(&repo, tree_id, message.as_deref())?
        } else {
            commit::create_commit(&repo, tree_id, message.as_deref().unwrap_or_default())?
        };

        let provenance = opts
            .prompt
            .as_deref()
            .map(|prompt| self.record_provenance(&repo, summary.id, prompt));

        let stats = commit_stats(&repo, &summary)?;
        info!(
            commit = %summary.id,
            files = stats.files_changed,
            insertions = stats.insertions,
            deletions = stats.deletions,
            "Committed"
        );

        Ok(CommitOutcome {
            commit: summary,
            stats,
            provenance,
        })
    }

    /// The message to commit with; `None` means reuse HEAD's when amending.
    fn validate_message(&self, opts: &CommitOptions) -> Result<Option<String>, CommandError> {
        let Some(message) = opts.message.as_deref() else {
            if opts.amend {
                return Ok(None);
            }
            return Err(CommandError::usage_with_hint(
                "message required",
                "usage: zagi commit -m \"message\"",
            ));
        };

        let message = if self.strip_coauthors || self.env.is_set(STRIP_COAUTHORS_VAR) {
            strip_coauthors(message)
        } else {
            message.to_string()
        };

        if message.trim().is_empty() {
            return Err(CommandError::usage("commit message is empty"));
        }
        Ok(Some(message))
    }

    fn check_agent_gate(&self, opts: &CommitOptions) -> Result<(), CommandError> {
        if opts.prompt.is_none() && is_agent_mode(self.env) {
            return Err(CommandError::usage_with_hint(
                "--prompt required when running as an agent",
                "usage: zagi commit -m \"message\" --prompt \"the request that led to this change\"",
            ));
        }
        Ok(())
    }

    fn check_no_op(&self, repo: &Repository, tree_id: Oid) -> Result<(), CommandError> {
        let head_tree_id = match commit::head_commit(repo)? {
            Some(head) => head.tree_id(),
            None => commit::empty_tree_id(repo)?,
        };

        if head_tree_id == tree_id {
            let status = GitStatus::capture(repo)?;
            debug!(outstanding = status.total_changes(), "Index matches HEAD");
            return Err(CommandError::NothingToCommit { status });
        }
        Ok(())
    }

    fn record_provenance(&self, repo: &Repository, commit_id: Oid, prompt: &str) -> RecordReport {
        let agent = detect(self.env);
        let session = read_session(agent, &self.working_dir, self.env);
        let store = NoteStore::new(repo);
        ProvenanceRecorder::new(&store).record(commit_id, prompt, agent, session.as_ref())
    }
}

/// Changes introduced by `summary` relative to its first parent. For an
/// amend that is the whole rewritten commit, not the delta from the old HEAD.
fn commit_stats(repo: &Repository, summary: &CommitSummary) -> Result<DiffStats, GitError> {
    let new_tree = repo.find_tree(summary.tree)?;
    let old_tree = summary
        .parent_tree
        .map(|id| repo.find_tree(id))
        .transpose()?;
    DiffEngine::new().stats_between(repo, old_tree.as_ref(), &new_tree)
}
