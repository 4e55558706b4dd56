use std::path::{Path, PathBuf};

use tracing::debug;
use zagi_git::{open_repo, Comparison, DiffEngine, DiffFormatter, OutputMode, Repository, RevisionSpec};

use crate::CommandError;

/// A parsed `zagi diff` invocation
#[derive(Debug, Clone, Default)]
pub struct DiffRequest {
    pub staged: bool,
    pub mode: OutputMode,
    pub revision: Option<String>,
    /// Pathspecs relative to the working directory
    pub paths: Vec<String>,
}

impl DiffRequest {
    /// Sort a positional argument into a path filter or a revision spec.
    ///
    /// Anything naming an existing file or directory is a path.
    pub fn with_target(mut self, working_dir: &Path, target: Option<String>) -> Self {
        if let Some(target) = target {
            if working_dir.join(&target).exists() {
                self.paths.insert(0, target);
            } else {
                self.revision = Some(target);
            }
        }
        self
    }
}

/// Compute and render a diff. Nothing is rendered unless every revision
/// resolves.
pub fn run_diff(working_dir: &Path, request: &DiffRequest) -> Result<String, CommandError> {
    let repo = open_repo(working_dir)?;

    let comparison = match request.revision.as_deref() {
        Some(rev) => RevisionSpec::parse(rev).resolve(&repo, request.staged)?,
        None if request.staged => Comparison::IndexToHead,
        None => Comparison::WorkdirToIndex,
    };

    let pathspecs = repo_pathspecs(&repo, working_dir, &request.paths);
    debug!(revision = ?request.revision, staged = request.staged, ?pathspecs, "Running diff");

    let diff = DiffEngine::new()
        .with_pathspecs(pathspecs)
        .compute(&repo, &comparison)?;

    Ok(DiffFormatter::render(&diff, request.mode))
}

/// Rebase pathspecs given relative to `working_dir` onto the repository root.
fn repo_pathspecs(repo: &Repository, working_dir: &Path, paths: &[String]) -> Vec<String> {
    let prefix = repo
        .workdir()
        .and_then(|root| {
            let root = root.canonicalize().ok()?;
            let cwd = working_dir.canonicalize().ok()?;
            cwd.strip_prefix(&root).map(Path::to_path_buf).ok()
        })
        .unwrap_or_default();

    paths
        .iter()
        .map(|p| {
            let joined: PathBuf = if p == "." || p == "./" {
                prefix.clone()
            } else {
                prefix.join(p)
            };
            let spec = joined.to_string_lossy().replace('\\', "/");
            let spec = spec.trim_end_matches('/');
            if spec.is_empty() || spec == "." {
                "*".to_string()
            } else {
                spec.trim_start_matches("./").to_string()
            }
        })
        .collect()
}
