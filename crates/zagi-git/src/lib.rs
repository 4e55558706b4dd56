//! # zagi-git
//!
//! Git operations for zagi, built on libgit2.
//!
//! ## Overview
//!
//! - [`RevisionSpec`] parses `rev`, `a..b` and `a...b` and resolves them to trees
//! - [`DiffEngine`] computes zero-context diffs into an owned [`Diff`]
//! - [`DiffFormatter`] renders a [`Diff`] as a compact patch, a stat table or
//!   a list of names
//! - [`commit`] and [`notes`] hold the index, commit and note primitives used
//!   by `zagi commit`
//!
//! ## Diff Format
//!
//! ```text
//! src/main.rs:12-14
//! - let x = 1;
//! + let x = 2;
//! + let y = 3;
//! ```
//!
//! Each hunk is addressed by `path:start-end` on the new side of the file and
//! only added or removed lines are printed. Callers are expected to have the
//! surrounding file content already.

pub mod commit;
mod diff;
mod error;
mod format;
mod model;
pub mod notes;
mod repo;
mod revision;
mod status;

pub use commit::CommitSummary;
pub use diff::{head_tree, Comparison, DiffEngine};
pub use error::GitError;
pub use format::{hunk_header, stat_bar, summary_line, DiffFormatter, OutputMode};
pub use model::{DeltaStatus, Diff, DiffDelta, DiffLine, DiffStats, Hunk, LineOrigin};
pub use notes::NoteStore;
pub use repo::open_repo;
pub use revision::{RevisionMode, RevisionSpec};
pub use status::GitStatus;

pub use git2::{Oid, Repository};
