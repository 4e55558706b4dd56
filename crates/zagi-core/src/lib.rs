//! # zagi-core
//!
//! The `diff` and `commit` commands.
//!
//! `commit` runs a fixed sequence: validate the message, enforce the agent
//! gate, stage tracked files with `-a`, write the index tree, refuse empty
//! commits, create or amend the commit, record provenance notes when a
//! prompt is given and finally report diff statistics.

mod commit;
mod diff_cmd;
mod error;
pub mod message;
pub mod provenance;

pub use commit::{CommitOptions, CommitOutcome, CommitRunner};
pub use diff_cmd::{run_diff, DiffRequest};
pub use error::CommandError;
pub use provenance::{NoteKind, NoteSink, ProvenanceNote, ProvenanceRecorder, RecordReport};
