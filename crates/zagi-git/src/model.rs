use serde::{Deserialize, Serialize};

/// What happened to a file in a delta
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeltaStatus {
    Added,
    Modified,
    Deleted,
    Renamed,
    Copied,
    TypeChanged,
}

impl DeltaStatus {
    pub(crate) fn from_git(status: git2::Delta) -> Self {
        match status {
            git2::Delta::Added | git2::Delta::Untracked => DeltaStatus::Added,
            git2::Delta::Deleted => DeltaStatus::Deleted,
            git2::Delta::Renamed => DeltaStatus::Renamed,
            git2::Delta::Copied => DeltaStatus::Copied,
            git2::Delta::Typechange => DeltaStatus::TypeChanged,
            _ => DeltaStatus::Modified,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineOrigin {
    Context,
    Addition,
    Deletion,
}

/// One line of a hunk. Content never carries its line terminator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffLine {
    pub origin: LineOrigin,
    pub content: Vec<u8>,
}

impl DiffLine {
    pub fn new(origin: LineOrigin, content: &[u8]) -> Self {
        Self {
            origin,
            content: strip_line_ending(content).to_vec(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Hunk {
    pub old_start: u32,
    pub old_lines: u32,
    pub new_start: u32,
    pub new_lines: u32,
    pub lines: Vec<DiffLine>,
}

impl Hunk {
    /// First line this hunk touches, on the side that still has content.
    pub fn start(&self) -> u32 {
        if self.new_lines == 0 {
            self.old_start
        } else {
            self.new_start
        }
    }

    /// Number of lines covered by the hunk header.
    pub fn span(&self) -> u32 {
        self.old_lines.max(self.new_lines)
    }
}

/// One changed path
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffDelta {
    pub old_path: Option<String>,
    pub new_path: Option<String>,
    pub status: DeltaStatus,
    pub binary: bool,
    pub hunks: Vec<Hunk>,
}

impl DiffDelta {
    /// Path to show for this delta; the old path only when the file is gone.
    pub fn display_path(&self) -> &str {
        match self.status {
            DeltaStatus::Deleted => self.old_path.as_deref().or(self.new_path.as_deref()),
            _ => self.new_path.as_deref().or(self.old_path.as_deref()),
        }
        .unwrap_or("")
    }

    pub fn line_stats(&self) -> (usize, usize) {
        let mut insertions = 0;
        let mut deletions = 0;
        for line in self.hunks.iter().flat_map(|h| h.lines.iter()) {
            match line.origin {
                LineOrigin::Addition => insertions += 1,
                LineOrigin::Deletion => deletions += 1,
                LineOrigin::Context => {}
            }
        }
        (insertions, deletions)
    }
}

/// An owned, fully materialized diff
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Diff {
    pub deltas: Vec<DiffDelta>,
}

impl Diff {
    pub fn is_empty(&self) -> bool {
        self.deltas.is_empty()
    }

    pub fn stats(&self) -> DiffStats {
        self.deltas
            .iter()
            .fold(DiffStats::default(), |mut acc, delta| {
                let (insertions, deletions) = delta.line_stats();
                acc.files_changed += 1;
                acc.insertions += insertions;
                acc.deletions += deletions;
                acc
            })
    }
}

/// Summary of diff statistics
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffStats {
    pub files_changed: usize,
    pub insertions: usize,
    pub deletions: usize,
}

fn strip_line_ending(content: &[u8]) -> &[u8] {
    let content = content.strip_suffix(b"\n").unwrap_or(content);
    content.strip_suffix(b"\r").unwrap_or(content)
}
