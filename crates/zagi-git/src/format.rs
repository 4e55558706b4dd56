//! Compact renderings of a [`Diff`] for agents and scripts.
//!
//! Hunks are addressed as `path:start-end` instead of `@@` headers and only
//! changed lines are printed.

use std::fmt::Write;

use crate::model::{DeltaStatus, Diff, DiffDelta, DiffStats, Hunk, LineOrigin};

const NO_CHANGES: &str = "no changes\n";
const MAX_BAR_WIDTH: usize = 20;

/// Output mode for [`DiffFormatter::render`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputMode {
    #[default]
    Patch,
    Stat,
    NameOnly,
}

pub struct DiffFormatter;

impl DiffFormatter {
    pub fn render(diff: &Diff, mode: OutputMode) -> String {
        match mode {
            OutputMode::Patch => Self::patch(diff),
            OutputMode::Stat => Self::stat(diff),
            OutputMode::NameOnly => Self::name_only(diff),
        }
    }

    pub fn patch(diff: &Diff) -> String {
        let mut out = String::new();

        for delta in &diff.deltas {
            let block = render_delta(delta);
            if block.is_empty() {
                continue;
            }
            if !out.is_empty() {
                out.push('\n');
            }
            out.push_str(&block);
        }

        if out.is_empty() {
            return NO_CHANGES.to_string();
        }
        out
    }

    pub fn stat(diff: &Diff) -> String {
        if diff.is_empty() {
            return NO_CHANGES.to_string();
        }

        let rows: Vec<(String, usize, usize)> = diff
            .deltas
            .iter()
            .map(|delta| {
                let (insertions, deletions) = delta.line_stats();
                (stat_path(delta), insertions, deletions)
            })
            .collect();

        let path_width = rows.iter().map(|(p, _, _)| p.chars().count()).max().unwrap_or(0);
        let count_width = rows
            .iter()
            .map(|(_, i, d)| (i + d).to_string().len())
            .max()
            .unwrap_or(1);

        let mut out = String::new();
        for (path, insertions, deletions) in rows {
            let line = format!(
                " {:<path_width$} | {:>count_width$} {}",
                path,
                insertions + deletions,
                stat_bar(insertions, deletions),
            );
            let _ = writeln!(out, "{}", line.trim_end());
        }
        let _ = writeln!(out, "{}", summary_line(&diff.stats()));
        out
    }

    pub fn name_only(diff: &Diff) -> String {
        if diff.is_empty() {
            return NO_CHANGES.to_string();
        }

        let mut out = String::new();
        for delta in &diff.deltas {
            let path = delta
                .new_path
                .as_deref()
                .unwrap_or_else(|| delta.display_path());
            let _ = writeln!(out, "{}", path);
        }
        out
    }
}

fn render_delta(delta: &DiffDelta) -> String {
    let path = delta.display_path();
    let mut out = String::new();

    if delta.binary {
        let _ = writeln!(out, "{}: binary", path);
        return out;
    }

    for hunk in &delta.hunks {
        let _ = writeln!(out, "{}", hunk_header(path, hunk));
        for line in &hunk.lines {
            let prefix = match line.origin {
                LineOrigin::Addition => '+',
                LineOrigin::Deletion => '-',
                LineOrigin::Context => continue,
            };
            let _ = writeln!(out, "{} {}", prefix, String::from_utf8_lossy(&line.content));
        }
    }

    out
}

/// `path:start` for a one-line hunk, `path:start-end` otherwise.
pub fn hunk_header(path: &str, hunk: &Hunk) -> String {
    let start = hunk.start();
    let span = hunk.span();
    if span <= 1 {
        format!("{}:{}", path, start)
    } else {
        format!("{}:{}-{}", path, start, start + span - 1)
    }
}

/// `old => new` for renames, otherwise the display path.
fn stat_path(delta: &DiffDelta) -> String {
    match (delta.status, delta.old_path.as_deref(), delta.new_path.as_deref()) {
        (DeltaStatus::Renamed, Some(old), Some(new)) if old != new => format!("{} => {}", old, new),
        _ => delta.display_path().to_string(),
    }
}

/// A `+`/`-` bar at most 20 characters wide, split in proportion to the counts.
pub fn stat_bar(insertions: usize, deletions: usize) -> String {
    let total = insertions + deletions;
    let width = total.min(MAX_BAR_WIDTH);
    let plus = if total == 0 {
        0
    } else {
        insertions * width / total
    };
    format!("{}{}", "+".repeat(plus), "-".repeat(width - plus))
}

pub fn summary_line(stats: &DiffStats) -> String {
    let mut line = format!(
        " {} {} changed",
        stats.files_changed,
        plural(stats.files_changed, "file", "files")
    );
    if stats.insertions > 0 {
        let _ = write!(
            line,
            ", {} {}(+)",
            stats.insertions,
            plural(stats.insertions, "insertion", "insertions")
        );
    }
    if stats.deletions > 0 {
        let _ = write!(
            line,
            ", {} {}(-)",
            stats.deletions,
            plural(stats.deletions, "deletion", "deletions")
        );
    }
    line
}

fn plural<'a>(n: usize, one: &'a str, many: &'a str) -> &'a str {
    if n == 1 {
        one
    } else {
        many
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::DiffLine;

    fn hunk(new_start: u32, new_lines: u32, adds: &[&str], dels: &[&str]) -> Hunk {
        let mut lines: Vec<DiffLine> = dels
            .iter()
            .map(|l| DiffLine::new(LineOrigin::Deletion, l.as_bytes()))
            .collect();
        lines.extend(adds.iter().map(|l| DiffLine::new(LineOrigin::Addition, l.as_bytes())));
        Hunk {
            old_start: new_start,
            old_lines: dels.len() as u32,
            new_start,
            new_lines,
            lines,
        }
    }

    fn delta(path: &str, hunks: Vec<Hunk>) -> DiffDelta {
        DiffDelta {
            old_path: Some(path.to_string()),
            new_path: Some(path.to_string()),
            status: DeltaStatus::Modified,
            binary: false,
            hunks,
        }
    }

    #[test]
    fn test_hunk_header_single_line() {
        let h = hunk(12, 1, &["x"], &[]);
        assert_eq!(hunk_header("src/main.rs", &h), "src/main.rs:12");
    }

    #[test]
    fn test_hunk_header_range() {
        let h = hunk(10, 5, &["a", "b", "c", "d", "e"], &[]);
        assert_eq!(hunk_header("src/main.rs", &h), "src/main.rs:10-14");
    }

    #[test]
    fn test_hunk_header_uses_larger_side() {
        let h = hunk(3, 1, &["new"], &["old1", "old2", "old3"]);
        assert_eq!(hunk_header("a.txt", &h), "a.txt:3-5");
    }

    #[test]
    fn test_stat_bar_only_insertions() {
        assert_eq!(stat_bar(5, 0), "+++++");
    }

    #[test]
    fn test_stat_bar_caps_at_twenty() {
        let bar = stat_bar(50, 50);
        assert_eq!(bar.len(), 20);
        assert_eq!(bar, format!("{}{}", "+".repeat(10), "-".repeat(10)));
    }

    #[test]
    fn test_stat_bar_empty() {
        assert_eq!(stat_bar(0, 0), "");
    }

    #[test]
    fn test_patch_output() {
        let diff = Diff {
            deltas: vec![
                delta("a.txt", vec![hunk(2, 1, &["new line\n"], &["old line\n"])]),
                delta("b.txt", vec![hunk(1, 2, &["one", "two"], &[])]),
            ],
        };

        assert_eq!(
            DiffFormatter::patch(&diff),
            "a.txt:2\n- old line\n+ new line\n\nb.txt:1-2\n+ one\n+ two\n"
        );
    }

    #[test]
    fn test_patch_skips_context_lines() {
        let mut h = hunk(4, 1, &["added"], &[]);
        h.lines.insert(0, DiffLine::new(LineOrigin::Context, b"unchanged\n"));
        let diff = Diff {
            deltas: vec![delta("c.txt", vec![h])],
        };

        assert_eq!(DiffFormatter::patch(&diff), "c.txt:4\n+ added\n");
    }

    #[test]
    fn test_patch_without_lines_is_no_changes() {
        let diff = Diff {
            deltas: vec![delta("mode-only.sh", Vec::new())],
        };
        assert_eq!(DiffFormatter::patch(&diff), "no changes\n");
    }

    #[test]
    fn test_patch_binary() {
        let mut d = delta("logo.png", Vec::new());
        d.binary = true;
        let diff = Diff { deltas: vec![d] };
        assert_eq!(DiffFormatter::patch(&diff), "logo.png: binary\n");
    }

    #[test]
    fn test_stat_output() {
        let diff = Diff {
            deltas: vec![
                delta("a.txt", vec![hunk(1, 2, &["x", "y"], &["z"])]),
                delta("longer/b.txt", vec![hunk(1, 1, &["x"], &[])]),
            ],
        };

        assert_eq!(
            DiffFormatter::stat(&diff),
            " a.txt        | 3 ++-\n longer/b.txt | 1 +\n 2 files changed, 3 insertions(+), 1 deletion(-)\n"
        );
    }

    #[test]
    fn test_stat_summary_omits_zero_clauses() {
        let stats = DiffStats {
            files_changed: 1,
            insertions: 4,
            deletions: 0,
        };
        assert_eq!(summary_line(&stats), " 1 file changed, 4 insertions(+)");
    }

    #[test]
    fn test_empty_diff_renders_no_changes() {
        let diff = Diff::default();
        assert_eq!(DiffFormatter::render(&diff, OutputMode::Patch), "no changes\n");
        assert_eq!(DiffFormatter::render(&diff, OutputMode::Stat), "no changes\n");
        assert_eq!(DiffFormatter::render(&diff, OutputMode::NameOnly), "no changes\n");
    }

    #[test]
    fn test_name_only() {
        let mut renamed = delta("new.txt", Vec::new());
        renamed.old_path = Some("old.txt".to_string());
        renamed.status = DeltaStatus::Renamed;
        let diff = Diff {
            deltas: vec![delta("a.txt", Vec::new()), renamed],
        };
        assert_eq!(DiffFormatter::name_only(&diff), "a.txt\nnew.txt\n");
    }

    #[test]
    fn test_stat_shows_rename_source() {
        let mut renamed = delta("b.txt", Vec::new());
        renamed.old_path = Some("a.txt".to_string());
        renamed.status = DeltaStatus::Renamed;
        let diff = Diff {
            deltas: vec![renamed],
        };

        assert_eq!(
            DiffFormatter::stat(&diff),
            " a.txt => b.txt | 0\n 1 file changed\n"
        );
    }
}
