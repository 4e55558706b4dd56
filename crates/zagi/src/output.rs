use std::io::{self, Write};

use colored::Colorize;

use zagi_core::{CommandError, CommitOutcome};
use zagi_git::DiffStats;

/// The lines printed after a successful commit
pub fn commit_report(outcome: &CommitOutcome) -> String {
    let mut out = format!(
        "committed: {} \"{}\"\n",
        outcome.commit.short_id(),
        outcome.commit.subject()
    );

    if let Some(line) = stats_line(&outcome.stats) {
        out.push_str(&line);
        out.push('\n');
    }

    if outcome.provenance.is_some_and(|report| report.prompt) {
        out.push_str("  prompt saved\n");
    }

    out
}

/// `  N file(s), +I -D`, or nothing when no file changed
pub fn stats_line(stats: &DiffStats) -> Option<String> {
    if stats.files_changed == 0 {
        return None;
    }
    let noun = if stats.files_changed == 1 { "file" } else { "files" };
    Some(format!(
        "  {} {}, +{} -{}",
        stats.files_changed, noun, stats.insertions, stats.deletions
    ))
}

/// Write command output, treating a closed reader (`zagi diff | head`) as
/// success.
pub fn emit(out: &mut impl Write, text: &str) -> io::Result<()> {
    match out.write_all(text.as_bytes()).and_then(|()| out.flush()) {
        Err(e) if e.kind() == io::ErrorKind::BrokenPipe => Ok(()),
        result => result,
    }
}

/// Print a failed command to stderr as a single `error:` line, preceded by
/// whatever context helps the caller recover.
pub fn print_error(err: &CommandError) {
    if let CommandError::NothingToCommit { status } = err {
        if status.has_outstanding() {
            eprintln!("{}", "changes not staged for commit:".yellow());
            for (label, path) in status.outstanding() {
                eprintln!("  {}: {}", label, path);
            }
        }
    }

    eprintln!("error: {}", err);

    if let Some(hint) = err.hint() {
        eprintln!("{} {}", "hint:".yellow(), hint);
    }
}
