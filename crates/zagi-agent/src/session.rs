use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use tracing::debug;

use crate::{claude, opencode, Agent, Env, SessionError};

/// A transcript captured from an agent's on-disk session storage
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub source_path: PathBuf,
    /// JSON array of the session's records
    pub transcript: String,
}

/// Locate and read the transcript of the current session of `agent`.
///
/// Only Claude Code and OpenCode keep transcripts zagi knows how to find.
/// Every failure yields `None`.
pub fn read_session(agent: Agent, cwd: &Path, env: &dyn Env) -> Option<Session> {
    let result = match agent {
        Agent::Claude => claude::read_session(cwd, env),
        Agent::OpenCode => opencode::read_session(env),
        _ => return None,
    };

    match result {
        Ok(session) => {
            debug!(
                agent = %agent,
                path = %session.source_path.display(),
                bytes = session.transcript.len(),
                "Read session transcript"
            );
            Some(session)
        }
        Err(e) => {
            debug!(agent = %agent, error = %e, "No session transcript");
            None
        }
    }
}

/// Join JSON records into one array, dropping blank or malformed records.
pub fn json_array<'a>(records: impl IntoIterator<Item = &'a str>) -> String {
    let mut out = String::from("[");
    let mut first = true;

    for record in records {
        let record = record.trim();
        if record.is_empty() {
            continue;
        }
        if serde_json::from_str::<serde_json::Value>(record).is_err() {
            debug!(len = record.len(), "Skipping malformed session record");
            continue;
        }
        if !first {
            out.push(',');
        }
        out.push_str(record);
        first = false;
    }

    out.push(']');
    out
}

/// Newest entry of `dir` by modification time that satisfies `keep`.
pub(crate) fn newest_entry(
    dir: &Path,
    keep: impl Fn(&Path) -> bool,
) -> Result<PathBuf, SessionError> {
    let mut newest: Option<(SystemTime, PathBuf)> = None;

    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        if !keep(&path) {
            continue;
        }
        let modified = entry.metadata()?.modified()?;
        if newest.as_ref().map_or(true, |(t, _)| modified > *t) {
            newest = Some((modified, path));
        }
    }

    newest
        .map(|(_, path)| path)
        .ok_or_else(|| SessionError::NotFound(dir.to_path_buf()))
}

pub(crate) fn has_extension(path: &Path, ext: &str) -> bool {
    path.extension().and_then(|s| s.to_str()) == Some(ext)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_array_from_ndjson() {
        let ndjson = "{\"a\":1}\n\n{\"b\":2}\n";
        assert_eq!(json_array(ndjson.lines()), r#"[{"a":1},{"b":2}]"#);
    }

    #[test]
    fn test_json_array_empty() {
        assert_eq!(json_array(std::iter::empty()), "[]");
    }

    #[test]
    fn test_json_array_skips_truncated_record() {
        let ndjson = "{\"a\":1}\n{\"b\":";
        assert_eq!(json_array(ndjson.lines()), r#"[{"a":1}]"#);
    }

    #[test]
    fn test_unsupported_agents_have_no_session() {
        let env = crate::MapEnv::new().with("HOME", "/nonexistent");
        assert!(read_session(Agent::Cursor, Path::new("/tmp"), &env).is_none());
        assert!(read_session(Agent::Terminal, Path::new("/tmp"), &env).is_none());
    }
}
