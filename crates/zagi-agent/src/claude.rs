//! Claude Code keeps one NDJSON transcript per session under
//! `~/.claude/projects/<project-key>/`.

use std::fs;
use std::path::{Path, PathBuf};

use crate::session::{has_extension, json_array, newest_entry};
use crate::{Env, Session, SessionError};

/// Directory holding Claude Code's transcripts for `cwd`.
pub fn project_dir(home: &Path, cwd: &Path) -> PathBuf {
    home.join(".claude").join("projects").join(project_key(cwd))
}

/// The absolute working directory with separators replaced by `-`.
pub fn project_key(cwd: &Path) -> String {
    cwd.to_string_lossy().replace(['/', '\\'], "-")
}

pub(crate) fn read_session(cwd: &Path, env: &dyn Env) -> Result<Session, SessionError> {
    let home = env.home_dir().ok_or(SessionError::NoHome)?;
    let dir = project_dir(&home, cwd);
    let source_path = newest_entry(&dir, |p| p.is_file() && has_extension(p, "jsonl"))?;

    let content = fs::read_to_string(&source_path)?;
    Ok(Session {
        transcript: json_array(content.lines()),
        source_path,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{read_session as read_any, Agent, MapEnv};
    use std::time::{Duration, SystemTime};
    use tempfile::TempDir;

    #[test]
    fn test_project_key() {
        assert_eq!(
            project_key(Path::new("/home/user/my-project")),
            "-home-user-my-project"
        );
    }

    #[test]
    fn test_reads_newest_transcript() {
        let home = TempDir::new().unwrap();
        let cwd = Path::new("/work/repo");
        let dir = project_dir(home.path(), cwd);
        fs::create_dir_all(&dir).unwrap();

        let old = dir.join("old.jsonl");
        fs::write(&old, "{\"old\":true}\n").unwrap();
        let an_hour_ago = SystemTime::now() - Duration::from_secs(3600);
        fs::File::options()
            .write(true)
            .open(&old)
            .unwrap()
            .set_modified(an_hour_ago)
            .unwrap();

        let new = dir.join("new.jsonl");
        fs::write(&new, "{\"type\":\"user\"}\n\n{\"type\":\"assistant\"}\n").unwrap();
        fs::write(dir.join("notes.txt"), "ignored").unwrap();

        let env = MapEnv::new().with("HOME", home.path().to_string_lossy());
        let session = read_any(Agent::Claude, cwd, &env).unwrap();

        assert_eq!(session.source_path, new);
        assert_eq!(
            session.transcript,
            r#"[{"type":"user"},{"type":"assistant"}]"#
        );
    }

    #[test]
    fn test_missing_project_dir_is_none() {
        let home = TempDir::new().unwrap();
        let env = MapEnv::new().with("HOME", home.path().to_string_lossy());
        assert!(read_any(Agent::Claude, Path::new("/nowhere"), &env).is_none());
    }

    #[test]
    fn test_missing_home_is_none() {
        assert!(read_any(Agent::Claude, Path::new("/work"), &MapEnv::new()).is_none());
    }
}
