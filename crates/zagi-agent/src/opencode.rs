//! OpenCode stores each message as its own JSON file, grouped in one
//! directory per session under `~/.local/share/opencode/storage/message/`.

use std::fs;
use std::path::{Path, PathBuf};

use crate::session::{has_extension, json_array, newest_entry};
use crate::{Env, Session, SessionError};

pub fn storage_root(home: &Path) -> PathBuf {
    home.join(".local")
        .join("share")
        .join("opencode")
        .join("storage")
        .join("message")
}

pub(crate) fn read_session(env: &dyn Env) -> Result<Session, SessionError> {
    let home = env.home_dir().ok_or(SessionError::NoHome)?;
    let session_dir = newest_entry(&storage_root(&home), Path::is_dir)?;

    let mut files: Vec<PathBuf> = fs::read_dir(&session_dir)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|p| p.is_file() && has_extension(p, "json"))
        .collect();
    files.sort();

    let mut messages = Vec::with_capacity(files.len());
    for file in &files {
        messages.push(fs::read_to_string(file)?);
    }

    Ok(Session {
        transcript: json_array(messages.iter().map(String::as_str)),
        source_path: session_dir,
    })
}
