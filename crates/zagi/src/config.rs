//! Project configuration file support for zagi.
//!
//! Loads configuration from `zagi.toml` at the repository root. Environment
//! variables take precedence over the file.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

use zagi_agent::Env;
use zagi_logging::{LogFormat, DEFAULT_LEVEL};

/// Project-level configuration loaded from `zagi.toml`
#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct ProjectConfig {
    #[serde(default)]
    pub log: LogConfig,
    #[serde(default)]
    pub commit: CommitConfig,
}

#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct LogConfig {
    /// Tracing filter, e.g. `debug` or `zagi_git=trace`
    pub level: Option<String>,
    pub format: Option<LogFormat>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct CommitConfig {
    /// Drop `Co-authored-by:` trailers from commit messages
    pub strip_coauthors: Option<bool>,
}

/// The config file name
pub const CONFIG_FILE_NAME: &str = "zagi.toml";

pub const LOG_LEVEL_VAR: &str = "ZAGI_LOG";
pub const LOG_FORMAT_VAR: &str = "ZAGI_LOG_FORMAT";

impl ProjectConfig {
    /// Load configuration from the given directory.
    ///
    /// Returns:
    /// - `Ok(Some(config))` if file exists and parses successfully
    /// - `Ok(None)` if file does not exist
    /// - `Err(...)` if file exists but fails to parse (hard error)
    pub fn load(dir: &Path) -> Result<Option<Self>> {
        let config_path = dir.join(CONFIG_FILE_NAME);

        if !config_path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read {}", config_path.display()))?;

        let config: ProjectConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse {}", config_path.display()))?;

        Ok(Some(config))
    }

    /// Find the nearest `zagi.toml` from `working_dir` up to the repository
    /// root (the first directory containing `.git`).
    pub fn discover(working_dir: &Path) -> Result<Option<Self>> {
        for dir in working_dir.ancestors() {
            if let Some(config) = Self::load(dir)? {
                return Ok(Some(config));
            }
            if dir.join(".git").exists() {
                break;
            }
        }
        Ok(None)
    }

    /// Priority: `ZAGI_LOG` > `[log].level` > `warn`
    pub fn log_level(&self, env: &dyn Env) -> String {
        env.var(LOG_LEVEL_VAR)
            .filter(|v| !v.is_empty())
            .or_else(|| self.log.level.clone())
            .unwrap_or_else(|| DEFAULT_LEVEL.to_string())
    }

    /// Priority: `ZAGI_LOG_FORMAT` > `[log].format` > pretty. Unknown values
    /// in the environment are ignored.
    pub fn log_format(&self, env: &dyn Env) -> LogFormat {
        env.var(LOG_FORMAT_VAR)
            .and_then(|v| v.parse().ok())
            .or(self.log.format)
            .unwrap_or_default()
    }

    pub fn strip_coauthors(&self) -> bool {
        self.commit.strip_coauthors.unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;
    use zagi_agent::MapEnv;

    #[test]
    fn test_missing_file() {
        let dir = TempDir::new().unwrap();
        assert!(ProjectConfig::load(dir.path()).unwrap().is_none());
    }

    #[test]
    fn test_full_file() {
        let dir = TempDir::new().unwrap();
        std::fs::write(
            dir.path().join(CONFIG_FILE_NAME),
            "[log]\nlevel = \"debug\"\nformat = \"json\"\n\n[commit]\nstrip_coauthors = true\n",
        )
        .unwrap();

        let config = ProjectConfig::load(dir.path()).unwrap().unwrap();
        let env = MapEnv::new();
        assert_eq!(config.log_level(&env), "debug");
        assert_eq!(config.log_format(&env), LogFormat::Json);
        assert!(config.strip_coauthors());
    }

    #[test]
    fn test_unknown_field_is_an_error() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILE_NAME), "[commit]\nsign = true\n").unwrap();
        assert!(ProjectConfig::load(dir.path()).is_err());
    }

    #[test]
    fn test_env_overrides_file() {
        let config = ProjectConfig {
            log: LogConfig {
                level: Some("info".to_string()),
                format: Some(LogFormat::Json),
            },
            ..Default::default()
        };
        let env = MapEnv::new()
            .with(LOG_LEVEL_VAR, "trace")
            .with(LOG_FORMAT_VAR, "compact");
        assert_eq!(config.log_level(&env), "trace");
        assert_eq!(config.log_format(&env), LogFormat::Compact);
    }

    #[test]
    fn test_defaults() {
        let config = ProjectConfig::default();
        let env = MapEnv::new();
        assert_eq!(config.log_level(&env), "warn");
        assert_eq!(config.log_format(&env), LogFormat::Pretty);
        assert!(!config.strip_coauthors());
    }

    #[test]
    fn test_discover_stops_at_repo_root() {
        let dir = TempDir::new().unwrap();
        let repo = dir.path().join("repo");
        let nested = repo.join("src").join("deep");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::create_dir_all(repo.join(".git")).unwrap();
        std::fs::write(dir.path().join(CONFIG_FILE_NAME), "[commit]\nstrip_coauthors = true\n")
            .unwrap();

        assert!(ProjectConfig::discover(&nested).unwrap().is_none());

        std::fs::write(repo.join(CONFIG_FILE_NAME), "[log]\nlevel = \"info\"\n").unwrap();
        let config = ProjectConfig::discover(&nested).unwrap().unwrap();
        assert_eq!(config.log.level.as_deref(), Some("info"));
    }
}
