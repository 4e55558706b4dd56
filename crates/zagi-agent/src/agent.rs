use serde::{Deserialize, Serialize};

/// The tool driving the current invocation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Agent {
    Claude,
    #[serde(rename = "opencode")]
    OpenCode,
    Windsurf,
    Cursor,
    #[serde(rename = "vscode")]
    VsCode,
    #[serde(rename = "vscode-fork")]
    VsCodeFork,
    Terminal,
}

impl Agent {
    pub fn as_str(&self) -> &'static str {
        match self {
            Agent::Claude => "claude",
            Agent::OpenCode => "opencode",
            Agent::Windsurf => "windsurf",
            Agent::Cursor => "cursor",
            Agent::VsCode => "vscode",
            Agent::VsCodeFork => "vscode-fork",
            Agent::Terminal => "terminal",
        }
    }
}

impl std::fmt::Display for Agent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Agent {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "claude" | "claude-code" | "claudecode" => Ok(Agent::Claude),
            "opencode" | "open-code" => Ok(Agent::OpenCode),
            "windsurf" => Ok(Agent::Windsurf),
            "cursor" => Ok(Agent::Cursor),
            "vscode" | "code" => Ok(Agent::VsCode),
            "vscode-fork" => Ok(Agent::VsCodeFork),
            "terminal" => Ok(Agent::Terminal),
            _ => Err(format!("Unknown agent: {}", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_round_trips_through_from_str() {
        for agent in [
            Agent::Claude,
            Agent::OpenCode,
            Agent::Windsurf,
            Agent::Cursor,
            Agent::VsCode,
            Agent::VsCodeFork,
            Agent::Terminal,
        ] {
            assert_eq!(agent.to_string().parse::<Agent>(), Ok(agent));
        }
    }

    #[test]
    fn test_from_str_aliases() {
        assert_eq!("Claude-Code".parse::<Agent>(), Ok(Agent::Claude));
        assert!("emacs".parse::<Agent>().is_err());
    }
}
