use crate::{Agent, Env};

/// Set by Claude Code in every child process
pub const CLAUDE_SIGNAL: &str = "CLAUDECODE";
/// Set by OpenCode in every child process
pub const OPENCODE_SIGNAL: &str = "OPENCODE";
/// Explicit override: any non-empty value means an agent is driving zagi
pub const AGENT_OVERRIDE: &str = "ZAGI_AGENT";
/// Path of the node binary of the editor that spawned the shell
pub const IDE_ASKPASS_NODE: &str = "VSCODE_GIT_ASKPASS_NODE";
pub const TERM_PROGRAM: &str = "TERM_PROGRAM";

/// Whether an automated agent is driving this invocation.
///
/// Reads the environment on every call.
pub fn is_agent_mode(env: &dyn Env) -> bool {
    has_native_signal(env) || env.is_set(AGENT_OVERRIDE)
}

/// Classify the tool driving this invocation. Native agent signals win over
/// editor hints; [`Agent::Terminal`] is the fallback.
pub fn detect(env: &dyn Env) -> Agent {
    if env.var(CLAUDE_SIGNAL).is_some() {
        return Agent::Claude;
    }
    if env.var(OPENCODE_SIGNAL).is_some() {
        return Agent::OpenCode;
    }

    if let Some(node) = env.var(IDE_ASKPASS_NODE).filter(|v| !v.is_empty()) {
        return classify_editor(&node);
    }

    if env.var(TERM_PROGRAM).is_some_and(|p| p.eq_ignore_ascii_case("vscode")) {
        return Agent::VsCode;
    }

    Agent::Terminal
}

fn has_native_signal(env: &dyn Env) -> bool {
    env.var(CLAUDE_SIGNAL).is_some() || env.var(OPENCODE_SIGNAL).is_some()
}

// Forks ship under their own app name, so they are matched before the
// generic VS Code names that can appear deeper in the same path.
fn classify_editor(node_path: &str) -> Agent {
    let path = node_path.to_lowercase();

    if path.contains("windsurf") {
        Agent::Windsurf
    } else if path.contains("cursor") {
        Agent::Cursor
    } else if path.contains("visual studio code")
        || path.contains("code.app")
        || path.contains("/code/")
        || path.contains("vscode-server")
    {
        Agent::VsCode
    } else {
        Agent::VsCodeFork
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MapEnv;

    #[test]
    fn test_plain_terminal() {
        let env = MapEnv::new();
        assert!(!is_agent_mode(&env));
        assert_eq!(detect(&env), Agent::Terminal);
    }

    #[test]
    fn test_claude_signal() {
        let env = MapEnv::new().with(CLAUDE_SIGNAL, "1");
        assert!(is_agent_mode(&env));
        assert_eq!(detect(&env), Agent::Claude);
    }

    #[test]
    fn test_opencode_signal() {
        let env = MapEnv::new().with(OPENCODE_SIGNAL, "1");
        assert!(is_agent_mode(&env));
        assert_eq!(detect(&env), Agent::OpenCode);
    }

    #[test]
    fn test_override_enables_agent_mode() {
        let env = MapEnv::new().with(AGENT_OVERRIDE, "claude");
        assert!(is_agent_mode(&env));
        assert_eq!(detect(&env), Agent::Terminal);
    }

    #[test]
    fn test_empty_override_is_ignored() {
        let env = MapEnv::new().with(AGENT_OVERRIDE, "");
        assert!(!is_agent_mode(&env));
    }

    #[test]
    fn test_empty_native_signal_counts() {
        let env = MapEnv::new().with(CLAUDE_SIGNAL, "");
        assert!(is_agent_mode(&env));
        assert_eq!(detect(&env), Agent::Claude);
    }

    #[test]
    fn test_native_signal_beats_editor() {
        let env = MapEnv::new()
            .with(CLAUDE_SIGNAL, "1")
            .with(IDE_ASKPASS_NODE, "/Applications/Cursor.app/Contents/node");
        assert_eq!(detect(&env), Agent::Claude);
    }

    #[test]
    fn test_editor_paths() {
        let cases = [
            ("/Applications/Windsurf.app/Contents/Frameworks/node", Agent::Windsurf),
            ("/Applications/Cursor.app/Contents/Frameworks/node", Agent::Cursor),
            (
                "/Applications/Visual Studio Code.app/Contents/Frameworks/node",
                Agent::VsCode,
            ),
            ("/home/me/.vscode-server/bin/abc/node", Agent::VsCode),
            ("/opt/VSCodium/node", Agent::VsCodeFork),
        ];

        for (path, expected) in cases {
            let env = MapEnv::new().with(IDE_ASKPASS_NODE, path);
            assert_eq!(detect(&env), expected, "{}", path);
            assert!(!is_agent_mode(&env));
        }
    }

    #[test]
    fn test_term_program_vscode() {
        let env = MapEnv::new().with(TERM_PROGRAM, "vscode");
        assert_eq!(detect(&env), Agent::VsCode);
    }
}
