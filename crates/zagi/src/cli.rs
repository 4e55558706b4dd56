use std::ffi::OsString;

use clap::error::{ContextKind, ContextValue, ErrorKind};
use clap::{Args, Parser, Subcommand};

use zagi_core::{CommandError, CommitOptions};
use zagi_git::OutputMode;

#[derive(Parser, Debug)]
#[command(
    name = "zagi",
    about = "Git with compact diffs and agent provenance",
    version,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Show changes as line-addressed hunks without context
    Diff(DiffArgs),
    /// Record staged changes, optionally with the prompt that produced them
    Commit(CommitArgs),
}

#[derive(Args, Debug)]
pub struct DiffArgs {
    /// Compare the index against HEAD
    #[arg(long, alias = "cached")]
    pub staged: bool,

    /// Show a per-file change summary
    #[arg(long, conflicts_with = "name_only")]
    pub stat: bool,

    /// Show only the names of changed files
    #[arg(long)]
    pub name_only: bool,

    /// Revision (`rev`, `a..b`, `a...b`) or a path to limit the diff to
    pub target: Option<String>,

    /// Paths to limit the diff to
    #[arg(last = true)]
    pub paths: Vec<String>,
}

impl DiffArgs {
    pub fn mode(&self) -> OutputMode {
        if self.stat {
            OutputMode::Stat
        } else if self.name_only {
            OutputMode::NameOnly
        } else {
            OutputMode::Patch
        }
    }
}

#[derive(Args, Debug)]
pub struct CommitArgs {
    /// Commit message
    #[arg(short, long, allow_hyphen_values = true)]
    pub message: Option<String>,

    /// Stage modified and deleted tracked files first
    #[arg(short, long)]
    pub all: bool,

    /// Replace the HEAD commit
    #[arg(long)]
    pub amend: bool,

    /// The request that led to this change, stored as a git note
    #[arg(long, allow_hyphen_values = true)]
    pub prompt: Option<String>,
}

impl From<CommitArgs> for CommitOptions {
    fn from(args: CommitArgs) -> Self {
        CommitOptions {
            message: args.message,
            all: args.all,
            amend: args.amend,
            prompt: args.prompt,
        }
    }
}

/// What the command line asked for
#[derive(Debug)]
pub enum Parsed {
    Run(Cli),
    /// Help or version output; print it and exit
    Exit(clap::Error),
}

/// Parse arguments, turning flags zagi does not implement into
/// [`CommandError::UnsupportedFlag`].
pub fn parse_from<I, T>(args: I) -> Result<Parsed, CommandError>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let err = match Cli::try_parse_from(args) {
        Ok(cli) => return Ok(Parsed::Run(cli)),
        Err(err) => err,
    };

    match err.kind() {
        ErrorKind::DisplayHelp
        | ErrorKind::DisplayVersion
        | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand => Ok(Parsed::Exit(err)),
        ErrorKind::UnknownArgument => {
            Err(CommandError::UnsupportedFlag(context_string(&err, ContextKind::InvalidArg)))
        }
        ErrorKind::InvalidSubcommand => Err(CommandError::usage_with_hint(
            format!(
                "unknown command: {}",
                context_string(&err, ContextKind::InvalidSubcommand)
            ),
            "run it with git directly",
        )),
        _ => Err(CommandError::usage(first_line(&err))),
    }
}

fn context_string(err: &clap::Error, kind: ContextKind) -> String {
    match err.get(kind) {
        Some(ContextValue::String(s)) => s.clone(),
        _ => "<unknown>".to_string(),
    }
}

// clap renders multi-line errors with usage and tips; keep the message only
fn first_line(err: &clap::Error) -> String {
    let rendered = err.to_string();
    let line = rendered.lines().next().unwrap_or("invalid arguments");
    line.trim_start_matches("error: ").to_string()
}
