use std::path::Path;
use std::process::ExitCode;

use anyhow::{Context, Result};
use tracing::debug;

use zagi_agent::ProcessEnv;
use zagi_core::{run_diff, CommandError, CommitRunner, DiffRequest};

mod cli;
mod config;
mod output;

use cli::{Command, CommitArgs, DiffArgs, Parsed};
use config::ProjectConfig;

fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<ExitCode> {
    let cli = match cli::parse_from(std::env::args_os()) {
        Ok(Parsed::Run(cli)) => cli,
        Ok(Parsed::Exit(help)) => {
            help.print().context("Failed to print help")?;
            return Ok(if help.use_stderr() {
                ExitCode::from(2)
            } else {
                ExitCode::SUCCESS
            });
        }
        Err(e) => {
            output::print_error(&e);
            return Ok(ExitCode::FAILURE);
        }
    };

    let working_dir = std::env::current_dir().context("Failed to get current directory")?;
    let env = ProcessEnv;

    let config = ProjectConfig::discover(&working_dir)?.unwrap_or_default();
    zagi_logging::init_tracing(&config.log_level(&env), config.log_format(&env));
    debug!(working_dir = %working_dir.display(), command = ?cli.command, "Starting");

    let result = match cli.command {
        Command::Diff(args) => handle_diff(&working_dir, args),
        Command::Commit(args) => handle_commit(&working_dir, &config, &env, args),
    };

    match result {
        Ok(text) => {
            output::emit(&mut std::io::stdout().lock(), &text).context("Failed to write output")?;
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
            output::print_error(&e);
            Ok(ExitCode::FAILURE)
        }
    }
}

fn handle_diff(working_dir: &Path, args: DiffArgs) -> Result<String, CommandError> {
    let request = DiffRequest {
        staged: args.staged,
        mode: args.mode(),
        revision: None,
        paths: args.paths,
    }
    .with_target(working_dir, args.target);

    run_diff(working_dir, &request)
}

fn handle_commit(
    working_dir: &Path,
    config: &ProjectConfig,
    env: &ProcessEnv,
    args: CommitArgs,
) -> Result<String, CommandError> {
    let outcome = CommitRunner::new(working_dir.to_path_buf(), env)
        .with_strip_coauthors(config.strip_coauthors())
        .run(&args.into())?;

    Ok(output::commit_report(&outcome))
}
