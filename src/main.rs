//! gch - CLI entry point.

use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use gch::ai::{AiGateway, PromptStore, backend_for};
use gch::config::init::{InitOutcome, target_path, write_template};
use gch::error::WorkflowError;
use gch::git::{GitRepo, check_git_installed};
use gch::workflow::{Command, Mode, Outcome, TerminalPrompter, Workflow, exit_status};
use gch::{Session, config, ui};

/// Environment variable holding the log filter; `RUST_LOG` is the fallback.
const LOG_ENV_VAR: &str = "GCH_LOG";

/// Write commit messages, reviews, and branch names with AI.
#[derive(Parser, Debug)]
#[command(name = "gch")]
#[command(about = "Write commit messages, reviews, and branch names with AI")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<CliCommand>,

    /// Answer "yes" to every confirmation
    #[arg(short = 'y', long = "yes", global = true)]
    yes: bool,

    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug, Clone, Copy)]
enum CliCommand {
    /// Review the selected changes without committing
    Review,
    /// Stage, generate a message, and commit
    Commit,
    /// Move work off a protected branch
    Branch,
    /// Push the current branch
    Push,
    /// Show the last five commits
    Log,
    /// Show the decorated graph of all branches
    Adog,
    /// Rebase the current branch onto another local branch
    Rebase,
    /// Undo the last commit, keeping its changes staged
    Undo,
    /// Switch to another local branch
    Checkout,
    /// Write a starter configuration file
    Init {
        /// Write to the home directory instead of the current one
        #[arg(long)]
        global: bool,
    },
}

impl CliCommand {
    fn workflow_command(self) -> Option<Command> {
        Some(match self {
            CliCommand::Review => Command::Review,
            CliCommand::Commit => Command::Commit,
            CliCommand::Branch => Command::Branch,
            CliCommand::Push => Command::Push,
            CliCommand::Log => Command::Log,
            CliCommand::Adog => Command::Adog,
            CliCommand::Rebase => Command::Rebase,
            CliCommand::Undo => Command::Undo,
            CliCommand::Checkout => Command::Checkout,
            CliCommand::Init { .. } => return None,
        })
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "gch=debug" } else { "warn" };
    let filter = EnvFilter::try_from_env(LOG_ENV_VAR)
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .init();
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Some(CliCommand::Init { global }) = cli.command {
        return match run_init(global) {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => {
                ui::error(&format!("{e:#}"));
                ExitCode::FAILURE
            }
        };
    }

    let command = cli
        .command
        .and_then(CliCommand::workflow_command)
        .unwrap_or(Command::Full);
    let mode = if cli.yes {
        Mode::AutoConfirm
    } else {
        Mode::Interactive
    };

    let result = run(command, mode).await;
    match &result {
        Err(e) if e.is_interrupt() => ui::goodbye(),
        Err(e) => ui::error(&e.to_string()),
        Ok(_) => {}
    }
    ExitCode::from(exit_status(&result))
}

/// Startup checks, then one workflow command.
async fn run(command: Command, mode: Mode) -> Result<Outcome, WorkflowError> {
    check_git_installed()?;
    ui::title(mode == Mode::AutoConfirm);

    let (config, provider) = config::initialize()?;
    let session = Session::new(&config, provider);
    let backend = backend_for(&config, provider)?;
    let gateway = AiGateway::new(backend, PromptStore::embedded(), config.max_prompt_chars());
    let repo = GitRepo::system();
    let prompter = TerminalPrompter;

    Workflow::new(&config, &session, &repo, &gateway, &prompter, mode)
        .run(command)
        .await
}

fn run_init(global: bool) -> Result<()> {
    let path = target_path(global).context("Could not locate the configuration directory")?;
    match write_template(&path).context("Failed to write the configuration template")? {
        InitOutcome::Created(path) => {
            ui::success(&format!("Created {}", path.display()));
            ui::info("Add an API key and model for Gemini or OpenAI, or an Ollama model.");
        }
        InitOutcome::AlreadyExists(path) => {
            ui::warn(&format!("{} already exists, leaving it untouched.", path.display()));
        }
    }
    Ok(())
}
