use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use colored::Colorize;

use specpipe::cli;
use specpipe::config::{FetchTaskConfig, PromptContext, SpecUrlConfig};
use specpipe::error::CliError;

#[derive(Parser)]
#[command(name = "specpipe")]
#[command(about = "CI glue for turning PR review context and ClickUp tasks into agent-ready Markdown")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert PR review comments (JSON array on stdin) to Markdown on stdout
    CommentsMd,

    /// Convert a PR description payload (JSON on stdin) to Markdown on stdout
    PrBodyMd,

    /// Print the first spec URL found in review comments (JSON array on stdin)
    FindSpecUrl,

    /// Fetch a ClickUp task and its parent chain into a Markdown document
    FetchTask,

    /// List agents from a JSON manifest as name|role|prompt lines
    ListAgents {
        /// Path to the agents manifest
        manifest: PathBuf,
    },

    /// Render a prompt template by substituting {{PLACEHOLDER}} values
    RenderPrompt {
        /// Template file to read
        template: PathBuf,
        /// Destination for the rendered prompt
        output: PathBuf,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Diagnostics go to stderr; stdout belongs to the subcommand payloads.
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(format!("specpipe={log_level}"))
        .with_writer(std::io::stderr)
        .init();

    match run(cli.command).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            if !err.is_silent() {
                eprintln!("{}", err.to_string().red());
            }
            ExitCode::from(err.exit_code())
        }
    }
}

async fn run(command: Commands) -> Result<(), CliError> {
    match command {
        Commands::CommentsMd => cli::comments_md(),
        Commands::PrBodyMd => cli::pr_body_md(),
        Commands::FindSpecUrl => cli::find_spec_url(SpecUrlConfig::from_env()),
        Commands::FetchTask => cli::fetch_task(FetchTaskConfig::from_env()).await,
        Commands::ListAgents { manifest } => cli::list_agents(&manifest),
        Commands::RenderPrompt { template, output } => {
            cli::render_prompt(&PromptContext::from_env(), &template, &output)
        }
    }
}
