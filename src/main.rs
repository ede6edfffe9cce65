use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use raggadon::cli::{self, CliContext};
use raggadon::config::RaggadonConfig;

#[derive(Parser)]
#[command(name = "rag", version, about = "🤖 Raggadon CLI - RAG für Claude Code")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Speichert wichtige Informationen für das aktuelle Projekt
    Save {
        /// Der zu speichernde Inhalt
        content: String,
    },
    /// Sucht nach Informationen im aktuellen Projekt
    Search {
        /// Der Suchbegriff
        query: String,
    },
    /// Zeigt den Status des Raggadon Servers und Projekt-Statistiken
    Status,
    /// Startet den Raggadon Server
    Start,
    /// Ändert den Auto-Save Modus
    Mode {
        /// Modus: active, silent, ask, show
        mode: Option<String>,
    },
    /// Initialisiert Raggadon für das aktuelle Projekt
    Init,
    /// Speichert automatisch die wichtigen Teile eines Textes
    Auto {
        /// Der zu analysierende Text
        content: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = RaggadonConfig::load()?;

    // Log to stderr so stdout stays clean for command output.
    let filter = EnvFilter::try_new(&config.server.log_level)
        .unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cwd = std::env::current_dir().context("failed to read current directory")?;
    let ctx = CliContext::new(config, cwd)?;

    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        println!();
        println!("Aktuelles Projekt: {}", ctx.project);
        return Ok(());
    };

    match command {
        Command::Save { content } => cli::save::save(&ctx, &content).await?,
        Command::Search { query } => cli::search::search(&ctx, &query).await?,
        Command::Status => cli::status::status(&ctx).await?,
        Command::Start => cli::start::start(&ctx)?,
        Command::Mode { mode } => cli::mode::mode(&ctx, mode.as_deref())?,
        Command::Init => cli::init::init(&ctx)?,
        Command::Auto { content } => cli::auto::auto(&ctx, &content).await?,
    }

    Ok(())
}
