//! Noughts - command-line entry point.

#![warn(missing_docs)]

mod cli;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Command, LogTarget};
use noughts::{AppConfig, ArchiveService, DEFAULT_LOG_FILTER, MatchRepository};
use tracing::{debug, info, instrument};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let command = cli.command.unwrap_or(Command::Play);

    // Logging first, so config loading is traced too.
    match command.log_target() {
        LogTarget::File => noughts::init_file_logging()?,
        LogTarget::Stderr => init_stderr_logging(),
    }

    let config = AppConfig::load_or_default(&cli.config)?
        .with_overrides(cli.db_path, cli.difficulty);

    match command {
        Command::Play => {
            let runtime = tokio::runtime::Builder::new_current_thread()
                .enable_time()
                .build()?;
            runtime.block_on(noughts::run_lobby(config))
        }
        Command::History { limit, json } => print_history(&config, limit, json),
        Command::Replay { game_id } => print_replay(&config, game_id),
    }
}

/// Plain-text subcommands log to stderr so stdout stays clean.
fn init_stderr_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn open_archive(config: &AppConfig) -> Result<ArchiveService> {
    let repository = MatchRepository::open(config.db_path().clone())?;
    Ok(ArchiveService::new(repository))
}

/// Prints recent matches as a table or JSON.
#[instrument(skip(config))]
fn print_history(config: &AppConfig, limit: i64, json: bool) -> Result<()> {
    let archive = open_archive(config)?;
    let games = archive.recent_matches(limit)?;
    debug!(count = games.len(), "Printing history");

    if json {
        println!("{}", serde_json::to_string_pretty(&games)?);
        return Ok(());
    }

    if games.is_empty() {
        println!("No matches recorded.");
        return Ok(());
    }

    println!("{:>5}  {:<16}  {:<7}  {:<4}  Result", "#", "Started", "Level", "You");
    for game in &games {
        let result = match game.result()? {
            Some(result) => result.to_string(),
            None => "Unfinished".to_string(),
        };
        println!(
            "{:>5}  {:<16}  {:<7}  {:<4}  {}",
            game.id(),
            game.started_at().format("%Y-%m-%d %H:%M"),
            game.difficulty(),
            game.human_side(),
            result
        );
    }

    let summary = archive.summary()?;
    println!(
        "\n{} matches: {} won, {} lost, {} tied, {} unfinished ({:.1}% win rate)",
        summary.total_games(),
        summary.human_wins(),
        summary.computer_wins(),
        summary.ties(),
        summary.unfinished(),
        summary.win_rate()
    );
    Ok(())
}

/// Prints every board of one match in move order.
#[instrument(skip(config))]
fn print_replay(config: &AppConfig, game_id: i32) -> Result<()> {
    let archive = open_archive(config)?;
    let frames = archive.replay(game_id)?;
    info!(game_id, frames = frames.len(), "Printing replay");

    for frame in &frames {
        match (frame.side(), frame.cell()) {
            (Some(side), Some(cell)) => {
                println!("Move {}: {} plays {}", frame.move_number(), side, cell + 1)
            }
            (Some(side), None) => println!("Move {}: {}", frame.move_number(), side),
            _ => println!("Start"),
        }
        println!("{}\n", frame.board().display());
    }
    Ok(())
}
