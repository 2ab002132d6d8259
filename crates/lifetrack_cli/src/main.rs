//! `lifetrack` command-line front end.
//!
//! # Responsibility
//! - Back up and restore the local store through the transfer service.
//! - Print collection counts for quick sanity checks.

use clap::{Parser, Subcommand};
use lifetrack_core::{
    core_version, init_from_config, CoreConfig, EventRepository, GoalRepository, NoteRepository,
    SqliteBackend, Storage, SystemClock, TaskRepository, TransferService,
};
use log::info;
use std::error::Error;
use std::path::PathBuf;
use std::process::ExitCode;

/// Local task, note, goal and event tracker.
///
/// The database path comes from `LIFETRACK_DB_PATH`; file logging is enabled
/// by `LIFETRACK_LOG_DIR`.
#[derive(Parser, Debug)]
#[command(name = "lifetrack")]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Write a JSON backup of every collection.
    Export {
        /// Directory receiving the backup file.
        #[arg(long, default_value = ".")]
        out: PathBuf,
    },
    /// Replace collections with the ones found in a backup file.
    Import {
        /// Backup produced by `lifetrack export`.
        file: PathBuf,
    },
    /// Show how many records each collection holds.
    Stats,
    /// Print the core version.
    Version,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(command: Command) -> Result<(), Box<dyn Error>> {
    if let Command::Version = command {
        println!("lifetrack_core version={}", core_version());
        return Ok(());
    }

    let config = CoreConfig::from_env()?;
    init_from_config(&config)?;
    let store = Storage::new(SqliteBackend::open(&config.db_path)?);
    let clock = SystemClock;

    match command {
        Command::Export { out } => {
            let file = TransferService::new(&store, &clock).export()?;
            let path = out.join(&file.file_name);
            std::fs::write(&path, file.contents)?;
            info!("event=cli_export module=cli status=ok");
            println!("{}", path.display());
        }
        Command::Import { file } => {
            let text = std::fs::read_to_string(&file)?;
            let summary = TransferService::new(&store, &clock).import(&text)?;
            info!("event=cli_import module=cli status=ok");
            for (kind, count) in [
                ("notes", summary.notes),
                ("goals", summary.goals),
                ("tasks", summary.tasks),
                ("events", summary.events),
            ] {
                match count {
                    Some(count) => println!("{kind}: {count} imported"),
                    None => println!("{kind}: unchanged"),
                }
            }
        }
        Command::Stats => {
            let tasks = TaskRepository::load(&store, &clock);
            let notes = NoteRepository::load(&store, &clock);
            let goals = GoalRepository::load(&store, &clock);
            let events = EventRepository::load(&store, &clock);
            println!("tasks: {}", tasks.len());
            println!("notes: {} ({} tags)", notes.len(), notes.list_tags().len());
            match goals.average_progress() {
                Some(avg) => println!("goals: {} (avg progress {avg:.1}%)", goals.len()),
                None => println!("goals: 0"),
            }
            println!("events: {}", events.len());
        }
        Command::Version => {}
    }
    Ok(())
}
