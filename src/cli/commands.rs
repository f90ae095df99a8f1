use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::Local;
use clap::{Parser, Subcommand};

use crate::help::load_help_content;
use crate::models::Role;
use crate::session::Session;
use crate::storage::Storage;
use crate::tui::run_interactive;

#[derive(Parser)]
#[command(name = "transcript-studio")]
#[command(version = "0.1.0")]
#[command(about = "Hand-author simulated multi-turn chat transcripts", long_about = None)]
pub struct Cli {
    /// Directory holding the persisted chat (defaults to the platform data dir)
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show statistics about the current chat
    Stats,
    /// Write the chat as a JSON document
    Export {
        /// Output file (defaults to chat-export-YYYY-MM-DD.json)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Replace the chat with a JSON document or message array
    Import {
        /// File containing the document to import
        file: PathBuf,
    },
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    let storage = match &cli.data_dir {
        Some(dir) => Storage::open(dir)?,
        None => Storage::open_default()?,
    };

    match &cli.command {
        Some(Commands::Stats) => {
            show_stats(storage)?;
        }
        Some(Commands::Export { output }) => {
            export_chat(storage, output.clone())?;
        }
        Some(Commands::Import { file }) => {
            import_chat(storage, file)?;
        }
        None => {
            let help_content = load_help_content(storage.dir());
            let session = Session::open(storage)?;
            run_interactive(session, help_content)?;
        }
    }

    Ok(())
}

fn show_stats(storage: Storage) -> Result<()> {
    let session = Session::open(storage)?;

    let messages = session.transcript().messages();
    let user_turns = messages.iter().filter(|m| m.role == Role::User).count();
    let assistant_turns = messages.iter().filter(|m| m.role == Role::Assistant).count();

    println!("Chat Statistics");
    println!("================================");
    println!("Title: {}", session.title());
    println!("Total messages: {}", messages.len());
    println!("  User turns: {}", user_turns);
    println!("  Assistant turns: {}", assistant_turns);
    println!("System instructions: {}", session.instructions().len());
    println!();
    println!("Data directory: {}", session.storage().dir().display());

    Ok(())
}

fn export_chat(storage: Storage, output: Option<PathBuf>) -> Result<()> {
    let session = Session::open(storage)?;

    let path = output.unwrap_or_else(|| {
        PathBuf::from(format!("chat-export-{}.json", Local::now().format("%Y-%m-%d")))
    });
    let json = session.export_document().to_json_pretty()?;
    fs::write(&path, json).with_context(|| format!("Failed to write {}", path.display()))?;

    println!("Exported chat to {}", path.display());
    Ok(())
}

fn import_chat(storage: Storage, file: &PathBuf) -> Result<()> {
    let json =
        fs::read_to_string(file).with_context(|| format!("Failed to read {}", file.display()))?;

    let mut session = Session::open(storage)?;
    session.import_json(&json)?;

    println!(
        "Imported \"{}\" ({} messages, {} instructions)",
        session.title(),
        session.transcript().len(),
        session.instructions().len()
    );
    Ok(())
}
