//! Coffer CLI - guarded account sessions and an object-model tour

use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;
mod output;

use commands::{config, logs, session, tour};

/// Coffer - a guarded account in your terminal
#[derive(Parser)]
#[command(name = "coffer", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run deposit/withdraw operations against a fresh account
    Session {
        /// Operations: deposit:AMOUNT, withdraw:AMOUNT, balance
        ops: Vec<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Walk through the object-model lessons
    Tour {
        /// Topic (class, object, abstraction, encapsulation, inheritance, polymorphism)
        topic: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show or change settings
    Config {
        #[command(subcommand)]
        command: config::ConfigCommands,
    },

    /// View and manage the event log
    Logs {
        #[command(subcommand)]
        command: logs::LogsCommands,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            output::error(&format!("{:#}", e));
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Session { ops, json } => session::run(ops, json),
        Commands::Tour { topic, json } => tour::run(topic.as_deref(), json),
        Commands::Config { command } => config::run(command),
        Commands::Logs { command } => logs::run(command),
    }
}
