//! Config command - show or change settings

use anyhow::Result;
use clap::Subcommand;
use colored::Colorize;

use coffer_core::config::Config;
use coffer_core::LogEvent;

use super::{get_coffer_dir, get_context};
use crate::output;

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show the resolved settings
    Show {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Change a setting (currency, decimal-places, logging)
    Set {
        key: String,
        value: String,
    },
}

pub fn run(command: ConfigCommands) -> Result<()> {
    match command {
        ConfigCommands::Show { json } => {
            let ctx = get_context()?;
            let config = &ctx.config;

            if json {
                println!("{}", serde_json::to_string_pretty(config)?);
                return Ok(());
            }

            let mut table = output::create_table();
            table.set_header(vec!["Setting", "Value"]);
            table.add_row(vec!["currency".to_string(), config.currency.clone()]);
            table.add_row(vec![
                "decimal-places".to_string(),
                config.decimal_places.to_string(),
            ]);
            table.add_row(vec![
                "logging".to_string(),
                config.logging_enabled.to_string(),
            ]);
            println!("{}", table);
        }
        ConfigCommands::Set { key, value } => {
            let coffer_dir = get_coffer_dir()?;
            std::fs::create_dir_all(&coffer_dir)?;

            let mut config = Config::load(&coffer_dir)?;
            config.set(&key, &value)?;
            config.save(&coffer_dir)?;

            let ctx = get_context()?;
            ctx.log(LogEvent::new("config_changed").with_command("config"));

            output::success(&format!("Set {} = {}", key.bold(), value));
        }
    }

    Ok(())
}
