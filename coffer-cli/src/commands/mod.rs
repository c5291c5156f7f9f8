//! CLI command implementations

pub mod config;
pub mod logs;
pub mod session;
pub mod tour;

use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use coffer_core::{CofferContext, EntryPoint};

use crate::output;

/// Get the coffer directory from `COFFER_DIR` or `~/.coffer`
pub fn get_coffer_dir() -> Result<PathBuf> {
    if let Ok(dir) = std::env::var("COFFER_DIR") {
        return Ok(PathBuf::from(dir));
    }
    dirs::home_dir()
        .map(|home| home.join(".coffer"))
        .ok_or_else(|| anyhow!("Could not find home directory; set COFFER_DIR"))
}

/// Get or create the coffer context
pub fn get_context() -> Result<CofferContext> {
    let coffer_dir = get_coffer_dir()?;

    std::fs::create_dir_all(&coffer_dir)
        .with_context(|| format!("Failed to create coffer directory: {:?}", coffer_dir))?;

    let ctx = CofferContext::new(&coffer_dir, EntryPoint::Cli, env!("CARGO_PKG_VERSION"))
        .context("Failed to initialize coffer context")?;

    if let Some(warning) = &ctx.config.warning {
        output::notice(warning);
    }
    Ok(ctx)
}
