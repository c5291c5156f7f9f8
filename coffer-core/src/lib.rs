//! Coffer Core - guarded account balances and an object-model tour
//!
//! - **domain**: core entities (Account, Operation, Vehicle, Person, Animal)
//! - **ports**: the `Ledger` trait services drive
//! - **services**: session driving, tour rendering, event logging
//! - **config**: settings.json plus environment overrides

pub mod config;
pub mod domain;
pub mod log_migrations;
pub mod ports;
pub mod services;

use std::path::Path;

use anyhow::Result;

use config::Config;
use services::*;

// Re-export commonly used types at crate root
pub use domain::result::Error;
pub use domain::{Account, AccountView, Operation};
pub use ports::Ledger;
pub use services::{EntryPoint, LogEvent, LoggingService};

/// Main context for Coffer operations
///
/// Holds configuration, the optional event logger and the stateless
/// services. Accounts are not part of the context: each caller owns its own.
pub struct CofferContext {
    pub config: Config,
    pub logger: Option<LoggingService>,
    pub tour_service: TourService,
}

impl CofferContext {
    /// Create a context rooted at `coffer_dir`
    ///
    /// A logger that fails to open is dropped rather than failing the
    /// context; logging never blocks operations.
    pub fn new(coffer_dir: &Path, entry_point: EntryPoint, app_version: &str) -> Result<Self> {
        let config = Config::load(coffer_dir)?;
        Ok(Self::with_config(coffer_dir, config, entry_point, app_version))
    }

    /// Create a context from an already resolved config
    pub fn with_config(
        coffer_dir: &Path,
        config: Config,
        entry_point: EntryPoint,
        app_version: &str,
    ) -> Self {
        let logger = if config.logging_enabled {
            LoggingService::new(coffer_dir, entry_point, app_version).ok()
        } else {
            None
        };

        let tour_service = TourService::new(config.decimal_places);

        Self {
            config,
            logger,
            tour_service,
        }
    }

    /// Start a session over a caller-owned ledger
    pub fn session<L: Ledger>(&self, ledger: L) -> SessionService<'_, L> {
        SessionService::new(ledger).with_logger(self.logger.as_ref())
    }

    /// Format a balance using the configured decimal places
    pub fn format_balance(&self, balance: rust_decimal::Decimal) -> String {
        format_balance(balance, self.config.decimal_places)
    }

    /// Record an event if logging is enabled, ignoring failures
    pub fn log(&self, event: LogEvent) {
        if let Some(logger) = &self.logger {
            let _ = logger.log(event);
        }
    }
}
