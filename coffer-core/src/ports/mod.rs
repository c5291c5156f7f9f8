//! Port definitions
//!
//! Ports define the interfaces the services drive. Services depend only on
//! these traits, not on concrete types.

mod ledger;

pub use ledger::Ledger;
