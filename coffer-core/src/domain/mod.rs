//! Core domain entities
//!
//! Pure data structures and their rules - no I/O or external dependencies.

mod account;
mod animal;
pub mod operation;
mod person;
pub mod result;
mod vehicle;

pub use account::{Account, AccountView};
pub use animal::Animal;
pub use operation::Operation;
pub use person::{Person, Role};
pub use vehicle::{Color, Conveyance, Vehicle};
