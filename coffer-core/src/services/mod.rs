//! Service layer - business logic orchestration
//!
//! Each service focuses on one use case: driving a ledger, rendering the
//! tour, or recording events.

pub mod logging;
pub mod session;
pub mod tour;

pub use logging::{EntryPoint, LogEntry, LogEvent, LoggingService};
pub use session::{parse_operations, Rejection, SessionService, SessionSummary, StepOutcome};
pub use tour::{format_balance, Topic, TourSection, TourService};
