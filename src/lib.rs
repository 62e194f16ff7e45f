//! Waitlist Engine - capacity and table matching for restaurant waitlists
//!
//! This crate estimates how long a party will wait, picks the table category
//! it should be seated at, and audits configured table turnover against what
//! the seating history actually shows.

pub mod config;
pub mod engine;
pub mod error;
pub mod matching;
pub mod metrics;
pub mod snapshot;
pub mod turnover;
pub mod types;
pub mod utils;
pub mod wait_time;

// Re-export commonly used types and traits
pub use error::{Result, WaitlistError};
pub use types::*;

// Re-export key components
pub use engine::{TurnoverReport, WaitQuote, WaitlistEngine};
pub use matching::{BestFitTableMatcher, TableMatch, TableMatcher};
pub use snapshot::RestaurantSnapshot;
pub use turnover::{ConsecutiveSeatingAnalyzer, TurnoverAnalyzer};
pub use wait_time::{CapacityEstimate, CapacityEstimator, QueuePressureEstimator};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
