//! Turnover auditing for the staff dashboard
//!
//! This module learns actual table turnover from historical seatings and
//! flags categories whose configured estimate has gone stale. It reads
//! historical entries only, never the live queue.

pub mod analyzer;
pub mod statistics;
pub mod summary;

// Re-export commonly used types
pub use analyzer::{
    ConsecutiveSeatingAnalyzer, TurnoverAnalysis, TurnoverAnalyzer, TurnoverConfig,
    TurnoverRecommendation,
};
pub use statistics::TurnoverStats;
pub use summary::TurnoverSummary;
