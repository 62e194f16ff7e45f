//! Wait time estimation for queue joins and status refreshes
//!
//! This module combines the operator's wait status, the table inventory and
//! live queue pressure into a single wait quote with a confidence grade.

pub mod calculator;
pub mod history;
pub mod pressure;

// Re-export commonly used types
pub use calculator::{
    CapacityEstimate, CapacityEstimator, EstimateRequest, EstimatorConfig, QueuePressureEstimator,
};
pub use pressure::{busy_level, pressure_multiplier, QueuePressure};
