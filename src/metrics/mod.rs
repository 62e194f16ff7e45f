//! Metrics for the waitlist engine
//!
//! This module provides Prometheus metrics collection for engine calls made
//! through the engine facade.

pub mod collector;

pub use collector::{
    EstimatorMetrics, MatcherMetrics, MetricsCollector, MetricsTimer, PerformanceMetrics,
    TurnoverMetrics,
};
