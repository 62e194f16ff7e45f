//! Metrics collection using Prometheus
//!
//! This module records what the engine answered (confidence grades, match
//! outcomes, stale turnover estimates) and how long each call took. Recording
//! never feeds back into engine results.

use crate::error::WaitlistError;
use crate::matching::{MatchReason, TableMatch};
use crate::turnover::TurnoverSummary;
use crate::wait_time::CapacityEstimate;
use anyhow::Result;
use prometheus::{
    Encoder, Histogram, HistogramOpts, HistogramVec, IntCounter, IntCounterVec, IntGauge, Opts,
    Registry, TextEncoder,
};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Main metrics collector for the waitlist engine
#[derive(Clone)]
pub struct MetricsCollector {
    /// Prometheus registry
    registry: Arc<Registry>,

    /// Wait estimate metrics
    estimator_metrics: EstimatorMetrics,

    /// Table match metrics
    matcher_metrics: MatcherMetrics,

    /// Turnover audit metrics
    turnover_metrics: TurnoverMetrics,

    /// Performance metrics
    performance_metrics: PerformanceMetrics,
}

/// Wait estimate metrics
#[derive(Clone)]
pub struct EstimatorMetrics {
    /// Estimates produced, by confidence grade
    pub estimates_total: IntCounterVec,

    /// Parties no active category could seat
    pub no_capacity_total: IntCounter,

    /// Distribution of quoted waits
    pub estimated_wait_minutes: Histogram,
}

/// Table match metrics
#[derive(Clone)]
pub struct MatcherMetrics {
    /// Match attempts by outcome
    pub matches_total: IntCounterVec,
}

/// Turnover audit metrics
#[derive(Clone)]
pub struct TurnoverMetrics {
    /// Analyzer runs
    pub analyses_total: IntCounter,

    /// Categories covered by the latest run
    pub categories_analyzed: IntGauge,

    /// Categories flagged for adjustment by the latest run
    pub categories_needing_adjustment: IntGauge,
}

/// Performance metrics
#[derive(Clone)]
pub struct PerformanceMetrics {
    /// Engine call durations by operation
    pub operation_duration: HistogramVec,
}

impl MetricsCollector {
    /// Create a new metrics collector with default registry
    pub fn new() -> Result<Self> {
        let registry = Arc::new(Registry::new());
        Self::with_registry(registry)
    }

    /// Create a new metrics collector with custom registry
    pub fn with_registry(registry: Arc<Registry>) -> Result<Self> {
        let estimator_metrics = EstimatorMetrics::new(&registry)?;
        let matcher_metrics = MatcherMetrics::new(&registry)?;
        let turnover_metrics = TurnoverMetrics::new(&registry)?;
        let performance_metrics = PerformanceMetrics::new(&registry)?;

        Ok(Self {
            registry,
            estimator_metrics,
            matcher_metrics,
            turnover_metrics,
            performance_metrics,
        })
    }

    /// Get the Prometheus registry
    pub fn registry(&self) -> Arc<Registry> {
        self.registry.clone()
    }

    pub fn estimator(&self) -> &EstimatorMetrics {
        &self.estimator_metrics
    }

    pub fn matcher(&self) -> &MatcherMetrics {
        &self.matcher_metrics
    }

    pub fn turnover(&self) -> &TurnoverMetrics {
        &self.turnover_metrics
    }

    pub fn performance(&self) -> &PerformanceMetrics {
        &self.performance_metrics
    }

    /// Record a wait estimate handed back to a caller
    pub fn record_estimate(&self, estimate: &CapacityEstimate) {
        let confidence_str = estimate.confidence.as_str();

        self.estimator_metrics
            .estimates_total
            .with_label_values(&[confidence_str])
            .inc();

        if estimate.no_capacity {
            self.estimator_metrics.no_capacity_total.inc();
        }

        self.estimator_metrics
            .estimated_wait_minutes
            .observe(f64::from(estimate.estimated_minutes));
    }

    /// Record the outcome of a match attempt
    pub fn record_match(&self, table_match: Option<&TableMatch>) {
        let outcome = match table_match {
            None => "no_inventory",
            Some(m) if m.reason == MatchReason::ExceedsLargestTable => "oversized",
            Some(m) if m.is_optimal_match => "optimal",
            Some(_) => "suboptimal",
        };

        self.matcher_metrics
            .matches_total
            .with_label_values(&[outcome])
            .inc();
    }

    /// Record a turnover audit run
    pub fn record_turnover(&self, summary: &TurnoverSummary) {
        self.turnover_metrics.analyses_total.inc();
        self.turnover_metrics
            .categories_analyzed
            .set(summary.categories_analyzed as i64);
        self.turnover_metrics
            .categories_needing_adjustment
            .set(summary.categories_needing_adjustment as i64);
    }

    /// Record engine operation duration
    pub fn record_operation(&self, operation: &str, duration: Duration) {
        self.performance_metrics
            .operation_duration
            .with_label_values(&[operation])
            .observe(duration.as_secs_f64());
    }

    /// Encode every registered metric in the Prometheus text format
    pub fn render(&self) -> Result<String> {
        let mut buffer = Vec::new();
        TextEncoder::new()
            .encode(&self.registry.gather(), &mut buffer)
            .map_err(|e| WaitlistError::MetricsError {
                message: format!("Failed to encode metrics: {}", e),
            })?;
        String::from_utf8(buffer).map_err(|e| {
            WaitlistError::MetricsError {
                message: format!("Metrics output is not UTF-8: {}", e),
            }
            .into()
        })
    }

    /// Create a timer for measuring operation duration
    pub fn start_timer(&self) -> MetricsTimer {
        MetricsTimer::new()
    }
}

/// Timer for measuring operation durations
pub struct MetricsTimer {
    start: Instant,
}

impl MetricsTimer {
    fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    /// Get the elapsed duration
    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    /// Stop the timer and return the duration
    pub fn stop(self) -> Duration {
        self.elapsed()
    }
}

impl EstimatorMetrics {
    fn new(registry: &Registry) -> Result<Self> {
        let estimates_total = IntCounterVec::new(
            Opts::new(
                "waitlist_engine_estimates_total",
                "Wait estimates produced by confidence grade",
            ),
            &["confidence"],
        )?;
        registry.register(Box::new(estimates_total.clone()))?;

        let no_capacity_total = IntCounter::new(
            "waitlist_engine_no_capacity_total",
            "Parties that no active table category could seat",
        )?;
        registry.register(Box::new(no_capacity_total.clone()))?;

        let estimated_wait_minutes = Histogram::with_opts(
            HistogramOpts::new(
                "waitlist_engine_estimated_wait_minutes",
                "Distribution of quoted wait times in minutes",
            )
            .buckets(vec![0.0, 5.0, 15.0, 30.0, 45.0, 60.0, 90.0, 120.0, 180.0, 240.0]),
        )?;
        registry.register(Box::new(estimated_wait_minutes.clone()))?;

        Ok(Self {
            estimates_total,
            no_capacity_total,
            estimated_wait_minutes,
        })
    }
}

impl MatcherMetrics {
    fn new(registry: &Registry) -> Result<Self> {
        let matches_total = IntCounterVec::new(
            Opts::new(
                "waitlist_engine_matches_total",
                "Table match attempts by outcome",
            ),
            &["outcome"],
        )?;
        registry.register(Box::new(matches_total.clone()))?;

        Ok(Self { matches_total })
    }
}

impl TurnoverMetrics {
    fn new(registry: &Registry) -> Result<Self> {
        let analyses_total = IntCounter::new(
            "waitlist_engine_turnover_analyses_total",
            "Turnover audit runs",
        )?;
        registry.register(Box::new(analyses_total.clone()))?;

        let categories_analyzed = IntGauge::new(
            "waitlist_engine_turnover_categories_analyzed",
            "Categories covered by the latest turnover audit",
        )?;
        registry.register(Box::new(categories_analyzed.clone()))?;

        let categories_needing_adjustment = IntGauge::new(
            "waitlist_engine_turnover_categories_needing_adjustment",
            "Categories whose configured turnover is stale",
        )?;
        registry.register(Box::new(categories_needing_adjustment.clone()))?;

        Ok(Self {
            analyses_total,
            categories_analyzed,
            categories_needing_adjustment,
        })
    }
}

impl PerformanceMetrics {
    fn new(registry: &Registry) -> Result<Self> {
        let operation_duration = HistogramVec::new(
            HistogramOpts::new(
                "waitlist_engine_operation_duration_seconds",
                "Engine call duration in seconds",
            )
            .buckets(vec![0.00001, 0.0001, 0.001, 0.01, 0.1]),
            &["operation"],
        )?;
        registry.register(Box::new(operation_duration.clone()))?;

        Ok(Self { operation_duration })
    }
}
