//! Engine facade
//!
//! Bundles the estimator, matcher and analyzer behind one handle that reads
//! the clock once per call and optionally records metrics. The components
//! themselves stay pure; this is the only place that touches the clock.

use crate::config::AppConfig;
use crate::error::{Result, WaitlistError};
use crate::matching::{BestFitTableMatcher, CategoryWait, MatchRequest, TableMatch, TableMatcher};
use crate::metrics::MetricsCollector;
use crate::snapshot::RestaurantSnapshot;
use crate::turnover::{
    ConsecutiveSeatingAnalyzer, TurnoverAnalysis, TurnoverAnalyzer, TurnoverSummary,
};
use crate::utils::{Clock, SystemClock};
use crate::wait_time::{
    CapacityEstimate, CapacityEstimator, EstimateRequest, EstimatorConfig, QueuePressureEstimator,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::{Arc, RwLock};
use tracing::debug;

/// Matcher and estimator answers for the same party at the same instant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WaitQuote {
    pub table_match: Option<TableMatch>,
    pub estimate: CapacityEstimate,
}

/// Per-category analyses plus the dashboard roll-up
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TurnoverReport {
    pub analyses: Vec<TurnoverAnalysis>,
    pub summary: TurnoverSummary,
}

pub struct WaitlistEngine {
    clock: Arc<dyn Clock>,
    estimator: RwLock<Box<dyn CapacityEstimator>>,
    matcher: Box<dyn TableMatcher>,
    analyzer: Box<dyn TurnoverAnalyzer>,
    metrics: Option<Arc<MetricsCollector>>,
}

impl WaitlistEngine {
    /// Create an engine from explicit components
    pub fn new(
        estimator: Box<dyn CapacityEstimator>,
        matcher: Box<dyn TableMatcher>,
        analyzer: Box<dyn TurnoverAnalyzer>,
    ) -> Self {
        Self {
            clock: Arc::new(SystemClock),
            estimator: RwLock::new(estimator),
            matcher,
            analyzer,
            metrics: None,
        }
    }

    /// Build the default components from application configuration
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        let estimator = QueuePressureEstimator::new(config.estimator.clone())?;
        let matcher = BestFitTableMatcher::new(config.matching.clone())?;
        let analyzer = ConsecutiveSeatingAnalyzer::new(config.turnover.clone())?;

        Ok(Self::new(
            Box::new(estimator),
            Box::new(matcher),
            Box::new(analyzer),
        ))
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn with_metrics(mut self, metrics: Arc<MetricsCollector>) -> Self {
        self.metrics = Some(metrics);
        self
    }

    pub fn metrics(&self) -> Option<Arc<MetricsCollector>> {
        self.metrics.clone()
    }

    /// Estimate the wait for a party of `party_size`
    pub fn estimate(
        &self,
        snapshot: &RestaurantSnapshot,
        party_size: u32,
    ) -> Result<CapacityEstimate> {
        let now = self.clock.now();
        self.estimate_at(snapshot, party_size, now)
    }

    /// Pick a table category for a party, honouring an optional preference
    pub fn find_table(
        &self,
        snapshot: &RestaurantSnapshot,
        party_size: u32,
        preferred_category: Option<&str>,
    ) -> Option<TableMatch> {
        let timer = self.metrics.as_ref().map(|m| m.start_timer());

        let mut request = MatchRequest::new(&snapshot.categories, party_size)
            .with_queue(&snapshot.queue);
        if let Some(name) = preferred_category {
            request = request.with_preference(name);
        }

        let table_match = self.matcher.find_table_for_party(&request);

        if let Some(metrics) = &self.metrics {
            metrics.record_match(table_match.as_ref());
            if let Some(timer) = timer {
                metrics.record_operation("match", timer.stop());
            }
        }

        table_match
    }

    /// Per-category wait board for every active category
    pub fn category_waits(&self, snapshot: &RestaurantSnapshot) -> Vec<CategoryWait> {
        self.matcher
            .category_waits(&snapshot.categories, &snapshot.queue)
    }

    /// Run the matcher and estimator against one clock reading
    pub fn quote(
        &self,
        snapshot: &RestaurantSnapshot,
        party_size: u32,
        preferred_category: Option<&str>,
    ) -> Result<WaitQuote> {
        let now = self.clock.now();
        let table_match = self.find_table(snapshot, party_size, preferred_category);
        let estimate = self.estimate_at(snapshot, party_size, now)?;

        debug!(
            "Quote for party of {}: {} minutes, category {:?}",
            party_size,
            estimate.estimated_minutes,
            table_match.as_ref().map(|m| m.category.name.as_str())
        );

        Ok(WaitQuote {
            table_match,
            estimate,
        })
    }

    /// Compare configured turnover with what the seated history shows
    pub fn analyze(&self, snapshot: &RestaurantSnapshot) -> TurnoverReport {
        let timer = self.metrics.as_ref().map(|m| m.start_timer());

        let analyses = self
            .analyzer
            .analyze(&snapshot.categories, &snapshot.seated_history);
        let summary = TurnoverSummary::from_analyses(&analyses);

        if let Some(metrics) = &self.metrics {
            metrics.record_turnover(&summary);
            if let Some(timer) = timer {
                metrics.record_operation("analyze", timer.stop());
            }
        }

        TurnoverReport { analyses, summary }
    }

    /// Get the current estimator configuration
    pub fn estimator_config(&self) -> Result<EstimatorConfig> {
        let estimator = self
            .estimator
            .read()
            .map_err(|_| WaitlistError::InternalError {
                message: "Failed to acquire estimator read lock".to_string(),
            })?;
        Ok(estimator.config().clone())
    }

    /// Replace the estimator configuration; invalid values leave it unchanged
    pub fn update_estimator_config(&self, config: EstimatorConfig) -> Result<()> {
        let mut estimator = self
            .estimator
            .write()
            .map_err(|_| WaitlistError::InternalError {
                message: "Failed to acquire estimator write lock".to_string(),
            })?;
        estimator.update_config(config)
    }

    fn estimate_at(
        &self,
        snapshot: &RestaurantSnapshot,
        party_size: u32,
        now: DateTime<Utc>,
    ) -> Result<CapacityEstimate> {
        let timer = self.metrics.as_ref().map(|m| m.start_timer());

        let request = EstimateRequest::new(
            snapshot.status,
            party_size,
            &snapshot.categories,
            &snapshot.queue,
        )
        .with_history(&snapshot.history_samples);

        let estimate = {
            let estimator = self
                .estimator
                .read()
                .map_err(|_| WaitlistError::InternalError {
                    message: "Failed to acquire estimator read lock".to_string(),
                })?;
            estimator.estimate(&request, now)
        };

        if let Some(metrics) = &self.metrics {
            metrics.record_estimate(&estimate);
            if let Some(timer) = timer {
                metrics.record_operation("estimate", timer.stop());
            }
        }

        Ok(estimate)
    }
}
