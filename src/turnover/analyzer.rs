//! Turnover auditing from historical seatings
//!
//! Measures how long tables of each category actually turn over, using the
//! gaps between consecutive seatings, and recommends a new estimate when the
//! configured one has drifted.
//!
//! Consecutive seatings within a category are assumed to be the same
//! physical table turning. Entries carry no table identity, so when a
//! category has several tables turning concurrently the gaps interleave and
//! the measured turnover comes out short. Treat such categories as noisy.

use crate::turnover::statistics::TurnoverStats;
use crate::types::{
    CategoryId, Confidence, EntryStatus, TableCategory, WaitlistEntry, DEFAULT_TURNOVER_MINUTES,
};
use crate::utils::{minutes_between, round_minutes};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::debug;

/// Configuration for turnover analysis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TurnoverConfig {
    /// Gaps at or below this are treated as duplicates or noise
    pub min_valid_gap_minutes: f64,
    /// Gaps at or above this are treated as closures or inter-day breaks
    pub max_valid_gap_minutes: f64,
    /// Samples needed for high confidence
    pub high_confidence_samples: u64,
    /// Samples needed for medium confidence
    pub medium_confidence_samples: u64,
    /// Drift beyond this percentage triggers a recommendation
    pub adjustment_threshold_percent: f64,
}

impl Default for TurnoverConfig {
    fn default() -> Self {
        Self {
            min_valid_gap_minutes: 10.0,
            max_valid_gap_minutes: 300.0,
            high_confidence_samples: 50,
            medium_confidence_samples: 15,
            adjustment_threshold_percent: 15.0,
        }
    }
}

impl TurnoverConfig {
    /// Validate configuration values
    pub fn validate(&self) -> crate::error::Result<()> {
        if self.min_valid_gap_minutes < 0.0
            || self.min_valid_gap_minutes >= self.max_valid_gap_minutes
        {
            return Err(crate::error::WaitlistError::ConfigurationError {
                message: "min_valid_gap_minutes must be non-negative and below max_valid_gap_minutes"
                    .to_string(),
            }
            .into());
        }

        if self.medium_confidence_samples == 0
            || self.medium_confidence_samples > self.high_confidence_samples
        {
            return Err(crate::error::WaitlistError::ConfigurationError {
                message: "confidence sample thresholds must satisfy 0 < medium <= high".to_string(),
            }
            .into());
        }

        if self.adjustment_threshold_percent < 0.0 {
            return Err(crate::error::WaitlistError::ConfigurationError {
                message: "adjustment_threshold_percent must be non-negative".to_string(),
            }
            .into());
        }

        Ok(())
    }

    /// Gap strictly inside the valid window
    pub fn is_valid_gap(&self, minutes: f64) -> bool {
        minutes > self.min_valid_gap_minutes && minutes < self.max_valid_gap_minutes
    }

    /// Confidence tier for a number of valid samples
    pub fn confidence_for(&self, stats: &TurnoverStats) -> Confidence {
        if stats.has_sufficient_samples(self.high_confidence_samples) {
            Confidence::High
        } else if stats.has_sufficient_samples(self.medium_confidence_samples) {
            Confidence::Medium
        } else {
            Confidence::Low
        }
    }
}

/// Suggested replacement for a stale turnover estimate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TurnoverRecommendation {
    pub suggested_minutes: u32,
    pub percent_difference: f64,
}

/// Observed turnover for one category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TurnoverAnalysis {
    pub category_id: CategoryId,
    pub category_name: String,
    pub configured_turnover_minutes: u32,
    pub actual_turnover_minutes: u32,
    /// Valid gaps the actual figure is based on
    pub sample_count: u64,
    /// Gaps thrown out as noise or inter-day breaks
    pub discarded_samples: usize,
    pub confidence: Confidence,
    pub percent_difference: f64,
    pub recommendation: Option<TurnoverRecommendation>,
    pub stats: TurnoverStats,
}

impl TurnoverAnalysis {
    pub fn needs_adjustment(&self) -> bool {
        self.recommendation.is_some()
    }
}

/// Trait for turnover analysis over historical entries
pub trait TurnoverAnalyzer: Send + Sync {
    /// Analyze every category that has at least one valid gap, in input order
    fn analyze(
        &self,
        categories: &[TableCategory],
        history: &[WaitlistEntry],
    ) -> Vec<TurnoverAnalysis>;

    /// Get the current configuration
    fn config(&self) -> &TurnoverConfig;
}

/// Analyzer that measures gaps between consecutive seatings per category
#[derive(Debug, Clone)]
pub struct ConsecutiveSeatingAnalyzer {
    config: TurnoverConfig,
}

impl ConsecutiveSeatingAnalyzer {
    pub fn new(config: TurnoverConfig) -> crate::error::Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Seating times per category, sorted ascending
    fn group_seatings(history: &[WaitlistEntry]) -> HashMap<CategoryId, Vec<DateTime<Utc>>> {
        let mut seatings: HashMap<CategoryId, Vec<DateTime<Utc>>> = HashMap::new();

        for entry in history {
            if entry.status != EntryStatus::Seated {
                continue;
            }
            if let (Some(category_id), Some(seated_at)) = (entry.table_category_id, entry.seated_at)
            {
                seatings.entry(category_id).or_default().push(seated_at);
            }
        }

        for times in seatings.values_mut() {
            times.sort();
        }
        seatings
    }

    fn analyze_category(
        &self,
        category: &TableCategory,
        seated_times: &[DateTime<Utc>],
    ) -> Option<TurnoverAnalysis> {
        let gaps: Vec<f64> = seated_times
            .windows(2)
            .map(|pair| minutes_between(pair[0], pair[1]))
            .collect();

        let valid: Vec<f64> = gaps
            .iter()
            .copied()
            .filter(|&minutes| self.config.is_valid_gap(minutes))
            .collect();
        let discarded_samples = gaps.len() - valid.len();

        if valid.is_empty() {
            debug!(
                "Skipping {}: no valid turnover gaps ({} discarded)",
                category.name, discarded_samples
            );
            return None;
        }

        let stats = TurnoverStats::from_samples(&valid);
        let actual = round_minutes(stats.mean_minutes());
        let configured = category.turnover_or(DEFAULT_TURNOVER_MINUTES);
        let confidence = self.config.confidence_for(&stats);

        let percent_difference =
            (f64::from(actual) - f64::from(configured)) / f64::from(configured) * 100.0;

        let recommendation = (percent_difference.abs() > self.config.adjustment_threshold_percent
            && confidence != Confidence::Low)
            .then(|| TurnoverRecommendation {
                suggested_minutes: actual,
                percent_difference,
            });

        debug!(
            "Turnover for {}: actual {}m vs configured {}m ({:+.1}%, {} samples, {} confidence)",
            category.name, actual, configured, percent_difference, stats.sample_count, confidence
        );

        Some(TurnoverAnalysis {
            category_id: category.id,
            category_name: category.name.clone(),
            configured_turnover_minutes: configured,
            actual_turnover_minutes: actual,
            sample_count: stats.sample_count,
            discarded_samples,
            confidence,
            percent_difference,
            recommendation,
            stats,
        })
    }
}

impl Default for ConsecutiveSeatingAnalyzer {
    fn default() -> Self {
        Self {
            config: TurnoverConfig::default(),
        }
    }
}

impl TurnoverAnalyzer for ConsecutiveSeatingAnalyzer {
    fn analyze(
        &self,
        categories: &[TableCategory],
        history: &[WaitlistEntry],
    ) -> Vec<TurnoverAnalysis> {
        let seatings = Self::group_seatings(history);

        categories
            .iter()
            .filter_map(|category| {
                let seated_times = seatings.get(&category.id)?;
                self.analyze_category(category, seated_times)
            })
            .collect()
    }

    fn config(&self) -> &TurnoverConfig {
        &self.config
    }
}
