//! Wait time estimation
//!
//! This module turns the restaurant's coarse wait status, its table inventory
//! and the live queue into a wait estimate with a confidence grade.

use crate::types::{
    Confidence, HistoricalSample, RestaurantWaitStatus, TableCategory, WaitStatusSnapshot,
    WaitlistEntry,
};
use crate::utils::round_minutes;
use crate::wait_time::history::{find_sample, historical_scale, local_day_and_hour};
use crate::wait_time::pressure::{busy_level, pressure_multiplier, QueuePressure};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Configuration for wait time estimation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EstimatorConfig {
    /// Baseline when the restaurant reports tables available
    pub available_minutes: u32,
    pub short_minutes: u32,
    pub long_minutes: u32,
    pub very_long_minutes: u32,
    pub closed_minutes: u32,
    /// Baseline when no recognised status is set
    pub unspecified_minutes: u32,
    /// Party sizes within this many seats compete for the same tables
    pub similarity_band: u32,
    /// Fixed quote when no active category can seat the party
    pub no_capacity_minutes: u32,
    /// How far ahead of the next available table a diner should arrive
    pub arrival_lead_minutes: u32,
    /// Longest active queue that still earns a high confidence grade
    pub high_confidence_max_queue: usize,
    /// Offset applied to UTC before looking up historical buckets
    pub utc_offset_minutes: i32,
}

impl Default for EstimatorConfig {
    fn default() -> Self {
        Self {
            available_minutes: 0,
            short_minutes: 15,
            long_minutes: 30,
            very_long_minutes: 60,
            closed_minutes: 0,
            unspecified_minutes: 15,
            similarity_band: 2,
            no_capacity_minutes: 120,
            arrival_lead_minutes: 15,
            high_confidence_max_queue: 10,
            utc_offset_minutes: 0,
        }
    }
}

impl EstimatorConfig {
    /// Baseline minutes for a status snapshot; a positive override always wins
    pub fn baseline_minutes(&self, snapshot: &WaitStatusSnapshot) -> u32 {
        match snapshot.override_minutes {
            Some(minutes) if minutes > 0 => minutes,
            _ => self.status_minutes(snapshot.status),
        }
    }

    /// Fixed mapping from status to baseline minutes
    pub fn status_minutes(&self, status: RestaurantWaitStatus) -> u32 {
        match status {
            RestaurantWaitStatus::Available => self.available_minutes,
            RestaurantWaitStatus::Short => self.short_minutes,
            RestaurantWaitStatus::Long => self.long_minutes,
            RestaurantWaitStatus::VeryLong => self.very_long_minutes,
            RestaurantWaitStatus::Closed => self.closed_minutes,
            RestaurantWaitStatus::Unspecified => self.unspecified_minutes,
        }
    }

    /// Validate configuration values
    pub fn validate(&self) -> crate::error::Result<()> {
        if self.no_capacity_minutes == 0 {
            return Err(crate::error::WaitlistError::ConfigurationError {
                message: "no_capacity_minutes must be greater than 0".to_string(),
            }
            .into());
        }

        if self.arrival_lead_minutes > self.no_capacity_minutes {
            return Err(crate::error::WaitlistError::ConfigurationError {
                message: "arrival_lead_minutes must not exceed no_capacity_minutes".to_string(),
            }
            .into());
        }

        // Real-world offsets range from UTC-12:00 to UTC+14:00
        if !(-720..=840).contains(&self.utc_offset_minutes) {
            return Err(crate::error::WaitlistError::ConfigurationError {
                message: format!(
                    "utc_offset_minutes {} is outside -720..=840",
                    self.utc_offset_minutes
                ),
            }
            .into());
        }

        Ok(())
    }
}

/// Everything the estimator reads for one call
#[derive(Debug, Clone, Copy)]
pub struct EstimateRequest<'a> {
    pub status: WaitStatusSnapshot,
    pub party_size: u32,
    pub categories: &'a [TableCategory],
    pub queue: &'a [WaitlistEntry],
    pub history: Option<&'a [HistoricalSample]>,
}

impl<'a> EstimateRequest<'a> {
    pub fn new(
        status: WaitStatusSnapshot,
        party_size: u32,
        categories: &'a [TableCategory],
        queue: &'a [WaitlistEntry],
    ) -> Self {
        Self {
            status,
            party_size,
            categories,
            queue,
            history: None,
        }
    }

    pub fn with_history(mut self, history: &'a [HistoricalSample]) -> Self {
        self.history = Some(history);
        self
    }

    fn has_history(&self) -> bool {
        self.history.map_or(false, |samples| !samples.is_empty())
    }
}

/// Wait prediction for one party
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CapacityEstimate {
    pub estimated_minutes: u32,
    pub confidence: Confidence,
    /// Physical tables across the categories that can seat the party
    pub available_tables: u32,
    /// 0 through 100
    pub busy_level: u8,
    pub next_available_time: DateTime<Utc>,
    pub recommended_arrival_time: Option<DateTime<Utc>>,
    /// Set when no active category can seat the party at all
    pub no_capacity: bool,
}

/// Trait for estimating waits
pub trait CapacityEstimator: Send + Sync {
    /// Estimate the wait for the party described by `request` as of `now`
    fn estimate(&self, request: &EstimateRequest<'_>, now: DateTime<Utc>) -> CapacityEstimate;

    /// Get the current configuration
    fn config(&self) -> &EstimatorConfig;

    /// Update the configuration
    fn update_config(&mut self, config: EstimatorConfig) -> crate::error::Result<()>;
}

/// Estimator that scales the status baseline by competing demand and queue pressure
#[derive(Debug, Clone)]
pub struct QueuePressureEstimator {
    config: EstimatorConfig,
}

impl QueuePressureEstimator {
    /// Create a new estimator
    pub fn new(config: EstimatorConfig) -> crate::error::Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Hard-policy result for a party no active category can seat
    fn no_capacity_estimate(&self, now: DateTime<Utc>) -> CapacityEstimate {
        let minutes = self.config.no_capacity_minutes;
        CapacityEstimate {
            estimated_minutes: minutes,
            confidence: Confidence::High,
            available_tables: 0,
            busy_level: 100,
            next_available_time: now + Duration::minutes(i64::from(minutes)),
            recommended_arrival_time: None,
            no_capacity: true,
        }
    }

    fn grade_confidence(
        &self,
        history_supplied: bool,
        has_qualifying: bool,
        active_entries: usize,
    ) -> Confidence {
        if history_supplied && has_qualifying {
            Confidence::High
        } else if has_qualifying {
            if active_entries <= self.config.high_confidence_max_queue {
                Confidence::High
            } else {
                Confidence::Medium
            }
        } else {
            Confidence::Low
        }
    }

    /// Rescale by the matching historical bucket, if there is one
    fn apply_history(
        &self,
        estimated_minutes: u32,
        baseline_minutes: u32,
        samples: &[HistoricalSample],
        now: DateTime<Utc>,
    ) -> u32 {
        let (day_of_week, hour) = local_day_and_hour(now, self.config.utc_offset_minutes);
        let Some(sample) = find_sample(samples, day_of_week, hour) else {
            debug!("No historical bucket for day {} hour {}", day_of_week, hour);
            return estimated_minutes;
        };

        match historical_scale(sample, baseline_minutes) {
            Some(scale) => {
                let scaled = round_minutes(f64::from(estimated_minutes) * scale);
                debug!(
                    "Historical bucket day {} hour {} scales {} -> {} minutes",
                    day_of_week, hour, estimated_minutes, scaled
                );
                scaled
            }
            None => estimated_minutes,
        }
    }
}

impl Default for QueuePressureEstimator {
    fn default() -> Self {
        Self {
            config: EstimatorConfig::default(),
        }
    }
}

impl CapacityEstimator for QueuePressureEstimator {
    fn estimate(&self, request: &EstimateRequest<'_>, now: DateTime<Utc>) -> CapacityEstimate {
        let baseline = self.config.baseline_minutes(&request.status);

        let qualifying: Vec<&TableCategory> = request
            .categories
            .iter()
            .filter(|category| category.qualifies_for(request.party_size))
            .collect();

        if qualifying.is_empty() {
            debug!(
                "No active category seats a party of {}, using no-capacity quote",
                request.party_size
            );
            return self.no_capacity_estimate(now);
        }

        let available_tables: u32 = qualifying.iter().map(|category| category.count).sum();

        let pressure =
            QueuePressure::measure(request.queue, request.party_size, self.config.similarity_band);

        let mean_turnover = qualifying
            .iter()
            .map(|category| f64::from(category.estimated_turnover_minutes))
            .sum::<f64>()
            / qualifying.len() as f64;

        let competing_minutes = pressure.similar_parties as f64 * mean_turnover;
        let multiplier = pressure_multiplier(&pressure, &qualifying);
        let mut estimated_minutes =
            round_minutes((f64::from(baseline) + competing_minutes) * multiplier);

        let history_supplied = request.has_history();
        if let Some(samples) = request.history.filter(|samples| !samples.is_empty()) {
            estimated_minutes = self.apply_history(estimated_minutes, baseline, samples, now);
        }

        let next_available_time = now + Duration::minutes(i64::from(estimated_minutes));
        let recommended_arrival_time = Some(
            next_available_time - Duration::minutes(i64::from(self.config.arrival_lead_minutes)),
        );

        let confidence = self.grade_confidence(
            history_supplied,
            !qualifying.is_empty(),
            pressure.active_entries,
        );

        debug!(
            "Estimated {} minutes for party of {} (baseline: {}, similar: {}, multiplier: {:.2}, confidence: {})",
            estimated_minutes,
            request.party_size,
            baseline,
            pressure.similar_parties,
            multiplier,
            confidence
        );

        CapacityEstimate {
            estimated_minutes,
            confidence,
            available_tables,
            busy_level: busy_level(pressure.active_entries, available_tables),
            next_available_time,
            recommended_arrival_time,
            no_capacity: false,
        }
    }

    fn config(&self) -> &EstimatorConfig {
        &self.config
    }

    fn update_config(&mut self, config: EstimatorConfig) -> crate::error::Result<()> {
        config.validate()?;
        self.config = config;
        Ok(())
    }
}
