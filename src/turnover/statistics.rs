//! Running statistics over observed turnover gaps

use serde::{Deserialize, Serialize};

/// Accumulated statistics for one category's valid turnover gaps
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TurnoverStats {
    /// Number of samples collected
    pub sample_count: u64,
    /// Sum of all gaps (for calculating mean)
    pub sum_minutes: f64,
    /// Sum of squared gaps (for calculating variance)
    pub sum_squared_minutes: f64,
    /// Shortest gap observed
    pub min_minutes: f64,
    /// Longest gap observed
    pub max_minutes: f64,
}

impl TurnoverStats {
    /// Create new empty statistics
    pub fn new() -> Self {
        Self::default()
    }

    /// Build statistics from a set of samples
    pub fn from_samples(samples: &[f64]) -> Self {
        let mut stats = Self::new();
        for &minutes in samples {
            stats.add_sample(minutes);
        }
        stats
    }

    /// Add a new gap sample, in minutes
    pub fn add_sample(&mut self, minutes: f64) {
        if self.sample_count == 0 {
            self.min_minutes = minutes;
            self.max_minutes = minutes;
        } else {
            self.min_minutes = self.min_minutes.min(minutes);
            self.max_minutes = self.max_minutes.max(minutes);
        }

        self.sample_count += 1;
        self.sum_minutes += minutes;
        self.sum_squared_minutes += minutes * minutes;
    }

    /// Calculate the mean gap
    pub fn mean_minutes(&self) -> f64 {
        if self.sample_count == 0 {
            return 0.0;
        }
        self.sum_minutes / self.sample_count as f64
    }

    /// Calculate the population standard deviation
    pub fn standard_deviation_minutes(&self) -> f64 {
        if self.sample_count <= 1 {
            return 0.0;
        }

        let mean = self.mean_minutes();
        let variance = (self.sum_squared_minutes / self.sample_count as f64) - (mean * mean);
        variance.max(0.0).sqrt()
    }

    /// Check if we have enough samples for a given confidence tier
    pub fn has_sufficient_samples(&self, min_samples: u64) -> bool {
        self.sample_count >= min_samples
    }
}
