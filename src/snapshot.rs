//! Restaurant state snapshots
//!
//! A snapshot bundles everything the engine reads for one restaurant at one
//! point in time. The persistence layer (or a JSON file, for the CLI) owns
//! it; the engine only borrows it.

use crate::error::{Result, WaitlistError};
use crate::types::{HistoricalSample, TableCategory, WaitStatusSnapshot, WaitlistEntry};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RestaurantSnapshot {
    pub status: WaitStatusSnapshot,
    pub categories: Vec<TableCategory>,
    /// Current waitlist; inactive entries are tolerated and ignored
    pub queue: Vec<WaitlistEntry>,
    /// Historical (day-of-week, hour) wait buckets
    pub history_samples: Vec<HistoricalSample>,
    /// Past entries used for turnover analysis
    pub seated_history: Vec<WaitlistEntry>,
}

impl RestaurantSnapshot {
    /// Load and validate a snapshot from a JSON file
    pub fn from_file(path: &Path) -> Result<Self> {
        let raw =
            std::fs::read_to_string(path).map_err(|e| WaitlistError::SnapshotLoadFailed {
                path: path.display().to_string(),
                reason: e.to_string(),
            })?;

        let snapshot =
            Self::from_json_str(&raw).map_err(|e| WaitlistError::SnapshotLoadFailed {
                path: path.display().to_string(),
                reason: e.to_string(),
            })?;

        debug!(
            "Loaded snapshot from {}: {} categories, {} queued, {} seated history",
            path.display(),
            snapshot.categories.len(),
            snapshot.queue.len(),
            snapshot.seated_history.len()
        );

        Ok(snapshot)
    }

    /// Parse and validate a snapshot from JSON text
    pub fn from_json_str(raw: &str) -> Result<Self> {
        let snapshot: Self = serde_json::from_str(raw)?;
        snapshot.validate()?;
        Ok(snapshot)
    }

    /// Reject values the persistence layer is expected to have ruled out
    pub fn validate(&self) -> Result<()> {
        if let Some(category) = self.categories.iter().find(|c| c.capacity == 0) {
            return Err(invalid(format!(
                "category '{}' has zero capacity",
                category.name
            )));
        }

        if let Some(entry) = self
            .queue
            .iter()
            .chain(self.seated_history.iter())
            .find(|e| e.party_size == 0)
        {
            return Err(invalid(format!("entry {} has zero party size", entry.id)));
        }

        for sample in &self.history_samples {
            if sample.day_of_week > 6 || sample.hour > 23 {
                return Err(invalid(format!(
                    "historical bucket day {} hour {} is out of range",
                    sample.day_of_week, sample.hour
                )));
            }
            if !sample.average_wait_minutes.is_finite() || sample.average_wait_minutes < 0.0 {
                return Err(invalid(format!(
                    "historical bucket day {} hour {} has invalid average wait {}",
                    sample.day_of_week, sample.hour, sample.average_wait_minutes
                )));
            }
        }

        Ok(())
    }
}

fn invalid(reason: String) -> anyhow::Error {
    WaitlistError::InvalidSnapshot { reason }.into()
}
