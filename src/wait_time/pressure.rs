//! Queue pressure measurement
//!
//! Derives the demand-side inputs to a wait estimate from the live queue:
//! how many parties are actively waiting, how many people that is, and how
//! many of those parties compete for the same table sizes.

use crate::types::{TableCategory, WaitlistEntry};
use crate::utils::party_sizes_within_band;
use serde::{Deserialize, Serialize};

/// Lower bound of the pressure multiplier
pub const MIN_PRESSURE_MULTIPLIER: f64 = 1.0;

/// Upper bound of the pressure multiplier
pub const MAX_PRESSURE_MULTIPLIER: f64 = 2.0;

/// Demand snapshot taken from the active part of the queue
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct QueuePressure {
    /// Entries that are waiting or notified
    pub active_entries: usize,
    /// Sum of party sizes over active entries
    pub people_waiting: u64,
    /// Active entries whose party size is within the similarity band
    pub similar_parties: usize,
}

impl QueuePressure {
    /// Measure pressure for a party of `party_size` against the live queue
    pub fn measure(queue: &[WaitlistEntry], party_size: u32, similarity_band: u32) -> Self {
        queue
            .iter()
            .filter(|entry| entry.is_active())
            .fold(Self::default(), |mut pressure, entry| {
                pressure.active_entries += 1;
                pressure.people_waiting += u64::from(entry.party_size);
                if party_sizes_within_band(entry.party_size, party_size, similarity_band) {
                    pressure.similar_parties += 1;
                }
                pressure
            })
    }
}

/// Total seats across the qualifying categories
pub fn total_seat_capacity(categories: &[&TableCategory]) -> u64 {
    categories.iter().map(|category| category.seat_capacity()).sum()
}

/// Scaling factor in `[1.0, 2.0]` derived from the demand-to-capacity ratio
///
/// With no qualifying categories the multiplier is pinned at the maximum;
/// with an empty active queue it is exactly one.
pub fn pressure_multiplier(pressure: &QueuePressure, qualifying: &[&TableCategory]) -> f64 {
    if qualifying.is_empty() {
        return MAX_PRESSURE_MULTIPLIER;
    }
    if pressure.active_entries == 0 {
        return MIN_PRESSURE_MULTIPLIER;
    }

    let seat_capacity = total_seat_capacity(qualifying).max(1);
    let ratio = pressure.people_waiting as f64 / seat_capacity as f64;

    (1.0 + ratio).clamp(MIN_PRESSURE_MULTIPLIER, MAX_PRESSURE_MULTIPLIER)
}

/// Percentage of available tables already spoken for, clamped to `[0, 100]`
pub fn busy_level(active_entries: usize, available_tables: u32) -> u8 {
    let tables = f64::from(available_tables.max(1));
    let level = (active_entries as f64 / tables * 100.0).round();
    level.clamp(0.0, 100.0) as u8
}
