//! Test fixtures and snapshot builders for integration testing

#![allow(dead_code)]

use chrono::{DateTime, Duration, TimeZone, Utc};
use std::sync::Arc;
use waitlist_engine::config::AppConfig;
use waitlist_engine::types::{
    RestaurantWaitStatus, TableCategory, WaitStatusSnapshot, WaitlistEntry,
};
use waitlist_engine::utils::FixedClock;
use waitlist_engine::{RestaurantSnapshot, WaitlistEngine};

/// Saturday evening, the instant every fixture evaluates against
pub fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 14, 19, 0, 0).unwrap()
}

/// Engine with default configuration pinned to `fixed_now`
pub fn create_test_engine() -> WaitlistEngine {
    WaitlistEngine::from_config(&AppConfig::default())
        .unwrap()
        .with_clock(Arc::new(FixedClock(fixed_now())))
}

/// Builder for restaurant snapshots
#[derive(Debug, Default)]
pub struct SnapshotBuilder {
    snapshot: RestaurantSnapshot,
}

impl SnapshotBuilder {
    pub fn new(status: RestaurantWaitStatus) -> Self {
        Self {
            snapshot: RestaurantSnapshot {
                status: WaitStatusSnapshot::new(status),
                ..Default::default()
            },
        }
    }

    pub fn with_override(mut self, minutes: u32) -> Self {
        self.snapshot.status = self.snapshot.status.with_override(minutes);
        self
    }

    pub fn with_category(mut self, category: TableCategory) -> Self {
        self.snapshot.categories.push(category);
        self
    }

    pub fn with_waiting_parties(mut self, party_sizes: &[u32]) -> Self {
        self.snapshot
            .queue
            .extend(party_sizes.iter().map(|&size| WaitlistEntry::waiting(size)));
        self
    }

    pub fn with_entry(mut self, entry: WaitlistEntry) -> Self {
        self.snapshot.queue.push(entry);
        self
    }

    /// Seat `count` parties at `category`, `gap_minutes` apart, ending before `fixed_now`
    pub fn with_seatings(
        mut self,
        category: &TableCategory,
        count: usize,
        gap_minutes: i64,
    ) -> Self {
        let start = fixed_now() - Duration::minutes(gap_minutes * count as i64);
        self.snapshot.seated_history.extend((0..count).map(|i| {
            WaitlistEntry::seated(
                2,
                category.id,
                start + Duration::minutes(gap_minutes * i as i64),
            )
        }));
        self
    }

    pub fn build(self) -> RestaurantSnapshot {
        self.snapshot
    }
}

/// The dining room most scenarios start from
pub fn standard_dining_room() -> Vec<TableCategory> {
    vec![
        TableCategory::new("Two-top", 2, 6, 40),
        TableCategory::new("Booth", 4, 4, 60),
        TableCategory::new("Patio", 6, 2, 75),
        TableCategory::new("Private room", 12, 1, 120),
    ]
}
