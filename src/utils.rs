//! Utility functions for the waitlist engine

use chrono::{DateTime, Utc};

/// Source of the current time
///
/// The wall clock is the only non-deterministic input to the engine, so it
/// is read through this trait and can be pinned for tests and replays.
#[cfg_attr(test, mockall::automock)]
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Clock backed by the system time
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        current_timestamp()
    }
}

/// Clock that always reports the same instant
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Get the current UTC timestamp
pub fn current_timestamp() -> DateTime<Utc> {
    Utc::now()
}

/// Calculate the absolute difference between two party sizes
pub fn party_size_difference(size1: u32, size2: u32) -> u32 {
    size1.abs_diff(size2)
}

/// Check if two party sizes are within the given band
pub fn party_sizes_within_band(size1: u32, size2: u32, band: u32) -> bool {
    party_size_difference(size1, size2) <= band
}

/// Round a fractional minute count to whole minutes, saturating at zero
pub fn round_minutes(minutes: f64) -> u32 {
    if !minutes.is_finite() || minutes <= 0.0 {
        return 0;
    }
    minutes.round().min(f64::from(u32::MAX)) as u32
}

/// Signed minutes elapsed between two instants, with sub-minute precision
pub fn minutes_between(earlier: DateTime<Utc>, later: DateTime<Utc>) -> f64 {
    later.signed_duration_since(earlier).num_seconds() as f64 / 60.0
}
