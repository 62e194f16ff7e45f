//! Historical wait adjustment
//!
//! Looks up the (day-of-week, hour) bucket for the current local time and
//! rescales an estimate by how that bucket's observed wait compares to the
//! operator's baseline.

use crate::types::HistoricalSample;
use chrono::{DateTime, Datelike, Duration, Timelike, Utc};

/// Local day-of-week (0 = Sunday) and hour for `now` shifted by `utc_offset_minutes`
pub fn local_day_and_hour(now: DateTime<Utc>, utc_offset_minutes: i32) -> (u8, u8) {
    let local = now.naive_utc() + Duration::minutes(i64::from(utc_offset_minutes));
    (
        local.weekday().num_days_from_sunday() as u8,
        local.hour() as u8,
    )
}

/// First sample recorded for the given bucket
pub fn find_sample(
    samples: &[HistoricalSample],
    day_of_week: u8,
    hour: u8,
) -> Option<&HistoricalSample> {
    samples
        .iter()
        .find(|sample| sample.day_of_week == day_of_week && sample.hour == hour)
}

/// Factor to apply to an estimate, or `None` when the baseline is zero
pub fn historical_scale(sample: &HistoricalSample, baseline_minutes: u32) -> Option<f64> {
    if baseline_minutes == 0 {
        return None;
    }
    Some(sample.average_wait_minutes / f64::from(baseline_minutes))
}
