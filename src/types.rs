//! Common types used throughout the waitlist engine
//!
//! Every type here is an input snapshot owned by the persistence layer. The
//! engine only ever borrows them for the duration of one call.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for table categories
pub type CategoryId = Uuid;

/// Unique identifier for waitlist entries
pub type EntryId = Uuid;

/// Turnover assumed for a category whose estimate is unset
pub const DEFAULT_TURNOVER_MINUTES: u32 = 45;

/// A named class of tables sharing capacity and turnover characteristics
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableCategory {
    pub id: CategoryId,
    pub name: String,
    /// Seats per table
    pub capacity: u32,
    /// Number of physical tables of this category
    pub count: u32,
    pub estimated_turnover_minutes: u32,
    pub active: bool,
}

impl TableCategory {
    /// Create an active category with a fresh id
    pub fn new(name: impl Into<String>, capacity: u32, count: u32, turnover_minutes: u32) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            capacity,
            count,
            estimated_turnover_minutes: turnover_minutes,
            active: true,
        }
    }

    /// Mark the category inactive
    pub fn inactive(mut self) -> Self {
        self.active = false;
        self
    }

    /// Whether a party of this size can sit at one table of this category
    pub fn fits(&self, party_size: u32) -> bool {
        self.capacity >= party_size
    }

    /// Active and large enough for the party
    pub fn qualifies_for(&self, party_size: u32) -> bool {
        self.active && self.fits(party_size)
    }

    /// Total seats across all physical tables
    pub fn seat_capacity(&self) -> u64 {
        u64::from(self.count) * u64::from(self.capacity)
    }

    /// Configured turnover, or `default_minutes` when unset (zero)
    pub fn turnover_or(&self, default_minutes: u32) -> u32 {
        if self.estimated_turnover_minutes == 0 {
            default_minutes
        } else {
            self.estimated_turnover_minutes
        }
    }
}

/// Lifecycle status of a waitlist entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryStatus {
    Waiting,
    Notified,
    Seated,
    Cancelled,
    NoShow,
}

impl EntryStatus {
    /// Waiting and notified parties are the only ones that exert queue pressure
    pub fn is_active(self) -> bool {
        matches!(self, EntryStatus::Waiting | EntryStatus::Notified)
    }
}

impl std::fmt::Display for EntryStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EntryStatus::Waiting => write!(f, "waiting"),
            EntryStatus::Notified => write!(f, "notified"),
            EntryStatus::Seated => write!(f, "seated"),
            EntryStatus::Cancelled => write!(f, "cancelled"),
            EntryStatus::NoShow => write!(f, "no_show"),
        }
    }
}

/// A party on the waitlist
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WaitlistEntry {
    pub id: EntryId,
    pub party_size: u32,
    pub status: EntryStatus,
    /// Soft reference; a missing referent is silently ignored
    #[serde(default)]
    pub table_category_id: Option<CategoryId>,
    #[serde(default)]
    pub seated_at: Option<DateTime<Utc>>,
}

impl WaitlistEntry {
    /// Create a waiting entry with no category reference
    pub fn waiting(party_size: u32) -> Self {
        Self {
            id: Uuid::new_v4(),
            party_size,
            status: EntryStatus::Waiting,
            table_category_id: None,
            seated_at: None,
        }
    }

    /// Create a seated entry attributed to a category
    pub fn seated(party_size: u32, category_id: CategoryId, seated_at: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            party_size,
            status: EntryStatus::Seated,
            table_category_id: Some(category_id),
            seated_at: Some(seated_at),
        }
    }

    pub fn with_status(mut self, status: EntryStatus) -> Self {
        self.status = status;
        self
    }

    pub fn for_category(mut self, category_id: CategoryId) -> Self {
        self.table_category_id = Some(category_id);
        self
    }

    pub fn is_active(&self) -> bool {
        self.status.is_active()
    }
}

/// Coarse, operator-set signal of how busy the restaurant is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RestaurantWaitStatus {
    Available,
    Short,
    Long,
    VeryLong,
    Closed,
    #[default]
    #[serde(other)]
    Unspecified,
}

impl std::fmt::Display for RestaurantWaitStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RestaurantWaitStatus::Available => write!(f, "available"),
            RestaurantWaitStatus::Short => write!(f, "short"),
            RestaurantWaitStatus::Long => write!(f, "long"),
            RestaurantWaitStatus::VeryLong => write!(f, "very_long"),
            RestaurantWaitStatus::Closed => write!(f, "closed"),
            RestaurantWaitStatus::Unspecified => write!(f, "unspecified"),
        }
    }
}

impl std::str::FromStr for RestaurantWaitStatus {
    type Err = std::convert::Infallible;

    /// Unknown names map to `Unspecified`, mirroring the serde fallback
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim().to_lowercase().as_str() {
            "available" => RestaurantWaitStatus::Available,
            "short" => RestaurantWaitStatus::Short,
            "long" => RestaurantWaitStatus::Long,
            "very_long" => RestaurantWaitStatus::VeryLong,
            "closed" => RestaurantWaitStatus::Closed,
            _ => RestaurantWaitStatus::Unspecified,
        })
    }
}

/// The restaurant's wait status together with an optional operator override
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct WaitStatusSnapshot {
    pub status: RestaurantWaitStatus,
    #[serde(default)]
    pub override_minutes: Option<u32>,
}

impl WaitStatusSnapshot {
    pub fn new(status: RestaurantWaitStatus) -> Self {
        Self {
            status,
            override_minutes: None,
        }
    }

    pub fn with_override(mut self, minutes: u32) -> Self {
        self.override_minutes = Some(minutes);
        self
    }
}

/// One observed (day-of-week, hour) bucket of historical wait data
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoricalSample {
    /// 0 = Sunday through 6 = Saturday
    pub day_of_week: u8,
    /// 0 through 23
    pub hour: u8,
    pub average_wait_minutes: f64,
    pub average_party_size: f64,
    pub total_customers: u32,
}

/// Qualitative reliability label attached to a prediction or recommendation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    Low,
    Medium,
    High,
}

impl Confidence {
    /// Lowercase name, as serialized and used for metric labels
    pub fn as_str(self) -> &'static str {
        match self {
            Confidence::Low => "low",
            Confidence::Medium => "medium",
            Confidence::High => "high",
        }
    }
}

impl std::fmt::Display for Confidence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_active_statuses() {
        assert!(EntryStatus::Waiting.is_active());
        assert!(EntryStatus::Notified.is_active());
        assert!(!EntryStatus::Seated.is_active());
        assert!(!EntryStatus::Cancelled.is_active());
        assert!(!EntryStatus::NoShow.is_active());
    }

    #[test]
    fn test_category_qualification() {
        let booth = TableCategory::new("Booth", 4, 2, 45);
        assert!(booth.qualifies_for(4));
        assert!(!booth.qualifies_for(5));
        assert!(!booth.clone().inactive().qualifies_for(2));
        assert_eq!(booth.seat_capacity(), 8);
    }

    #[test]
    fn test_turnover_default_when_unset() {
        let mut bar = TableCategory::new("Bar", 2, 6, 0);
        assert_eq!(bar.turnover_or(45), 45);
        bar.estimated_turnover_minutes = 20;
        assert_eq!(bar.turnover_or(45), 20);
    }

    #[test]
    fn test_unknown_wait_status_deserializes_to_unspecified() {
        let status: RestaurantWaitStatus = serde_json::from_str("\"extremely_busy\"").unwrap();
        assert_eq!(status, RestaurantWaitStatus::Unspecified);

        let status: RestaurantWaitStatus = serde_json::from_str("\"very_long\"").unwrap();
        assert_eq!(status, RestaurantWaitStatus::VeryLong);
        assert_eq!("VERY_LONG".parse::<RestaurantWaitStatus>().unwrap(), status);
    }

    #[test]
    fn test_confidence_names_agree() {
        for confidence in [Confidence::Low, Confidence::Medium, Confidence::High] {
            assert_eq!(confidence.to_string(), confidence.as_str());
            assert_eq!(
                serde_json::to_string(&confidence).unwrap(),
                format!("\"{}\"", confidence.as_str())
            );
        }
    }

    #[test]
    fn test_confidence_ordering() {
        assert!(Confidence::High > Confidence::Medium);
        assert!(Confidence::Medium > Confidence::Low);
        assert_eq!(
            serde_json::to_string(&Confidence::Medium).unwrap(),
            "\"medium\""
        );
    }

    #[test]
    fn test_entry_status_serialization() {
        let entry = WaitlistEntry::waiting(3).with_status(EntryStatus::NoShow);
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["status"], "no_show");
        assert!(json["table_category_id"].is_null());
    }
}
