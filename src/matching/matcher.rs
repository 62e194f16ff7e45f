//! Table category matching for incoming parties
//!
//! This module picks the table category a party should be seated at, or
//! explains why no good fit exists.

use crate::matching::category_wait::{estimate_category_wait, CategoryWait};
use crate::types::{TableCategory, WaitlistEntry, DEFAULT_TURNOVER_MINUTES};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Why a category was chosen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchReason {
    /// The diner asked for this category by name
    PreferredCategory,
    /// Capacity equals the party size
    PerfectFit,
    /// Smallest qualifying category with some seats to spare
    BestAvailable,
    /// No table is large enough; the largest one is offered instead
    ExceedsLargestTable,
}

impl std::fmt::Display for MatchReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MatchReason::PreferredCategory => write!(f, "matching preferred category"),
            MatchReason::PerfectFit => write!(f, "perfect size match"),
            MatchReason::BestAvailable => write!(f, "best available table for party size"),
            MatchReason::ExceedsLargestTable => {
                write!(f, "party exceeds largest table; may require combining tables")
            }
        }
    }
}

/// Chosen category for a party
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableMatch {
    pub category: TableCategory,
    pub is_optimal_match: bool,
    pub reason: MatchReason,
    /// Empty seats left at the table; zero when the party does not fit
    pub wasted_seats: u32,
    pub estimated_wait_minutes: u32,
}

/// Configuration for table matching behavior
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchingConfig {
    /// Largest number of empty seats that still counts as an optimal match
    pub optimal_wasted_seats: u32,
    /// Turnover assumed for categories with no configured estimate
    pub default_turnover_minutes: u32,
}

impl Default for MatchingConfig {
    fn default() -> Self {
        Self {
            optimal_wasted_seats: 2,
            default_turnover_minutes: DEFAULT_TURNOVER_MINUTES,
        }
    }
}

impl MatchingConfig {
    /// Validate configuration values
    pub fn validate(&self) -> crate::error::Result<()> {
        if self.default_turnover_minutes == 0 {
            return Err(crate::error::WaitlistError::ConfigurationError {
                message: "default_turnover_minutes must be greater than 0".to_string(),
            }
            .into());
        }
        Ok(())
    }
}

/// Everything the matcher reads for one call
#[derive(Debug, Clone, Copy)]
pub struct MatchRequest<'a> {
    pub categories: &'a [TableCategory],
    pub party_size: u32,
    pub queue: Option<&'a [WaitlistEntry]>,
    pub preferred_category: Option<&'a str>,
}

impl<'a> MatchRequest<'a> {
    pub fn new(categories: &'a [TableCategory], party_size: u32) -> Self {
        Self {
            categories,
            party_size,
            queue: None,
            preferred_category: None,
        }
    }

    pub fn with_queue(mut self, queue: &'a [WaitlistEntry]) -> Self {
        self.queue = Some(queue);
        self
    }

    pub fn with_preference(mut self, category_name: &'a str) -> Self {
        self.preferred_category = Some(category_name);
        self
    }

    fn queue(&self) -> &'a [WaitlistEntry] {
        self.queue.unwrap_or(&[])
    }
}

/// Trait for table matching algorithms
pub trait TableMatcher: Send + Sync {
    /// Find the best category for a party, or `None` when no active inventory exists
    fn find_table_for_party(&self, request: &MatchRequest<'_>) -> Option<TableMatch>;

    /// Wait for every active category, in input order
    fn category_waits(
        &self,
        categories: &[TableCategory],
        queue: &[WaitlistEntry],
    ) -> Vec<CategoryWait>;

    /// Check if a party can be seated at a single table of the category
    fn can_seat_party(&self, party_size: u32, category: &TableCategory) -> bool;
}

/// Matcher that minimises wasted seats, breaking ties on shorter waits
#[derive(Debug, Clone)]
pub struct BestFitTableMatcher {
    config: MatchingConfig,
}

impl BestFitTableMatcher {
    pub fn new(config: MatchingConfig) -> crate::error::Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &MatchingConfig {
        &self.config
    }

    fn wait_minutes(&self, category: &TableCategory, queue: &[WaitlistEntry]) -> u32 {
        estimate_category_wait(category, queue, self.config.default_turnover_minutes)
            .estimated_wait_minutes
    }

    /// Active category whose name matches case-insensitively and that fits the party
    fn preferred_category<'c>(
        &self,
        active: &[&'c TableCategory],
        preferred: &str,
        party_size: u32,
    ) -> Option<&'c TableCategory> {
        let wanted = preferred.to_lowercase();
        active
            .iter()
            .copied()
            .find(|category| category.name.to_lowercase() == wanted && category.fits(party_size))
    }

    /// Largest active category, first encountered on ties
    fn largest_category<'c>(&self, active: &[&'c TableCategory]) -> Option<&'c TableCategory> {
        active.iter().copied().fold(None, |largest, category| match largest {
            Some(current) if current.capacity >= category.capacity => Some(current),
            _ => Some(category),
        })
    }

    fn build_match(
        &self,
        category: &TableCategory,
        party_size: u32,
        queue: &[WaitlistEntry],
        reason: MatchReason,
        is_optimal_match: bool,
    ) -> TableMatch {
        TableMatch {
            category: category.clone(),
            is_optimal_match,
            reason,
            wasted_seats: category.capacity.saturating_sub(party_size),
            estimated_wait_minutes: self.wait_minutes(category, queue),
        }
    }
}

impl Default for BestFitTableMatcher {
    fn default() -> Self {
        Self {
            config: MatchingConfig::default(),
        }
    }
}

impl TableMatcher for BestFitTableMatcher {
    fn find_table_for_party(&self, request: &MatchRequest<'_>) -> Option<TableMatch> {
        let party_size = request.party_size;
        let queue = request.queue();

        let active: Vec<&TableCategory> = request
            .categories
            .iter()
            .filter(|category| category.active)
            .collect();

        if active.is_empty() {
            debug!("No active table categories configured");
            return None;
        }

        if let Some(preferred) = request.preferred_category {
            if let Some(category) = self.preferred_category(&active, preferred, party_size) {
                debug!(
                    "Party of {} matched to preferred category {}",
                    party_size, category.name
                );
                return Some(self.build_match(
                    category,
                    party_size,
                    queue,
                    MatchReason::PreferredCategory,
                    true,
                ));
            }
        }

        let mut qualifying: Vec<(&TableCategory, u32, u32)> = active
            .iter()
            .copied()
            .filter(|category| self.can_seat_party(party_size, category))
            .map(|category| {
                (
                    category,
                    category.capacity - party_size,
                    self.wait_minutes(category, queue),
                )
            })
            .collect();

        if qualifying.is_empty() {
            let largest = self.largest_category(&active)?;
            debug!(
                "Party of {} exceeds every table, offering {} (capacity {})",
                party_size, largest.name, largest.capacity
            );
            return Some(self.build_match(
                largest,
                party_size,
                queue,
                MatchReason::ExceedsLargestTable,
                false,
            ));
        }

        // Stable sort keeps input order among exact ties
        qualifying.sort_by_key(|&(_, wasted_seats, wait_minutes)| (wasted_seats, wait_minutes));
        let (category, wasted_seats, estimated_wait_minutes) = qualifying[0];

        let reason = if wasted_seats == 0 {
            MatchReason::PerfectFit
        } else {
            MatchReason::BestAvailable
        };

        debug!(
            "Party of {} matched to {} (wasted seats: {}, wait: {}m)",
            party_size, category.name, wasted_seats, estimated_wait_minutes
        );

        Some(TableMatch {
            category: category.clone(),
            is_optimal_match: wasted_seats <= self.config.optimal_wasted_seats,
            reason,
            wasted_seats,
            estimated_wait_minutes,
        })
    }

    fn category_waits(
        &self,
        categories: &[TableCategory],
        queue: &[WaitlistEntry],
    ) -> Vec<CategoryWait> {
        categories
            .iter()
            .filter(|category| category.active)
            .map(|category| {
                estimate_category_wait(category, queue, self.config.default_turnover_minutes)
            })
            .collect()
    }

    fn can_seat_party(&self, party_size: u32, category: &TableCategory) -> bool {
        category.qualifies_for(party_size)
    }
}
