//! Per-category wait estimation
//!
//! Estimates how long the queue already standing in front of one table
//! category will take to clear, in whole turnover rounds.

use crate::types::{CategoryId, TableCategory, WaitlistEntry};
use serde::{Deserialize, Serialize};

/// Wait for a single table category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryWait {
    pub category_id: CategoryId,
    pub category_name: String,
    /// Active parties competing for this category
    pub parties_waiting: usize,
    pub tables: u32,
    pub estimated_wait_minutes: u32,
}

/// Whether a queued party competes for tables of `category`
///
/// A party competes when it was explicitly assigned to the category, or
/// when it has no assignment and would fit at one of its tables.
pub fn competes_for(entry: &WaitlistEntry, category: &TableCategory) -> bool {
    match entry.table_category_id {
        Some(category_id) => category_id == category.id,
        None => category.fits(entry.party_size),
    }
}

/// Estimate the wait for `category` given the live queue
pub fn estimate_category_wait(
    category: &TableCategory,
    queue: &[WaitlistEntry],
    default_turnover_minutes: u32,
) -> CategoryWait {
    let parties_waiting = queue
        .iter()
        .filter(|entry| entry.is_active() && competes_for(entry, category))
        .count();

    let estimated_wait_minutes = if parties_waiting < category.count as usize {
        0
    } else {
        // Zero-table categories still drain one party per turn
        let tables = category.count.max(1) as usize;
        let rounds = parties_waiting.div_ceil(tables) as u32;
        rounds.saturating_mul(category.turnover_or(default_turnover_minutes))
    };

    CategoryWait {
        category_id: category.id,
        category_name: category.name.clone(),
        parties_waiting,
        tables: category.count,
        estimated_wait_minutes,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::EntryStatus;

    #[test]
    fn test_free_tables_mean_no_wait() {
        let booth = TableCategory::new("Booth", 4, 3, 50);
        let queue = vec![WaitlistEntry::waiting(4), WaitlistEntry::waiting(2)];

        let wait = estimate_category_wait(&booth, &queue, 45);
        assert_eq!(wait.parties_waiting, 2);
        assert_eq!(wait.estimated_wait_minutes, 0);
    }

    #[test]
    fn test_rounds_are_ceiled() {
        let booth = TableCategory::new("Booth", 4, 2, 50);
        let queue: Vec<_> = (0..5).map(|_| WaitlistEntry::waiting(3)).collect();

        // 5 parties over 2 tables is 3 turns
        let wait = estimate_category_wait(&booth, &queue, 45);
        assert_eq!(wait.estimated_wait_minutes, 150);
    }

    #[test]
    fn test_explicit_assignment_and_fit() {
        let booth = TableCategory::new("Booth", 4, 1, 50);
        let patio = TableCategory::new("Patio", 6, 1, 60);
        let queue = vec![
            // Assigned elsewhere, never counts for the booth
            WaitlistEntry::waiting(2).for_category(patio.id),
            // Assigned to the booth even though it is too large
            WaitlistEntry::waiting(6).for_category(booth.id),
            // Unassigned and too large
            WaitlistEntry::waiting(5),
            // Unassigned and fits
            WaitlistEntry::waiting(4),
        ];

        let wait = estimate_category_wait(&booth, &queue, 45);
        assert_eq!(wait.parties_waiting, 2);
        assert_eq!(wait.estimated_wait_minutes, 100);
    }

    #[test]
    fn test_terminal_entries_do_not_compete() {
        let booth = TableCategory::new("Booth", 4, 1, 50);
        let queue = vec![
            WaitlistEntry::waiting(2).with_status(EntryStatus::Seated),
            WaitlistEntry::waiting(2).with_status(EntryStatus::NoShow),
        ];

        let wait = estimate_category_wait(&booth, &queue, 45);
        assert_eq!(wait.parties_waiting, 0);
        assert_eq!(wait.estimated_wait_minutes, 0);
    }

    #[test]
    fn test_unset_turnover_uses_default() {
        let bar = TableCategory::new("Bar", 2, 1, 0);
        let queue = vec![WaitlistEntry::waiting(2)];

        let wait = estimate_category_wait(&bar, &queue, 45);
        assert_eq!(wait.estimated_wait_minutes, 45);
    }

    #[test]
    fn test_zero_tables_do_not_divide_by_zero() {
        let closed_patio = TableCategory::new("Patio", 4, 0, 30);
        let queue = vec![WaitlistEntry::waiting(2), WaitlistEntry::waiting(2)];

        let wait = estimate_category_wait(&closed_patio, &queue, 45);
        assert_eq!(wait.estimated_wait_minutes, 60);

        let idle = estimate_category_wait(&closed_patio, &[], 45);
        assert_eq!(idle.estimated_wait_minutes, 0);
    }
}
