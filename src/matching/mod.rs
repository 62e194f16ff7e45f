//! Table matching for incoming parties
//!
//! This module selects the table category a party should be assigned to and
//! estimates the wait for each category from the live queue.

pub mod category_wait;
pub mod matcher;

// Re-export commonly used types
pub use category_wait::{estimate_category_wait, CategoryWait};
pub use matcher::{
    BestFitTableMatcher, MatchReason, MatchRequest, MatchingConfig, TableMatch, TableMatcher,
};
