//! Property tests for the estimator, matcher and analyzer

mod fixtures;

use chrono::Duration;
use proptest::prelude::*;
use waitlist_engine::matching::{BestFitTableMatcher, MatchRequest, TableMatcher};
use waitlist_engine::turnover::{ConsecutiveSeatingAnalyzer, TurnoverAnalyzer};
use waitlist_engine::types::{
    EntryStatus, RestaurantWaitStatus, TableCategory, WaitStatusSnapshot, WaitlistEntry,
};
use waitlist_engine::wait_time::{
    pressure_multiplier, CapacityEstimator, EstimateRequest, QueuePressure, QueuePressureEstimator,
};

use fixtures::fixed_now;

fn category_strategy() -> impl Strategy<Value = TableCategory> {
    (1u32..=12, 0u32..=6, 0u32..=120, any::<bool>()).prop_map(
        |(capacity, count, turnover, active)| {
            let name = format!("cap-{}", capacity);
            let category = TableCategory::new(name, capacity, count, turnover);
            if active {
                category
            } else {
                category.inactive()
            }
        },
    )
}

fn status_strategy() -> impl Strategy<Value = EntryStatus> {
    prop_oneof![
        Just(EntryStatus::Waiting),
        Just(EntryStatus::Notified),
        Just(EntryStatus::Seated),
        Just(EntryStatus::Cancelled),
        Just(EntryStatus::NoShow),
    ]
}

fn wait_status_strategy() -> impl Strategy<Value = RestaurantWaitStatus> {
    prop_oneof![
        Just(RestaurantWaitStatus::Available),
        Just(RestaurantWaitStatus::Short),
        Just(RestaurantWaitStatus::Long),
        Just(RestaurantWaitStatus::VeryLong),
        Just(RestaurantWaitStatus::Closed),
        Just(RestaurantWaitStatus::Unspecified),
    ]
}

fn queue_strategy() -> impl Strategy<Value = Vec<WaitlistEntry>> {
    prop::collection::vec(
        (1u32..=12, status_strategy())
            .prop_map(|(size, status)| WaitlistEntry::waiting(size).with_status(status)),
        0..30,
    )
}

proptest! {
    #[test]
    fn match_exists_whenever_an_active_category_fits(
        categories in prop::collection::vec(category_strategy(), 1..8),
        queue in queue_strategy(),
        party_size in 1u32..=14,
    ) {
        let matcher = BestFitTableMatcher::default();
        let request = MatchRequest::new(&categories, party_size).with_queue(&queue);
        let result = matcher.find_table_for_party(&request);

        if categories.iter().any(|c| c.qualifies_for(party_size)) {
            let table_match = result.expect("a fitting category exists");
            prop_assert!(table_match.category.fits(party_size));
            prop_assert!(table_match.category.active);
        }
        if categories.iter().all(|c| !c.active) {
            prop_assert!(matcher.find_table_for_party(&request).is_none());
        }
    }

    #[test]
    fn estimates_are_bounded_and_idempotent(
        categories in prop::collection::vec(category_strategy(), 0..8),
        queue in queue_strategy(),
        status in wait_status_strategy(),
        party_size in 1u32..=14,
    ) {
        let estimator = QueuePressureEstimator::default();
        let request = EstimateRequest::new(
            WaitStatusSnapshot::new(status),
            party_size,
            &categories,
            &queue,
        );

        let first = estimator.estimate(&request, fixed_now());
        let second = estimator.estimate(&request, fixed_now());

        prop_assert!(first.busy_level <= 100);
        prop_assert!(first.next_available_time >= fixed_now());
        prop_assert_eq!(first, second);
    }

    #[test]
    fn matching_is_idempotent(
        categories in prop::collection::vec(category_strategy(), 0..8),
        queue in queue_strategy(),
        party_size in 1u32..=14,
    ) {
        let matcher = BestFitTableMatcher::default();
        let request = MatchRequest::new(&categories, party_size).with_queue(&queue);

        prop_assert_eq!(
            matcher.find_table_for_party(&request),
            matcher.find_table_for_party(&request)
        );
        prop_assert_eq!(
            matcher.category_waits(&categories, &queue),
            matcher.category_waits(&categories, &queue)
        );
    }

    #[test]
    fn pressure_multiplier_is_monotone_and_clamped(
        capacity in 1u32..=12,
        count in 0u32..=6,
        sizes in prop::collection::vec(1u32..=12, 0..40),
    ) {
        let category = TableCategory::new("Tables", capacity, count, 45);
        let qualifying = vec![&category];

        let mut previous = 1.0;
        for len in 0..=sizes.len() {
            let queue: Vec<WaitlistEntry> =
                sizes[..len].iter().map(|&size| WaitlistEntry::waiting(size)).collect();
            let pressure = QueuePressure::measure(&queue, 2, 2);
            let multiplier = pressure_multiplier(&pressure, &qualifying);

            prop_assert!((1.0..=2.0).contains(&multiplier));
            prop_assert!(multiplier >= previous);
            previous = multiplier;
        }
    }

    #[test]
    fn out_of_window_gaps_do_not_move_turnover(
        gaps in prop::collection::vec(11i64..300, 1..40),
        trailing_break in 300i64..2000,
        duplicate_offset in 0i64..=10,
    ) {
        let analyzer = ConsecutiveSeatingAnalyzer::default();
        let category = TableCategory::new("Booth", 4, 4, 45);

        let start = fixed_now() - Duration::days(2);
        let mut seated_at = start;
        let mut history = vec![WaitlistEntry::seated(2, category.id, seated_at)];
        for gap in &gaps {
            seated_at += Duration::minutes(*gap);
            history.push(WaitlistEntry::seated(2, category.id, seated_at));
        }

        let baseline = analyzer.analyze(std::slice::from_ref(&category), &history);

        let mut noisy = history.clone();
        noisy.push(WaitlistEntry::seated(
            2,
            category.id,
            start - Duration::minutes(trailing_break),
        ));
        noisy.push(WaitlistEntry::seated(
            2,
            category.id,
            seated_at + Duration::minutes(duplicate_offset),
        ));
        let with_noise = analyzer.analyze(std::slice::from_ref(&category), &noisy);

        prop_assert_eq!(baseline.len(), 1);
        prop_assert_eq!(with_noise.len(), 1);
        prop_assert_eq!(
            baseline[0].actual_turnover_minutes,
            with_noise[0].actual_turnover_minutes
        );
        prop_assert_eq!(baseline[0].sample_count, with_noise[0].sample_count);
        prop_assert_eq!(with_noise[0].discarded_samples, baseline[0].discarded_samples + 2);
        prop_assert_eq!(baseline, analyzer.analyze(std::slice::from_ref(&category), &history));
    }
}
