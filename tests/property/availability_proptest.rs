//! Property-based tests for occupancy accounting

use proptest::prelude::*;

use parkeasy::shared::availability::{availability_percentage, display_percentage, free_count};

proptest! {
    #[test]
    fn test_free_count_is_difference(capacity in 0i64..100_000, occupied in 0i64..100_000) {
        prop_assert_eq!(free_count(capacity, occupied), capacity - occupied);
    }

    #[test]
    fn test_percentage_of_consistent_lot_is_bounded(total in 1i64..10_000, occupied_share in 0.0f64..=1.0) {
        let occupied = ((total as f64) * occupied_share).floor() as i64;
        let pct = availability_percentage(total, occupied);
        prop_assert!((0.0..=100.0).contains(&pct));
    }

    #[test]
    fn test_display_percentage_never_exceeds_bounds(free in -10_000i64..10_000, total in -10i64..10_000) {
        let pct = display_percentage(free, total);
        prop_assert!(pct <= 100);
        if total <= 0 {
            prop_assert_eq!(pct, 0);
        }
    }

    #[test]
    fn test_empty_lot_is_fully_free(total in 1i64..10_000) {
        prop_assert_eq!(availability_percentage(total, 0), 100.0);
        prop_assert_eq!(display_percentage(total, total), 100);
    }
}
