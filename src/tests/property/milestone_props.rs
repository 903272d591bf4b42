//! Property-based tests for milestone progress
//!
//! Tests invariants:
//! - Progress never exceeds 100
//! - Completing every milestone reads as 100
//! - Malformed reports never move a session's progress

use proptest::prelude::*;

use crate::core::chat::{ChatSession, Milestones, INITIAL_PROGRESS};

proptest! {
    #[test]
    fn percent_is_bounded(completed in 0u32..10_000, total in 1u32..10_000) {
        let percent = Milestones { completed, total }.percent();
        prop_assert!(percent <= 100);
    }

    #[test]
    fn complete_reads_full(total in 1u32..10_000, extra in 0u32..100) {
        let percent = Milestones { completed: total + extra, total }.percent();
        prop_assert_eq!(percent, 100);
    }

    #[test]
    fn percent_is_monotonic(completed in 0u32..999, total in 1000u32..2000) {
        let lower = Milestones { completed, total }.percent();
        let higher = Milestones { completed: completed + 1, total }.percent();
        prop_assert!(lower <= higher);
    }

    #[test]
    fn parse_display_agree(completed in 0u32..1000, total in 1u32..1000) {
        let m = Milestones { completed, total };
        prop_assert_eq!(m.to_string().parse::<Milestones>(), Ok(m));
    }

    #[test]
    fn malformed_report_keeps_progress(raw in "[^/]{0,12}") {
        let mut session = ChatSession::new("p1", Vec::new());
        session.apply_milestones(&raw);
        prop_assert_eq!(session.progress(), INITIAL_PROGRESS);
    }
}
