//! Property-based tests for the scoring engine.
//!
//! Invariants tested:
//! - Score is always within 0-100
//! - Enabling a signal never lowers the score
//! - Identical input always yields an identical verdict
//! - Level and action depend on the score alone
//! - Breakdown and factors list exactly the fired rules, in table order

use proptest::prelude::*;
use riskgate_engine::{
    rules, score, EnforcementAction, RiskInput, RiskLevel, RiskScore, Signal, BASE_SCORE,
};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn build(bits: [bool; 20], failed_attempts: u32) -> RiskInput {
    let mut input = RiskInput { failed_attempts, ..Default::default() };
    for (signal, on) in Signal::ALL.iter().zip(bits) {
        if on && *signal != Signal::ExcessiveFailedAttempts {
            input.enable(*signal);
        }
    }
    input
}

fn arb_input() -> impl Strategy<Value = RiskInput> {
    (prop::array::uniform20(any::<bool>()), 0u32..12).prop_map(|(bits, n)| build(bits, n))
}

// ── proptest! blocks ──────────────────────────────────────────────────────────

proptest! {
    #[test]
    fn prop_score_within_bounds(input in arb_input()) {
        let out = score(&input);
        prop_assert!(out.score.value() <= 100);
    }

    #[test]
    fn prop_enabling_signal_is_monotonic(input in arb_input(), idx in 0usize..20) {
        let signal = Signal::ALL[idx];
        let before = score(&input);
        let after = score(&input.with(signal));
        prop_assert!(after.score >= before.score);
        prop_assert!(after.level >= before.level);
    }

    #[test]
    fn prop_deterministic(input in arb_input()) {
        prop_assert_eq!(score(&input), score(&input));
    }

    #[test]
    fn prop_level_and_action_follow_score(input in arb_input()) {
        let out = score(&input);
        prop_assert_eq!(out.level, RiskLevel::from_score(out.score));
        prop_assert_eq!(out.action, out.level.action());
    }

    #[test]
    fn prop_breakdown_matches_fired_rules(input in arb_input()) {
        let out = score(&input);
        let fired: Vec<_> = rules().iter().filter(|r| r.fires(&input)).collect();

        prop_assert_eq!(out.breakdown.len(), out.factors.len());
        prop_assert_eq!(out.breakdown.len(), fired.len());
        for ((entry, factor), rule) in out.breakdown.iter().zip(&out.factors).zip(&fired) {
            prop_assert_eq!(entry.reason.as_str(), rule.reason);
            prop_assert_eq!(entry.points, rule.points);
            prop_assert_eq!(factor.as_str(), rule.factor);
        }

        let expected = (BASE_SCORE + out.raw_contribution() as i64).min(100);
        prop_assert_eq!(out.score.value() as i64, expected);
    }

    #[test]
    fn prop_level_partition(raw in 0u8..=100) {
        let s = RiskScore::new(raw).unwrap();
        let buckets = [
            raw <= 30,
            (31..=60).contains(&raw),
            (61..=80).contains(&raw),
            raw > 80,
        ];
        prop_assert_eq!(buckets.iter().filter(|b| **b).count(), 1);

        let level = RiskLevel::from_score(s);
        let expected_action = match level {
            RiskLevel::Low | RiskLevel::Medium => EnforcementAction::Allowed,
            RiskLevel::High => EnforcementAction::MfaRequired,
            RiskLevel::Critical => EnforcementAction::Blocked,
        };
        prop_assert_eq!(level.action(), expected_action);
    }
}
