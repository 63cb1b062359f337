//! Round Budget
//!
//! Upper bound on the number of rounds a simulator may run. It is a
//! heuristic bound sized for the slowest hour; the simulators stop earlier
//! once coverage saturates.

use crate::pc_interface::{Probability, SATURATION_THRESHOLD};
use crate::pc_profile::ReachabilityProfile;

/// Floor on the budget so short configurations still get a useful curve
pub const MIN_ROUND_BUDGET: usize = 50;

/// Extra rounds on top of the computed estimate
pub const ROUND_BUDGET_MARGIN: usize = 10;

/// Budget used when some hour is never reachable
pub const FALLBACK_ROUND_BUDGET: usize = 1000;

/// Rounds needed for `target_near_certainty` when every round succeeds with
/// at least `min_hourly_probability`, plus a safety margin.
///
/// # Returns
/// * `FALLBACK_ROUND_BUDGET` when the minimum probability is zero (or NaN),
///   or when the target is 1 and the logarithm has no finite value
/// * otherwise `max(50, n + 10)` with no upper limit, where
///   `n = ceil(ln(1 - target) / ln(1 - p_min))`
pub fn max_rounds(target_near_certainty: f64, min_hourly_probability: Probability) -> usize {
    if !(min_hourly_probability > 0.0) {
        return FALLBACK_ROUND_BUDGET;
    }
    if min_hourly_probability >= 1.0 {
        return MIN_ROUND_BUDGET;
    }
    if !(target_near_certainty < 1.0) {
        return FALLBACK_ROUND_BUDGET;
    }

    let needed = ((1.0 - target_near_certainty).ln() / (1.0 - min_hourly_probability).ln()).ceil();
    let needed = if needed > 0.0 { needed as usize } else { 0 };

    needed
        .saturating_add(ROUND_BUDGET_MARGIN)
        .max(MIN_ROUND_BUDGET)
}

/// Budget for a profile, sized against the saturation threshold
pub fn round_budget(profile: &ReachabilityProfile) -> usize {
    max_rounds(SATURATION_THRESHOLD, profile.min_hourly_probability())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pc_interface::OnlinePeriod;

    #[test]
    fn test_zero_minimum_uses_fallback() {
        assert_eq!(max_rounds(SATURATION_THRESHOLD, 0.0), FALLBACK_ROUND_BUDGET);
        assert_eq!(max_rounds(SATURATION_THRESHOLD, f64::NAN), FALLBACK_ROUND_BUDGET);
    }

    #[test]
    fn test_floor_applies_to_high_reachability() {
        // ln(1e-6) / ln(0.5) = 19.93 -> 20 + 10 = 30 -> floor 50
        assert_eq!(max_rounds(SATURATION_THRESHOLD, 0.5), MIN_ROUND_BUDGET);
        assert_eq!(max_rounds(SATURATION_THRESHOLD, 1.0), MIN_ROUND_BUDGET);
    }

    #[test]
    fn test_margin_above_floor() {
        // ln(1e-6) / ln(0.8) = 61.9 -> 62 + 10
        assert_eq!(max_rounds(SATURATION_THRESHOLD, 0.2), 72);

        // ln(1e-6) / ln(0.9) = 131.1 -> 132 + 10
        assert_eq!(max_rounds(SATURATION_THRESHOLD, 0.1), 142);
    }

    #[test]
    fn test_tiny_probabilities_are_not_capped() {
        // ln(1e-6) / ln(0.999) = 13808.6 -> 13809 + 10
        assert_eq!(max_rounds(SATURATION_THRESHOLD, 0.001), 13819);
        assert!(max_rounds(SATURATION_THRESHOLD, 1e-4) > FALLBACK_ROUND_BUDGET);
    }

    #[test]
    fn test_unit_target_uses_fallback() {
        assert_eq!(max_rounds(1.0, 0.3), FALLBACK_ROUND_BUDGET);
    }

    #[test]
    fn test_budget_from_profile() {
        let gap = ReachabilityProfile::new(&[OnlinePeriod::new(17, 23, 0.6)], 0.0);
        assert_eq!(round_budget(&gap), FALLBACK_ROUND_BUDGET);

        let floor = ReachabilityProfile::new(&[OnlinePeriod::new(17, 23, 0.6)], 0.2);
        assert_eq!(round_budget(&floor), 72);
    }
}
