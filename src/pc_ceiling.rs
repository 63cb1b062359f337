//! Periodic Ceiling
//!
//! Under fixed-order delivery a recipient first contacted at hour `t` is
//! contacted again at `(t + k*D) mod 24` in round `k`. The hours one recipient
//! ever sees form a residue class modulo `g = gcd(D, 24)`. A class with no
//! reachable hour can never be covered, however many rounds are run.

use crate::pc_interface::{Hour, HOURS_PER_DAY};
use crate::pc_profile::ReachabilityProfile;

/// Coverage ceiling for fixed-order delivery at one round duration
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
pub struct PeriodicCeiling {
    /// gcd(round duration, 24): number of residue classes
    pub residue_classes: u32,

    /// Classes containing at least one reachable hour
    pub reachable_classes: u32,

    /// reachable_classes / residue_classes
    pub fraction: f64,
}

impl PeriodicCeiling {
    pub fn compute(round_duration_hours: Hour, profile: &ReachabilityProfile) -> Self {
        let g = gcd(round_duration_hours, HOURS_PER_DAY);

        let reachable_classes = (0..g)
            .filter(|&residue| {
                (residue..HOURS_PER_DAY)
                    .step_by(g as usize)
                    .any(|hour| profile.is_reachable(hour as usize))
            })
            .count() as u32;

        Self {
            residue_classes: g,
            reachable_classes,
            fraction: reachable_classes as f64 / g as f64,
        }
    }

    /// Whether a target lies above what fixed-order delivery can ever reach
    pub fn is_exceeded_by(&self, target: f64) -> bool {
        target > self.fraction
    }
}

/// Theoretical maximum fixed-order coverage for `round_duration_hours`
pub fn ceiling_fraction(round_duration_hours: Hour, profile: &ReachabilityProfile) -> f64 {
    PeriodicCeiling::compute(round_duration_hours, profile).fraction
}

pub fn gcd(a: u32, b: u32) -> u32 {
    let (mut a, mut b) = (a, b);
    while b != 0 {
        let r = a % b;
        a = b;
        b = r;
    }
    a
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pc_interface::OnlinePeriod;

    fn profile(periods: &[OnlinePeriod]) -> ReachabilityProfile {
        ReachabilityProfile::new(periods, 0.0)
    }

    #[test]
    fn test_gcd() {
        assert_eq!(gcd(24, 24), 24);
        assert_eq!(gcd(6, 24), 6);
        assert_eq!(gcd(5, 24), 1);
        assert_eq!(gcd(20, 24), 4);
        assert_eq!(gcd(48, 24), 24);
        assert_eq!(gcd(0, 24), 24);
    }

    #[test]
    fn test_long_period_six_hour_rounds() {
        let profile = profile(&[OnlinePeriod::new(10, 22, 1.0)]);
        let ceiling = PeriodicCeiling::compute(6, &profile);

        assert_eq!(ceiling.residue_classes, 6);
        assert_eq!(ceiling.reachable_classes, 6);
        assert_eq!(ceiling.fraction, 1.0);
    }

    #[test]
    fn test_coprime_duration_reaches_everyone() {
        let profile = profile(&[OnlinePeriod::new(10, 22, 1.0)]);
        assert_eq!(ceiling_fraction(5, &profile), 1.0);

        let single = self::profile(&[OnlinePeriod::new(3, 4, 0.1)]);
        assert_eq!(ceiling_fraction(7, &single), 1.0);
    }

    #[test]
    fn test_single_hour_daily_rounds() {
        let profile = profile(&[OnlinePeriod::new(17, 18, 0.5)]);
        let ceiling = PeriodicCeiling::compute(24, &profile);

        assert_eq!(ceiling.residue_classes, 24);
        assert_eq!(ceiling.reachable_classes, 1);
        assert_eq!(ceiling.fraction, 1.0 / 24.0);
        assert!(ceiling.is_exceeded_by(0.9));
    }

    #[test]
    fn test_two_day_rounds_alias_like_one_day() {
        let profile = profile(&[OnlinePeriod::new(17, 23, 0.6)]);
        assert_eq!(ceiling_fraction(48, &profile), ceiling_fraction(24, &profile));
        assert_eq!(ceiling_fraction(24, &profile), 6.0 / 24.0);
    }

    #[test]
    fn test_default_evening_twenty_hour_rounds() {
        // gcd(20, 24) = 4 and 17..23 touches every residue mod 4
        let profile = profile(&[OnlinePeriod::new(17, 23, 0.6)]);
        assert_eq!(ceiling_fraction(20, &profile), 1.0);

        // a two-hour window only covers residues {1, 2} mod 4
        let narrow = self::profile(&[OnlinePeriod::new(17, 19, 0.6)]);
        assert_eq!(ceiling_fraction(20, &narrow), 0.5);
    }

    #[test]
    fn test_invariant_under_declaration_order() {
        let a = OnlinePeriod::new(2, 4, 0.4);
        let b = OnlinePeriod::new(9, 10, 0.7);
        let c = OnlinePeriod::new(15, 17, 0.2);

        for duration in 1..=48 {
            let forward = ceiling_fraction(duration, &profile(&[a, b, c]));
            let backward = ceiling_fraction(duration, &profile(&[c, b, a]));
            let shuffled = ceiling_fraction(duration, &profile(&[b, c, a]));
            assert_eq!(forward, backward, "duration {}", duration);
            assert_eq!(forward, shuffled, "duration {}", duration);
        }
    }

    #[test]
    fn test_non_decreasing_as_hours_are_added() {
        for duration in 1..=48 {
            let mut previous = 0.0;
            for end in 1..=24 {
                let value = ceiling_fraction(duration, &profile(&[OnlinePeriod::new(0, end, 0.3)]));
                assert!(value >= previous, "duration {} end {}", duration, end);
                previous = value;
            }
            assert_eq!(previous, 1.0);
        }
    }

    #[test]
    fn test_no_reachable_hours() {
        assert_eq!(ceiling_fraction(6, &profile(&[])), 0.0);
    }
}
