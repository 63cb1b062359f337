//! Reachability Profile
//!
//! Maps an hour of day to the probability that a recipient can be reached.
//! Built once from the period configuration; lookups are pure.

use crate::pc_interface::{OnlinePeriod, Probability, HOURS_PER_DAY};

const DAY: usize = HOURS_PER_DAY as usize;

/// Hour-of-day reachability derived from up to three online periods.
///
/// Overlapping periods resolve first-match-wins in declaration order.
/// Hours outside every active period fall back to the baseline.
#[derive(Debug, Clone, PartialEq)]
pub struct ReachabilityProfile {
    periods: Vec<OnlinePeriod>,
    baseline: Probability,

    /// Resolved probability for each whole hour
    hourly: [Probability; DAY],
}

impl ReachabilityProfile {
    pub fn new(periods: &[OnlinePeriod], baseline: Probability) -> Self {
        let periods: Vec<OnlinePeriod> = periods.iter().copied().filter(|p| p.is_active()).collect();

        let mut hourly = [baseline; DAY];
        for (hour, slot) in hourly.iter_mut().enumerate() {
            if let Some(period) = first_match(&periods, hour as f64) {
                *slot = period.probability;
            }
        }

        Self {
            periods,
            baseline,
            hourly,
        }
    }

    /// Probability of reaching a recipient at `hour_of_day`.
    ///
    /// Any real hour is accepted; it is reduced into [0, 24) first, so
    /// negative hours wrap forward.
    pub fn probability_at(&self, hour_of_day: f64) -> Probability {
        if !hour_of_day.is_finite() {
            return self.baseline;
        }
        let hour = normalize_hour(hour_of_day);

        // period bounds are whole hours, so the hourly table agrees with a
        // first-match scan for every point inside the hour
        self.hourly[hour.floor() as usize]
    }

    /// Probability for a whole hour (0..24, taken modulo 24)
    pub fn hour_probability(&self, hour: usize) -> Probability {
        self.hourly[hour % DAY]
    }

    /// Whether a whole hour has any chance of reaching a recipient
    pub fn is_reachable(&self, hour: usize) -> bool {
        self.hour_probability(hour) > 0.0
    }

    pub fn hourly(&self) -> &[Probability; DAY] {
        &self.hourly
    }

    /// Smallest probability over the 24 hours
    pub fn min_hourly_probability(&self) -> Probability {
        self.hourly.iter().copied().fold(f64::INFINITY, f64::min)
    }

    /// Average probability over the 24 hours
    pub fn mean_probability(&self) -> Probability {
        self.hourly.iter().sum::<f64>() / DAY as f64
    }

    /// Number of whole hours with positive reachability
    pub fn reachable_hours(&self) -> usize {
        self.hourly.iter().filter(|&&p| p > 0.0).count()
    }

    pub fn any_reachable(&self) -> bool {
        self.reachable_hours() > 0
    }

    /// Active periods in declaration order
    pub fn periods(&self) -> &[OnlinePeriod] {
        &self.periods
    }

    pub fn baseline(&self) -> Probability {
        self.baseline
    }
}

fn first_match(periods: &[OnlinePeriod], hour_of_day: f64) -> Option<&OnlinePeriod> {
    periods.iter().find(|p| p.contains(hour_of_day))
}

/// Reduce an hour into [0, 24)
pub fn normalize_hour(hour: f64) -> f64 {
    let day = HOURS_PER_DAY as f64;
    let reduced = hour.rem_euclid(day);
    // rem_euclid can round up to exactly 24.0 for tiny negative inputs
    if reduced >= day {
        0.0
    } else {
        reduced
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn evening() -> ReachabilityProfile {
        ReachabilityProfile::new(&[OnlinePeriod::new(17, 23, 0.6)], 0.0)
    }

    #[test]
    fn test_lookup_inside_and_outside_period() {
        let profile = evening();

        assert_eq!(profile.probability_at(17.0), 0.6);
        assert_eq!(profile.probability_at(22.99), 0.6);
        assert_eq!(profile.probability_at(23.0), 0.0);
        assert_eq!(profile.probability_at(16.5), 0.0);
    }

    #[test]
    fn test_lookup_is_periodic() {
        let profile = evening();

        for step in 0..240 {
            let hour = step as f64 * 0.1;
            assert_eq!(profile.probability_at(hour), profile.probability_at(hour + 24.0));
            assert_eq!(profile.probability_at(hour), profile.probability_at(hour - 48.0));
        }
        assert_eq!(profile.probability_at(-6.0), 0.6, "-6h wraps to 18h");
    }

    #[test]
    fn test_end_of_day_boundary() {
        let profile = ReachabilityProfile::new(&[OnlinePeriod::new(20, 24, 0.9)], 0.0);

        assert_eq!(profile.probability_at(23.999_999), 0.9);
        assert_eq!(profile.probability_at(24.0), 0.0);
        assert_eq!(profile.probability_at(0.0), 0.0);
        assert_eq!(profile.probability_at(-1e-18), 0.0);
    }

    #[test]
    fn test_first_match_wins_on_overlap() {
        let profile = ReachabilityProfile::new(
            &[OnlinePeriod::new(8, 12, 0.3), OnlinePeriod::new(10, 14, 0.9)],
            0.0,
        );

        assert_eq!(profile.probability_at(9.0), 0.3);
        assert_eq!(profile.probability_at(11.0), 0.3, "earlier period wins");
        assert_eq!(profile.probability_at(12.0), 0.9);
        assert_eq!(profile.probability_at(13.5), 0.9);
    }

    #[test]
    fn test_inert_periods_are_ignored() {
        let profile = ReachabilityProfile::new(
            &[
                OnlinePeriod::new(8, 12, 0.0),
                OnlinePeriod::new(14, 10, 0.8),
                OnlinePeriod::new(8, 12, 0.4),
            ],
            0.0,
        );

        assert_eq!(profile.periods().len(), 1);
        assert_eq!(profile.probability_at(9.0), 0.4, "zero-probability period does not shadow");
        assert_eq!(profile.probability_at(12.0), 0.0);
    }

    #[test]
    fn test_baseline_fills_gaps() {
        let profile = ReachabilityProfile::new(&[OnlinePeriod::new(17, 23, 0.6)], 0.2);

        assert_eq!(profile.probability_at(3.0), 0.2);
        assert_eq!(profile.probability_at(18.0), 0.6);
        assert_eq!(profile.min_hourly_probability(), 0.2);
        assert_eq!(profile.reachable_hours(), 24);
    }

    #[test]
    fn test_midnight_split_into_two_periods() {
        let profile = ReachabilityProfile::new(
            &[OnlinePeriod::new(22, 24, 0.5), OnlinePeriod::new(0, 2, 0.5)],
            0.0,
        );

        assert_eq!(profile.probability_at(23.5), 0.5);
        assert_eq!(profile.probability_at(0.5), 0.5);
        assert_eq!(profile.probability_at(2.0), 0.0);
        assert_eq!(profile.reachable_hours(), 4);
    }

    #[test]
    fn test_summary_statistics() {
        let profile = evening();

        assert_eq!(profile.min_hourly_probability(), 0.0);
        assert_eq!(profile.reachable_hours(), 6);
        assert!((profile.mean_probability() - 0.6 * 6.0 / 24.0).abs() < 1e-12);
        assert!(profile.any_reachable());
        assert!(!ReachabilityProfile::new(&[], 0.0).any_reachable());
    }
}
