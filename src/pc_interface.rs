// all hour arithmetic happens on whole hours of a 24-hour day
pub type Hour = u32;
pub type Probability = f64;
pub type RoundIndex = usize;

pub const HOURS_PER_DAY: Hour = 24;
pub const SECONDS_PER_HOUR: u64 = 3600;
pub const SECONDS_PER_DAY: u64 = HOURS_PER_DAY as u64 * SECONDS_PER_HOUR;

/// Maximum number of online periods held at once
pub const MAX_PERIODS: usize = 3;

/// Simulations stop once cumulative coverage reaches this level.
/// The round budget is sized against the same level.
pub const SATURATION_THRESHOLD: f64 = 0.999_999;

/// Target tiers reported in the comparison table
pub const STANDARD_TIERS: [f64; 6] = [0.90, 0.95, 0.99, 0.999, 0.9999, 0.99999];

// ============================================================================
// Online Periods
// ============================================================================

/// A half-open hour interval `[start, end)` during which a recipient is
/// reachable with `probability`.
///
/// A period with `start >= end` or `probability == 0` is inert. Periods never
/// wrap midnight: 22:00-02:00 has to be given as two periods.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct OnlinePeriod {
    /// First hour inside the period (0..=23)
    pub start: Hour,

    /// First hour after the period (1..=24)
    pub end: Hour,

    /// Reachability inside the period (0.0 to 1.0)
    pub probability: Probability,
}

impl OnlinePeriod {
    pub fn new(start: Hour, end: Hour, probability: Probability) -> Self {
        Self {
            start,
            end,
            probability,
        }
    }

    /// Whether this period takes part in profile lookups
    pub fn is_active(&self) -> bool {
        self.start < self.end && self.probability > 0.0
    }

    /// Half-open containment test on an hour-of-day already reduced into [0, 24)
    pub fn contains(&self, hour_of_day: f64) -> bool {
        hour_of_day >= self.start as f64 && hour_of_day < self.end as f64
    }

    /// Length of the period in hours (0 when inert by bounds)
    pub fn length_hours(&self) -> Hour {
        self.end.saturating_sub(self.start)
    }
}

// ============================================================================
// Round Records
// ============================================================================

/// Outcome of one delivery round as produced by a simulator.
///
/// Records come out in strictly increasing `round_index` order.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
pub struct RoundRecord {
    /// 0-based round index
    pub round_index: RoundIndex,

    /// Success (hit) probability of this round alone
    pub success_probability: Probability,

    /// Fraction of the population reached at least once so far
    pub cumulative_coverage: f64,
}

impl RoundRecord {
    /// 1-based round number, as shown to users
    pub fn round_number(&self) -> usize {
        self.round_index + 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inert_periods() {
        assert!(OnlinePeriod::new(17, 23, 0.6).is_active());
        assert!(!OnlinePeriod::new(17, 23, 0.0).is_active());
        assert!(!OnlinePeriod::new(23, 17, 0.6).is_active());
        assert!(!OnlinePeriod::new(5, 5, 1.0).is_active());
    }

    #[test]
    fn test_contains_is_half_open() {
        let period = OnlinePeriod::new(10, 24, 1.0);

        assert!(period.contains(10.0));
        assert!(period.contains(23.999));
        assert!(!period.contains(9.999));
        assert!(!period.contains(0.0));
    }

    #[test]
    fn test_round_number_is_one_based() {
        let record = RoundRecord {
            round_index: 0,
            success_probability: 0.5,
            cumulative_coverage: 0.5,
        };
        assert_eq!(record.round_number(), 1);
    }
}
