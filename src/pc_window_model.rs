//! Sliding-Window Exposure Model
//!
//! Closed-form companion to the two simulators. A round is a window of `D`
//! hours starting at a uniformly random time of day. Over a stretch of `L`
//! hours at reachability `p` a recipient stays unreached with probability
//! `(1 - p)^L`. Averaging the window failure over all start times gives one
//! per-round failure probability `q`, and rounds for target `T` follow as
//! `ceil(ln(1 - T) / ln(q))`.

use crate::pc_interface::{Hour, HOURS_PER_DAY};
use crate::pc_profile::ReachabilityProfile;

/// Start times are sampled every 0.01h across the day, exactly 2400 of them.
/// Stepping a float by 0.01 instead lands one extra start just below 24h,
/// which weights midnight twice and moves `q` only in the last digits.
const STEPS_PER_HOUR: u32 = 100;

const EPSILON: f64 = 1e-12;

/// Rounds needed for one target under the window model
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
pub struct WindowEstimate {
    pub target_coverage: f64,

    /// 0 when the target is unreachable (no reachable hour at all)
    pub rounds_needed: usize,

    /// `1 - q^rounds_needed`
    pub achieved_coverage: f64,

    pub reachable: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WindowExposureModel {
    /// Mean probability that one round misses a recipient
    pub round_failure_probability: f64,
}

impl WindowExposureModel {
    pub fn new(profile: &ReachabilityProfile, round_duration_hours: Hour) -> Self {
        let steps = HOURS_PER_DAY * STEPS_PER_HOUR;
        let total: f64 = (0..steps)
            .map(|step| {
                let start = step as f64 / STEPS_PER_HOUR as f64;
                window_failure(profile, start, round_duration_hours as f64)
            })
            .sum();

        Self {
            round_failure_probability: (total / steps as f64).clamp(0.0, 1.0),
        }
    }

    pub fn estimate(&self, target_coverage: f64) -> WindowEstimate {
        let q = self.round_failure_probability;

        if q <= 0.0 {
            return WindowEstimate {
                target_coverage,
                rounds_needed: 1,
                achieved_coverage: 1.0,
                reachable: true,
            };
        }
        if q >= 1.0 || target_coverage >= 1.0 {
            return WindowEstimate {
                target_coverage,
                rounds_needed: 0,
                achieved_coverage: 0.0,
                reachable: false,
            };
        }

        let rounds = ((1.0 - target_coverage).ln() / q.ln()).ceil().max(1.0) as usize;
        WindowEstimate {
            target_coverage,
            rounds_needed: rounds,
            achieved_coverage: 1.0 - q.powf(rounds as f64),
            reachable: true,
        }
    }
}

/// Probability a window of `length` hours starting at `start` reaches nobody
fn window_failure(profile: &ReachabilityProfile, start: f64, length: f64) -> f64 {
    let mut failure = 1.0;
    let mut current = start;
    let mut remaining = length;

    while remaining > EPSILON {
        let next_boundary = current.floor() + 1.0;
        let to_boundary = next_boundary - current;
        let segment = to_boundary.min(remaining);

        failure *= (1.0 - profile.probability_at(current)).powf(segment);
        remaining -= segment;
        current = if segment < to_boundary {
            current + segment
        } else {
            next_boundary
        };
    }

    failure
}
