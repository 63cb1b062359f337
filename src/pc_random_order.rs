//! Random-Order Simulator
//!
//! Every round re-randomizes which recipient is contacted when, so rounds are
//! independent. The whole population shares one success probability per
//! round: the average reachability over the hours the round spans.

use crate::pc_interface::{Hour, Probability, RoundRecord, HOURS_PER_DAY, SATURATION_THRESHOLD};
use crate::pc_profile::ReachabilityProfile;

pub struct RandomOrderSimulator<'a> {
    profile: &'a ReachabilityProfile,
    round_duration_hours: Hour,
}

impl<'a> RandomOrderSimulator<'a> {
    pub fn new(profile: &'a ReachabilityProfile, round_duration_hours: Hour) -> Self {
        Self {
            profile,
            round_duration_hours: round_duration_hours.max(1),
        }
    }

    /// Average reachability over the hours of round `round_index`
    pub fn round_success_probability(&self, round_index: usize) -> Probability {
        let duration = self.round_duration_hours as u64;
        let start = round_index as u64 * duration;

        let total: f64 = (0..duration)
            .map(|h| {
                let hour_of_day = (start + h) % HOURS_PER_DAY as u64;
                self.profile.probability_at(hour_of_day as f64)
            })
            .sum();

        (total / duration as f64).clamp(0.0, 1.0)
    }

    /// Run until coverage saturates or `max_rounds` records have been emitted
    pub fn run(&self, max_rounds: usize) -> Vec<RoundRecord> {
        let mut records = Vec::new();
        let mut miss_so_far = 1.0_f64;

        for round_index in 0..max_rounds {
            let success_probability = self.round_success_probability(round_index);

            // once everyone is reached, stay at exactly 100%
            if miss_so_far > 0.0 {
                miss_so_far = (miss_so_far * (1.0 - success_probability)).max(0.0);
            }
            let cumulative_coverage = 1.0 - miss_so_far;

            records.push(RoundRecord {
                round_index,
                success_probability,
                cumulative_coverage,
            });

            if cumulative_coverage >= SATURATION_THRESHOLD {
                break;
            }
        }

        records
    }
}
