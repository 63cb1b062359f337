//! Fixed-Order Simulator
//!
//! Each recipient keeps one phase offset inside the round and is contacted at
//! that same offset every round. The population is estimated Monte-Carlo
//! style from a finite sample of synthetic recipients.
//!
//! The sample is the only state that survives between recomputations. It is
//! redrawn only when the requested sample size or round duration differs from
//! the held one, so the curve stays stable while periods or targets change.

use crate::pc_interface::{Hour, RoundRecord, SATURATION_THRESHOLD, SECONDS_PER_DAY, SECONDS_PER_HOUR};
use crate::pc_profile::ReachabilityProfile;
use log::debug;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Smallest sample the simulator will hold
pub const MIN_SAMPLE_SIZE: usize = 10;

pub struct FixedOrderSimulator {
    rng: StdRng,
    seed: [u8; 32],

    /// Phase offset of each synthetic recipient (seconds into the round)
    offsets: Vec<u64>,

    /// Round duration the offsets were drawn for
    round_duration_hours: Hour,
}

impl FixedOrderSimulator {
    /// Create a simulator with an empty sample
    pub fn new(seed: [u8; 32]) -> Self {
        Self {
            rng: StdRng::from_seed(seed),
            seed,
            offsets: Vec::new(),
            round_duration_hours: 0,
        }
    }

    pub fn seed(&self) -> [u8; 32] {
        self.seed
    }

    /// Number of synthetic recipients currently held
    pub fn sample_size(&self) -> usize {
        self.offsets.len()
    }

    /// Round duration the held sample belongs to (0 before the first draw)
    pub fn round_duration_hours(&self) -> Hour {
        self.round_duration_hours
    }

    /// Make sure the held sample matches the request, redrawing if not.
    ///
    /// Sample sizes below `MIN_SAMPLE_SIZE` are raised to it.
    ///
    /// # Returns
    /// * `true` if the sample was redrawn
    pub fn ensure_sample(&mut self, sample_size: usize, round_duration_hours: Hour) -> bool {
        let sample_size = sample_size.max(MIN_SAMPLE_SIZE);
        let round_duration_hours = round_duration_hours.max(1);

        if self.offsets.len() == sample_size && self.round_duration_hours == round_duration_hours {
            return false;
        }

        let round_seconds = round_duration_hours as u64 * SECONDS_PER_HOUR;
        let rng = &mut self.rng;
        self.offsets = (0..sample_size).map(|_| rng.gen_range(0..round_seconds)).collect();
        self.round_duration_hours = round_duration_hours;

        debug!(
            "fixed-order sample redrawn: {} recipients over {}h rounds",
            sample_size, round_duration_hours
        );
        true
    }

    /// Run the held sample against `profile` for at most `max_rounds` rounds.
    ///
    /// Each record's success probability is the sample-mean hit rate of that
    /// round; coverage is `1 - mean(miss_i)`.
    pub fn run(&self, profile: &ReachabilityProfile, max_rounds: usize) -> Vec<RoundRecord> {
        let mut records = Vec::new();
        if self.offsets.is_empty() {
            return records;
        }

        let count = self.offsets.len() as f64;
        let round_seconds = self.round_duration_hours as u64 * SECONDS_PER_HOUR;
        let mut miss = vec![1.0_f64; self.offsets.len()];

        for round_index in 0..max_rounds {
            let round_start = round_index as u64 * round_seconds;
            let mut hit_total = 0.0;
            let mut miss_total = 0.0;

            for (miss_i, &offset) in miss.iter_mut().zip(&self.offsets) {
                let second_of_day = (round_start + offset) % SECONDS_PER_DAY;
                let hour_of_day = second_of_day as f64 / SECONDS_PER_HOUR as f64;
                let p = profile.probability_at(hour_of_day);

                hit_total += p;
                *miss_i *= 1.0 - p;
                miss_total += *miss_i;
            }

            let success_probability = (hit_total / count).clamp(0.0, 1.0);
            let cumulative_coverage = (1.0 - miss_total / count).clamp(0.0, 1.0);

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
