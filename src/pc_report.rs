//! Coverage Report
//!
//! Turns simulator output into answers: how many rounds a target takes, a
//! per-round human-readable summary, and the standard tier table.

use crate::pc_interface::{Hour, RoundRecord, HOURS_PER_DAY, STANDARD_TIERS};
use crate::pc_window_model::{WindowEstimate, WindowExposureModel};
use std::fmt;

// ============================================================================
// Rounds To Reach
// ============================================================================

/// Rounds one strategy needs for one target
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
pub struct CoverageEntry {
    pub target_coverage: f64,

    /// 1-based round at which the target was met, or the last simulated
    /// round when it never was
    pub rounds_needed: usize,

    /// Coverage at `rounds_needed`
    pub achieved_coverage: f64,

    /// False when the round budget ran out before the target was met
    pub converged: bool,
}

impl CoverageEntry {
    /// Users reached at the achieved coverage
    pub fn reached_users(&self, population: u64) -> u64 {
        let reached = (self.achieved_coverage * population as f64).round();
        (reached.max(0.0) as u64).min(population)
    }

    pub fn unreached_users(&self, population: u64) -> u64 {
        population - self.reached_users(population)
    }
}

/// Scan `records` for the first round whose coverage meets `target_coverage`.
///
/// When no round does, the last record is reported with `converged == false`
/// so callers can tell "needs more rounds" apart from convergence. An empty
/// sequence reports zero rounds and zero coverage.
pub fn rounds_to_reach(target_coverage: f64, records: &[RoundRecord]) -> CoverageEntry {
    if let Some(hit) = records.iter().find(|r| r.cumulative_coverage >= target_coverage) {
        return CoverageEntry {
            target_coverage,
            rounds_needed: hit.round_number(),
            achieved_coverage: hit.cumulative_coverage,
            converged: true,
        };
    }

    match records.last() {
        Some(last) => CoverageEntry {
            target_coverage,
            rounds_needed: last.round_number(),
            achieved_coverage: last.cumulative_coverage,
            converged: false,
        },
        None => CoverageEntry {
            target_coverage,
            rounds_needed: 0,
            achieved_coverage: 0.0,
            converged: false,
        },
    }
}

// ============================================================================
// Round Summaries
// ============================================================================

/// One line of the per-round breakdown
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct RoundSummary {
    /// 1-based
    pub round_number: usize,

    /// Absolute hours since the first round started
    pub start_hour: u64,
    pub end_hour: u64,

    /// e.g. "D1 06:00 - D1 12:00"
    pub span_label: String,

    pub hit_rate: f64,
    pub cumulative_coverage: f64,
}

impl fmt::Display for RoundSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Round {:>4} | {} | hit {:>8.4}% | coverage {:>10.6}%",
            self.round_number,
            self.span_label,
            self.hit_rate * 100.0,
            self.cumulative_coverage * 100.0
        )
    }
}

pub fn summarize(records: &[RoundRecord], round_duration_hours: Hour) -> Vec<RoundSummary> {
    let duration = round_duration_hours as u64;

    records
        .iter()
        .map(|record| {
            let start_hour = record.round_index as u64 * duration;
            let end_hour = start_hour + duration;
            RoundSummary {
                round_number: record.round_number(),
                start_hour,
                end_hour,
                span_label: format!("{} - {}", clock_label(start_hour), clock_label(end_hour)),
                hit_rate: record.success_probability,
                cumulative_coverage: record.cumulative_coverage,
            }
        })
        .collect()
}

/// "D{day} {hh}:00" with 1-based days
fn clock_label(absolute_hour: u64) -> String {
    let day_hours = HOURS_PER_DAY as u64;
    format!(
        "D{} {:02}:00",
        absolute_hour / day_hours + 1,
        absolute_hour % day_hours
    )
}

// ============================================================================
// Tier Table
// ============================================================================

/// Rounds needed for one standard target, per strategy
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
pub struct TierRow {
    pub target_coverage: f64,
    pub random_order: CoverageEntry,
    pub fixed_order: CoverageEntry,
    pub window: WindowEstimate,
}

pub fn tier_table(
    random_order: &[RoundRecord],
    fixed_order: &[RoundRecord],
    window: &WindowExposureModel,
) -> Vec<TierRow> {
    STANDARD_TIERS
        .iter()
        .map(|&target| TierRow {
            target_coverage: target,
            random_order: rounds_to_reach(target, random_order),
            fixed_order: rounds_to_reach(target, fixed_order),
            window: window.estimate(target),
        })
        .collect()
}
