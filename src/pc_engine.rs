//! Coverage Engine
//!
//! Explicit recompute entry point over the whole pipeline: profile, ceiling,
//! round budget, both simulators, the window model and the reports. Nothing
//! is cached between calls except the fixed-order sample.

use crate::pc_budget::round_budget;
use crate::pc_ceiling::PeriodicCeiling;
use crate::pc_config::{
    validate_baseline, validate_periods, validate_population, validate_round_duration,
    validate_sample_size, validate_target, ConfigError, EngineConfig,
};
use crate::pc_fixed_order::FixedOrderSimulator;
use crate::pc_interface::{Hour, OnlinePeriod, Probability, RoundRecord};
use crate::pc_profile::ReachabilityProfile;
use crate::pc_random_order::RandomOrderSimulator;
use crate::pc_report::{rounds_to_reach, summarize, tier_table, CoverageEntry, RoundSummary, TierRow};
use crate::pc_window_model::{WindowEstimate, WindowExposureModel};
use log::{info, warn};

pub struct CoverageEngine {
    config: EngineConfig,
    fixed_order: FixedOrderSimulator,
}

impl CoverageEngine {
    /// Validate `config` and set up an engine. The fixed-order sample is
    /// drawn lazily on the first recompute.
    pub fn new(config: EngineConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let seed = config.resolve_seed();

        Ok(Self {
            config,
            fixed_order: FixedOrderSimulator::new(seed),
        })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Seed behind the fixed-order sample (reproduces the run)
    pub fn seed(&self) -> [u8; 32] {
        self.fixed_order.seed()
    }

    pub fn set_periods(&mut self, periods: Vec<OnlinePeriod>) -> Result<(), ConfigError> {
        validate_periods(&periods)?;
        self.config.periods = periods;
        Ok(())
    }

    pub fn set_baseline(&mut self, baseline: Probability) -> Result<(), ConfigError> {
        validate_baseline(baseline)?;
        self.config.baseline_probability = baseline;
        Ok(())
    }

    pub fn set_round_duration(&mut self, hours: Hour) -> Result<(), ConfigError> {
        validate_round_duration(hours)?;
        self.config.round_duration_hours = hours;
        Ok(())
    }

    pub fn set_sample_size(&mut self, size: usize) -> Result<(), ConfigError> {
        validate_sample_size(size)?;
        self.config.sample_size = size;
        Ok(())
    }

    pub fn set_target(&mut self, target: f64) -> Result<(), ConfigError> {
        validate_target(target)?;
        self.config.target_coverage = target;
        Ok(())
    }

    pub fn set_population(&mut self, population: u64) -> Result<(), ConfigError> {
        validate_population(population)?;
        self.config.population = population;
        Ok(())
    }

    /// Run the full pipeline for the current configuration.
    ///
    /// Identical inputs with an unchanged sample give identical output.
    pub fn recompute(&mut self) -> EngineOutput {
        let config = &self.config;
        let duration = config.round_duration_hours;
        let target = config.target_coverage;

        self.fixed_order.ensure_sample(config.sample_size, duration);

        let profile = ReachabilityProfile::new(&config.periods, config.baseline_probability);
        let ceiling = PeriodicCeiling::compute(duration, &profile);
        let budget = round_budget(&profile);

        let random_order = RandomOrderSimulator::new(&profile, duration).run(budget);
        let fixed_order = self.fixed_order.run(&profile, budget);
        let window_model = WindowExposureModel::new(&profile, duration);

        let random_report = rounds_to_reach(target, &random_order);
        let fixed_report = rounds_to_reach(target, &fixed_order);
        let target_exceeds_ceiling = ceiling.is_exceeded_by(target);

        info!(
            "recompute: {}h rounds, ceiling {:.2}%, budget {} rounds, random {} / fixed {} rounds for {}%",
            duration,
            ceiling.fraction * 100.0,
            budget,
            random_report.rounds_needed,
            fixed_report.rounds_needed,
            target * 100.0
        );
        if target_exceeds_ceiling {
            warn!(
                "target {}% exceeds the fixed-order ceiling of {:.4}% for {}h rounds",
                target * 100.0,
                ceiling.fraction * 100.0,
                duration
            );
        }
        if !random_report.converged || !fixed_report.converged {
            warn!(
                "target {}% not reached within {} rounds (random: {}, fixed: {})",
                target * 100.0,
                budget,
                random_report.converged,
                fixed_report.converged
            );
        }

        EngineOutput {
            round_duration_hours: duration,
            target_coverage: target,
            population: config.population,
            ceiling,
            target_exceeds_ceiling,
            round_budget: budget,
            min_hourly_probability: profile.min_hourly_probability(),
            random_summaries: summarize(&random_order, duration),
            fixed_summaries: summarize(&fixed_order, duration),
            tiers: tier_table(&random_order, &fixed_order, &window_model),
            window: window_model.estimate(target),
            random_order,
            fixed_order,
            random_report,
            fixed_report,
        }
    }
}

// ============================================================================
// Output
// ============================================================================

/// Everything the presentation side reads back after one recompute
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct EngineOutput {
    pub round_duration_hours: Hour,
    pub target_coverage: f64,
    pub population: u64,

    pub ceiling: PeriodicCeiling,
    pub target_exceeds_ceiling: bool,

    pub round_budget: usize,
    pub min_hourly_probability: Probability,

    pub random_order: Vec<RoundRecord>,
    pub fixed_order: Vec<RoundRecord>,
    pub random_summaries: Vec<RoundSummary>,
    pub fixed_summaries: Vec<RoundSummary>,

    pub random_report: CoverageEntry,
    pub fixed_report: CoverageEntry,
    pub window: WindowEstimate,

    /// Standard targets 90% .. 99.999%
    pub tiers: Vec<TierRow>,
}

impl EngineOutput {
    pub fn ceiling_fraction(&self) -> f64 {
        self.ceiling.fraction
    }

    pub fn print_summary(&self) {
        println!("\n╔════════════════════════════════════════════════════════╗");
        println!("║        Delivery Coverage Results                       ║");
        println!("╚════════════════════════════════════════════════════════╝\n");

        println!("Configuration:");
        println!("  Round duration: {}h", self.round_duration_hours);
        println!("  Target: {}%", self.target_coverage * 100.0);
        println!("  Population: {}", self.population);
        println!("  Round budget: {}", self.round_budget);
        println!();

        println!("Fixed-order ceiling:");
        println!(
            "  gcd({}, 24) = {} classes, {} reachable -> {:.4}%",
            self.round_duration_hours,
            self.ceiling.residue_classes,
            self.ceiling.reachable_classes,
            self.ceiling.fraction * 100.0
        );
        if self.target_exceeds_ceiling {
            println!("  ⚠ target lies above the ceiling: fixed order cannot reach it");
        }
        println!();

        println!("Target {}%:", self.target_coverage * 100.0);
        print_entry("Random order", &self.random_report, self.population);
        print_entry("Fixed order", &self.fixed_report, self.population);
        if self.window.reachable {
            println!(
                "  {:<14} {:>5} rounds  {:>10.6}%",
                "Window model",
                self.window.rounds_needed,
                self.window.achieved_coverage * 100.0
            );
        } else {
            println!("  {:<14} unreachable", "Window model");
        }
        println!();

        println!("┌──────────┬──────────────┬──────────────┬──────────────┐");
        println!("│ Target   │ Random order │ Fixed order  │ Window model │");
        println!("├──────────┼──────────────┼──────────────┼──────────────┤");
        for row in &self.tiers {
            println!(
                "│ {:>7}% │ {:>12} │ {:>12} │ {:>12} │",
                row.target_coverage * 100.0,
                tier_cell(&row.random_order),
                tier_cell(&row.fixed_order),
                if row.window.reachable {
                    row.window.rounds_needed.to_string()
                } else {
                    "-".to_string()
                }
            );
        }
        println!("└──────────┴──────────────┴──────────────┴──────────────┘\n");
    }

    /// Print the first `limit` round lines of each strategy
    pub fn print_rounds(&self, limit: usize) {
        println!("Random order rounds:");
        for summary in self.random_summaries.iter().take(limit) {
            println!("  {}", summary);
        }
        println!("Fixed order rounds:");
        for summary in self.fixed_summaries.iter().take(limit) {
            println!("  {}", summary);
        }
        println!();
    }
}

fn print_entry(label: &str, entry: &CoverageEntry, population: u64) {
    println!(
        "  {:<14} {:>5} rounds  {:>10.6}%  reached {} / unreached {}{}",
        label,
        entry.rounds_needed,
        entry.achieved_coverage * 100.0,
        entry.reached_users(population),
        entry.unreached_users(population),
        if entry.converged { "" } else { "  (not converged)" }
    );
}

fn tier_cell(entry: &CoverageEntry) -> String {
    if entry.converged {
        entry.rounds_needed.to_string()
    } else {
        format!(">{}", entry.rounds_needed)
    }
}
