//! # pcRust - Push Coverage Estimation
//!
//! Estimates how many time-windowed delivery rounds are needed to reach a
//! target fraction of a population whose members are only reachable at
//! certain hours of the day.
//!
//! ## Core Components
//!
//! - **ReachabilityProfile**: hour-of-day reachability from up to three online periods
//! - **PeriodicCeiling**: coverage ceiling of fixed-order delivery (gcd aliasing)
//! - **Round budget**: upper bound on simulated rounds
//! - **RandomOrderSimulator**: rounds independent of each other
//! - **FixedOrderSimulator**: each recipient keeps one phase offset (Monte-Carlo)
//! - **WindowExposureModel**: closed-form sliding-window estimate
//! - **Report**: rounds to reach a target, per-round summaries, tier table
//!
//! ## Usage
//!
//! ```no_run
//! use pc_rust::{CoverageEngine, EngineConfig, OnlinePeriod};
//!
//! let mut engine = CoverageEngine::new(EngineConfig::default()).unwrap();
//! let output = engine.recompute();
//! output.print_summary();
//!
//! // a parameter change followed by another explicit recompute
//! engine.set_periods(vec![OnlinePeriod::new(8, 12, 0.4)]).unwrap();
//! let output = engine.recompute();
//! println!("{} rounds", output.random_report.rounds_needed);
//! ```

// Core model
pub mod pc_interface;
pub mod pc_profile;
pub mod pc_ceiling;
pub mod pc_budget;

// Simulators and estimators
pub mod pc_random_order;
pub mod pc_fixed_order;
pub mod pc_window_model;

// Reporting and orchestration
pub mod pc_report;
pub mod pc_config;
pub mod pc_engine;

// Re-export commonly used types
pub use pc_interface::{
    Hour, OnlinePeriod, Probability, RoundIndex, RoundRecord, HOURS_PER_DAY, MAX_PERIODS,
    SATURATION_THRESHOLD, STANDARD_TIERS,
};
pub use pc_budget::{max_rounds, round_budget};
pub use pc_ceiling::{ceiling_fraction, gcd, PeriodicCeiling};
pub use pc_config::{ConfigError, EngineConfig};
pub use pc_engine::{CoverageEngine, EngineOutput};
pub use pc_fixed_order::FixedOrderSimulator;
pub use pc_profile::ReachabilityProfile;
pub use pc_random_order::RandomOrderSimulator;
pub use pc_report::{rounds_to_reach, CoverageEntry, RoundSummary, TierRow};
pub use pc_window_model::{WindowEstimate, WindowExposureModel};
