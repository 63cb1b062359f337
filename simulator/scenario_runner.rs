// Scenario Runner - Load and evaluate delivery scenario YAML files
//
// Usage:
//   cargo run --bin scenario_runner scenarios/evening_peak.yaml
//   cargo run --bin scenario_runner scenarios/  (runs all .yaml files in directory)
//   cargo run --bin scenario_runner scenarios/evening_peak.yaml --seed 0x1234...

use log::LevelFilter;
use pc_rust::{CoverageEngine, EngineConfig, OnlinePeriod};
use simple_logger::SimpleLogger;
use std::env;
use std::fs;
use std::path::Path;

type BoxError = Box<dyn std::error::Error>;

/// Scenario file format
#[derive(Debug, serde::Deserialize)]
struct ScenarioFile {
    /// Scenario metadata
    #[serde(default)]
    meta: ScenarioMeta,

    /// Configuration overrides on top of the engine defaults
    #[serde(default)]
    config: ScenarioConfig,

    /// Number of per-round lines to print for each strategy
    #[serde(default)]
    show_rounds: usize,
}

#[derive(Debug, Default, serde::Deserialize)]
struct ScenarioMeta {
    name: Option<String>,
    description: Option<String>,
    hypothesis: Option<String>,
}

#[derive(Debug, Default, serde::Deserialize)]
struct ScenarioConfig {
    periods: Option<Vec<OnlinePeriod>>,
    baseline_probability: Option<f64>,
    round_duration_hours: Option<u32>,
    sample_size: Option<usize>,
    target_coverage: Option<f64>,
    population: Option<u64>,
}

fn main() -> Result<(), BoxError> {
    SimpleLogger::new().with_level(LevelFilter::Info).init()?;

    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: {} <scenario.yaml | directory/> [--seed SEED_HEX]", args[0]);
        eprintln!("\nExamples:");
        eprintln!("  {} scenarios/evening_peak.yaml", args[0]);
        eprintln!("  {} scenarios/", args[0]);
        eprintln!("  {} scenarios/evening_peak.yaml --seed 0x123456...", args[0]);
        std::process::exit(1);
    }

    let path = Path::new(&args[1]);

    let seed: Option<[u8; 32]> = if args.len() >= 4 && args[2] == "--seed" {
        Some(parse_seed_hex(&args[3])?)
    } else {
        None
    };

    if path.is_file() {
        run_scenario_file(path, seed)
    } else if path.is_dir() {
        run_scenario_directory(path, seed)
    } else {
        Err(format!("path does not exist: {}", path.display()).into())
    }
}

fn run_scenario_directory(dir: &Path, seed: Option<[u8; 32]>) -> Result<(), BoxError> {
    let mut scenarios = Vec::new();

    for entry in fs::read_dir(dir)?.flatten() {
        let path = entry.path();
        let extension = path.extension().and_then(|s| s.to_str());
        if extension == Some("yaml") || extension == Some("yml") {
            scenarios.push(path);
        }
    }

    scenarios.sort();

    if scenarios.is_empty() {
        return Err(format!("no .yaml files found in {}", dir.display()).into());
    }

    println!("\n╔════════════════════════════════════════════════════════╗");
    println!("║  SCENARIO RUNNER - Multiple Scenarios                 ║");
    println!("╚════════════════════════════════════════════════════════╝\n");
    println!("Found {} scenario(s) to run\n", scenarios.len());

    for (i, scenario_path) in scenarios.iter().enumerate() {
        println!("\n{}/{} Running: {}\n", i + 1, scenarios.len(), scenario_path.display());
        run_scenario_file(scenario_path, seed)?;
    }

    println!("\n╔════════════════════════════════════════════════════════╗");
    println!("║  All scenarios complete!                               ║");
    println!("╚════════════════════════════════════════════════════════╝\n");
    Ok(())
}

fn run_scenario_file(path: &Path, seed: Option<[u8; 32]>) -> Result<(), BoxError> {
    println!("Loading scenario from: {}", path.display());

    let yaml_content = fs::read_to_string(path)
        .map_err(|e| format!("failed to read {}: {}", path.display(), e))?;
    let scenario: ScenarioFile = serde_yaml::from_str(&yaml_content)
        .map_err(|e| format!("failed to parse {}: {}", path.display(), e))?;

    println!("\n╔════════════════════════════════════════════════════════╗");
    let name = scenario.meta.name.clone().unwrap_or_else(|| {
        path.file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("unnamed")
            .to_string()
    });
    println!("║  {}{}║", name, " ".repeat(54_usize.saturating_sub(name.len())));
    println!("╚════════════════════════════════════════════════════════╝\n");

    if let Some(ref desc) = scenario.meta.description {
        println!("{}\n", desc);
    }

    if let Some(ref hypothesis) = scenario.meta.hypothesis {
        println!("Hypothesis:");
        println!("  {}\n", hypothesis);
    }

    let config = build_config(scenario.config, seed);

    println!("Configuration:");
    for period in &config.periods {
        println!(
            "  Online {:02}:00-{:02}:00 at {:.0}%",
            period.start,
            period.end,
            period.probability * 100.0
        );
    }
    println!("  Baseline: {:.0}%", config.baseline_probability * 100.0);
    println!("  Round duration: {}h", config.round_duration_hours);
    println!("  Sample size: {}", config.sample_size);
    println!("\nEvaluating...\n");

    let mut engine = CoverageEngine::new(config)?;
    let output = engine.recompute();

    if scenario.show_rounds > 0 {
        output.print_rounds(scenario.show_rounds);
    }
    output.print_summary();

    println!("Seed: 0x{}", seed_hex(&engine.seed()));
    println!("\n✓ Scenario complete!\n");
    Ok(())
}

/// Apply scenario overrides to the engine defaults
fn build_config(overrides: ScenarioConfig, seed: Option<[u8; 32]>) -> EngineConfig {
    let mut config = EngineConfig::default();

    if let Some(v) = overrides.periods {
        config.periods = v;
    }
    if let Some(v) = overrides.baseline_probability {
        config.baseline_probability = v;
    }
    if let Some(v) = overrides.round_duration_hours {
        config.round_duration_hours = v;
    }
    if let Some(v) = overrides.sample_size {
        config.sample_size = v;
    }
    if let Some(v) = overrides.target_coverage {
        config.target_coverage = v;
    }
    if let Some(v) = overrides.population {
        config.population = v;
    }
    config.seed = seed;

    config
}

fn parse_seed_hex(hex: &str) -> Result<[u8; 32], BoxError> {
    let hex = hex.strip_prefix("0x").unwrap_or(hex);
    let mut seed = [0u8; 32];

    for (i, chunk) in hex.as_bytes().chunks(2).enumerate() {
        if i >= 32 {
            break;
        }
        let byte_str = std::str::from_utf8(chunk)?;
        seed[i] = u8::from_str_radix(byte_str, 16)
            .map_err(|e| format!("invalid hex seed: {}", e))?;
    }

    Ok(seed)
}

fn seed_hex(seed: &[u8; 32]) -> String {
    seed.iter().map(|b| format!("{:02x}", b)).collect()
}
