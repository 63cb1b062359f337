use log::{info, LevelFilter};
use pc_rust::{CoverageEngine, EngineConfig};
use simple_logger::SimpleLogger;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    SimpleLogger::new().with_level(LevelFilter::Info).init()?;

    info!("starting");

    let config = EngineConfig::default();
    let mut engine = CoverageEngine::new(config)?;

    let output = engine.recompute();
    output.print_rounds(10);
    output.print_summary();

    // same profile with the 20% off-peak floor of the early calculator
    engine.set_baseline(0.2)?;
    let output = engine.recompute();
    output.print_summary();

    info!("let seed = {:?};", engine.seed());
    Ok(())
}
