use date_case_evolver::config::Config;
use date_case_evolver::evolution::EvolutionEngine;
use date_case_evolver::export::{RunReport, write_report_to_json, write_test_cases_to_csv};
use std::path::Path;
use std::process;

const DEFAULT_CONFIG_PATH: &str = "config.toml";

/// Loads the configuration named on the command line, or `config.toml`.
///
/// A missing default file is not an error: the built-in defaults are used.
/// A path given explicitly must exist.
fn load_config() -> Result<Config, String> {
    let explicit = std::env::args().nth(1);
    let path_str = explicit.as_deref().unwrap_or(DEFAULT_CONFIG_PATH);
    let path = Path::new(path_str);

    if explicit.is_none() && !path.exists() {
        log::info!("No '{}' found, using default parameters.", path_str);
        return Ok(Config::default());
    }

    log::info!("Loading configuration from '{}'...", path_str);
    Config::load(path).map_err(|e| e.to_string())
}

fn main() {
    env_logger::init();
    log::info!("Booting date case evolver...");

    // 1. Load and Validate Configuration
    let config = match load_config() {
        Ok(c) => c,
        Err(e) => {
            log::error!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };

    if let Err(e) = config.validate() {
        log::error!("{}", e);
        process::exit(1);
    }
    log::info!("Configuration loaded and validated.");

    // 2. Run the Evolution
    log::info!("--- Starting Evolution ---");
    let mut engine = EvolutionEngine::new(&config.ga);
    let outcome = engine.evolve();
    log::info!(
        "--- Evolution Complete: {} test cases after {} generations (coverage {:.2}) ---",
        outcome.population.len(),
        outcome.generations,
        outcome.coverage.coverage
    );

    // 3. Export
    let csv_path = Path::new(&config.output.csv_path);
    if let Err(e) = write_test_cases_to_csv(&outcome.population, csv_path) {
        log::error!(
            "Failed to save test cases to '{}': {}",
            config.output.csv_path,
            e
        );
        process::exit(1);
    }
    log::info!("Test cases saved successfully to '{}'!", config.output.csv_path);

    if let Some(report_path) = &config.output.report_path {
        let report = RunReport::new(&outcome, &config.ga);
        if let Err(e) = write_report_to_json(&report, Path::new(report_path)) {
            log::error!("Failed to write run report to '{}': {}", report_path, e);
            process::exit(1);
        }
        log::info!("Run report written to '{}'.", report_path);
    }
}
