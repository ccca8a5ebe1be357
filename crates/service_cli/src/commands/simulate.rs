//! Simulate command implementation.
//!
//! Loads the `[simulation]` section, runs the kernel, and emits the
//! percentile/metrics CSVs plus a Markdown report (or JSON to stdout).

use std::path::Path;

use sim_engine::run_simulation;
use tracing::info;

use crate::{config, report, CliError, Result};

/// Run the simulate command.
pub fn run(config_path: &str, output_dir: &str, format: &str) -> Result<()> {
    info!("Running Monte Carlo simulation...");
    info!("  Config: {}", config_path);

    let input = config::load_input(config_path)?;
    let section = input
        .simulation
        .as_ref()
        .ok_or(CliError::MissingSection("simulation"))?;
    let sim_config = section.to_config()?;

    info!("  Simulations: {}", sim_config.n_simulations());
    info!("  Batch size: {}", sim_config.batch_size());
    info!("  Horizon: {} years", sim_config.time_horizon_years());

    let summary = run_simulation(&sim_config)?;

    info!(
        "Simulation complete: median final value {:.2}",
        summary.median_final_value
    );
    info!(
        "  P(profit) = {:.2}%, P(loss) = {:.2}%",
        summary.probability_of_profit * 100.0,
        summary.probability_of_loss * 100.0
    );

    match format {
        "json" => println!("{}", serde_json::to_string_pretty(&summary)?),
        "files" => {
            std::fs::create_dir_all(output_dir)?;
            let dir = Path::new(output_dir);
            let label = config::portfolio_label(&input);

            let percentiles = dir.join("percentiles.csv");
            report::write_percentile_csv(&percentiles, &summary)?;
            info!("Wrote {}", percentiles.display());

            let metrics = dir.join("metrics.csv");
            report::write_metrics_csv(&metrics, &summary)?;
            info!("Wrote {}", metrics.display());

            let markdown = dir.join("simulation_report.md");
            report::write_simulation_markdown(&markdown, &summary, label)?;
            info!("Wrote {}", markdown.display());
        }
        other => {
            return Err(CliError::InvalidArgument(format!(
                "unknown format: {other}. Supported: files, json"
            )));
        }
    }

    Ok(())
}
