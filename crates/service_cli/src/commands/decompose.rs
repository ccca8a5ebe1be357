//! Decompose command implementation.
//!
//! Loads the factor portfolio tables, runs the risk decomposer, and emits
//! the factor contribution CSV plus a Markdown report (or JSON to stdout).

use std::path::Path;

use sim_risk::decompose_risk;
use tracing::info;

use crate::{config, report, CliError, Result};

/// Run the decompose command.
pub fn run(portfolio_path: &str, output_dir: &str, format: &str) -> Result<()> {
    info!("Decomposing portfolio risk...");
    info!("  Portfolio: {}", portfolio_path);

    let input = config::load_input(portfolio_path)?;
    let table = config::build_factor_table(&input)?;
    info!("  Assets: {}", table.assets().len());
    info!("  Factors: {}", table.model().len());

    let decomposition = decompose_risk(&table)?;

    info!(
        "Total volatility {:.2}% (systematic {:.2}%, idiosyncratic {:.2}%)",
        decomposition.total_volatility * 100.0,
        decomposition.systematic_volatility * 100.0,
        decomposition.idiosyncratic_volatility * 100.0
    );

    match format {
        "json" => println!("{}", serde_json::to_string_pretty(&decomposition)?),
        "files" => {
            std::fs::create_dir_all(output_dir)?;
            let dir = Path::new(output_dir);
            let label = config::portfolio_label(&input);

            let factors = dir.join("factor_contributions.csv");
            report::write_factor_csv(&factors, &decomposition)?;
            info!("Wrote {}", factors.display());

            let markdown = dir.join("risk_report.md");
            report::write_risk_markdown(&markdown, &decomposition, label)?;
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
