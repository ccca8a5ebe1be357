//! Check command implementation.
//!
//! Validates a configuration file without running anything.

use tracing::info;

use crate::{config, Result};

/// Run the check command.
pub fn run(config_path: Option<&str>) -> Result<()> {
    info!("simfolio {}", env!("CARGO_PKG_VERSION"));

    let Some(path) = config_path else {
        info!("No configuration supplied; nothing to validate");
        return Ok(());
    };

    let input = config::load_input(path)?;

    if let Some(section) = &input.simulation {
        let sim_config = section.to_config()?;
        info!(
            "[simulation] valid: {} paths over {} years",
            sim_config.n_simulations(),
            sim_config.time_horizon_years()
        );
    }

    if !input.factors.is_empty() || !input.assets.is_empty() {
        let table = config::build_factor_table(&input)?;
        info!(
            "factor portfolio valid: {} assets against {} factors",
            table.assets().len(),
            table.model().len()
        );
    }

    info!("Configuration OK: {}", path);
    Ok(())
}
