//! Report emission: percentile/factor CSV artifacts and Markdown
//! summaries rendered from kernel outputs.
//!
//! All formatting lives here; the kernel crates expose plain fields only.

use std::path::Path;

use chrono::Local;
use sim_engine::SimulationSummary;
use sim_risk::RiskDecomposition;

use crate::error::Result;

fn pct(fraction: f64) -> String {
    format!("{:.2}%", fraction * 100.0)
}

fn money(value: f64) -> String {
    format!("{value:.2}")
}

/// Writes the percentile table as CSV
/// (`Percentile, Return, Final Value, Gain/Loss`).
pub fn write_percentile_csv(path: &Path, summary: &SimulationSummary) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(["Percentile", "Return", "Final Value", "Gain/Loss"])?;
    for row in &summary.percentiles {
        writer.write_record([
            format!("{}%", row.level),
            format!("{:.6}", row.horizon_return),
            money(row.final_value),
            money(row.gain_loss(summary.initial_portfolio_value)),
        ])?;
    }
    writer.flush()?;
    Ok(())
}

/// Writes the scalar summary statistics as CSV (`Metric, Value`).
pub fn write_metrics_csv(path: &Path, summary: &SimulationSummary) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(["Metric", "Value"])?;

    let rows: Vec<(&str, String)> = vec![
        ("n_simulations", summary.n_simulations.to_string()),
        ("mean_return", format!("{:.6}", summary.mean_return)),
        ("median_return", format!("{:.6}", summary.median_return)),
        ("std_dev_return", format!("{:.6}", summary.std_dev_return)),
        ("skewness", format!("{:.6}", summary.skewness)),
        ("excess_kurtosis", format!("{:.6}", summary.excess_kurtosis)),
        ("sharpe_ratio", format!("{:.6}", summary.sharpe_ratio)),
        ("var_95", format!("{:.6}", summary.var_95)),
        ("var_99", format!("{:.6}", summary.var_99)),
        ("probability_of_profit", format!("{:.6}", summary.probability_of_profit)),
        ("probability_of_loss", format!("{:.6}", summary.probability_of_loss)),
        ("mean_final_value", money(summary.mean_final_value)),
        ("median_final_value", money(summary.median_final_value)),
        ("std_dev_final_value", money(summary.std_dev_final_value)),
        ("min_final_value", money(summary.min_final_value)),
        ("max_final_value", money(summary.max_final_value)),
        ("clamped_paths", summary.clamped_paths.to_string()),
    ];
    for (metric, value) in rows {
        writer.write_record([metric, value.as_str()])?;
    }
    writer.flush()?;
    Ok(())
}

/// Writes the Markdown simulation report.
pub fn write_simulation_markdown(
    path: &Path,
    summary: &SimulationSummary,
    label: &str,
) -> Result<()> {
    let mut out = String::new();
    out.push_str("# Monte Carlo Simulation Report\n\n");
    out.push_str(&format!("- Portfolio: {label}\n"));
    out.push_str(&format!(
        "- Generated: {}\n",
        Local::now().format("%Y-%m-%d %H:%M:%S")
    ));
    out.push_str(&format!("- Simulations: {}\n", summary.n_simulations));
    out.push_str(&format!(
        "- Initial value: {}\n\n",
        money(summary.initial_portfolio_value)
    ));

    out.push_str("## Return Statistics\n\n");
    out.push_str(&format!("- Mean return: {}\n", pct(summary.mean_return)));
    out.push_str(&format!("- Median return: {}\n", pct(summary.median_return)));
    out.push_str(&format!("- Std deviation: {}\n", pct(summary.std_dev_return)));
    out.push_str(&format!("- Sharpe ratio: {:.3}\n", summary.sharpe_ratio));
    out.push_str(&format!("- Skewness: {:.3}\n", summary.skewness));
    out.push_str(&format!("- Excess kurtosis: {:.3}\n\n", summary.excess_kurtosis));

    out.push_str("## Value at Risk\n\n");
    out.push_str(&format!("- 95% VaR: {}\n", pct(summary.var_95)));
    out.push_str(&format!("- 99% VaR: {}\n\n", pct(summary.var_99)));

    out.push_str("## Outcome Probabilities\n\n");
    out.push_str(&format!(
        "- Probability of profit: {}\n",
        pct(summary.probability_of_profit)
    ));
    out.push_str(&format!(
        "- Probability of loss: {}\n",
        pct(summary.probability_of_loss)
    ));
    for entry in &summary.loss_beyond {
        out.push_str(&format!(
            "- Loss beyond {}: {}\n",
            pct(entry.threshold),
            pct(entry.probability)
        ));
    }
    for entry in &summary.profit_beyond {
        out.push_str(&format!(
            "- Profit beyond {}: {}\n",
            pct(entry.threshold),
            pct(entry.probability)
        ));
    }
    out.push('\n');

    out.push_str("## Percentile Table\n\n");
    out.push_str("| Percentile | Return | Final Value | Gain/Loss |\n");
    out.push_str("|---|---|---|---|\n");
    for row in &summary.percentiles {
        out.push_str(&format!(
            "| P{} | {} | {} | {} |\n",
            row.level,
            pct(row.horizon_return),
            money(row.final_value),
            money(row.gain_loss(summary.initial_portfolio_value)),
        ));
    }

    if summary.clamped_paths > 0 {
        out.push_str(&format!(
            "\nNote: {} path(s) had an annual return floored at -100%.\n",
            summary.clamped_paths
        ));
    }

    std::fs::write(path, out)?;
    Ok(())
}

/// Writes the factor contribution table as CSV
/// (`Factor, Class, Beta, Variance, Share of Total`).
pub fn write_factor_csv(path: &Path, decomposition: &RiskDecomposition) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(["Factor", "Class", "Beta", "Variance", "Share of Total"])?;
    for contribution in &decomposition.factor_contributions {
        writer.write_record([
            contribution.factor.clone(),
            contribution.class.name().to_string(),
            format!("{:.4}", contribution.portfolio_beta),
            format!("{:.6}", contribution.variance),
            format!("{:.6}", contribution.share_of_total),
        ])?;
    }
    writer.flush()?;
    Ok(())
}

/// Writes the Markdown risk decomposition report.
pub fn write_risk_markdown(
    path: &Path,
    decomposition: &RiskDecomposition,
    label: &str,
) -> Result<()> {
    let mut out = String::new();
    out.push_str("# Factor Risk Decomposition Report\n\n");
    out.push_str(&format!("- Portfolio: {label}\n"));
    out.push_str(&format!(
        "- Generated: {}\n\n",
        Local::now().format("%Y-%m-%d %H:%M:%S")
    ));

    out.push_str("## Risk Split\n\n");
    out.push_str(&format!(
        "- Total volatility: {}\n",
        pct(decomposition.total_volatility)
    ));
    out.push_str(&format!(
        "- Systematic: {} ({} of variance)\n",
        pct(decomposition.systematic_volatility),
        pct(decomposition.systematic_share())
    ));
    out.push_str(&format!(
        "- Idiosyncratic: {} ({} of variance)\n",
        pct(decomposition.idiosyncratic_volatility),
        pct(decomposition.idiosyncratic_share())
    ));
    out.push_str(&format!(
        "- Diversification benefit: {}\n\n",
        pct(decomposition.diversification_benefit)
    ));

    out.push_str("## Factor Contributions\n\n");
    out.push_str("| Factor | Class | Beta | Share of Variance |\n");
    out.push_str("|---|---|---|---|\n");
    let mut sorted = decomposition.factor_contributions.clone();
    sorted.sort_by(|a, b| {
        b.variance
            .partial_cmp(&a.variance)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    for contribution in &sorted {
        out.push_str(&format!(
            "| {} | {} | {:.2} | {} |\n",
            contribution.factor,
            contribution.class.name(),
            contribution.portfolio_beta,
            pct(contribution.share_of_total),
        ));
    }
    out.push('\n');

    out.push_str("## Class Rollup\n\n");
    out.push_str("| Class | Share of Variance |\n");
    out.push_str("|---|---|\n");
    for class in &decomposition.class_contributions {
        out.push_str(&format!(
            "| {} | {} |\n",
            class.class.name(),
            pct(class.share_of_total)
        ));
    }
    out.push('\n');

    out.push_str("## Standalone Asset Risk\n\n");
    out.push_str("| Asset | Weight | Systematic Vol | Idiosyncratic Vol | Total Vol |\n");
    out.push_str("|---|---|---|---|---|\n");
    for asset in &decomposition.asset_contributions {
        out.push_str(&format!(
            "| {} | {} | {} | {} | {} |\n",
            asset.asset_id,
            pct(asset.weight),
            pct(asset.systematic_volatility()),
            pct(asset.idiosyncratic_volatility()),
            pct(asset.total_volatility()),
        ));
    }

    std::fs::write(path, out)?;
    Ok(())
}
