//! End-to-end properties of the simulation engine.

use approx::assert_relative_eq;
use sim_engine::{run_simulation, SampleMode, SimulationConfig};

fn config_100k() -> SimulationConfig {
    SimulationConfig::builder()
        .n_simulations(100_000)
        .expected_annual_return(0.12)
        .annual_volatility(0.18)
        .time_horizon_years(1)
        .initial_portfolio_value(1_000_000.0)
        .batch_size(100_000)
        .seed(42)
        .build()
        .unwrap()
}

#[test]
fn median_tracks_expected_growth_for_one_year_horizon() {
    let summary = run_simulation(&config_100k()).unwrap();

    // Median of Normal(0.12, 0.18) is 0.12, so the median final value
    // should sit near 1_000_000 × 1.12. Standard error of the sample
    // median ≈ 1.2533 σ/√n ≈ 713; allow seven standard errors.
    let expected = 1_000_000.0 * 1.12;
    assert!(
        (summary.median_final_value - expected).abs() < 5_000.0,
        "median = {}",
        summary.median_final_value
    );
}

#[test]
fn percentiles_are_non_decreasing_in_rank() {
    let summary = run_simulation(&config_100k()).unwrap();
    for pair in summary.percentiles.windows(2) {
        assert!(pair[0].level < pair[1].level);
        assert!(pair[0].horizon_return <= pair[1].horizon_return);
        assert!(pair[0].final_value <= pair[1].final_value);
    }
}

#[test]
fn outcome_probabilities_are_a_partition() {
    let summary = run_simulation(&config_100k()).unwrap();
    let total = summary.probability_of_profit
        + summary.probability_of_loss
        + summary.probability_of_breakeven();
    assert_relative_eq!(total, 1.0, epsilon = 1e-12);
    assert!(summary.probability_of_profit + summary.probability_of_loss <= 1.0);
}

#[test]
fn repeated_runs_with_same_seed_are_identical() {
    let config = config_100k();
    let a = run_simulation(&config).unwrap();
    let b = run_simulation(&config).unwrap();
    assert_eq!(a, b);
}

#[test]
fn batch_size_is_a_pure_memory_knob() {
    let summaries: Vec<_> = [100_000usize, 10_000, 7_919]
        .into_iter()
        .map(|batch_size| {
            let config = SimulationConfig::builder()
                .n_simulations(100_000)
                .expected_annual_return(0.12)
                .annual_volatility(0.18)
                .time_horizon_years(1)
                .initial_portfolio_value(1_000_000.0)
                .batch_size(batch_size)
                .seed(42)
                .build()
                .unwrap();
            run_simulation(&config).unwrap()
        })
        .collect();

    // Per-path RNG streams make the sampled multiset independent of the
    // batch layout: percentiles and outcome counts match exactly, and the
    // moment sums agree up to floating-point association order.
    for other in &summaries[1..] {
        assert_eq!(summaries[0].percentiles, other.percentiles);
        assert_eq!(summaries[0].probability_of_profit, other.probability_of_profit);
        assert_eq!(summaries[0].probability_of_loss, other.probability_of_loss);
        assert_eq!(summaries[0].clamped_paths, other.clamped_paths);
        assert_eq!(summaries[0].min_final_value, other.min_final_value);
        assert_eq!(summaries[0].max_final_value, other.max_final_value);
        assert_relative_eq!(summaries[0].mean_return, other.mean_return, epsilon = 1e-12);
        assert_relative_eq!(
            summaries[0].std_dev_return,
            other.std_dev_return,
            epsilon = 1e-12
        );
    }
}

#[test]
fn higher_expected_return_raises_the_median() {
    let run = |expected_annual_return: f64| {
        let config = SimulationConfig::builder()
            .n_simulations(50_000)
            .expected_annual_return(expected_annual_return)
            .annual_volatility(0.18)
            .time_horizon_years(5)
            .initial_portfolio_value(1_000_000.0)
            .seed(42)
            .build()
            .unwrap();
        run_simulation(&config).unwrap().median_final_value
    };

    let low = run(0.04);
    let mid = run(0.08);
    let high = run(0.12);
    assert!(low < mid && mid < high, "{} {} {}", low, mid, high);
}

#[test]
fn reservoir_percentiles_approximate_exact_percentiles() {
    let build = |mode: SampleMode| {
        SimulationConfig::builder()
            .n_simulations(100_000)
            .expected_annual_return(0.10)
            .annual_volatility(0.20)
            .time_horizon_years(1)
            .initial_portfolio_value(1_000_000.0)
            .seed(42)
            .sample_mode(mode)
            .build()
            .unwrap()
    };

    let exact = run_simulation(&build(SampleMode::Exact)).unwrap();
    let approx = run_simulation(&build(SampleMode::Reservoir { capacity: 20_000 })).unwrap();

    // Scalar statistics come from the exact moment fold either way.
    assert_eq!(exact.mean_return, approx.mean_return);
    assert_eq!(exact.probability_of_loss, approx.probability_of_loss);

    // Percentiles carry O(1/√capacity) sampling error.
    for (e, a) in exact.percentiles.iter().zip(&approx.percentiles) {
        assert_eq!(e.level, a.level);
        assert!(
            (e.horizon_return - a.horizon_return).abs() < 0.02,
            "P{}: exact {} vs reservoir {}",
            e.level,
            e.horizon_return,
            a.horizon_return
        );
    }
}

#[test]
fn clamped_paths_surface_in_the_summary() {
    // Violent configuration: most annual draws land below −100%.
    let config = SimulationConfig::builder()
        .n_simulations(1_000)
        .expected_annual_return(-1.5)
        .annual_volatility(0.10)
        .time_horizon_years(2)
        .initial_portfolio_value(10_000.0)
        .seed(5)
        .build()
        .unwrap();

    let summary = run_simulation(&config).unwrap();
    assert!(summary.clamped_paths > 0);
    assert!(summary.min_final_value >= 0.0);
}

#[test]
fn zero_volatility_run_is_fully_deterministic() {
    let config = SimulationConfig::builder()
        .n_simulations(1_000)
        .expected_annual_return(0.07)
        .annual_volatility(0.0)
        .time_horizon_years(10)
        .initial_portfolio_value(100_000.0)
        .seed(1)
        .build()
        .unwrap();

    let summary = run_simulation(&config).unwrap();
    let expected = 100_000.0 * 1.07f64.powi(10);
    assert_relative_eq!(summary.mean_final_value, expected, max_relative = 1e-9);
    assert_relative_eq!(summary.min_final_value, expected, max_relative = 1e-9);
    assert_relative_eq!(summary.max_final_value, expected, max_relative = 1e-9);
    assert_eq!(summary.probability_of_loss, 0.0);
    assert_eq!(summary.probability_of_profit, 1.0);
}
