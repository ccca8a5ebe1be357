//! CLI error type.

/// Result alias used throughout the CLI.
pub type Result<T> = std::result::Result<T, CliError>;

/// Errors surfaced by the `simfolio` binary.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Input file does not exist.
    #[error("file not found: {0}")]
    FileNotFound(String),

    /// A command-line argument was rejected.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The configuration file lacks a required section.
    #[error("missing [{0}] section in configuration file")]
    MissingSection(&'static str),

    /// The configuration file failed to parse.
    #[error("configuration parse error: {0}")]
    Parse(#[from] toml::de::Error),

    /// Simulation parameters failed validation.
    #[error("configuration error: {0}")]
    Config(#[from] sim_engine::mc::ConfigError),

    /// The simulation kernel failed.
    #[error("simulation error: {0}")]
    Simulation(#[from] sim_engine::SimulationError),

    /// The risk kernel rejected the factor table.
    #[error("factor table error: {0}")]
    FactorTable(#[from] sim_risk::FactorTableError),

    /// JSON serialisation failed.
    #[error("serialisation error: {0}")]
    Json(#[from] serde_json::Error),

    /// CSV writing failed.
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    /// Underlying I/O failure.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
