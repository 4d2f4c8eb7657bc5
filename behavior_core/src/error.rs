//! Error types for sessions, results, and configuration.

use scenario_graph::ScenarioError;
use thiserror::Error;

/// Failure to derive a report from a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ResultsError {
    /// No transitions were recorded, so there is no timing data to average.
    #[error("no timing data: the session recorded no choices")]
    EmptySession,
}

/// Failure to load or validate a `ProfileConfig`.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to parse profile config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("failed to read profile config: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid profile config: {reason}")]
    Invalid { reason: String },
}

/// Any error the engine reports to a presentation layer.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error(transparent)]
    Scenario(#[from] ScenarioError),

    #[error(transparent)]
    Results(#[from] ResultsError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl EngineError {
    /// Whether the user can recover by restarting the session.
    ///
    /// Load and configuration failures cannot be fixed by the user.
    pub fn is_recoverable(&self) -> bool {
        match self {
            EngineError::Scenario(e) => !e.is_load_error(),
            EngineError::Results(_) => true,
            EngineError::Config(_) => false,
        }
    }
}
