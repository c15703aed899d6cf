use aircraft_shared::ConfigError;
use thiserror::Error;

/// Orchestration errors. Any of these means the caller drove the agent wrong;
/// they are surfaced, never recovered from.
#[derive(Debug, Error, PartialEq)]
pub enum AgentError {
    #[error("freeze is not supported in training mode")]
    FreezeInTraining,
    #[error("thaw is not supported in training mode")]
    ThawInTraining,
    #[error("cannot thaw while the explosion sequence is running")]
    ExplosionInProgress,
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
}
