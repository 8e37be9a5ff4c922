use thiserror::Error;

/// Errors surfaced by loaders and the scenario runner.
///
/// The resolution path itself never returns an error: malformed
/// configuration degrades to "no mitigation applies" with a warning.
#[derive(Error, Debug)]
pub enum WardError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("Invalid registry content: {0}")]
    Registry(String),

    #[error("Invalid scenario: {0}")]
    Scenario(String),
}

pub type Result<T> = std::result::Result<T, WardError>;
