use thiserror::Error;

/// Errors raised while turning a task file or command line flags into a run configuration
#[derive(Debug, Error)]
pub enum TaskError {
    #[error("unknown integrand '{0}', available: {1}")]
    UnknownIntegrand(String, String),

    #[error("unknown preset '{0}'")]
    UnknownPreset(String),

    #[error("invalid partition list '{0}': expected comma separated integers")]
    InvalidPartitionList(String),

    #[error("interval bounds must be finite, got [{0}, {1}]")]
    InvalidInterval(f64, f64),

    #[error("task document could not be parsed: {0}")]
    MalformedDocument(String),

    #[error("'{section}.{key}' must be {expected}")]
    InvalidValue {
        section: String,
        key: String,
        expected: &'static str,
    },

    #[error("invalid loglevel: {0}")]
    InvalidLogLevel(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
