use thiserror::Error;

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("invalid regex '{pattern}': {reason}")]
    InvalidRegex { pattern: String, reason: String },

    #[error("invalid address or network '{0}'")]
    InvalidAddress(String),

    #[error("failed to read list file {path}: {source}")]
    ListFile {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid syslog severity '{0}'")]
    InvalidSeverity(String),

    #[error("invalid syslog facility '{0}'")]
    InvalidFacility(String),

    #[error("invalid syslog transport '{0}'")]
    InvalidTransport(String),

    #[error("ingest socket error: {0}")]
    Ingest(#[from] std::io::Error),
}
