use thiserror::Error;

/// Error taxonomy for the incident-graph pipeline (see spec §7).
///
/// `MalformedRecord` deliberately has no variant here: the loader swallows
/// bad JSON lines rather than surfacing them as errors.
#[derive(Error, Debug)]
pub enum ThreatGraphError {
    #[error("input not found: {0}")]
    InputMissing(String),

    #[error("{0}")]
    EmptyResult(String),

    #[error("invalid --start-ts value: {0}")]
    InvalidStartTime(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ThreatGraphError>;
