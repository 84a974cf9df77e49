use thiserror::Error;

/// A lookup response that could not be turned into complete records.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("invalid json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("{record} item {index}: {reason}")]
    InvalidRecord {
        record: &'static str,
        index: usize,
        reason: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    #[error("unsupported motor type '{0}'")]
    UnsupportedMotorType(String),
    #[error("vehicle {vehicle_id} is missing {field}")]
    MissingField {
        vehicle_id: String,
        field: &'static str,
    },
}
