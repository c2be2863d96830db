use thiserror::Error;

pub type ChartResult<T> = Result<T, ChartError>;

/// API-misuse errors.
///
/// Malformed *data* never errors: lookups and aggregates degrade to gaps and
/// positional defaults. Only structurally invalid input documents and
/// descriptors are reported here.
#[derive(Debug, Error)]
pub enum ChartError {
    #[error("invalid data document: {0}")]
    InvalidDocument(String),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}
