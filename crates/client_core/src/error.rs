use thiserror::Error;

/// Ways a recommendation query can fail after it has been issued.
///
/// A blank prompt is not represented here: submitting one is a silent no-op
/// and never reaches the request path.
#[derive(Debug, Error)]
pub enum QueryError {
    #[error("Request failed: {status}")]
    Status { status: u16 },
    #[error("{0}")]
    Transport(String),
    #[error("{0}")]
    Parse(String),
}
