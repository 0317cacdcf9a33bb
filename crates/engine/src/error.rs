//! The module contains the errors the engine can return.
//!
//! The errors are:
//!
//! - [`NetworkFailure`] returned when the request collaborator could not
//!   complete a request.
//! - [`NotFound`] returned when the API has no data for the requested key.
//! - [`InvalidRequest`] returned when a request is rejected before or by
//!   the API (empty employee id, page out of range).
//!
//!  [`NetworkFailure`]: EngineError::NetworkFailure
//!  [`NotFound`]: EngineError::NotFound
//!  [`InvalidRequest`]: EngineError::InvalidRequest
use thiserror::Error;

/// Engine custom errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("Network failure: {0}")]
    NetworkFailure(String),
    #[error("\"{0}\" not found!")]
    NotFound(String),
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
    #[error("No request collaborator configured")]
    MissingApi,
}
