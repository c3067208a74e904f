use thiserror::Error;

/// Error types for the Omada API client.
///
/// Only two kinds are recoverable at the poll boundary: [`CannotConnect`]
/// should be retried on the next scheduled poll, while [`LoginError`] means
/// the credentials or session token were rejected and the caller must
/// re-authenticate before polling again.
///
/// [`CannotConnect`]: OmadaError::CannotConnect
/// [`LoginError`]: OmadaError::LoginError
#[derive(Error, Debug)]
pub enum OmadaError {
    /// Could not reach the controller, or its response could not be decoded.
    #[error("Cannot connect to controller: {0}")]
    CannotConnect(String),

    /// The controller rejected the credentials or the session token.
    #[error("Login failed: {0}")]
    LoginError(String),

    /// Invalid client configuration.
    #[error("Invalid configuration: {0}")]
    ConfigurationError(String),
}

/// Result type for Omada API operations.
pub type OmadaResult<T> = Result<T, OmadaError>;
