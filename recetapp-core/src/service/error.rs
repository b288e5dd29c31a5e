use thiserror::Error;

/// Errors from the remote recipe service.
#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Service returned status {status} for {endpoint}")]
    Status {
        endpoint: &'static str,
        status: reqwest::StatusCode,
    },

    #[error("Invalid response from {endpoint}: {message}")]
    Decode {
        endpoint: &'static str,
        message: String,
    },
}
