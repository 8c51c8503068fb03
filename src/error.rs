//! Standard errors used by all functions in the crate.

use std::fmt;

/// Error collecting all possible failures of the RazorpayX client.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// Reqwest error.
    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),
    /// Error returned by a RazorpayX API endpoint.
    #[error("{0}")]
    ApiError(#[from] ApiError),
    /// Catch-all variant for unexpected errors.
    #[error(transparent)]
    Other(anyhow::Error),
}

impl From<reqwest_middleware::Error> for Error {
    fn from(e: reqwest_middleware::Error) -> Self {
        match e {
            reqwest_middleware::Error::Reqwest(e) => Error::HttpError(e),
            reqwest_middleware::Error::Middleware(e) => {
                e.downcast::<Error>().unwrap_or_else(Error::Other)
            }
        }
    }
}

impl From<Error> for reqwest_middleware::Error {
    fn from(e: Error) -> Self {
        reqwest_middleware::Error::Middleware(e.into())
    }
}

/// RazorpayX HTTP APIs error.
///
/// Mirrors the error body returned by the server:
/// `{"error": {"code", "description", "source", "step", "reason", "field"}}`.
#[derive(Debug)]
pub struct ApiError {
    /// HTTP status returned by the server.
    pub status: u16,
    /// A coarse identifier for this class of error, e.g. `BAD_REQUEST_ERROR`.
    pub code: String,
    /// A human readable explanation specific to this occurrence of the problem.
    pub description: Option<String>,
    /// Which system raised the error, e.g. `business` or `internal`.
    pub source: Option<String>,
    /// The payout processing step in which the error was raised.
    pub step: Option<String>,
    /// A machine readable reason for the failure.
    pub reason: Option<String>,
    /// The request field that failed validation, if any.
    pub field: Option<String>,
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RazorpayX HTTP error {}: {}", self.status, self.code)?;

        if let Some(ref description) = self.description {
            write!(f, "\nAdditional details: {}", description)?;
        }

        if let Some(ref field) = self.field {
            write!(f, "\nOffending field: {}", field)?;
        }

        if let Some(ref reason) = self.reason {
            write!(f, "\nReason: {}", reason)?;
        }

        Ok(())
    }
}

impl std::error::Error for ApiError {}
