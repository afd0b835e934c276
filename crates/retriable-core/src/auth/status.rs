//! Status-carrying errors

use thiserror::Error;

/// A trait for errors that contain HTTP status information
///
/// This is the only thing the executor ever inspects on a failure.
pub trait HttpStatusError {
    /// Get the HTTP status code if available
    fn status_code(&self) -> Option<u16>;
}

/// A plain error value with an optional status classifier
///
/// Useful as the shared error type for a workflow and its session service
/// when no richer error type exists.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct StatusError {
    /// Status classifier, e.g. 401 or 405
    pub status: Option<u16>,
    /// Human readable message
    pub message: String,
}

impl StatusError {
    /// Create an error without a status classifier
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            status: None,
            message: message.into(),
        }
    }

    /// Create an error with the given status classifier
    pub fn with_status(status: u16, message: impl Into<String>) -> Self {
        Self {
            status: Some(status),
            message: message.into(),
        }
    }

    /// Create a 401 error
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::with_status(401, message)
    }
}

impl HttpStatusError for StatusError {
    fn status_code(&self) -> Option<u16> {
        self.status
    }
}

impl<T: HttpStatusError + ?Sized> HttpStatusError for &T {
    fn status_code(&self) -> Option<u16> {
        (**self).status_code()
    }
}

impl<T: HttpStatusError + ?Sized> HttpStatusError for Box<T> {
    fn status_code(&self) -> Option<u16> {
        (**self).status_code()
    }
}

/// Walks the cause chain and reports the first `StatusError` status found
impl HttpStatusError for anyhow::Error {
    fn status_code(&self) -> Option<u16> {
        self.chain()
            .find_map(|cause| cause.downcast_ref::<StatusError>())
            .and_then(|err| err.status)
    }
}

#[cfg(feature = "reqwest")]
impl HttpStatusError for reqwest::Error {
    fn status_code(&self) -> Option<u16> {
        self.status().map(|status| status.as_u16())
    }
}
