//! Classifiers deciding which failures escalate

use super::status::HttpStatusError;

/// The "unauthorized" sentinel status
pub const UNAUTHORIZED: u16 = 401;

/// Decides whether a failure is an authorization failure
///
/// Authorization failures drive the escalation ladder; every other failure
/// is opaque and settles the invocation immediately.
///
/// # Example
///
/// ```rust
/// use retriable_core::auth::AuthClassifier;
/// use std::io::{Error, ErrorKind};
///
/// struct PermissionDenied;
///
/// impl AuthClassifier<Error> for PermissionDenied {
///     fn is_unauthorized(&self, error: &Error) -> bool {
///         error.kind() == ErrorKind::PermissionDenied
///     }
/// }
/// ```
pub trait AuthClassifier<E: ?Sized>: Send + Sync {
    /// Whether the given failure should trigger session renewal
    fn is_unauthorized(&self, error: &E) -> bool;
}

/// Classifies by status code
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusCodeClassifier {
    /// Status codes treated as authorization failures
    codes: Vec<u16>,
}

impl Default for StatusCodeClassifier {
    fn default() -> Self {
        Self {
            codes: vec![UNAUTHORIZED],
        }
    }
}

impl StatusCodeClassifier {
    /// Create a classifier with custom unauthorized status codes
    pub fn with_codes(codes: Vec<u16>) -> Self {
        Self { codes }
    }

    /// Check if a status code is an authorization failure
    pub fn is_unauthorized_code(&self, code: u16) -> bool {
        self.codes.contains(&code)
    }

    /// The configured codes
    pub fn codes(&self) -> &[u16] {
        &self.codes
    }
}

impl<E: HttpStatusError + ?Sized> AuthClassifier<E> for StatusCodeClassifier {
    fn is_unauthorized(&self, error: &E) -> bool {
        error
            .status_code()
            .map(|code| self.is_unauthorized_code(code))
            .unwrap_or(false)
    }
}

/// A classifier backed by a closure
pub struct ClosureClassifier<F> {
    classify: F,
}

impl<F> ClosureClassifier<F> {
    /// Create a new closure-based classifier
    pub fn new(classify: F) -> Self {
        Self { classify }
    }
}

impl<E, F> AuthClassifier<E> for ClosureClassifier<F>
where
    F: Fn(&E) -> bool + Send + Sync,
{
    fn is_unauthorized(&self, error: &E) -> bool {
        (self.classify)(error)
    }
}

impl<E: ?Sized, T: AuthClassifier<E> + ?Sized> AuthClassifier<E> for std::sync::Arc<T> {
    fn is_unauthorized(&self, error: &E) -> bool {
        (**self).is_unauthorized(error)
    }
}
