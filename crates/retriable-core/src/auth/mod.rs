//! Authorization failure classification
//!
//! Every failure crossing the executor boundary may carry a status code. A
//! failure is an authorization failure when its status is one of the
//! configured unauthorized codes (401 by default); everything else is opaque
//! and passed through untouched.

mod classifier;
mod status;

pub use classifier::{AuthClassifier, ClosureClassifier, StatusCodeClassifier, UNAUTHORIZED};
pub use status::{HttpStatusError, StatusError};
