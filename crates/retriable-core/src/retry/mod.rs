//! Authenticated retry execution
//!
//! This module wraps an async workflow so that authorization failures are
//! recovered transparently. One call of the wrapped workflow runs a
//! fixed-depth escalation ladder:
//!
//! 1. Pre-flight login prompt (a failure cancels before the workflow runs)
//! 2. First attempt
//! 3. Silent `renew()` and a second attempt
//! 4. Notification hook, `logout()`, login prompt, `renew()` and a final attempt
//!
//! Only failures the classifier marks as unauthorized move down the ladder.
//! Every other failure is returned unchanged.
//!
//! # Example
//!
//! ```rust,no_run
//! use retriable_core::retry::ReauthExecutorBuilder;
//! use retriable_core::{SessionService, StatusError};
//!
//! async fn example<S: SessionService<StatusError>>(session: S) -> Result<String, StatusError> {
//!     let executor = ReauthExecutorBuilder::new(session).build();
//!     let fetch = executor.make_retriable(|id: u64| async move {
//!         // Your authenticated request here
//!         Ok(format!("record {}", id))
//!     });
//!
//!     fetch.call(42).await
//! }
//! ```

mod executor;
mod ladder;
mod observer;

pub use executor::{retry_with_session, ReauthExecutor, ReauthExecutorBuilder, Retriable};
pub use ladder::{Escalation, Rung, Stage, MAX_ATTEMPTS};
pub use observer::{NoOpObserver, ReauthObserver, StatsObserver, TracingObserver};
