//! # retriable-core
//!
//! Authenticated retry execution for session-backed workflows:
//! - Escalation ladder: pre-flight login prompt, silent renewal, full re-login
//! - Pluggable session collaborator and user notification hook
//! - Status-code based classification of authorization failures
//! - Observable escalation steps via the `ReauthObserver` trait
//! - YAML/JSON configuration with environment overrides

pub mod auth;
pub mod config;
pub mod error;
pub mod notice;
pub mod retry;
pub mod session;
pub mod types;

pub use auth::{AuthClassifier, HttpStatusError, StatusCodeClassifier, StatusError};
pub use config::ReauthConfigLoader;
pub use error::{Error, Result};
pub use notice::{NotificationHook, NoticeSlot};
pub use retry::{retry_with_session, ReauthExecutor, ReauthExecutorBuilder, Retriable};
pub use session::SessionService;
pub use types::{ReauthConfig, RenewalFailure};
