//! Configuration types

mod reauth_config;

pub use reauth_config::{ReauthConfig, RenewalFailure};
