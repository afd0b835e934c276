//! Re-authentication configuration types
//!
//! These types control which failures count as authorization failures and
//! how a failed silent renewal is treated.

use serde::{Deserialize, Serialize};

use crate::auth::{StatusCodeClassifier, UNAUTHORIZED};
use crate::error::{Error, Result};

/// Complete re-authentication configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ReauthConfig {
    /// Operation name used in log fields
    #[serde(default = "default_operation")]
    pub operation: String,

    /// Status codes treated as authorization failures
    #[serde(default = "default_unauthorized_codes")]
    pub unauthorized_codes: Vec<u16>,

    /// What a failed silent renewal does when the failure is not itself
    /// an authorization failure
    #[serde(default)]
    pub renewal_failure: RenewalFailure,
}

impl Default for ReauthConfig {
    fn default() -> Self {
        Self {
            operation: default_operation(),
            unauthorized_codes: default_unauthorized_codes(),
            renewal_failure: RenewalFailure::default(),
        }
    }
}

impl ReauthConfig {
    /// Check value ranges
    pub fn validate(&self) -> Result<()> {
        if self.unauthorized_codes.is_empty() {
            return Err(Error::invalid_config("unauthorized-codes must not be empty"));
        }

        if let Some(code) = self
            .unauthorized_codes
            .iter()
            .find(|code| !(100..=599).contains(*code))
        {
            return Err(Error::invalid_config(format!(
                "unauthorized-codes contains {}, expected an HTTP status between 100 and 599",
                code
            )));
        }

        if self.operation.trim().is_empty() {
            return Err(Error::invalid_config("operation must not be blank"));
        }

        Ok(())
    }

    /// Build the status classifier described by this configuration
    pub fn classifier(&self) -> StatusCodeClassifier {
        StatusCodeClassifier::with_codes(self.unauthorized_codes.clone())
    }
}

fn default_operation() -> String {
    "workflow".to_string()
}
fn default_unauthorized_codes() -> Vec<u16> {
    vec![UNAUTHORIZED]
}

/// Handling of a non-authorization failure from the first `renew()`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum RenewalFailure {
    /// Settle the invocation with the renewal failure (default)
    #[default]
    ShortCircuit,

    /// Go straight to full re-authentication
    Escalate,
}

impl std::str::FromStr for RenewalFailure {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "short-circuit" | "short_circuit" => Ok(Self::ShortCircuit),
            "escalate" => Ok(Self::Escalate),
            other => Err(Error::invalid_config(format!(
                "unknown renewal-failure '{}', expected short-circuit or escalate",
                other
            ))),
        }
    }
}
