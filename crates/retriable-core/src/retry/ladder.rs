//! Positions on the escalation ladder

use std::fmt;

/// Workflow executions per invocation never exceed this
pub const MAX_ATTEMPTS: u32 = 3;

/// Which rung a workflow attempt runs on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rung {
    /// Right after the pre-flight prompt
    First,
    /// After a successful silent renewal
    Renewed,
    /// After full re-authentication; its outcome is final
    Final,
}

impl Rung {
    /// The escalation an authorization failure on this rung leads to
    pub fn escalation(self) -> Option<Escalation> {
        match self {
            Rung::First => Some(Escalation::Renew),
            Rung::Renewed => Some(Escalation::Reauthenticate),
            Rung::Final => None,
        }
    }
}

impl fmt::Display for Rung {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rung::First => write!(f, "first"),
            Rung::Renewed => write!(f, "renewed"),
            Rung::Final => write!(f, "final"),
        }
    }
}

/// Recovery step taken after an authorization failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Escalation {
    /// Silent session renewal
    Renew,
    /// Notification hook followed by logout, login prompt and renewal
    Reauthenticate,
}

impl fmt::Display for Escalation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Escalation::Renew => write!(f, "renew"),
            Escalation::Reauthenticate => write!(f, "reauthenticate"),
        }
    }
}

/// The step at which an invocation settled with a failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// The pre-flight login prompt
    Preflight,
    /// A workflow execution, numbered from 1
    Workflow(u32),
    /// A `renew()` call
    Renew,
    /// The notification hook
    Notice,
    /// The `logout()` call during re-authentication
    Logout,
    /// The login prompt during re-authentication
    LoginPrompt,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Preflight => write!(f, "preflight"),
            Stage::Workflow(attempt) => write!(f, "workflow attempt {}", attempt),
            Stage::Renew => write!(f, "renew"),
            Stage::Notice => write!(f, "notice"),
            Stage::Logout => write!(f, "logout"),
            Stage::LoginPrompt => write!(f, "login prompt"),
        }
    }
}
