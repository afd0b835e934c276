//! Common test infrastructure for retriable-core tests
//!
//! - `CallLog`: ordered record of every session, hook and workflow call
//! - `MockSession`: scripted `SessionService` writing into a `CallLog`
//! - `scripted_workflow`: workflow closure replaying queued results

#![allow(dead_code)]

use async_trait::async_trait;
use retriable_core::{SessionService, StatusError};
use std::collections::VecDeque;
use std::future::{ready, Ready};
use std::sync::{Arc, Mutex};

pub const LOGOUT: &str = "logout";
pub const PROMPT: &str = "show_login_prompt";
pub const RENEW: &str = "renew";
pub const NOTICE: &str = "notice";
pub const WORKFLOW: &str = "workflow";

/// The value our workflows resolve with
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub result: bool,
}

pub fn ok_outcome() -> Result<Outcome, StatusError> {
    Ok(Outcome { result: true })
}

pub fn error_401() -> StatusError {
    StatusError::unauthorized("Name or password is incorrect")
}

pub fn error_405() -> StatusError {
    StatusError::with_status(405, "Database encountered an unknown error")
}

#[derive(Debug, Clone, Default)]
pub struct CallLog(Arc<Mutex<Vec<&'static str>>>);

impl CallLog {
    pub fn push(&self, call: &'static str) {
        self.0.lock().unwrap().push(call);
    }

    pub fn calls(&self) -> Vec<&'static str> {
        self.0.lock().unwrap().clone()
    }

    pub fn count(&self, call: &str) -> usize {
        self.0.lock().unwrap().iter().filter(|c| **c == call).count()
    }
}

type Script = Mutex<VecDeque<Result<(), StatusError>>>;

/// Session service whose calls succeed unless a failure was queued
#[derive(Debug, Default)]
pub struct MockSession {
    log: CallLog,
    logout: Script,
    prompt: Script,
    renew: Script,
}

impl MockSession {
    pub fn new(log: CallLog) -> Self {
        Self {
            log,
            ..Default::default()
        }
    }

    pub fn fail_logout(self, err: StatusError) -> Self {
        self.logout.lock().unwrap().push_back(Err(err));
        self
    }

    /// Queue outcomes for successive login prompts
    pub fn script_prompt(self, results: Vec<Result<(), StatusError>>) -> Self {
        self.prompt.lock().unwrap().extend(results);
        self
    }

    /// Queue outcomes for successive renewals
    pub fn script_renew(self, results: Vec<Result<(), StatusError>>) -> Self {
        self.renew.lock().unwrap().extend(results);
        self
    }

    fn next(&self, call: &'static str, script: &Script) -> Result<(), StatusError> {
        self.log.push(call);
        script.lock().unwrap().pop_front().unwrap_or(Ok(()))
    }
}

#[async_trait]
impl SessionService<StatusError> for MockSession {
    async fn logout(&self) -> Result<(), StatusError> {
        self.next(LOGOUT, &self.logout)
    }

    async fn show_login_prompt(&self) -> Result<(), StatusError> {
        self.next(PROMPT, &self.prompt)
    }

    async fn renew(&self) -> Result<(), StatusError> {
        self.next(RENEW, &self.renew)
    }
}

/// A workflow that replays `results` in order, repeating the last one
pub fn scripted_workflow<A>(
    log: CallLog,
    results: Vec<Result<Outcome, StatusError>>,
) -> impl Fn(A) -> Ready<Result<Outcome, StatusError>> {
    let results = Arc::new(Mutex::new(VecDeque::from(results)));
    move |_args: A| {
        log.push(WORKFLOW);
        let mut results = results.lock().unwrap();
        let next = if results.len() > 1 {
            results.pop_front()
        } else {
            results.front().cloned()
        };
        ready(next.expect("scripted workflow needs at least one result"))
    }
}
