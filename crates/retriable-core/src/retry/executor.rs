//! Authenticated retry executor
//!
//! This module provides the escalation ladder itself, the builder used to
//! configure it, and the `Retriable` callable handed back to callers.

use std::fmt::Display;
use std::future::Future;
use std::sync::Arc;
use std::time::Instant;

use crate::auth::{AuthClassifier, HttpStatusError, StatusCodeClassifier};
use crate::notice::{NotificationHook, NoticeSlot, PassthroughNotice};
use crate::session::SessionService;
use crate::types::{ReauthConfig, RenewalFailure};

use super::ladder::{Escalation, Rung, Stage};
use super::observer::{NoOpObserver, ReauthObserver};

/// Run a zero-argument workflow with the default hook, classifier and observer
///
/// # Example
///
/// ```rust,no_run
/// use retriable_core::retry::retry_with_session;
/// use retriable_core::{SessionService, StatusError};
///
/// async fn example(session: impl SessionService<StatusError>) {
///     let result = retry_with_session(session, || async {
///         Ok::<_, StatusError>("records")
///     })
///     .await;
/// }
/// ```
pub async fn retry_with_session<S, E, F, Fut, T>(session: S, workflow: F) -> Result<T, E>
where
    S: SessionService<E>,
    E: HttpStatusError + Display + 'static,
    F: Fn() -> Fut,
    Fut: Future<Output = Result<T, E>>,
{
    ReauthExecutorBuilder::new(session)
        .build()
        .execute((), |()| workflow())
        .await
}

/// Builder for configuring a `ReauthExecutor`
///
/// # Example
///
/// ```rust,no_run
/// use retriable_core::notice::sync_notice;
/// use retriable_core::retry::{ReauthExecutorBuilder, TracingObserver};
/// use retriable_core::{ReauthConfig, SessionService, StatusError};
///
/// fn example<S: SessionService<StatusError>>(session: S) {
///     let config = ReauthConfig::default();
///     let executor = ReauthExecutorBuilder::new(session)
///         .with_config(&config)
///         .with_notice(sync_notice(|| Ok::<_, StatusError>(())))
///         .with_observer(TracingObserver::from_config(&config))
///         .build();
/// }
/// ```
pub struct ReauthExecutorBuilder<S, E, C = StatusCodeClassifier, O = NoOpObserver> {
    session: S,
    notice: Arc<dyn NotificationHook<E>>,
    classifier: C,
    observer: O,
    renewal_failure: RenewalFailure,
}

impl<S, E: 'static> ReauthExecutorBuilder<S, E, StatusCodeClassifier, NoOpObserver> {
    /// Create a new builder with default settings
    pub fn new(session: S) -> Self {
        Self {
            session,
            notice: Arc::new(PassthroughNotice),
            classifier: StatusCodeClassifier::default(),
            observer: NoOpObserver,
            renewal_failure: RenewalFailure::default(),
        }
    }
}

impl<S, E, O> ReauthExecutorBuilder<S, E, StatusCodeClassifier, O> {
    /// Apply unauthorized codes and renewal-failure handling from configuration
    pub fn with_config(mut self, config: &ReauthConfig) -> Self {
        self.classifier = config.classifier();
        self.renewal_failure = config.renewal_failure;
        self
    }
}

impl<S, E: 'static, C, O> ReauthExecutorBuilder<S, E, C, O> {
    /// Set the notification hook run before a forced re-login
    pub fn with_notice(mut self, notice: Arc<dyn NotificationHook<E>>) -> Self {
        self.notice = notice;
        self
    }

    /// Set the classifier deciding which failures are authorization failures
    pub fn with_classifier<C2>(self, classifier: C2) -> ReauthExecutorBuilder<S, E, C2, O> {
        ReauthExecutorBuilder {
            session: self.session,
            notice: self.notice,
            classifier,
            observer: self.observer,
            renewal_failure: self.renewal_failure,
        }
    }

    /// Set the observer
    pub fn with_observer<O2>(self, observer: O2) -> ReauthExecutorBuilder<S, E, C, O2> {
        ReauthExecutorBuilder {
            session: self.session,
            notice: self.notice,
            classifier: self.classifier,
            observer,
            renewal_failure: self.renewal_failure,
        }
    }

    /// Choose how a non-authorization failure from the first renewal is handled
    pub fn with_renewal_failure(mut self, renewal_failure: RenewalFailure) -> Self {
        self.renewal_failure = renewal_failure;
        self
    }

    /// Build the executor
    pub fn build(self) -> ReauthExecutor<S, E, C, O> {
        ReauthExecutor {
            session: self.session,
            notice: NoticeSlot::new(self.notice),
            classifier: self.classifier,
            observer: self.observer,
            renewal_failure: self.renewal_failure,
        }
    }
}

/// Wraps workflows with automatic session recovery
///
/// Use `ReauthExecutorBuilder` to create an instance. The executor holds no
/// per-invocation state; any number of invocations may run concurrently.
pub struct ReauthExecutor<S, E, C = StatusCodeClassifier, O = NoOpObserver> {
    session: S,
    notice: NoticeSlot<E>,
    classifier: C,
    observer: O,
    renewal_failure: RenewalFailure,
}

/// A workflow bound to an executor
///
/// Each `call` is one independent invocation of the escalation ladder.
pub struct Retriable<'a, S, E, C, O, F> {
    executor: &'a ReauthExecutor<S, E, C, O>,
    workflow: F,
}

enum Step {
    Preflight,
    Attempt(Rung),
    Renew,
    Reauthenticate,
}

impl From<Escalation> for Step {
    fn from(escalation: Escalation) -> Self {
        match escalation {
            Escalation::Renew => Step::Renew,
            Escalation::Reauthenticate => Step::Reauthenticate,
        }
    }
}

impl<S, E, C, O> ReauthExecutor<S, E, C, O>
where
    S: SessionService<E>,
    E: Display + 'static,
    C: AuthClassifier<E>,
    O: ReauthObserver,
{
    /// Install the notification hook for invocations that start afterwards
    pub fn set_notice(&self, notice: Arc<dyn NotificationHook<E>>) {
        self.notice.set(notice);
    }

    /// The session collaborator
    pub fn session(&self) -> &S {
        &self.session
    }

    /// The observer
    pub fn observer(&self) -> &O {
        &self.observer
    }

    /// Bind a workflow, returning a callable that retries on authorization failure
    pub fn make_retriable<F>(&self, workflow: F) -> Retriable<'_, S, E, C, O, F> {
        Retriable {
            executor: self,
            workflow,
        }
    }

    /// Run one invocation of `workflow` with `args`
    ///
    /// Every attempt receives a clone of `args`. The result is the workflow's
    /// value or the failure that ended the ladder, unchanged.
    pub async fn execute<A, F, Fut, T>(&self, args: A, workflow: F) -> Result<T, E>
    where
        A: Clone,
        F: Fn(A) -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        self.run(args, &workflow).await
    }

    async fn run<A, F, Fut, T>(&self, args: A, workflow: &F) -> Result<T, E>
    where
        A: Clone,
        F: Fn(A) -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        // Later set_notice calls must not reach this invocation
        let notice = self.notice.current();
        let start = Instant::now();
        let mut attempt = 0;
        let mut step = Step::Preflight;

        loop {
            step = match step {
                Step::Preflight => match self.session.show_login_prompt().await {
                    Ok(()) => Step::Attempt(Rung::First),
                    Err(err) => {
                        self.observer.on_cancelled(Stage::Preflight, &err);
                        return Err(err);
                    }
                },

                Step::Attempt(rung) => {
                    attempt += 1;
                    self.observer.on_attempt_start(attempt, rung);

                    match workflow(args.clone()).await {
                        Ok(value) => {
                            self.observer.on_success(attempt, start.elapsed());
                            return Ok(value);
                        }
                        Err(err) => match rung.escalation() {
                            Some(next) if self.classifier.is_unauthorized(&err) => {
                                self.observer.on_escalation(attempt, next, &err);
                                Step::from(next)
                            }
                            _ => {
                                self.observer.on_failed(Stage::Workflow(attempt), &err);
                                return Err(err);
                            }
                        },
                    }
                }

                Step::Renew => match self.session.renew().await {
                    Ok(()) => Step::Attempt(Rung::Renewed),
                    Err(err) if self.escalates_renewal_failure(&err) => {
                        self.observer
                            .on_escalation(attempt, Escalation::Reauthenticate, &err);
                        Step::Reauthenticate
                    }
                    Err(err) => {
                        self.observer.on_failed(Stage::Renew, &err);
                        return Err(err);
                    }
                },

                Step::Reauthenticate => {
                    if let Err(err) = notice.notify().await {
                        self.observer.on_cancelled(Stage::Notice, &err);
                        return Err(err);
                    }
                    self.settle_on_failure(Stage::Logout, self.session.logout())
                        .await?;
                    self.settle_on_failure(Stage::LoginPrompt, self.session.show_login_prompt())
                        .await?;
                    self.settle_on_failure(Stage::Renew, self.session.renew())
                        .await?;
                    Step::Attempt(Rung::Final)
                }
            };
        }
    }

    fn escalates_renewal_failure(&self, err: &E) -> bool {
        self.classifier.is_unauthorized(err) || self.renewal_failure == RenewalFailure::Escalate
    }

    async fn settle_on_failure<Fut>(&self, stage: Stage, step: Fut) -> Result<(), E>
    where
        Fut: Future<Output = Result<(), E>>,
    {
        step.await.map_err(|err| {
            self.observer.on_failed(stage, &err);
            err
        })
    }
}

impl<'a, S, E, C, O, F> Retriable<'a, S, E, C, O, F>
where
    S: SessionService<E>,
    E: Display + 'static,
    C: AuthClassifier<E>,
    O: ReauthObserver,
{
    /// Invoke the workflow through the escalation ladder
    pub async fn call<A, Fut, T>(&self, args: A) -> Result<T, E>
    where
        A: Clone,
        F: Fn(A) -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        self.executor.run(args, &self.workflow).await
    }

    /// The executor this workflow is bound to
    pub fn executor(&self) -> &'a ReauthExecutor<S, E, C, O> {
        self.executor
    }
}
