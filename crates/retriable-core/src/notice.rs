//! User notification before a forced re-login
//!
//! The hook runs once the ladder decides that silent renewal is not enough.
//! It may be synchronous or asynchronous; a failure vetoes the re-login and
//! settles the invocation with that failure.

use async_trait::async_trait;
use std::future::Future;
use std::marker::PhantomData;
use std::sync::{Arc, RwLock};

/// Hook invoked before a forced re-login
#[async_trait]
pub trait NotificationHook<E>: Send + Sync {
    /// Notify the user; an error cancels the retry sequence
    async fn notify(&self) -> Result<(), E>;
}

/// The default hook: succeeds without any user interaction
#[derive(Debug, Clone, Copy, Default)]
pub struct PassthroughNotice;

#[async_trait]
impl<E: 'static> NotificationHook<E> for PassthroughNotice {
    async fn notify(&self) -> Result<(), E> {
        Ok(())
    }
}

/// Adapts a synchronous closure into a hook
pub struct SyncNotice<F> {
    notify: F,
}

impl<F> SyncNotice<F> {
    pub fn new(notify: F) -> Self {
        Self { notify }
    }
}

#[async_trait]
impl<E, F> NotificationHook<E> for SyncNotice<F>
where
    F: Fn() -> Result<(), E> + Send + Sync,
    E: 'static,
{
    async fn notify(&self) -> Result<(), E> {
        (self.notify)()
    }
}

/// Adapts a closure returning a future into a hook
pub struct AsyncNotice<F, Fut> {
    notify: F,
    _future: PhantomData<fn() -> Fut>,
}

impl<F, Fut> AsyncNotice<F, Fut> {
    pub fn new(notify: F) -> Self {
        Self {
            notify,
            _future: PhantomData,
        }
    }
}

#[async_trait]
impl<E, F, Fut> NotificationHook<E> for AsyncNotice<F, Fut>
where
    F: Fn() -> Fut + Send + Sync,
    Fut: Future<Output = Result<(), E>> + Send + 'static,
    E: 'static,
{
    async fn notify(&self) -> Result<(), E> {
        (self.notify)().await
    }
}

/// Build a hook from a synchronous closure
pub fn sync_notice<E, F>(notify: F) -> Arc<dyn NotificationHook<E>>
where
    F: Fn() -> Result<(), E> + Send + Sync + 'static,
    E: 'static,
{
    Arc::new(SyncNotice::new(notify))
}

/// Build a hook from an asynchronous closure
pub fn async_notice<E, F, Fut>(notify: F) -> Arc<dyn NotificationHook<E>>
where
    F: Fn() -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<(), E>> + Send + 'static,
    E: 'static,
{
    Arc::new(AsyncNotice::new(notify))
}

/// Holds the currently installed hook
///
/// Setting is synchronous and last-write-wins. Each invocation takes a
/// snapshot when it starts, so a later `set` never reaches an invocation
/// that is already running.
pub struct NoticeSlot<E> {
    current: RwLock<Arc<dyn NotificationHook<E>>>,
}

impl<E: 'static> Default for NoticeSlot<E> {
    fn default() -> Self {
        Self::new(Arc::new(PassthroughNotice))
    }
}

impl<E: 'static> NoticeSlot<E> {
    /// Create a slot holding the given hook
    pub fn new(hook: Arc<dyn NotificationHook<E>>) -> Self {
        Self {
            current: RwLock::new(hook),
        }
    }

    /// Install a hook for every invocation that starts afterwards
    pub fn set(&self, hook: Arc<dyn NotificationHook<E>>) {
        // A poisoned lock still holds a valid Arc
        let mut current = self.current.write().unwrap_or_else(|e| e.into_inner());
        *current = hook;
    }

    /// Snapshot the installed hook
    pub fn current(&self) -> Arc<dyn NotificationHook<E>> {
        self.current
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }
}
