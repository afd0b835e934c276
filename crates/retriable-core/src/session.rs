//! Session collaborator trait
//!
//! The host application owns the session protocol. The executor only drives
//! these three operations in the order the escalation ladder requires.

use async_trait::async_trait;
use std::sync::Arc;

/// Session lifecycle operations consumed by the executor
///
/// Failures are returned as the shared error type `E`, which the executor
/// classifies and otherwise passes through unchanged.
#[async_trait]
pub trait SessionService<E>: Send + Sync {
    /// Drop the current session credentials
    async fn logout(&self) -> Result<(), E>;

    /// Show the login prompt if the user is not signed in
    ///
    /// A failure means the user declined or cancelled the login.
    async fn show_login_prompt(&self) -> Result<(), E>;

    /// Renew the current session without user interaction
    async fn renew(&self) -> Result<(), E>;
}

#[async_trait]
impl<E, T> SessionService<E> for Arc<T>
where
    T: SessionService<E> + ?Sized,
    E: 'static,
{
    async fn logout(&self) -> Result<(), E> {
        (**self).logout().await
    }

    async fn show_login_prompt(&self) -> Result<(), E> {
        (**self).show_login_prompt().await
    }

    async fn renew(&self) -> Result<(), E> {
        (**self).renew().await
    }
}
