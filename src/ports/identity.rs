//! Identity provider port - authentication abstraction

use tokio::sync::watch;

use crate::domain::AuthState;

/// External identity provider abstraction
///
/// The provider owns sign-in, sign-up, and sign-out; the core only
/// consumes the resulting state: a stable user id while authenticated, or
/// an explicit signed-out signal. State changes arrive over a watch
/// channel so callers can either poll the current value or react to
/// transitions.
pub trait IdentityProvider: Send + Sync {
    /// Subscribe to authentication state changes. The receiver immediately
    /// holds the current state.
    fn subscribe(&self) -> watch::Receiver<AuthState>;

    /// Snapshot of the current state
    fn current(&self) -> AuthState {
        self.subscribe().borrow().clone()
    }
}
