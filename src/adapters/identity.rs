//! In-process identity provider

use tokio::sync::watch;

use crate::domain::{AuthState, UserId};
use crate::ports::IdentityProvider;

/// Identity provider backed by a local watch channel
///
/// Shells that embed the core drive this from their authentication
/// integration; tests and demo mode drive it directly. Starts signed out.
pub struct LocalIdentity {
    sender: watch::Sender<AuthState>,
}

impl LocalIdentity {
    pub fn new() -> Self {
        let (sender, _) = watch::channel(AuthState::SignedOut);
        Self { sender }
    }

    pub fn sign_in(&self, user: UserId) {
        self.sender.send_replace(AuthState::SignedIn(user));
    }

    pub fn sign_out(&self) {
        self.sender.send_replace(AuthState::SignedOut);
    }
}

impl Default for LocalIdentity {
    fn default() -> Self {
        Self::new()
    }
}

impl IdentityProvider for LocalIdentity {
    fn subscribe(&self) -> watch::Receiver<AuthState> {
        self.sender.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_subscription_sees_transitions() {
        let identity = LocalIdentity::new();
        let mut receiver = identity.subscribe();
        assert_eq!(*receiver.borrow(), AuthState::SignedOut);

        identity.sign_in(UserId::new("user-1"));
        receiver.changed().await.unwrap();
        assert_eq!(
            *receiver.borrow(),
            AuthState::SignedIn(UserId::new("user-1"))
        );

        identity.sign_out();
        receiver.changed().await.unwrap();
        assert_eq!(*receiver.borrow(), AuthState::SignedOut);
    }

    #[test]
    fn test_current_snapshot() {
        let identity = LocalIdentity::new();
        assert_eq!(identity.current(), AuthState::SignedOut);
        identity.sign_in(UserId::new("user-1"));
        assert!(identity.current().is_signed_in());
    }
}
