//! Auth collaborator contract
//!
//! The dashboard never talks to an auth backend directly. It consumes the
//! [`AuthClient`] trait, which can be implemented by the browser client in
//! the frontend or by an in-memory fake in tests.

use crate::Session;
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

/// Auth error types
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    /// Network or connection error
    #[error("Network error: {0}")]
    Network(String),

    /// Credentials were rejected
    #[error("Invalid credentials: {0}")]
    Credentials(String),

    /// Auth service returned an error status
    #[error("Auth server error ({status}): {message}")]
    Server { status: u16, message: String },

    /// Failed to parse a response or stored session
    #[error("Parse error: {0}")]
    Parse(String),

    /// Browser session storage is not available
    #[error("Session storage unavailable: {0}")]
    Storage(String),
}

impl From<serde_json::Error> for AuthError {
    fn from(err: serde_json::Error) -> Self {
        AuthError::Parse(err.to_string())
    }
}

/// Kind of session change delivered to subscribers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AuthChangeEvent {
    /// Delivered once per subscription with the session known at that time
    InitialSession,
    SignedIn,
    SignedOut,
    TokenRefreshed,
    UserUpdated,
    PasswordRecovery,
}

impl AuthChangeEvent {
    pub fn as_str(&self) -> &'static str {
        match self {
            AuthChangeEvent::InitialSession => "INITIAL_SESSION",
            AuthChangeEvent::SignedIn => "SIGNED_IN",
            AuthChangeEvent::SignedOut => "SIGNED_OUT",
            AuthChangeEvent::TokenRefreshed => "TOKEN_REFRESHED",
            AuthChangeEvent::UserUpdated => "USER_UPDATED",
            AuthChangeEvent::PasswordRecovery => "PASSWORD_RECOVERY",
        }
    }
}

impl fmt::Display for AuthChangeEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Callback invoked on every session change
pub type AuthListener = Box<dyn Fn(AuthChangeEvent, Option<Session>)>;

/// Handle to a registered change listener.
///
/// The listener is released exactly once: either by [`Subscription::unsubscribe`]
/// or when the handle is dropped.
pub struct Subscription {
    id: u64,
    release: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    pub fn new(id: u64, release: impl FnOnce() + 'static) -> Self {
        Self {
            id,
            release: Some(Box::new(release)),
        }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn unsubscribe(mut self) {
        self.release_now();
    }

    fn release_now(&mut self) {
        if let Some(release) = self.release.take() {
            release();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.release_now();
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("id", &self.id)
            .field("active", &self.release.is_some())
            .finish()
    }
}

type SharedListener = Rc<dyn Fn(AuthChangeEvent, Option<Session>)>;

#[derive(Default)]
struct Listeners {
    next_id: u64,
    entries: Vec<(u64, SharedListener)>,
}

/// Single-threaded set of change listeners.
///
/// Clones share the same underlying set. Listeners may unsubscribe (or
/// subscribe) from inside a callback; an emit always runs against the set
/// as it was when the emit started.
#[derive(Clone, Default)]
pub struct ListenerRegistry {
    inner: Rc<RefCell<Listeners>>,
}

impl ListenerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&self, listener: AuthListener) -> Subscription {
        let id = {
            let mut listeners = self.inner.borrow_mut();
            let id = listeners.next_id;
            listeners.next_id += 1;
            listeners.entries.push((id, Rc::from(listener)));
            id
        };

        let weak: Weak<RefCell<Listeners>> = Rc::downgrade(&self.inner);
        Subscription::new(id, move || {
            if let Some(inner) = weak.upgrade() {
                inner.borrow_mut().entries.retain(|(entry_id, _)| *entry_id != id);
            }
        })
    }

    pub fn is_registered(&self, id: u64) -> bool {
        self.inner
            .borrow()
            .entries
            .iter()
            .any(|(entry_id, _)| *entry_id == id)
    }

    pub fn len(&self) -> usize {
        self.inner.borrow().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Notify every registered listener
    pub fn emit(&self, event: AuthChangeEvent, session: Option<Session>) {
        let snapshot: Vec<SharedListener> = self
            .inner
            .borrow()
            .entries
            .iter()
            .map(|(_, listener)| listener.clone())
            .collect();

        for listener in snapshot {
            listener(event, session.clone());
        }
    }

    /// Notify a single listener. Returns false if it is no longer registered.
    pub fn emit_to(&self, id: u64, event: AuthChangeEvent, session: Option<Session>) -> bool {
        let listener = self
            .inner
            .borrow()
            .entries
            .iter()
            .find(|(entry_id, _)| *entry_id == id)
            .map(|(_, listener)| listener.clone());

        match listener {
            Some(listener) => {
                listener(event, session);
                true
            }
            None => false,
        }
    }
}

/// Trait defining the auth service the dashboard consumes
///
/// All calls run on the browser's single thread, so implementations are
/// free to use `Rc` and `RefCell` internally.
#[allow(async_fn_in_trait)]
pub trait AuthClient {
    /// Get the current session, or `None` if nobody is signed in
    async fn get_session(&self) -> Result<Option<Session>, AuthError>;

    /// Register a listener for session changes until the subscription is released
    fn on_auth_state_change(&self, listener: AuthListener) -> Subscription;

    /// Revoke the current session
    async fn sign_out(&self) -> Result<(), AuthError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::User;
    use std::cell::Cell;

    fn session(id: &str) -> Session {
        Session {
            access_token: format!("token-{}", id),
            refresh_token: None,
            expires_at: None,
            user: User {
                id: id.to_string(),
                email: format!("{}@example.com", id),
            },
        }
    }

    #[test]
    fn test_subscription_releases_once() {
        let released = Rc::new(Cell::new(0));
        let sub = {
            let released = released.clone();
            Subscription::new(7, move || released.set(released.get() + 1))
        };
        assert_eq!(sub.id(), 7);

        sub.unsubscribe();
        assert_eq!(released.get(), 1);

        let dropped = {
            let released = released.clone();
            Subscription::new(8, move || released.set(released.get() + 1))
        };
        drop(dropped);
        assert_eq!(released.get(), 2);
    }

    #[test]
    fn test_emit_reaches_all_listeners() {
        let registry = ListenerRegistry::new();
        let seen = Rc::new(RefCell::new(Vec::new()));

        let _a = {
            let seen = seen.clone();
            registry.subscribe(Box::new(move |event, session| {
                seen.borrow_mut()
                    .push(("a", event, session.map(|s| s.user.id)));
            }))
        };
        let _b = {
            let seen = seen.clone();
            registry.subscribe(Box::new(move |event, _| {
                seen.borrow_mut().push(("b", event, None));
            }))
        };

        registry.emit(AuthChangeEvent::SignedIn, Some(session("u1")));

        assert_eq!(
            *seen.borrow(),
            vec![
                ("a", AuthChangeEvent::SignedIn, Some("u1".to_string())),
                ("b", AuthChangeEvent::SignedIn, None),
            ]
        );
    }

    #[test]
    fn test_dropped_subscription_stops_delivery() {
        let registry = ListenerRegistry::new();
        let count = Rc::new(Cell::new(0));

        let sub = {
            let count = count.clone();
            registry.subscribe(Box::new(move |_, _| count.set(count.get() + 1)))
        };
        let id = sub.id();
        registry.emit(AuthChangeEvent::TokenRefreshed, None);
        assert!(registry.is_registered(id));

        drop(sub);
        registry.emit(AuthChangeEvent::TokenRefreshed, None);

        assert_eq!(count.get(), 1);
        assert!(!registry.is_registered(id));
        assert!(registry.is_empty());
        assert!(!registry.emit_to(id, AuthChangeEvent::SignedOut, None));
    }

    #[test]
    fn test_listener_can_unsubscribe_during_emit() {
        let registry = ListenerRegistry::new();
        let slot: Rc<RefCell<Option<Subscription>>> = Rc::new(RefCell::new(None));

        let sub = {
            let slot = slot.clone();
            registry.subscribe(Box::new(move |_, _| {
                slot.borrow_mut().take();
            }))
        };
        *slot.borrow_mut() = Some(sub);

        registry.emit(AuthChangeEvent::SignedOut, None);
        assert!(registry.is_empty());
    }

    #[test]
    fn test_release_after_registry_dropped() {
        let registry = ListenerRegistry::new();
        let sub = registry.subscribe(Box::new(|_, _| {}));
        drop(registry);
        // Weak upgrade fails, release is a no-op
        sub.unsubscribe();
    }

    #[test]
    fn test_event_wire_names() {
        let event: AuthChangeEvent = serde_json::from_str("\"SIGNED_OUT\"").unwrap();
        assert_eq!(event, AuthChangeEvent::SignedOut);
        assert_eq!(
            serde_json::to_string(&AuthChangeEvent::InitialSession).unwrap(),
            "\"INITIAL_SESSION\""
        );
        assert_eq!(AuthChangeEvent::TokenRefreshed.to_string(), "TOKEN_REFRESHED");
    }

    #[test]
    fn test_error_display() {
        let err = AuthError::Network("connection reset".to_string());
        assert_eq!(format!("{}", err), "Network error: connection reset");

        let err = AuthError::Server {
            status: 503,
            message: "unavailable".to_string(),
        };
        assert_eq!(format!("{}", err), "Auth server error (503): unavailable");

        let err: AuthError = serde_json::from_str::<Session>("{").unwrap_err().into();
        assert!(matches!(err, AuthError::Parse(_)));
    }
}
