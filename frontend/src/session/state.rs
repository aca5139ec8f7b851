//! View state driven by the auth session

use shared::User;
use std::rc::Rc;
use yew::prelude::*;

/// Lifecycle of the dashboard view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewPhase {
    /// Waiting for the first session to resolve
    #[default]
    Loading,
    Unauthenticated,
    Ready,
    SigningOut,
}

/// The signed-in user as shown by the view
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentUser {
    pub id: String,
    pub email: String,
}

impl From<User> for CurrentUser {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionAction {
    /// The initial session fetch finished
    Resolved(Option<CurrentUser>),
    /// A change notification arrived from the auth service
    Changed(Option<CurrentUser>),
    SignOutStarted,
    SignOutFailed,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SessionState {
    pub phase: ViewPhase,
    pub user: Option<CurrentUser>,
}

impl SessionState {
    /// Compute the state after `action`.
    ///
    /// Whichever of `Resolved` or `Changed` arrives first moves the view out
    /// of `Loading`. A `Resolved` arriving afterwards carries an older view
    /// of the session than the notification did, so it is dropped.
    pub fn apply(&self, action: SessionAction) -> SessionState {
        match action {
            SessionAction::Resolved(user) => match self.phase {
                ViewPhase::Loading => Self::settled(user),
                _ => self.clone(),
            },
            SessionAction::Changed(user) => match self.phase {
                // Sign-out completion decides where a signing-out view goes
                ViewPhase::SigningOut => SessionState {
                    phase: ViewPhase::SigningOut,
                    user,
                },
                _ => Self::settled(user),
            },
            SessionAction::SignOutStarted => match self.phase {
                ViewPhase::Ready => SessionState {
                    phase: ViewPhase::SigningOut,
                    user: self.user.clone(),
                },
                _ => self.clone(),
            },
            SessionAction::SignOutFailed => match self.phase {
                ViewPhase::SigningOut => Self::settled(self.user.clone()),
                _ => self.clone(),
            },
        }
    }

    pub fn is_signing_out(&self) -> bool {
        self.phase == ViewPhase::SigningOut
    }

    fn settled(user: Option<CurrentUser>) -> SessionState {
        let phase = if user.is_some() {
            ViewPhase::Ready
        } else {
            ViewPhase::Unauthenticated
        };
        SessionState { phase, user }
    }
}

impl Reducible for SessionState {
    type Action = SessionAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let next = self.apply(action);
        if next == *self {
            // Same value: keep the Rc so Yew skips the re-render
            self
        } else {
            Rc::new(next)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(id: &str) -> CurrentUser {
        CurrentUser {
            id: id.to_string(),
            email: format!("{}@b.com", id),
        }
    }

    fn ready(id: &str) -> SessionState {
        SessionState {
            phase: ViewPhase::Ready,
            user: Some(user(id)),
        }
    }

    #[test]
    fn test_starts_loading() {
        let state = SessionState::default();
        assert_eq!(state.phase, ViewPhase::Loading);
        assert_eq!(state.user, None);
    }

    #[test]
    fn test_initial_fetch_settles_phase() {
        let loading = SessionState::default();

        let state = loading.apply(SessionAction::Resolved(Some(user("u1"))));
        assert_eq!(state, ready("u1"));

        let state = loading.apply(SessionAction::Resolved(None));
        assert_eq!(state.phase, ViewPhase::Unauthenticated);
        assert_eq!(state.user, None);
    }

    #[test]
    fn test_late_fetch_is_absorbed() {
        let state = SessionState::default().apply(SessionAction::Changed(Some(user("u2"))));
        assert_eq!(state, ready("u2"));

        let after = state.apply(SessionAction::Resolved(Some(user("u1"))));
        assert_eq!(after, ready("u2"));

        let after = state.apply(SessionAction::Resolved(None));
        assert_eq!(after, ready("u2"));
    }

    #[test]
    fn test_null_notification_clears_user_in_every_phase() {
        let phases = [
            SessionState::default(),
            ready("u1"),
            SessionState {
                phase: ViewPhase::Unauthenticated,
                user: None,
            },
            SessionState {
                phase: ViewPhase::SigningOut,
                user: Some(user("u1")),
            },
        ];

        for state in phases {
            let next = state.apply(SessionAction::Changed(None));
            assert_eq!(next.user, None, "from {:?}", state.phase);
        }
    }

    #[test]
    fn test_notification_while_signing_out_keeps_phase() {
        let signing_out = ready("u1").apply(SessionAction::SignOutStarted);
        let next = signing_out.apply(SessionAction::Changed(None));
        assert_eq!(next.phase, ViewPhase::SigningOut);
    }

    #[test]
    fn test_sign_out_guard() {
        let signing_out = ready("u1").apply(SessionAction::SignOutStarted);
        assert!(signing_out.is_signing_out());
        assert_eq!(signing_out.user, Some(user("u1")));

        // Already signing out: no-op
        assert_eq!(
            signing_out.apply(SessionAction::SignOutStarted),
            signing_out
        );

        // Nothing to sign out of
        let unauthenticated = SessionState::default().apply(SessionAction::Resolved(None));
        assert_eq!(
            unauthenticated.apply(SessionAction::SignOutStarted),
            unauthenticated
        );
        let loading = SessionState::default();
        assert_eq!(loading.apply(SessionAction::SignOutStarted), loading);
    }

    #[test]
    fn test_sign_out_failure_returns_to_ready() {
        let state = ready("u1")
            .apply(SessionAction::SignOutStarted)
            .apply(SessionAction::SignOutFailed);
        assert_eq!(state, ready("u1"));

        // Stray failure outside SigningOut changes nothing
        assert_eq!(ready("u1").apply(SessionAction::SignOutFailed), ready("u1"));
    }

    #[test]
    fn test_reduce_keeps_rc_when_unchanged() {
        let state = Rc::new(ready("u1"));
        let same = state.clone().reduce(SessionAction::Resolved(None));
        assert!(Rc::ptr_eq(&state, &same));

        let changed = state.clone().reduce(SessionAction::SignOutStarted);
        assert!(!Rc::ptr_eq(&state, &changed));
        assert_eq!(changed.phase, ViewPhase::SigningOut);
    }
}
