//! Binds a mounted view to the auth service for the lifetime of the view.

use super::navigate::Navigate;
use super::state::{CurrentUser, SessionAction};
use shared::{AuthClient, Session, Subscription};
use std::cell::Cell;
use std::future::Future;
use std::rc::Rc;

/// Sink for state transitions, usually a Yew reducer dispatcher
pub type Dispatch = Rc<dyn Fn(SessionAction)>;

fn current_user(session: Option<Session>) -> Option<CurrentUser> {
    session.map(|s| CurrentUser::from(s.user))
}

/// Live connection between one view instance and the auth service.
///
/// Holding the binding holds the change subscription. Dropping it releases
/// the subscription and silences any session fetch still in flight.
pub struct SessionBinding<A: AuthClient> {
    client: Rc<A>,
    dispatch: Dispatch,
    mounted: Rc<Cell<bool>>,
    signing_out: Rc<Cell<bool>>,
    subscription: Option<Subscription>,
}

impl<A: AuthClient + 'static> SessionBinding<A> {
    /// Subscribe to session changes and build the initial session fetch.
    ///
    /// The returned future must be spawned by the caller. It dispatches
    /// exactly one `Resolved` action, unless the binding is dropped first.
    pub fn mount(client: Rc<A>, dispatch: Dispatch) -> (Self, impl Future<Output = ()> + 'static) {
        let mounted = Rc::new(Cell::new(true));

        let subscription = {
            let dispatch = dispatch.clone();
            let mounted = mounted.clone();
            client.on_auth_state_change(Box::new(move |event, session| {
                if !mounted.get() {
                    return;
                }
                log::debug!("Auth state changed: {}", event);
                dispatch(SessionAction::Changed(current_user(session)));
            }))
        };

        let initial_fetch = {
            let client = client.clone();
            let dispatch = dispatch.clone();
            let mounted = mounted.clone();
            async move {
                let result = client.get_session().await;
                if !mounted.get() {
                    log::debug!("View unmounted before session fetch resolved");
                    return;
                }
                let user = match result {
                    Ok(session) => current_user(session),
                    Err(e) => {
                        log::error!("Failed to fetch current session: {}", e);
                        None
                    }
                };
                dispatch(SessionAction::Resolved(user));
            }
        };

        let binding = Self {
            client,
            dispatch,
            mounted,
            signing_out: Rc::new(Cell::new(false)),
            subscription: Some(subscription),
        };
        (binding, initial_fetch)
    }

    /// Start signing out. Returns `None` if a sign-out is already running.
    ///
    /// On success the returned future navigates to `destination`, which ends
    /// this view. On failure it logs the error and lets the view recover.
    pub fn sign_out(
        &self,
        navigator: Rc<dyn Navigate>,
        destination: String,
    ) -> Option<impl Future<Output = ()> + 'static> {
        if self.signing_out.replace(true) {
            return None;
        }
        (self.dispatch)(SessionAction::SignOutStarted);

        let client = self.client.clone();
        let dispatch = self.dispatch.clone();
        let mounted = self.mounted.clone();
        let signing_out = self.signing_out.clone();
        Some(async move {
            match client.sign_out().await {
                Ok(()) => {
                    log::info!("Signed out, redirecting to {}", destination);
                    navigator.navigate(&destination);
                }
                Err(e) => {
                    log::error!("Error signing out: {}", e);
                    signing_out.set(false);
                    if mounted.get() {
                        dispatch(SessionAction::SignOutFailed);
                    }
                }
            }
        })
    }

    pub fn is_subscribed(&self) -> bool {
        self.subscription.is_some()
    }
}

impl<A: AuthClient> Drop for SessionBinding<A> {
    fn drop(&mut self) {
        self.mounted.set(false);
        if let Some(subscription) = self.subscription.take() {
            subscription.unsubscribe();
        }
    }
}
