//! Hook binding a component to the auth session for its lifetime.

use crate::session::{Navigate, SessionAction, SessionBinding, SessionState};
use shared::AuthClient;
use std::rc::Rc;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

/// Return value from the use_auth_session hook.
pub struct UseAuthSession {
    /// Current view phase and signed-in user
    pub state: SessionState,
    /// Sign out and leave the page (ignored while a sign-out is running)
    pub sign_out: Callback<()>,
}

/// Hook for tracking the auth session of the mounted component.
///
/// Fetches the current session once on mount and follows change
/// notifications until unmount, when the subscription is released.
///
/// # Arguments
/// * `client` - The auth service to bind to
/// * `navigator` - Performs the redirect after a successful sign-out
/// * `login_path` - Redirect destination after sign-out
///
/// # Example
/// ```ignore
/// let session = use_auth_session(client, navigator, "/login".into());
/// match session.state.phase {
///     ViewPhase::Loading => html! { <Spinner /> },
///     _ => html! { <button onclick={session.sign_out.reform(|_| ())}>{ "Sign Out" }</button> },
/// }
/// ```
#[hook]
pub fn use_auth_session<A>(
    client: Rc<A>,
    navigator: Rc<dyn Navigate>,
    login_path: AttrValue,
) -> UseAuthSession
where
    A: AuthClient + 'static,
{
    let state = use_reducer(SessionState::default);
    let binding = use_mut_ref(|| None::<SessionBinding<A>>);

    // Acquire on mount, release on unmount
    {
        let binding = binding.clone();
        let dispatcher = state.dispatcher();
        use_effect_with((), move |_| {
            let (bound, initial_fetch) = SessionBinding::mount(
                client,
                Rc::new(move |action: SessionAction| dispatcher.dispatch(action)),
            );
            *binding.borrow_mut() = Some(bound);
            spawn_local(initial_fetch);

            move || {
                let _ = binding.borrow_mut().take();
            }
        });
    }

    let sign_out = {
        let binding = binding.clone();
        Callback::from(move |_| {
            let task = binding
                .borrow()
                .as_ref()
                .and_then(|b| b.sign_out(navigator.clone(), login_path.to_string()));
            match task {
                Some(task) => spawn_local(task),
                None => log::debug!("Sign-out already in progress"),
            }
        })
    };

    UseAuthSession {
        state: (*state).clone(),
        sign_out,
    }
}
