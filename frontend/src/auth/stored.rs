//! Auth client over a persisted session.
//!
//! The stored session is only ever handed out after expiry has been
//! checked and, where possible, refreshed. Concurrent callers (the initial
//! fetch and each subscriber's initial session) share one resolution, so a
//! rotating refresh token is spent once.

use futures_util::future::{FutureExt, LocalBoxFuture, Shared};
use shared::{
    AuthChangeEvent, AuthClient, AuthError, AuthListener, ListenerRegistry, Session, Subscription,
};
use std::cell::RefCell;
use std::rc::Rc;

/// Runs a detached task on the current thread
pub type Spawner = Rc<dyn Fn(LocalBoxFuture<'static, ()>)>;

/// Where sessions are persisted and how they are renewed and revoked
#[allow(async_fn_in_trait)]
pub trait SessionBackend {
    fn load(&self) -> Result<Option<Session>, AuthError>;

    fn save(&self, session: &Session) -> Result<(), AuthError>;

    fn clear(&self) -> Result<(), AuthError>;

    /// Current time as unix seconds
    fn now_secs(&self) -> i64;

    /// Exchange a refresh token for a new session.
    /// A rejected token must be reported as `AuthError::Credentials`.
    async fn refresh(&self, refresh_token: &str) -> Result<Session, AuthError>;

    /// Revoke the session server-side
    async fn revoke(&self, session: &Session) -> Result<(), AuthError>;
}

type Resolution = Shared<LocalBoxFuture<'static, Result<Option<Session>, AuthError>>>;

struct Inner<B> {
    backend: B,
    listeners: ListenerRegistry,
    pending: RefCell<Option<Resolution>>,
}

impl<B: SessionBackend + 'static> Inner<B> {
    /// Join the resolution in flight, or start one
    fn resolve(self: &Rc<Self>) -> Resolution {
        if let Some(pending) = self.pending.borrow().as_ref() {
            return pending.clone();
        }

        let inner = self.clone();
        let resolution = async move {
            let result = inner.resolve_stored().await;
            inner.pending.borrow_mut().take();
            result
        }
        .boxed_local()
        .shared();

        *self.pending.borrow_mut() = Some(resolution.clone());
        resolution
    }

    async fn resolve_stored(&self) -> Result<Option<Session>, AuthError> {
        let Some(session) = self.backend.load()? else {
            return Ok(None);
        };
        if !session.is_expired(self.backend.now_secs()) {
            return Ok(Some(session));
        }

        let Some(refresh_token) = session.refresh_token.as_deref() else {
            log::info!("Stored session expired and cannot be refreshed");
            self.discard()?;
            return Ok(None);
        };

        match self.backend.refresh(refresh_token).await {
            Ok(fresh) => {
                self.backend.save(&fresh)?;
                self.listeners
                    .emit(AuthChangeEvent::TokenRefreshed, Some(fresh.clone()));
                Ok(Some(fresh))
            }
            Err(AuthError::Credentials(message)) => {
                log::warn!("Refresh token rejected: {}", message);
                self.discard()?;
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    fn discard(&self) -> Result<(), AuthError> {
        self.backend.clear()?;
        self.listeners.emit(AuthChangeEvent::SignedOut, None);
        Ok(())
    }
}

pub struct StoredSessionClient<B> {
    inner: Rc<Inner<B>>,
    spawn: Spawner,
}

impl<B: SessionBackend + 'static> StoredSessionClient<B> {
    pub fn new(backend: B, spawn: Spawner) -> Self {
        Self {
            inner: Rc::new(Inner {
                backend,
                listeners: ListenerRegistry::new(),
                pending: RefCell::new(None),
            }),
            spawn,
        }
    }

    pub fn backend(&self) -> &B {
        &self.inner.backend
    }

    /// Registry shared with every subscriber, for changes seen elsewhere
    pub fn listeners(&self) -> &ListenerRegistry {
        &self.inner.listeners
    }
}

impl<B: SessionBackend + 'static> AuthClient for StoredSessionClient<B> {
    async fn get_session(&self) -> Result<Option<Session>, AuthError> {
        self.inner.resolve().await
    }

    fn on_auth_state_change(&self, listener: AuthListener) -> Subscription {
        let subscription = self.inner.listeners.subscribe(listener);

        // The initial session is delivered on a later tick, never inline
        let id = subscription.id();
        let inner = self.inner.clone();
        (self.spawn)(
            async move {
                let session = inner.resolve().await.unwrap_or_else(|e| {
                    log::warn!("Failed to resolve stored session: {}", e);
                    None
                });
                if !inner
                    .listeners
                    .emit_to(id, AuthChangeEvent::InitialSession, session)
                {
                    log::debug!("Subscription {} released before initial session", id);
                }
            }
            .boxed_local(),
        );

        subscription
    }

    async fn sign_out(&self) -> Result<(), AuthError> {
        let backend = &self.inner.backend;
        if let Some(session) = backend.load()? {
            backend.revoke(&session).await?;
        }
        backend.clear()?;
        self.inner.listeners.emit(AuthChangeEvent::SignedOut, None);
        Ok(())
    }
}
