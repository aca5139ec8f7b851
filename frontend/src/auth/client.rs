//! Browser auth client for a GoTrue-style REST API.

use super::storage;
use super::stored::{SessionBackend, StoredSessionClient};
use crate::config::AuthConfig;
use crate::utils;
use futures_util::future::LocalBoxFuture;
use gloo::events::EventListener;
use gloo_net::http::{Request, Response};
use shared::{AuthChangeEvent, AuthClient, AuthError, AuthListener, Session, Subscription};
use std::rc::Rc;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;

const TOKEN_REFRESH_PATH: &str = "/auth/v1/token?grant_type=refresh_token";
const LOGOUT_PATH: &str = "/auth/v1/logout";

/// Pull a human-readable message out of an auth error body
fn error_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|data| {
            ["error_description", "msg", "message", "error"]
                .iter()
                .find_map(|field| data.get(*field).and_then(|v| v.as_str()).map(String::from))
        })
        .unwrap_or_else(|| body.trim().to_string())
}

async fn response_error(response: &Response) -> String {
    error_message(&response.text().await.unwrap_or_default())
}

/// Logout statuses that leave the session revoked.
/// 401/404 mean the token is already gone server-side.
fn logout_accepted(status: u16) -> bool {
    matches!(status, 200..=299 | 401 | 404)
}

/// localStorage persistence plus the auth service's token endpoints
pub struct BrowserBackend {
    config: AuthConfig,
}

impl SessionBackend for BrowserBackend {
    fn load(&self) -> Result<Option<Session>, AuthError> {
        storage::load_session(&self.config.storage_key)
    }

    fn save(&self, session: &Session) -> Result<(), AuthError> {
        storage::save_session(&self.config.storage_key, session)
    }

    fn clear(&self) -> Result<(), AuthError> {
        storage::clear_session(&self.config.storage_key)
    }

    fn now_secs(&self) -> i64 {
        utils::now_secs()
    }

    async fn refresh(&self, refresh_token: &str) -> Result<Session, AuthError> {
        let response = Request::post(&self.config.endpoint(TOKEN_REFRESH_PATH))
            .header("apikey", &self.config.anon_key)
            .json(&serde_json::json!({ "refresh_token": refresh_token }))
            .map_err(|e| AuthError::Parse(e.to_string()))?
            .send()
            .await
            .map_err(|e| AuthError::Network(e.to_string()))?;

        match response.status() {
            200..=299 => response
                .json::<Session>()
                .await
                .map_err(|e| AuthError::Parse(e.to_string())),
            400 | 401 => Err(AuthError::Credentials(response_error(&response).await)),
            status => Err(AuthError::Server {
                status,
                message: response_error(&response).await,
            }),
        }
    }

    async fn revoke(&self, session: &Session) -> Result<(), AuthError> {
        let response = Request::post(&self.config.endpoint(LOGOUT_PATH))
            .header("apikey", &self.config.anon_key)
            .header("Authorization", &format!("Bearer {}", session.access_token))
            .send()
            .await
            .map_err(|e| AuthError::Network(e.to_string()))?;

        let status = response.status();
        if logout_accepted(status) {
            Ok(())
        } else {
            Err(AuthError::Server {
                status,
                message: response_error(&response).await,
            })
        }
    }
}

pub struct HttpAuthClient {
    client: StoredSessionClient<BrowserBackend>,
    // Sign-in/out performed in another tab
    _storage_listener: Option<EventListener>,
}

impl HttpAuthClient {
    pub fn new(config: AuthConfig) -> Self {
        let client = StoredSessionClient::new(
            BrowserBackend { config },
            Rc::new(|task: LocalBoxFuture<'static, ()>| spawn_local(task)),
        );

        let storage_listener = web_sys::window().map(|window| {
            let listeners = client.listeners().clone();
            let key = client.backend().config.storage_key.clone();
            EventListener::new(&window, "storage", move |event| {
                let Some(event) = event.dyn_ref::<web_sys::StorageEvent>() else {
                    return;
                };
                if event.key().as_deref() != Some(key.as_str()) {
                    return;
                }
                match event.new_value().as_deref().and_then(storage::decode_session) {
                    Some(session) => listeners.emit(AuthChangeEvent::SignedIn, Some(session)),
                    None => listeners.emit(AuthChangeEvent::SignedOut, None),
                }
            })
        });

        Self {
            client,
            _storage_listener: storage_listener,
        }
    }

    pub fn config(&self) -> &AuthConfig {
        &self.client.backend().config
    }
}

impl AuthClient for HttpAuthClient {
    async fn get_session(&self) -> Result<Option<Session>, AuthError> {
        self.client.get_session().await
    }

    fn on_auth_state_change(&self, listener: AuthListener) -> Subscription {
        self.client.on_auth_state_change(listener)
    }

    async fn sign_out(&self) -> Result<(), AuthError> {
        self.client.sign_out().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_message_fields() {
        assert_eq!(
            error_message(r#"{"error":"invalid_grant","error_description":"Refresh Token Not Found"}"#),
            "Refresh Token Not Found"
        );
        assert_eq!(error_message(r#"{"code":500,"msg":"boom"}"#), "boom");
        assert_eq!(error_message("  Bad Gateway\n"), "Bad Gateway");
    }

    #[test]
    fn test_logout_status_mapping() {
        for status in [200, 204, 401, 404] {
            assert!(logout_accepted(status), "status {}", status);
        }
        for status in [400, 403, 429, 500, 503] {
            assert!(!logout_accepted(status), "status {}", status);
        }
    }
}
