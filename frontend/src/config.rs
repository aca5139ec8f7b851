//! Auth service configuration, fixed at build time.
//!
//! | Variable           | Default                    |
//! |--------------------|----------------------------|
//! | `AUTH_URL`         | origin of the current page |
//! | `AUTH_ANON_KEY`    | empty                      |
//! | `AUTH_STORAGE_KEY` | `dashboard.auth.session`   |
//! | `AUTH_LOGIN_PATH`  | `/login`                   |

use crate::utils;

pub const DEFAULT_STORAGE_KEY: &str = "dashboard.auth.session";
pub const DEFAULT_LOGIN_PATH: &str = "/login";

#[derive(Debug, Clone, PartialEq)]
pub struct AuthConfig {
    /// Base URL of the auth service
    pub url: String,
    /// Public key sent as the `apikey` header
    pub anon_key: String,
    /// localStorage key holding the persisted session
    pub storage_key: String,
    /// Where the browser goes after signing out
    pub login_path: String,
}

impl AuthConfig {
    pub fn from_build_env() -> Self {
        Self::resolve(
            option_env!("AUTH_URL"),
            option_env!("AUTH_ANON_KEY"),
            option_env!("AUTH_STORAGE_KEY"),
            option_env!("AUTH_LOGIN_PATH"),
            utils::get_base_url,
        )
    }

    fn resolve(
        url: Option<&str>,
        anon_key: Option<&str>,
        storage_key: Option<&str>,
        login_path: Option<&str>,
        origin: impl FnOnce() -> String,
    ) -> Self {
        Self {
            url: set(url)
                .map(|u| u.trim_end_matches('/').to_string())
                .unwrap_or_else(origin),
            anon_key: set(anon_key).unwrap_or_default().to_string(),
            storage_key: set(storage_key)
                .unwrap_or(DEFAULT_STORAGE_KEY)
                .to_string(),
            login_path: set(login_path).unwrap_or(DEFAULT_LOGIN_PATH).to_string(),
        }
    }

    /// Build a full auth URL from a path (e.g., "/auth/v1/logout")
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.url, path)
    }
}

fn set(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
