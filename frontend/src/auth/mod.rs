//! Auth service wiring for the app
//!
//! The client is created once in `App` and handed down through a Yew
//! context, so views never reach for a global.

mod client;
mod storage;
mod stored;

pub use client::HttpAuthClient;

use crate::session::Navigate;
use std::rc::Rc;

/// Auth dependencies injected into views
#[derive(Clone)]
pub struct AuthContext {
    pub client: Rc<HttpAuthClient>,
    pub navigator: Rc<dyn Navigate>,
}

impl AuthContext {
    pub fn login_path(&self) -> &str {
        &self.client.config().login_path
    }
}

impl PartialEq for AuthContext {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.client, &other.client)
    }
}
