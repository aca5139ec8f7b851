//! Custom Yew hooks for the frontend application.
//!
//! These hooks encapsulate reusable state logic to keep components clean and focused.

mod use_auth_session;

pub use use_auth_session::{use_auth_session, UseAuthSession};
