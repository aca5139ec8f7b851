//! Session lifecycle for views that depend on a signed-in user
//!
//! - `SessionState`: the view phase machine and current user
//! - `SessionBinding`: subscription and fetch plumbing owned by a mounted view
//! - `Navigate`: where a successful sign-out sends the browser

mod binding;
mod navigate;
mod state;

pub use binding::{Dispatch, SessionBinding};
pub use navigate::{BrowserLocation, Navigate};
pub use state::{CurrentUser, SessionAction, SessionState, ViewPhase};
