//! Dashboard page components
//!
//! - `DashboardPage`: resolves the auth context
//! - `DashboardContent`: session-bound overview with static tiles and actions

mod content;
mod page;

pub use page::DashboardPage;
