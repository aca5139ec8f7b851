/// Full-page navigation away from the current view
pub trait Navigate {
    fn navigate(&self, destination: &str);
}

/// Navigates by assigning `window.location.href`
#[derive(Debug, Default, Clone, Copy)]
pub struct BrowserLocation;

impl Navigate for BrowserLocation {
    fn navigate(&self, destination: &str) {
        let Some(window) = web_sys::window() else {
            log::error!("No global window, cannot navigate to {}", destination);
            return;
        };
        if let Err(e) = window.location().set_href(destination) {
            log::error!("Failed to navigate to {}: {:?}", destination, e);
        }
    }
}
