mod auth;
mod components;
pub mod config;
mod hooks;
mod pages;
pub mod session;
pub mod utils;

#[cfg(test)]
mod test_log;

use auth::{AuthContext, HttpAuthClient};
use config::AuthConfig;
use pages::{dashboard::DashboardPage, not_found::NotFoundPage};
use session::BrowserLocation;
use std::rc::Rc;
use yew::prelude::*;
use yew_router::prelude::*;

#[derive(Clone, Routable, PartialEq)]
pub enum Route {
    #[at("/")]
    Home,
    #[at("/dashboard")]
    Dashboard,
    #[not_found]
    #[at("/404")]
    NotFound,
}

fn switch(routes: Route) -> Html {
    match routes {
        Route::Home | Route::Dashboard => html! { <DashboardPage /> },
        Route::NotFound => html! { <NotFoundPage /> },
    }
}

#[function_component(App)]
fn app() -> Html {
    let auth = use_memo((), |_| {
        let config = AuthConfig::from_build_env();
        log::info!("Using auth service at {}", config.url);
        AuthContext {
            client: Rc::new(HttpAuthClient::new(config)),
            navigator: Rc::new(BrowserLocation),
        }
    });

    html! {
        <ContextProvider<AuthContext> context={(*auth).clone()}>
            <BrowserRouter>
                <Switch<Route> render={switch} />
            </BrowserRouter>
        </ContextProvider<AuthContext>>
    }
}

#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn run_app() {
    wasm_logger::init(wasm_logger::Config::default());
    yew::Renderer::<App>::new().render();
}
