use crate::Route;
use yew::prelude::*;
use yew_router::prelude::*;

#[function_component(NotFoundPage)]
pub fn not_found_page() -> Html {
    html! {
        <div class="banned-container">
            <div class="banned-content">
                <div class="banned-icon">{ "🔍" }</div>
                <h1>{ "Page Not Found" }</h1>
                <p class="banned-message">
                    { "The page you are looking for does not exist." }
                </p>
                <Link<Route> to={Route::Dashboard}>{ "Back to the dashboard" }</Link<Route>>
            </div>
        </div>
    }
}
