//! Dashboard page - session-bound overview

use super::content::{QUICK_ACTIONS, RECENT_ACTIVITY, STAT_TILES};
use crate::auth::AuthContext;
use crate::components::StatCard;
use crate::hooks::use_auth_session;
use crate::session::{SessionState, ViewPhase};
use yew::prelude::*;

// =============================================================================
// Dashboard Page - resolves the injected auth context
// =============================================================================

#[function_component(DashboardPage)]
pub fn dashboard_page() -> Html {
    match use_context::<AuthContext>() {
        Some(auth) => html! { <DashboardContent {auth} /> },
        None => {
            log::error!("DashboardPage rendered without an AuthContext provider");
            html! {
                <div class="error-state">
                    <p>{ "Authentication is not configured." }</p>
                </div>
            }
        }
    }
}

/// What the content area shows for a given session state
#[derive(Debug, Clone, PartialEq, Eq)]
enum Screen {
    Spinner,
    LoginPrompt,
    Dashboard { email: String, signing_out: bool },
}

fn screen_for(state: &SessionState) -> Screen {
    match (state.phase, &state.user) {
        (ViewPhase::Loading, _) => Screen::Spinner,
        (ViewPhase::Unauthenticated, _) | (ViewPhase::Ready, None) => Screen::LoginPrompt,
        (ViewPhase::Ready, Some(user)) => Screen::Dashboard {
            email: user.email.clone(),
            signing_out: false,
        },
        (ViewPhase::SigningOut, Some(user)) => Screen::Dashboard {
            email: user.email.clone(),
            signing_out: true,
        },
        // Signed out, redirect still landing
        (ViewPhase::SigningOut, None) => Screen::Spinner,
    }
}

// =============================================================================
// Dashboard Content - bound to the auth session while mounted
// =============================================================================

#[derive(Properties, PartialEq, Clone)]
pub struct DashboardContentProps {
    pub auth: AuthContext,
}

#[function_component(DashboardContent)]
pub fn dashboard_content(props: &DashboardContentProps) -> Html {
    let auth = &props.auth;
    let login_path = AttrValue::from(auth.login_path().to_string());
    let session = use_auth_session(
        auth.client.clone(),
        auth.navigator.clone(),
        login_path.clone(),
    );

    match screen_for(&session.state) {
        Screen::Spinner => html! {
            <div class="loading">
                <div class="spinner"></div>
            </div>
        },
        Screen::LoginPrompt => html! {
            <div class="empty-state">
                <p>{ "Please log in to access the dashboard." }</p>
                <a class="login-link" href={login_path}>{ "Go to Login" }</a>
            </div>
        },
        Screen::Dashboard { email, signing_out } => {
            let on_sign_out = session.sign_out.reform(|_: MouseEvent| ());

            html! {
                <div class="dashboard-container">
                    <header class="dashboard-header">
                        <h1>{ "Welcome back!" }</h1>
                        <p class="user-email">{ email }</p>
                    </header>

                    <section class="stats-grid">
                        {
                            STAT_TILES.iter().map(|tile| {
                                html! {
                                    <StatCard
                                        key={tile.title}
                                        title={tile.title}
                                        value={tile.value.display()}
                                        icon={tile.icon}
                                        trend={tile.trend}
                                        trend_value={tile.trend_value}
                                    />
                                }
                            }).collect::<Html>()
                        }
                    </section>

                    <div class="dashboard-grid">
                        <section class="panel quick-actions">
                            <h2 class="section-title">{ "Quick Actions" }</h2>
                            <div class="actions-grid">
                                {
                                    QUICK_ACTIONS.iter().map(|action| {
                                        html! {
                                            <button
                                                key={action.label}
                                                class={classes!("action-button", action.color)}
                                            >
                                                <div class="action-icon">{ action.icon }</div>
                                                <div class="action-label">{ action.label }</div>
                                            </button>
                                        }
                                    }).collect::<Html>()
                                }
                            </div>
                        </section>

                        <section class="panel recent-activity">
                            <h2 class="section-title">{ "Recent Activity" }</h2>
                            <div class="activity-list">
                                {
                                    RECENT_ACTIVITY.iter().map(|item| {
                                        html! {
                                            <div key={item.action} class="activity-item">
                                                <span class="activity-icon">{ item.icon }</span>
                                                <div class="activity-body">
                                                    <p class="activity-action">{ item.action }</p>
                                                    <p class="activity-time muted">{ item.time }</p>
                                                </div>
                                            </div>
                                        }
                                    }).collect::<Html>()
                                }
                            </div>
                        </section>
                    </div>

                    <div class="sign-out-row">
                        <button
                            class="logout-button"
                            onclick={on_sign_out}
                            disabled={signing_out}
                        >
                            { if signing_out { "Signing out..." } else { "Sign Out" } }
                        </button>
                    </div>
                </div>
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::CurrentUser;

    fn state(phase: ViewPhase, user: Option<&str>) -> SessionState {
        SessionState {
            phase,
            user: user.map(|email| CurrentUser {
                id: "u1".to_string(),
                email: email.to_string(),
            }),
        }
    }

    #[test]
    fn test_screen_per_phase() {
        assert_eq!(screen_for(&state(ViewPhase::Loading, None)), Screen::Spinner);
        assert_eq!(
            screen_for(&state(ViewPhase::Unauthenticated, None)),
            Screen::LoginPrompt
        );
        assert_eq!(
            screen_for(&state(ViewPhase::Ready, Some("a@b.com"))),
            Screen::Dashboard {
                email: "a@b.com".to_string(),
                signing_out: false,
            }
        );
        assert_eq!(
            screen_for(&state(ViewPhase::SigningOut, Some("a@b.com"))),
            Screen::Dashboard {
                email: "a@b.com".to_string(),
                signing_out: true,
            }
        );
    }

    #[test]
    fn test_signed_out_before_redirect_shows_spinner() {
        assert_eq!(
            screen_for(&state(ViewPhase::SigningOut, None)),
            Screen::Spinner
        );
    }
}
