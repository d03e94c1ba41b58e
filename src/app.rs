//! App Root Component
//!
//! Main application component with the auth gate and global providers.

use leptos::*;

use crate::components::{Nav, Toast};
use crate::pages::{Chat, Login, Register};
use crate::state::global::{provide_session_state, SessionState};

/// Which unauthenticated view is showing
#[derive(Clone, Copy, PartialEq, Eq)]
enum AuthView {
    Login,
    Register,
}

/// Root application component
#[component]
pub fn App() -> impl IntoView {
    // Provide session state to all components
    provide_session_state();

    let state = use_context::<SessionState>().expect("SessionState not found");
    let (auth_view, set_auth_view) = create_signal(AuthView::Login);

    view! {
        <div class="min-h-screen bg-gray-900 text-white flex flex-col">
            // Navigation header
            <Nav />

            // Main content area, gated on the auth token
            <main class="flex-1 container mx-auto px-4 py-8">
                {move || {
                    if state.is_authenticated() {
                        view! { <Chat /> }.into_view()
                    } else {
                        match auth_view.get() {
                            AuthView::Login => view! {
                                <Login on_show_register=move || {
                                    set_auth_view.set(AuthView::Register)
                                } />
                            }
                            .into_view(),
                            AuthView::Register => view! {
                                <Register
                                    on_registered=move || set_auth_view.set(AuthView::Login)
                                    on_show_login=move || set_auth_view.set(AuthView::Login)
                                />
                            }
                            .into_view(),
                        }
                    }
                }}
            </main>

            // Toast notifications
            <Toast />
        </div>
    }
}
