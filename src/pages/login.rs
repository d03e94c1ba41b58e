//! Login Page
//!
//! Exchanges credentials for an API token and opens the session.

use leptos::*;

use crate::api;
use crate::state::global::SessionState;

/// Login form component
#[component]
pub fn Login(
    /// Switch the unauthenticated view to the registration form
    on_show_register: impl Fn() + 'static,
) -> impl IntoView {
    let state = use_context::<SessionState>().expect("SessionState not found");

    let (username, set_username) = create_signal(String::new());
    let (password, set_password) = create_signal(String::new());
    let (error, set_error) = create_signal(None::<String>);
    let (submitting, set_submitting) = create_signal(false);

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();

        if submitting.get() {
            return;
        }

        set_error.set(None);
        set_submitting.set(true);

        let user = username.get();
        let pass = password.get();
        let state = state.clone();
        spawn_local(async move {
            match api::login(&user, &pass).await {
                Ok(token) if !token.is_empty() => {
                    api::store_token(&token);
                    state.login(token);
                }
                Ok(_) => {
                    set_error.set(Some("Login failed: Token not received.".to_string()));
                }
                Err(e) => {
                    set_error.set(Some(
                        "Login failed. Check username and password.".to_string(),
                    ));
                    web_sys::console::error_1(&format!("Login error: {}", e).into());
                }
            }
            set_submitting.set(false);
        });
    };

    view! {
        <div class="max-w-md mx-auto mt-10 bg-gray-800 rounded-xl p-6">
            <h2 class="text-2xl font-bold mb-6">"API Login"</h2>

            <form on:submit=on_submit class="space-y-4">
                <div>
                    <label class="block text-sm text-gray-400 mb-2">"Username:"</label>
                    <input
                        type="text"
                        prop:value=move || username.get()
                        on:input=move |ev| set_username.set(event_target_value(&ev))
                        required
                        class="w-full bg-gray-700 rounded-lg px-4 py-3
                               border border-gray-600 focus:border-primary-500 focus:outline-none"
                    />
                </div>

                <div>
                    <label class="block text-sm text-gray-400 mb-2">"Password:"</label>
                    <input
                        type="password"
                        prop:value=move || password.get()
                        on:input=move |ev| set_password.set(event_target_value(&ev))
                        required
                        class="w-full bg-gray-700 rounded-lg px-4 py-3
                               border border-gray-600 focus:border-primary-500 focus:outline-none"
                    />
                </div>

                <button
                    type="submit"
                    disabled=move || submitting.get()
                    class="w-full px-6 py-3 bg-primary-600 hover:bg-primary-700 disabled:bg-gray-600
                           rounded-lg font-medium transition-colors"
                >
                    {move || if submitting.get() { "Logging in..." } else { "Login" }}
                </button>

                // Inline error under the form controls
                {move || {
                    error.get().map(|msg| view! {
                        <p class="text-red-400 text-sm mt-2">{msg}</p>
                    })
                }}
            </form>

            <p class="mt-4 text-center text-sm text-gray-400">
                "Don't have an account? "
                <a
                    href="#"
                    on:click=move |ev: web_sys::MouseEvent| {
                        ev.prevent_default();
                        on_show_register();
                    }
                    class="text-primary-400 hover:text-primary-300"
                >
                    "Register here"
                </a>
            </p>
        </div>
    }
}
