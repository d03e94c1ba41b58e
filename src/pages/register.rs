//! Register Page
//!
//! New account creation form.

use leptos::*;

use crate::api;
use crate::state::global::SessionState;

/// Registration form component
#[component]
pub fn Register(
    /// Called after a successful registration
    on_registered: impl Fn() + 'static + Clone,
    /// Switch the unauthenticated view back to the login form
    on_show_login: impl Fn() + 'static,
) -> impl IntoView {
    let state = use_context::<SessionState>().expect("SessionState not found");

    let (username, set_username) = create_signal(String::new());
    let (email, set_email) = create_signal(String::new());
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
        let mail = email.get();
        let pass = password.get();
        let state = state.clone();
        let on_registered = on_registered.clone();
        spawn_local(async move {
            match api::register(&user, &pass, &mail).await {
                Ok(()) => {
                    state.show_success("Registration successful! Please log in now.");
                    on_registered();
                }
                Err(e) => {
                    set_error.set(Some(failure_text(&e)));
                    web_sys::console::error_1(&format!("Registration error: {}", e).into());
                }
            }
            set_submitting.set(false);
        });
    };

    view! {
        <div class="max-w-md mx-auto mt-10 bg-gray-800 rounded-xl p-6">
            <h2 class="text-2xl font-bold mb-6">"Register New User"</h2>

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
                    <label class="block text-sm text-gray-400 mb-2">"Email:"</label>
                    <input
                        type="email"
                        prop:value=move || email.get()
                        on:input=move |ev| set_email.set(event_target_value(&ev))
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

                {move || {
                    error.get().map(|msg| view! {
                        <p class="text-red-400 text-sm">{msg}</p>
                    })
                }}

                <button
                    type="submit"
                    disabled=move || submitting.get()
                    class="w-full px-6 py-3 bg-primary-600 hover:bg-primary-700 disabled:bg-gray-600
                           rounded-lg font-medium transition-colors"
                >
                    {move || if submitting.get() { "Registering..." } else { "Register" }}
                </button>
            </form>

            <p class="mt-4 text-center text-sm text-gray-400">
                "Already have an account? "
                <a
                    href="#"
                    on:click=move |ev: web_sys::MouseEvent| {
                        ev.prevent_default();
                        on_show_login();
                    }
                    class="text-primary-400 hover:text-primary-300"
                >
                    "Login here"
                </a>
            </p>
        </div>
    }
}

/// Inline error text for a failed registration: the server's own message
/// when it sent one, otherwise a generic line
fn failure_text(error: &api::ApiError) -> String {
    error
        .server_text
        .clone()
        .unwrap_or_else(|| "Registration failed. Please try again.".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ApiError;

    #[test]
    fn test_failure_text_prefers_server_message() {
        let err = ApiError {
            status: Some(400),
            message: "Username already exists".to_string(),
            server_text: Some("Username already exists".to_string()),
        };

        assert_eq!(failure_text(&err), "Username already exists");
    }

    #[test]
    fn test_failure_text_generic_fallback() {
        // Validation bodies without a usable string get the generic line
        let validation = ApiError {
            status: Some(400),
            message: r#"{"detail": [{"msg": "field required"}]}"#.to_string(),
            server_text: None,
        };
        assert_eq!(
            failure_text(&validation),
            "Registration failed. Please try again."
        );

        // So do connection failures
        let network = ApiError {
            status: None,
            message: "Network error: connection refused".to_string(),
            server_text: None,
        };
        assert_eq!(
            failure_text(&network),
            "Registration failed. Please try again."
        );
    }
}
