//! Navigation Component
//!
//! Header bar with the brand and session controls.

use leptos::*;

use crate::api;
use crate::state::global::SessionState;

/// Navigation header component
#[component]
pub fn Nav() -> impl IntoView {
    let state = use_context::<SessionState>().expect("SessionState not found");

    let state_for_logout = state.clone();
    let on_logout = move |_| {
        api::clear_token();
        state_for_logout.logout();
    };

    view! {
        <nav class="bg-gray-800 border-b border-gray-700">
            <div class="container mx-auto px-4">
                <div class="flex items-center justify-between h-16">
                    // Brand
                    <div class="flex items-center space-x-3">
                        <span class="text-2xl">"🎒"</span>
                        <span class="text-xl font-bold text-white">"Lost & Found Smart Match"</span>
                    </div>

                    // Session controls, only while logged in
                    {move || {
                        if state.token.get().is_some() {
                            let on_logout = on_logout.clone();
                            view! {
                                <div class="flex items-center space-x-1">
                                    // The assistant is the only content view, so its tab stays active
                                    <span class="px-4 py-2 rounded-lg bg-gray-700 text-white font-medium">
                                        "💬 Talk to Assistant"
                                    </span>
                                    <button
                                        on:click=on_logout
                                        class="px-4 py-2 rounded-lg text-gray-300 hover:text-white hover:bg-gray-700 transition-colors"
                                    >
                                        "Logout"
                                    </button>
                                </div>
                            }.into_view()
                        } else {
                            view! {}.into_view()
                        }
                    }}
                </div>
            </div>
        </nav>
    }
}
