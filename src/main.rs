//! Smart Match UI
//!
//! WASM entry point for the Lost & Found Smart Match client.

use leptos::*;

use smartmatch_ui::App;

fn main() {
    // Set up panic hook for better error messages in WASM
    console_error_panic_hook::set_once();

    // Mount the app to the document body
    mount_to_body(|| view! { <App /> });
}
