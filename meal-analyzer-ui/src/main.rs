//! Healthy Meal Analyzer Web Client
//!
//! Entry point: installs the panic hook and mounts the app to the body.

use leptos::*;
use meal_analyzer_ui::App;

fn main() {
    // Set up panic hook for better error messages in WASM
    console_error_panic_hook::set_once();

    mount_to_body(|| view! { <App /> });
}
