//! Not Found Page
//!
//! Rendered inside the shell for any path missing from the route table.

use leptos::*;
use leptos_router::*;

use crate::routes::{Page, NOT_FOUND_ID};

/// 404 Not Found page
#[component]
pub fn NotFound() -> impl IntoView {
    view! {
        <div data-page={NOT_FOUND_ID} class="flex flex-col items-center justify-center min-h-[50vh] text-center">
            <div class="text-6xl mb-4">"🍽️"</div>
            <h1 class="text-3xl font-bold mb-2">"Page Not Found"</h1>
            <p class="text-gray-500 mb-6">"The page you're looking for doesn't exist."</p>
            <A
                href={Page::Home.path()}
                class="px-6 py-3 bg-green-600 hover:bg-green-700 text-white rounded-lg font-medium transition-colors"
            >
                "Back to Home"
            </A>
        </div>
    }
}
