//! Header Component
//!
//! Brand and navigation links, one per entry in the route table.

use leptos::*;
use leptos_router::*;

use crate::routes::ROUTES;

/// Persistent header shown above every page
#[component]
pub fn Header() -> impl IntoView {
    view! {
        <header id="app-header" class="bg-green-700 text-white shadow">
            <nav class="container mx-auto px-4">
                <div class="flex items-center justify-between h-16">
                    // Logo and brand
                    <A href="/" class="flex items-center space-x-3">
                        <span class="text-2xl">"🥗"</span>
                        <span class="text-xl font-bold">"Healthy Meal Analyzer"</span>
                    </A>

                    // Navigation links
                    <div class="flex items-center space-x-1">
                        {ROUTES
                            .iter()
                            .map(|&(path, page)| view! { <NavLink href=path label=page.label() /> })
                            .collect_view()}
                    </div>
                </div>
            </nav>
        </header>
    }
}

/// Individual navigation link
#[component]
fn NavLink(
    href: &'static str,
    label: &'static str,
) -> impl IntoView {
    view! {
        <A
            href=href
            exact=true
            class="px-4 py-2 rounded-lg text-green-50 hover:bg-green-600 transition-colors"
            active_class="bg-green-800"
        >
            {label}
        </A>
    }
}
