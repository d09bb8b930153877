//! App Root Component
//!
//! The shell: header and footer stay mounted while the routed region in
//! `<main>` swaps pages on navigation.

use leptos::*;
use leptos_router::*;

use crate::components::{Header, Toast};
use crate::pages::{Home, MealHistory, NotFound, UploadMeal};
use crate::routes::{resolve, Page};
use crate::state::provide_global_state;

/// Footer text shown under every page
pub const FOOTER_TEXT: &str = "© 2023 Healthy Meal Analyzer";

/// Root application component
#[component]
pub fn App() -> impl IntoView {
    // Provide global state to all components
    provide_global_state();

    view! {
        <Router>
            <DocumentTitle />
            <div class="App min-h-screen bg-gray-50 text-gray-900 flex flex-col">
                <Header />

                // Routed content region
                <main class="flex-1 container mx-auto px-4 py-8">
                    <Routes>
                        <Route path={Page::Home.path()} view=Home />
                        <Route path={Page::UploadMeal.path()} view=UploadMeal />
                        <Route path={Page::MealHistory.path()} view=MealHistory />
                        <Route path="/*any" view=NotFound />
                    </Routes>
                </main>

                <Footer />

                // Toast notifications
                <Toast />
            </div>
        </Router>
    }
}

/// Static footer
#[component]
fn Footer() -> impl IntoView {
    view! {
        <footer id="app-footer" class="py-3 mt-4 text-center text-gray-500">
            <p>{FOOTER_TEXT}</p>
        </footer>
    }
}

/// Keeps `document.title` in step with the current route
#[component]
fn DocumentTitle() -> impl IntoView {
    let location = use_location();

    create_effect(move |_| {
        let label = resolve(&location.pathname.get())
            .map(Page::label)
            .unwrap_or("Not Found");
        document().set_title(&format!("{} | Healthy Meal Analyzer", label));
    });
}
