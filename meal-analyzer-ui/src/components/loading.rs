//! Loading Component
//!
//! Placeholders shown while a request is in flight.

use leptos::*;

/// Spinner with a short status line
#[component]
pub fn Loading(
    #[prop(into, default = "Loading...".to_string())]
    message: String,
) -> impl IntoView {
    view! {
        <div class="flex flex-col items-center justify-center py-10 gap-3 text-green-700">
            <div class="w-10 h-10 rounded-full border-4 border-green-200 border-t-green-600 animate-spin" />
            <p class="text-sm">{message}</p>
        </div>
    }
}

/// Placeholder cards shaped like history entries
#[component]
pub fn ListSkeleton(
    #[prop(default = 3)]
    count: usize,
) -> impl IntoView {
    view! {
        <div class="space-y-4 animate-pulse">
            {(0..count).map(|_| view! {
                <div class="flex gap-4 p-4 bg-white rounded-xl shadow">
                    <div class="w-24 h-24 rounded-lg bg-green-100" />
                    <div class="flex-1 space-y-2 py-1">
                        <div class="h-3 w-1/3 rounded bg-gray-200" />
                        <div class="h-3 rounded bg-gray-200" />
                        <div class="h-3 w-5/6 rounded bg-gray-200" />
                    </div>
                </div>
            }).collect_view()}
        </div>
    }
}
