//! Toast Component
//!
//! Banner for the success and error messages held in global state.

use leptos::*;

use crate::state::use_global_state;

/// Notification banners, newest message per kind
#[component]
pub fn Toast() -> impl IntoView {
    let state = use_global_state();

    view! {
        <div class="fixed top-20 inset-x-0 z-50 flex flex-col items-center gap-2 px-4 pointer-events-none">
            {move || state.success.get().map(|message| view! {
                <Banner
                    message=message
                    tone="bg-green-50 border-green-600 text-green-800"
                    on_dismiss=move || state.success.set(None)
                />
            })}
            {move || state.error.get().map(|message| view! {
                <Banner
                    message=message
                    tone="bg-red-50 border-red-600 text-red-800"
                    on_dismiss=move || state.error.set(None)
                />
            })}
        </div>
    }
}

#[component]
fn Banner(
    message: String,
    tone: &'static str,
    on_dismiss: impl Fn() + 'static,
) -> impl IntoView {
    view! {
        <div
            role="status"
            class=format!(
                "pointer-events-auto w-full max-w-md flex items-start justify-between gap-4 \
                 border-l-4 rounded-md shadow px-4 py-3 {}",
                tone
            )
        >
            <p class="text-sm">{message}</p>
            <button
                class="text-lg leading-none opacity-60 hover:opacity-100"
                aria-label="Dismiss"
                on:click=move |_| on_dismiss()
            >
                "×"
            </button>
        </div>
    }
}
