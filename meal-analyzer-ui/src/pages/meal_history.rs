//! Meal History Page
//!
//! Every analyzed meal for the current user, newest first.

use leptos::*;
use leptos_router::*;

use crate::api;
use crate::components::{FeedbackCard, ListSkeleton};
use crate::routes::Page;
use crate::state::use_global_state;

/// Meal history page component
#[component]
pub fn MealHistory() -> impl IntoView {
    let state = use_global_state();

    let history = create_local_resource(
        move || state.user_id.get(),
        |user_id| async move {
            let result = api::fetch_history(&user_id).await;
            if let Err(e) = &result {
                web_sys::console::error_1(&format!("Failed to fetch meal history: {}", e).into());
            }
            result
        },
    );

    view! {
        <div data-page={Page::MealHistory.id()} class="space-y-6 max-w-4xl mx-auto">
            <div class="flex items-end justify-between">
                <div>
                    <h1 class="text-3xl font-bold text-green-700">"Your Meal History"</h1>
                    <p class="text-gray-600 mt-1">
                        "Meals analyzed for "
                        <span class="font-medium">{move || state.user_id.get()}</span>
                    </p>
                </div>
                <button
                    on:click=move |_| history.refetch()
                    class="px-4 py-2 bg-white border border-gray-300 hover:bg-gray-50 rounded-lg text-sm"
                >
                    "Refresh"
                </button>
            </div>

            <Transition fallback=move || view! { <ListSkeleton /> }>
                {move || history.get().map(|result| match result {
                    Ok(items) if items.is_empty() => view! { <EmptyHistory /> }.into_view(),
                    Ok(items) => view! {
                        <div class="space-y-4">
                            {items
                                .into_iter()
                                .map(|item| view! {
                                    <FeedbackCard
                                        feedback=item.feedback
                                        image=item.image_base64
                                        timestamp=item.timestamp
                                    />
                                })
                                .collect_view()}
                        </div>
                    }
                    .into_view(),
                    Err(e) => view! {
                        <div class="p-4 rounded-lg bg-red-50 border border-red-200 text-red-700">
                            "Could not load your meal history: " {e}
                        </div>
                    }
                    .into_view(),
                })}
            </Transition>
        </div>
    }
}

/// Shown when the user has no analyzed meals yet
#[component]
fn EmptyHistory() -> impl IntoView {
    view! {
        <div class="p-6 rounded-lg bg-blue-50 border border-blue-200 text-blue-800 text-center">
            <p class="mb-3">"No meals analyzed yet."</p>
            <A href={Page::UploadMeal.path()} class="text-green-700 font-medium hover:underline">
                "Analyze your first meal"
            </A>
        </div>
    }
}
