//! Home Page
//!
//! Introduction, shortcuts to the other pages, and client settings.

use leptos::*;
use leptos_router::*;

use crate::api;
use crate::routes::Page;
use crate::state::use_global_state;

/// Home page component
#[component]
pub fn Home() -> impl IntoView {
    view! {
        <div data-page={Page::Home.id()} class="space-y-10">
            <section class="text-center py-10">
                <h1 class="text-4xl font-bold text-green-700 mb-4">"Healthy Meal Analyzer"</h1>
                <p class="text-lg text-gray-600 max-w-2xl mx-auto">
                    "Snap a photo of your meal and get an instant assessment of its nutrition, \
                     balance, healthiness and sustainability, with suggestions for better choices."
                </p>

                <div class="mt-8 flex justify-center gap-4">
                    <A
                        href={Page::UploadMeal.path()}
                        class="px-6 py-3 bg-green-600 hover:bg-green-700 text-white rounded-lg font-medium"
                    >
                        "Analyze a Meal"
                    </A>
                    <A
                        href={Page::MealHistory.path()}
                        class="px-6 py-3 bg-white border border-green-600 text-green-700 hover:bg-green-50 rounded-lg font-medium"
                    >
                        "View History"
                    </A>
                </div>
            </section>

            <section class="grid md:grid-cols-3 gap-6">
                <Step number=1 title="Upload" text="Choose a clear photo of your plate." />
                <Step number=2 title="Analyze" text="Foods are identified and scored from 1 to 10." />
                <Step number=3 title="Improve" text="Get healthier and more sustainable swaps." />
            </section>

            <Settings />
        </div>
    }
}

#[component]
fn Step(number: u8, title: &'static str, text: &'static str) -> impl IntoView {
    view! {
        <div class="bg-white rounded-xl shadow p-6">
            <div class="w-10 h-10 rounded-full bg-green-100 text-green-700 flex items-center justify-center font-bold mb-3">
                {number}
            </div>
            <h2 class="text-lg font-semibold mb-1">{title}</h2>
            <p class="text-gray-600">{text}</p>
        </div>
    }
}

/// User id and API server settings, kept in local storage
#[component]
fn Settings() -> impl IntoView {
    let state = use_global_state();

    let (user_input, set_user_input) = create_signal(state.user_id.get_untracked());
    let (api_input, set_api_input) = create_signal(api::get_api_base());

    let on_save = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();

        let user_id = user_input.get_untracked();
        let user_id = match user_id.trim() {
            "" => api::DEFAULT_USER_ID,
            trimmed => trimmed,
        };
        if let Err(message) = api::validate_user_id(user_id) {
            state.show_error(&message);
            return;
        }
        state.set_user_id(user_id);

        let base = api::normalize_base(&api_input.get_untracked());
        if !base.is_empty() {
            api::set_api_base(&base);
        }
        state.show_success("Settings saved");
    };

    view! {
        <section class="bg-white rounded-xl shadow p-6">
            <h2 class="text-xl font-semibold mb-4">"Settings"</h2>

            <form on:submit=on_save class="grid md:grid-cols-2 gap-4">
                <label class="block">
                    <span class="text-sm text-gray-600">"User ID"</span>
                    <input
                        type="text"
                        prop:value=move || user_input.get()
                        on:input=move |ev| set_user_input.set(event_target_value(&ev))
                        class="mt-1 w-full border rounded-lg px-3 py-2"
                    />
                </label>
                <label class="block">
                    <span class="text-sm text-gray-600">"API Server"</span>
                    <input
                        type="url"
                        prop:value=move || api_input.get()
                        on:input=move |ev| set_api_input.set(event_target_value(&ev))
                        class="mt-1 w-full border rounded-lg px-3 py-2"
                    />
                </label>
                <div class="md:col-span-2">
                    <button
                        type="submit"
                        class="px-4 py-2 bg-green-600 hover:bg-green-700 text-white rounded-lg font-medium"
                    >
                        "Save"
                    </button>
                </div>
            </form>
        </section>
    }
}
