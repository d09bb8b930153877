//! Upload Meal Page
//!
//! Pick a meal photo, preview it, and send it for analysis.

use leptos::*;
use leptos_router::*;
use wasm_bindgen::{closure::Closure, JsCast};

use crate::api::{self, AnalyzeResponse};
use crate::components::{FeedbackCard, Loading};
use crate::routes::Page;
use crate::state::use_global_state;

/// Largest photo accepted; base64 inflates it by a third on the wire
pub const MAX_UPLOAD_BYTES: f64 = 7.0 * 1024.0 * 1024.0;

/// Check a selected file before reading it
pub fn validate_image_file(mime_type: &str, size: f64) -> Result<(), String> {
    if !mime_type.starts_with("image/") {
        return Err("Please choose an image file (JPEG, PNG, GIF or WebP).".to_string());
    }
    if size <= 0.0 {
        return Err("The selected file is empty.".to_string());
    }
    if size > MAX_UPLOAD_BYTES {
        return Err(format!(
            "The photo is {:.1} MB; the limit is {:.0} MB.",
            size / (1024.0 * 1024.0),
            MAX_UPLOAD_BYTES / (1024.0 * 1024.0)
        ));
    }
    Ok(())
}

/// Upload meal page component
#[component]
pub fn UploadMeal() -> impl IntoView {
    let state = use_global_state();

    let (preview, set_preview) = create_signal(None::<String>);
    let (file_error, set_file_error) = create_signal(None::<String>);
    let (submitting, set_submitting) = create_signal(false);
    let (result, set_result) = create_signal(None::<AnalyzeResponse>);

    let on_file_change = move |ev: web_sys::Event| {
        set_result.set(None);

        let Some(input) = ev
            .target()
            .and_then(|t| t.dyn_into::<web_sys::HtmlInputElement>().ok())
        else {
            return;
        };
        let Some(file) = input.files().and_then(|files| files.get(0)) else {
            set_preview.set(None);
            return;
        };

        if let Err(message) = validate_image_file(&file.type_(), file.size()) {
            set_file_error.set(Some(message));
            set_preview.set(None);
            return;
        }
        set_file_error.set(None);

        let Ok(reader) = web_sys::FileReader::new() else {
            set_file_error.set(Some("This browser cannot read files.".to_string()));
            return;
        };

        let onload = {
            let reader = reader.clone();
            Closure::wrap(Box::new(move |_: web_sys::Event| {
                match reader.result().ok().and_then(|r| r.as_string()) {
                    Some(data_url) => set_preview.set(Some(data_url)),
                    None => set_file_error.set(Some("Could not read the selected file.".to_string())),
                }
            }) as Box<dyn FnMut(_)>)
        };

        reader.set_onload(Some(onload.as_ref().unchecked_ref()));
        onload.forget();

        if reader.read_as_data_url(&file).is_err() {
            set_file_error.set(Some("Could not read the selected file.".to_string()));
        }
    };

    let on_submit = move |_| {
        let Some(data_url) = preview.get_untracked() else {
            return;
        };

        set_submitting.set(true);
        set_result.set(None);

        let user_id = state.user_id.get_untracked();
        spawn_local(async move {
            match api::analyze_meal(&data_url, &user_id).await {
                Ok(response) => {
                    set_result.set(Some(response));
                    state.show_success("Meal analyzed");
                }
                Err(e) => {
                    web_sys::console::error_1(&format!("Meal analysis failed: {}", e).into());
                    state.show_error(&format!("Analysis failed: {}", e));
                }
            }
            set_submitting.set(false);
        });
    };

    view! {
        <div data-page={Page::UploadMeal.id()} class="space-y-8 max-w-3xl mx-auto">
            <div>
                <h1 class="text-3xl font-bold text-green-700">"Analyze Your Meal"</h1>
                <p class="text-gray-600 mt-1">"Upload a photo and get nutritional feedback."</p>
            </div>

            <section class="bg-white rounded-xl shadow p-6 space-y-4">
                <label
                    class="flex items-center justify-center px-4 py-6 rounded-lg cursor-pointer
                           border-2 border-dashed border-gray-300 hover:border-green-500"
                >
                    <input
                        type="file"
                        accept="image/*"
                        class="hidden"
                        on:change=on_file_change
                        disabled=move || submitting.get()
                    />
                    <span class="flex items-center gap-2 text-gray-600">
                        <span>"📷"</span>
                        {move || if preview.get().is_some() { "Choose a different photo" } else { "Choose a meal photo" }}
                    </span>
                </label>

                {move || file_error.get().map(|message| view! {
                    <div class="text-sm text-red-700 bg-red-50 border border-red-200 rounded p-3">
                        {message}
                    </div>
                })}

                {move || preview.get().map(|src| view! {
                    <img src=src alt="Selected meal" class="max-h-80 mx-auto rounded-lg" />
                })}

                <button
                    on:click=on_submit
                    disabled=move || submitting.get() || preview.get().is_none()
                    class="w-full px-6 py-3 bg-green-600 hover:bg-green-700 disabled:bg-gray-300
                           text-white rounded-lg font-medium transition-colors"
                >
                    {move || if submitting.get() { "Analyzing..." } else { "Analyze Meal" }}
                </button>
            </section>

            <Show when=move || submitting.get()>
                <Loading message="Analyzing your meal..." />
            </Show>

            {move || result.get().map(|response| view! {
                <section class="space-y-3">
                    <h2 class="text-xl font-semibold">"Analysis"</h2>
                    <FeedbackCard feedback=response.feedback />
                    <A href={Page::MealHistory.path()} class="text-green-700 hover:underline">
                        "See all your meals →"
                    </A>
                </section>
            })}
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_images() {
        assert!(validate_image_file("image/jpeg", 120_000.0).is_ok());
        assert!(validate_image_file("image/png", MAX_UPLOAD_BYTES).is_ok());
    }

    #[test]
    fn test_rejects_non_images() {
        assert!(validate_image_file("application/pdf", 1000.0).is_err());
        assert!(validate_image_file("", 1000.0).is_err());
    }

    #[test]
    fn test_rejects_empty_and_large() {
        assert!(validate_image_file("image/png", 0.0).is_err());
        let err = validate_image_file("image/png", MAX_UPLOAD_BYTES + 1.0).unwrap_err();
        assert!(err.contains("limit is 7 MB"));
    }
}
