//! Feedback Card Component
//!
//! Displays one analyzed meal: photo, time, and the model's assessment.

use leptos::*;

/// Render an RFC 3339 timestamp for humans, falling back to the raw text
pub fn format_timestamp(timestamp: &str) -> String {
    chrono::DateTime::parse_from_rfc3339(timestamp)
        .map(|dt| dt.format("%b %-d, %Y %H:%M").to_string())
        .unwrap_or_else(|_| timestamp.to_string())
}

/// Card showing a single assessment
#[component]
pub fn FeedbackCard(
    #[prop(into)]
    feedback: String,
    #[prop(optional, into)]
    image: Option<String>,
    #[prop(optional, into)]
    timestamp: Option<String>,
) -> impl IntoView {
    view! {
        <article class="bg-white rounded-xl shadow p-6 flex flex-col md:flex-row gap-6">
            {image
                .filter(|src| !src.is_empty())
                .map(|src| view! {
                    <img
                        src=src
                        alt="Meal photo"
                        class="w-full md:w-48 h-48 object-cover rounded-lg"
                    />
                })}

            <div class="flex-1">
                {timestamp.map(|ts| view! {
                    <p class="text-sm text-gray-500 mb-2">{format_timestamp(&ts)}</p>
                })}
                <div class="feedback whitespace-pre-wrap text-gray-800 leading-relaxed">
                    {feedback}
                </div>
            </div>
        </article>
    }
}
