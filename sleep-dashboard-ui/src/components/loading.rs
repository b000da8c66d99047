//! Loading Component
//!
//! Spinner shown while the sleep data request is in flight.

use leptos::*;

/// Centered spinner with an optional caption
#[component]
pub fn Loading(
    #[prop(optional, into)]
    message: Option<String>,
) -> impl IntoView {
    view! {
        <div class="h-64 flex flex-col items-center justify-center space-y-3">
            <div class="loading-spinner w-8 h-8" />
            {message.map(|text| view! { <p class="text-gray-400 text-sm">{text}</p> })}
        </div>
    }
}
