//! Dashboard Page
//!
//! Fetches the sleep data once on mount and shows a spinner, an error
//! message, or the chart with the average sleep time.

use leptos::*;

use crate::api;
use crate::components::{Loading, SleepChart};
use crate::state::dashboard::{average_label, PageState};

/// Dashboard page component
#[component]
pub fn Dashboard() -> impl IntoView {
    let page = create_rw_signal(PageState::Loading);

    // Fetch sleep data on mount
    create_effect(move |_| {
        spawn_local(async move {
            match api::fetch_sleep_data().await {
                Ok(response) => {
                    page.set(PageState::loaded(response.sleep_data));
                }
                Err(e) => {
                    web_sys::console::error_1(&format!("Failed to fetch sleep data: {}", e).into());
                    page.set(PageState::failed());
                }
            }
        });
    });

    view! {
        <div class="space-y-8">
            // Page header
            <div>
                <h1 class="text-3xl font-bold">"Garmin Sleep Dashboard"</h1>
                <p class="text-gray-400 mt-1">"Daily sleep and awake time"</p>
            </div>

            <section class="bg-gray-800 rounded-xl p-6">
                {move || match page.get() {
                    PageState::Loading => view! {
                        <Loading message="Loading sleep data..." />
                    }.into_view(),
                    PageState::Error(message) => view! {
                        <div class="h-64 flex items-center justify-center">
                            <p class="text-red-400">{message}</p>
                        </div>
                    }.into_view(),
                    PageState::Loaded { records, average } => view! {
                        <SleepChart records=records />
                        <p class="mt-6 text-lg font-semibold text-center">{average_label(average)}</p>
                    }.into_view(),
                }}
            </section>
        </div>
    }
}
