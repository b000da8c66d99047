//! App Root Component

use leptos::*;

use crate::pages::Dashboard;

/// Root application component
#[component]
pub fn App() -> impl IntoView {
    view! {
        <div class="min-h-screen bg-gray-900 text-white">
            <main class="container mx-auto px-4 py-8">
                <Dashboard />
            </main>
        </div>
    }
}
