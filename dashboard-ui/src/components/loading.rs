//! Loading Component
//!
//! Spinners shown while a request is in flight.

use leptos::*;

/// Spinner with a caption
#[component]
pub fn Loading(
    #[prop(default = "Loading telemetry data...")]
    label: &'static str,
) -> impl IntoView {
    view! {
        <div class="loading flex flex-col items-center justify-center py-12 space-y-3">
            <div class="loading-spinner w-8 h-8" />
            <span class="text-gray-400 text-sm">{label}</span>
        </div>
    }
}

/// Inline loading spinner
#[component]
pub fn InlineLoading() -> impl IntoView {
    view! {
        <span class="inline-block loading-spinner w-4 h-4" />
    }
}
