//! Dashboard Page
//!
//! Manual fetch trigger, auto-refresh toggle, reading cards and the batch
//! summary. Nothing is fetched until the user asks.

use futures::FutureExt;
use leptos::*;
use std::rc::Rc;

use crate::api::HttpTelemetrySource;
use crate::components::{Loading, SummaryPanel, TelemetryCard};
use crate::state::{BrowserSpawner, DashboardState, IntervalTicker};
use crate::telemetry::{AutoRefresh, FetchController, FetchOutcome, RefreshState, RunFn};

/// Dashboard page component
#[component]
pub fn Dashboard() -> impl IntoView {
    let state = expect_context::<DashboardState>();
    let settings = state.settings.get_untracked();

    let controller = Rc::new(
        FetchController::new(HttpTelemetrySource::new(settings.endpoint()), state.view())
            .race_policy(settings.race_policy)
            .server_port(settings.port),
    );

    let run: RunFn = Rc::new(move || {
        let controller = Rc::clone(&controller);
        async move {
            let outcome = controller.run().await;
            match outcome {
                FetchOutcome::Loaded(_) | FetchOutcome::Empty => state.mark_updated(),
                FetchOutcome::Failed => {
                    web_sys::console::warn_1(&"Telemetry fetch failed".into());
                }
                FetchOutcome::Superseded => {}
            }
            outcome
        }
        .boxed_local()
    });

    // Dropped with the page, which clears any armed interval
    let auto_refresh = store_value(
        AutoRefresh::new(IntervalTicker, BrowserSpawner, Rc::clone(&run))
            .period(settings.refresh_period())
            .backoff(settings.max_backoff_exponent),
    );
    let (refresh_state, set_refresh_state) = create_signal(RefreshState::Off);

    let fetch_now = move |_| {
        let pending = run();
        spawn_local(async move {
            pending.await;
        });
    };

    let toggle_refresh = move |_| {
        let next = auto_refresh
            .try_update_value(|refresh| refresh.toggle())
            .unwrap_or(RefreshState::Off);
        set_refresh_state.set(next);
    };

    view! {
        <div class="space-y-8">
            // Page header
            <div class="flex flex-col md:flex-row md:items-center md:justify-between gap-4">
                <div>
                    <h1 class="text-3xl font-bold">"Telemetry Dashboard"</h1>
                    <p class="text-gray-400 mt-1">
                        "CPU and memory readings from " {settings.endpoint()}
                    </p>
                </div>

                <div class="flex items-center space-x-2">
                    <button
                        id="fetchBtn"
                        class="btn btn-primary"
                        on:click=fetch_now
                        disabled=move || !state.trigger_enabled.get()
                    >
                        "Fetch Data"
                    </button>
                    <button
                        id="autoRefreshToggle"
                        class=move || refresh_state.get().button_class()
                        on:click=toggle_refresh
                    >
                        {move || refresh_state.get().label()}
                    </button>
                </div>
            </div>

            // Loading state
            <Show when=move || state.loading.get()>
                <Loading />
            </Show>

            // Error banner
            {move || state.error.get().map(|message| view! {
                <div class="error-message show bg-red-900/50 border border-red-700 text-red-200 rounded-lg p-4">
                    {message}
                </div>
            })}

            // Reading cards
            <div id="dashboard" class="grid grid-cols-1 md:grid-cols-2 lg:grid-cols-3 gap-4">
                {move || state.cards.get()
                    .into_iter()
                    .map(|card| view! { <TelemetryCard card=card /> })
                    .collect_view()}
            </div>

            // Empty state
            {move || state.empty_state.get().message().map(|message| view! {
                <div id="emptyState" class="empty-state text-center text-gray-400 py-12">
                    {message}
                </div>
            })}

            <SummaryPanel summary=state.summary />

            // Last update
            <div class="text-sm text-gray-500">
                {move || state.last_updated.get()
                    .map(|time| format!("Last updated: {}", time))
                    .unwrap_or_else(|| "Not fetched yet".to_string())}
            </div>
        </div>
    }
}
