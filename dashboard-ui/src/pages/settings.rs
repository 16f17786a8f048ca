//! Settings Page
//!
//! Server location and polling behaviour, saved to local storage. Changes
//! apply the next time the dashboard page is opened.

use leptos::*;

use crate::api;
use crate::components::InlineLoading;
use crate::state::settings::{MAX_BACKOFF_EXPONENT, MIN_REFRESH_PERIOD_MS};
use crate::state::{DashboardSettings, DashboardState};
use crate::telemetry::RacePolicy;

/// Settings page component
#[component]
pub fn Settings() -> impl IntoView {
    view! {
        <div class="space-y-8">
            // Header
            <div>
                <h1 class="text-3xl font-bold">"Settings"</h1>
                <p class="text-gray-400 mt-1">"Configure the telemetry dashboard"</p>
            </div>

            <ConnectionSettings />

            <AboutSection />
        </div>
    }
}

/// Server connection and refresh settings
#[component]
fn ConnectionSettings() -> impl IntoView {
    let state = expect_context::<DashboardState>();
    let current = state.settings.get_untracked();

    let (host, set_host) = create_signal(current.host.clone());
    let (port, set_port) = create_signal(current.port.to_string());
    let (period, set_period) = create_signal(current.refresh_period_ms.to_string());
    let (race_policy, set_race_policy) = create_signal(current.race_policy);
    let (backoff, set_backoff) = create_signal(current.max_backoff_exponent.to_string());

    let (status, set_status) = create_signal(None::<Result<String, String>>);
    let (testing, set_testing) = create_signal(false);

    // Settings as currently typed
    let draft = move || -> Result<DashboardSettings, String> {
        let settings = DashboardSettings {
            host: host.get().trim().to_string(),
            port: port
                .get()
                .trim()
                .parse()
                .map_err(|_| format!("Invalid port: {}", port.get()))?,
            refresh_period_ms: period
                .get()
                .trim()
                .parse()
                .map_err(|_| format!("Invalid refresh period: {}", period.get()))?,
            race_policy: race_policy.get(),
            max_backoff_exponent: backoff
                .get()
                .trim()
                .parse()
                .map_err(|_| format!("Invalid backoff cap: {}", backoff.get()))?,
        };
        settings.validate()?;
        Ok(settings)
    };

    let save = move |_| {
        let result = draft().and_then(|settings| {
            settings.save()?;
            state.settings.set(settings);
            Ok("Settings saved".to_string())
        });
        set_status.set(Some(result));
    };

    let reset = move |_| {
        let defaults = DashboardSettings::default();
        set_host.set(defaults.host.clone());
        set_port.set(defaults.port.to_string());
        set_period.set(defaults.refresh_period_ms.to_string());
        set_race_policy.set(defaults.race_policy);
        set_backoff.set(defaults.max_backoff_exponent.to_string());
        set_status.set(None);
    };

    let test_connection = move |_| {
        let settings = match draft() {
            Ok(settings) => settings,
            Err(e) => {
                set_status.set(Some(Err(e)));
                return;
            }
        };

        set_testing.set(true);
        set_status.set(None);
        spawn_local(async move {
            let result = api::check_health(&settings.health_url())
                .await
                .map(|health| {
                    format!(
                        "✓ Connected: {} source {} ({}), up {}s",
                        health.source, health.status, health.source_status, health.uptime_seconds
                    )
                })
                .map_err(|e| format!("Connection failed: {}", e));
            set_status.set(Some(result));
            set_testing.set(false);
        });
    };

    let input_class = "w-full bg-gray-700 rounded-lg px-4 py-3 border border-gray-600 \
                       focus:border-primary-500 focus:outline-none";

    view! {
        <section class="bg-gray-800 rounded-xl p-6">
            <h2 class="text-xl font-semibold mb-4">"Server Connection"</h2>

            <div class="grid grid-cols-1 md:grid-cols-2 gap-4">
                <div>
                    <label class="block text-sm text-gray-400 mb-2">"Host"</label>
                    <input
                        type="text"
                        class=input_class
                        prop:value=move || host.get()
                        on:input=move |ev| set_host.set(event_target_value(&ev))
                    />
                </div>
                <div>
                    <label class="block text-sm text-gray-400 mb-2">"Port"</label>
                    <input
                        type="number"
                        class=input_class
                        prop:value=move || port.get()
                        on:input=move |ev| set_port.set(event_target_value(&ev))
                    />
                </div>
                <div>
                    <label class="block text-sm text-gray-400 mb-2">
                        {format!("Auto-refresh period (ms, at least {})", MIN_REFRESH_PERIOD_MS)}
                    </label>
                    <input
                        type="number"
                        class=input_class
                        prop:value=move || period.get()
                        on:input=move |ev| set_period.set(event_target_value(&ev))
                    />
                </div>
                <div>
                    <label class="block text-sm text-gray-400 mb-2">
                        {format!("Backoff cap (0 to {}, 0 = off)", MAX_BACKOFF_EXPONENT)}
                    </label>
                    <input
                        type="number"
                        class=input_class
                        prop:value=move || backoff.get()
                        on:input=move |ev| set_backoff.set(event_target_value(&ev))
                    />
                </div>
                <div class="md:col-span-2">
                    <label class="block text-sm text-gray-400 mb-2">"Overlapping requests"</label>
                    <select
                        class=input_class
                        on:change=move |ev| {
                            let policy = match event_target_value(&ev).as_str() {
                                "last_resolved" => RacePolicy::LastResolved,
                                _ => RacePolicy::LastIssued,
                            };
                            set_race_policy.set(policy);
                        }
                    >
                        <option
                            value="last_issued"
                            selected=move || race_policy.get() == RacePolicy::LastIssued
                        >
                            {RacePolicy::LastIssued.label()}
                        </option>
                        <option
                            value="last_resolved"
                            selected=move || race_policy.get() == RacePolicy::LastResolved
                        >
                            {RacePolicy::LastResolved.label()}
                        </option>
                    </select>
                </div>
            </div>

            <div class="flex items-center space-x-2 mt-6">
                <button on:click=save class="px-4 py-3 bg-primary-600 hover:bg-primary-700 rounded-lg font-medium transition-colors">
                    "Save"
                </button>
                <button
                    on:click=test_connection
                    disabled=move || testing.get()
                    class="px-4 py-3 bg-gray-600 hover:bg-gray-500 disabled:bg-gray-700 rounded-lg font-medium transition-colors"
                >
                    {move || if testing.get() {
                        view! { <InlineLoading /> }.into_view()
                    } else {
                        "Test".into_view()
                    }}
                </button>
                <button on:click=reset class="px-4 py-3 bg-gray-700 hover:bg-gray-600 rounded-lg font-medium transition-colors">
                    "Reset to defaults"
                </button>
            </div>

            // Status line
            <div class="mt-4 text-sm">
                {move || match status.get() {
                    Some(Ok(message)) => view! { <span class="text-green-400">{message}</span> }.into_view(),
                    Some(Err(message)) => view! { <span class="text-red-400">{message}</span> }.into_view(),
                    None => view! { <span class="text-gray-400">"Endpoint: " {move || state.settings.get().endpoint()}</span> }.into_view(),
                }}
            </div>
        </section>
    }
}

/// About section
#[component]
fn AboutSection() -> impl IntoView {
    view! {
        <section class="bg-gray-800 rounded-xl p-6">
            <h2 class="text-xl font-semibold mb-4">"About"</h2>
            <p class="text-gray-400">
                "Telemetry Dash v" {env!("CARGO_PKG_VERSION")}
                " shows CPU and memory readings served by the telemetry server."
            </p>
        </section>
    }
}
