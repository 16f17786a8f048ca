//! Telemetry Card Component
//!
//! One reading: header with index and timestamp, then a bar per metric.

use leptos::*;

use crate::telemetry::{Bar, Card};

/// Card for a single reading
#[component]
pub fn TelemetryCard(card: Card) -> impl IntoView {
    let bars = card.bars();

    view! {
        <div class="card bg-gray-800 rounded-xl p-5 space-y-4">
            <div class="card-header flex items-center justify-between">
                <div class="card-title font-semibold">{card.title()}</div>
                <div class="timestamp text-sm text-gray-400">{card.timestamp}</div>
            </div>
            {bars.into_iter().map(|bar| view! { <MetricBar bar=bar /> }).collect_view()}
        </div>
    }
}

/// Labelled percentage bar; the fill is not clamped to the track
#[component]
fn MetricBar(bar: Bar) -> impl IntoView {
    view! {
        <div class="metric">
            <div class="metric-label flex justify-between text-sm mb-1">
                <span>{bar.kind.label()}</span>
                <span class="metric-value font-medium">{bar.value_label()}</span>
            </div>
            <div class="progress-bar bg-gray-700 rounded-full h-5">
                <div class=bar.kind.css_class() style=bar.width_style()>
                    {bar.fill_label()}
                </div>
            </div>
        </div>
    }
}
