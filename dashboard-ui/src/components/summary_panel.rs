//! Summary Panel Component
//!
//! Four value slots for the current batch. Hidden while there is no summary.

use leptos::*;

use crate::telemetry::Summary;

#[component]
pub fn SummaryPanel(
    #[prop(into)]
    summary: Signal<Option<Summary>>,
) -> impl IntoView {
    move || {
        summary.get().map(|summary| {
            view! {
                <section class="stats-summary bg-gray-800 rounded-xl p-6">
                    <h2 class="text-xl font-semibold mb-4">"Summary"</h2>
                    <div class="grid grid-cols-2 md:grid-cols-4 gap-4">
                        <StatItem label="Total Readings" value=summary.count.to_string() />
                        <StatItem label="Average CPU" value=summary.avg_cpu_label() />
                        <StatItem label="Average Memory" value=summary.avg_memory_label() />
                        <StatItem label="Peak CPU" value=summary.max_cpu_label() />
                    </div>
                </section>
            }
        })
    }
}

#[component]
fn StatItem(label: &'static str, value: String) -> impl IntoView {
    view! {
        <div class="stat-item bg-gray-700 rounded-lg p-4">
            <div class="text-sm text-gray-400">{label}</div>
            <div class="stat-value text-2xl font-bold mt-1">{value}</div>
        </div>
    }
}
