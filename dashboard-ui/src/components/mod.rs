//! UI Components
//!
//! Reusable Leptos components for the dashboard.

pub mod loading;
pub mod nav;
pub mod summary_panel;
pub mod telemetry_card;

pub use loading::{InlineLoading, Loading};
pub use nav::Nav;
pub use summary_panel::SummaryPanel;
pub use telemetry_card::TelemetryCard;
