//! State Management
//!
//! Dashboard signals, persisted settings and the browser timer/task adapters.

pub mod dashboard;
pub mod runtime;
pub mod settings;

pub use dashboard::{provide_dashboard_state, DashboardState};
pub use runtime::{BrowserSpawner, IntervalTicker};
pub use settings::DashboardSettings;
