//! Dashboard State
//!
//! Reactive state using Leptos signals. Every region the fetch cycle
//! writes is a signal, bound into a [`DashboardView`].

use leptos::*;

use crate::telemetry::{Card, DashboardView, EmptyState, Region, Slot, Summary};

use super::settings::DashboardSettings;

/// Dashboard state provided to all components
#[derive(Clone, Copy)]
pub struct DashboardState {
    /// Manual fetch trigger accepts clicks
    pub trigger_enabled: RwSignal<bool>,
    pub loading: RwSignal<bool>,
    /// Error banner text
    pub error: RwSignal<Option<String>>,
    pub cards: RwSignal<Vec<Card>>,
    pub empty_state: RwSignal<EmptyState>,
    pub summary: RwSignal<Option<Summary>>,
    /// Local time of the last fetch that reached the server
    pub last_updated: RwSignal<Option<String>>,
    pub settings: RwSignal<DashboardSettings>,
}

impl<T: 'static> Region<T> for RwSignal<T> {
    fn show(&self, value: T) {
        self.set(value);
    }
}

impl DashboardState {
    /// Regions for the fetch controller
    pub fn view(&self) -> DashboardView {
        DashboardView {
            trigger_enabled: Slot::bound(self.trigger_enabled),
            loading: Slot::bound(self.loading),
            error: Slot::bound(self.error),
            cards: Slot::bound(self.cards),
            empty_state: Slot::bound(self.empty_state),
            summary: Slot::bound(self.summary),
        }
    }

    /// Record a completed fetch
    pub fn mark_updated(&self) {
        let now = chrono::Local::now().format("%H:%M:%S").to_string();
        self.last_updated.set(Some(now));
    }
}

/// Provide dashboard state to the component tree
pub fn provide_dashboard_state() -> DashboardState {
    let state = DashboardState {
        trigger_enabled: create_rw_signal(true),
        loading: create_rw_signal(false),
        error: create_rw_signal(None),
        cards: create_rw_signal(Vec::new()),
        empty_state: create_rw_signal(EmptyState::Unavailable),
        summary: create_rw_signal(None),
        last_updated: create_rw_signal(None),
        settings: create_rw_signal(DashboardSettings::load()),
    };

    provide_context(state);
    state
}
