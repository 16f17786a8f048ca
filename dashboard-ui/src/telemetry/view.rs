//! UI regions
//!
//! The fetch cycle writes to regions, never to the DOM. Each region is a
//! [`Slot`] that is either bound to something that displays it or absent,
//! in which case writes are dropped. A page that omits a region keeps
//! working with the rest.

use std::rc::Rc;

use super::render::Card;
use super::stats::Summary;

pub const NO_DATA_MESSAGE: &str = "No telemetry data available";
pub const UNAVAILABLE_MESSAGE: &str = "Click \"Fetch Data\" to load telemetry readings";

/// Something that can display a value
pub trait Region<T> {
    fn show(&self, value: T);
}

/// A region that may or may not be present
pub struct Slot<T>(Option<Rc<dyn Region<T>>>);

impl<T: 'static> Slot<T> {
    pub fn bound(region: impl Region<T> + 'static) -> Self {
        Slot(Some(Rc::new(region)))
    }
}

impl<T> Slot<T> {
    pub fn absent() -> Self {
        Slot(None)
    }

    /// Write to the region if it is present
    pub fn set(&self, value: T) {
        if let Some(region) = &self.0 {
            region.show(value);
        }
    }
}

impl<T> Default for Slot<T> {
    fn default() -> Self {
        Slot::absent()
    }
}

impl<T> Clone for Slot<T> {
    fn clone(&self) -> Self {
        Slot(self.0.clone())
    }
}

/// What the empty-state region shows
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum EmptyState {
    #[default]
    Hidden,
    /// The server answered with no readings
    NoData,
    /// Nothing could be loaded
    Unavailable,
}

impl EmptyState {
    pub fn message(&self) -> Option<&'static str> {
        match self {
            EmptyState::Hidden => None,
            EmptyState::NoData => Some(NO_DATA_MESSAGE),
            EmptyState::Unavailable => Some(UNAVAILABLE_MESSAGE),
        }
    }

    pub fn is_visible(&self) -> bool {
        *self != EmptyState::Hidden
    }
}

/// Every region the fetch cycle touches
#[derive(Clone, Default)]
pub struct DashboardView {
    /// Whether the manual fetch trigger accepts clicks
    pub trigger_enabled: Slot<bool>,
    pub loading: Slot<bool>,
    pub error: Slot<Option<String>>,
    pub cards: Slot<Vec<Card>>,
    pub empty_state: Slot<EmptyState>,
    pub summary: Slot<Option<Summary>>,
}
