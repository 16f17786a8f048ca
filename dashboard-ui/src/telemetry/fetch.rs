//! Fetch Controller
//!
//! One request/response cycle: lock the trigger, clear the view, fetch,
//! show the result, unlock. Runs may overlap (a click during auto-refresh);
//! [`RacePolicy`] decides which response owns the view. Every run unlocks
//! the trigger when it resolves, whatever its response.

use serde::{Deserialize, Serialize};
use std::cell::Cell;

use super::render::render;
use super::sample::TelemetrySample;
use super::source::{FetchError, TelemetrySource};
use super::stats::summarize;
use super::view::{DashboardView, EmptyState};

pub const DEFAULT_SERVER_PORT: u16 = 8080;

/// How one run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    /// Cards and summary shown for this many samples
    Loaded(usize),
    Empty,
    Failed,
    /// A newer run's response was already shown; this one was dropped
    Superseded,
}

/// Which of several overlapping responses is displayed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RacePolicy {
    /// A response never replaces one from a later-issued run
    #[default]
    LastIssued,
    /// Every response writes the view; the last to resolve wins
    LastResolved,
}

impl RacePolicy {
    pub fn label(&self) -> &'static str {
        match self {
            RacePolicy::LastIssued => "Never replace with an older response",
            RacePolicy::LastResolved => "Latest response wins",
        }
    }
}

/// Drives fetch cycles against a view
pub struct FetchController<S> {
    source: S,
    view: DashboardView,
    race: RacePolicy,
    port: u16,
    issued: Cell<u64>,
    /// Generation of the response currently shown
    applied: Cell<u64>,
}

impl<S: TelemetrySource> FetchController<S> {
    pub fn new(source: S, view: DashboardView) -> Self {
        Self {
            source,
            view,
            race: RacePolicy::default(),
            port: DEFAULT_SERVER_PORT,
            issued: Cell::new(0),
            applied: Cell::new(0),
        }
    }

    pub fn race_policy(mut self, race: RacePolicy) -> Self {
        self.race = race;
        self
    }

    /// Port named in the error hint
    pub fn server_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Run one cycle
    pub async fn run(&self) -> FetchOutcome {
        let generation = self.issued.get() + 1;
        self.issued.set(generation);

        self.begin();
        let result = self.source.fetch().await;

        let outcome = if self.race == RacePolicy::LastIssued && generation < self.applied.get() {
            FetchOutcome::Superseded
        } else {
            self.applied.set(generation);
            self.show(result)
        };

        self.finish();
        outcome
    }

    /// Message for the error banner
    pub fn error_message(&self, error: &FetchError) -> String {
        format!(
            "Error fetching data: {}. Make sure the server is running on port {}.",
            error, self.port
        )
    }

    fn begin(&self) {
        let view = &self.view;
        view.trigger_enabled.set(false);
        view.loading.set(true);
        view.error.set(None);
        view.cards.set(Vec::new());
        view.empty_state.set(EmptyState::Hidden);
        view.summary.set(None);
    }

    fn show(&self, result: Result<Vec<TelemetrySample>, FetchError>) -> FetchOutcome {
        let view = &self.view;
        match result {
            Err(error) => {
                view.error.set(Some(self.error_message(&error)));
                view.empty_state.set(EmptyState::Unavailable);
                FetchOutcome::Failed
            }
            Ok(samples) if samples.is_empty() => {
                view.empty_state.set(EmptyState::NoData);
                FetchOutcome::Empty
            }
            Ok(samples) => {
                view.cards.set(render(&samples));
                view.summary.set(summarize(&samples));
                view.empty_state.set(EmptyState::Hidden);
                FetchOutcome::Loaded(samples.len())
            }
        }
    }

    fn finish(&self) {
        self.view.trigger_enabled.set(true);
        self.view.loading.set(false);
    }
}
