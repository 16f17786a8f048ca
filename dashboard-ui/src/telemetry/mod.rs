//! Telemetry Core
//!
//! Everything the dashboard does with telemetry, independent of the DOM:
//!
//! - **sample**: the wire type and its lenient decoding
//! - **stats**: summary over a batch
//! - **render**: one card view-model per sample
//! - **view**: present-or-absent UI regions
//! - **source**: where batches come from, and how fetching fails
//! - **fetch**: one request/response cycle against the view
//! - **refresh**: the auto-refresh toggle
//!
//! # Architecture
//!
//! ```text
//! trigger / AutoRefresh ──▶ FetchController::run ──▶ TelemetrySource::fetch
//!                                   │
//!                                   ├──▶ render ──▶ cards slot
//!                                   └──▶ summarize ──▶ summary slot
//! ```

pub mod fetch;
pub mod refresh;
pub mod render;
pub mod sample;
pub mod source;
pub mod stats;
pub mod view;

pub use fetch::{FetchController, FetchOutcome, RacePolicy, DEFAULT_SERVER_PORT};
pub use refresh::{AutoRefresh, RefreshState, RunFn, Ticker};
pub use render::{Bar, Card};
pub use sample::TelemetrySample;
pub use source::{FetchError, TelemetrySource};
pub use stats::Summary;
pub use view::{DashboardView, EmptyState, Region, Slot};

#[cfg(test)]
pub(crate) mod testing {
    //! Shared fakes for the core tests

    use super::*;
    use async_trait::async_trait;
    use futures::channel::oneshot;
    use std::cell::{Cell, RefCell};
    use std::collections::VecDeque;
    use std::rc::Rc;

    pub fn sample(timestamp: &str, cpu: f64, memory: f64) -> TelemetrySample {
        TelemetrySample {
            timestamp: timestamp.to_string(),
            cpu_usage: cpu,
            memory_usage: memory,
        }
    }

    /// Region that records every value written to it
    pub struct Recorder<T>(pub Rc<RefCell<Vec<T>>>);

    impl<T> Clone for Recorder<T> {
        fn clone(&self) -> Self {
            Recorder(Rc::clone(&self.0))
        }
    }

    impl<T: Clone> Recorder<T> {
        pub fn new() -> Self {
            Recorder(Rc::new(RefCell::new(Vec::new())))
        }

        pub fn last(&self) -> Option<T> {
            self.0.borrow().last().cloned()
        }

        pub fn writes(&self) -> usize {
            self.0.borrow().len()
        }
    }

    impl<T> Region<T> for Recorder<T> {
        fn show(&self, value: T) {
            self.0.borrow_mut().push(value);
        }
    }

    /// Recorders for every region, plus the view bound to them
    pub struct RecordedView {
        pub trigger_enabled: Recorder<bool>,
        pub loading: Recorder<bool>,
        pub error: Recorder<Option<String>>,
        pub cards: Recorder<Vec<Card>>,
        pub empty_state: Recorder<EmptyState>,
        pub summary: Recorder<Option<Summary>>,
    }

    impl RecordedView {
        pub fn new() -> Self {
            Self {
                trigger_enabled: Recorder::new(),
                loading: Recorder::new(),
                error: Recorder::new(),
                cards: Recorder::new(),
                empty_state: Recorder::new(),
                summary: Recorder::new(),
            }
        }

        pub fn view(&self) -> DashboardView {
            DashboardView {
                trigger_enabled: Slot::bound(self.trigger_enabled.clone()),
                loading: Slot::bound(self.loading.clone()),
                error: Slot::bound(self.error.clone()),
                cards: Slot::bound(self.cards.clone()),
                empty_state: Slot::bound(self.empty_state.clone()),
                summary: Slot::bound(self.summary.clone()),
            }
        }
    }

    /// Source answering from a script, counting calls
    pub struct ScriptedSource {
        pub responses: RefCell<VecDeque<Result<Vec<TelemetrySample>, FetchError>>>,
        pub calls: Cell<usize>,
    }

    impl ScriptedSource {
        pub fn new(responses: Vec<Result<Vec<TelemetrySample>, FetchError>>) -> Self {
            Self {
                responses: RefCell::new(responses.into()),
                calls: Cell::new(0),
            }
        }

        /// Always answers with an empty batch
        pub fn empty() -> Self {
            Self::new(Vec::new())
        }
    }

    #[async_trait(?Send)]
    impl TelemetrySource for ScriptedSource {
        async fn fetch(&self) -> Result<Vec<TelemetrySample>, FetchError> {
            self.calls.set(self.calls.get() + 1);
            self.responses
                .borrow_mut()
                .pop_front()
                .unwrap_or_else(|| Ok(Vec::new()))
        }
    }

    /// Source whose responses are released by the test, one channel per call
    pub struct GatedSource {
        pub gates: RefCell<VecDeque<oneshot::Receiver<Result<Vec<TelemetrySample>, FetchError>>>>,
    }

    impl GatedSource {
        /// Source plus the senders that release each call, in call order
        pub fn new(
            calls: usize,
        ) -> (Self, Vec<oneshot::Sender<Result<Vec<TelemetrySample>, FetchError>>>) {
            let (senders, receivers): (Vec<_>, VecDeque<_>) =
                (0..calls).map(|_| oneshot::channel()).unzip();
            (
                Self {
                    gates: RefCell::new(receivers),
                },
                senders,
            )
        }
    }

    #[async_trait(?Send)]
    impl TelemetrySource for GatedSource {
        async fn fetch(&self) -> Result<Vec<TelemetrySample>, FetchError> {
            let gate = self.gates.borrow_mut().pop_front();
            match gate {
                Some(gate) => gate
                    .await
                    .unwrap_or_else(|_| Err(FetchError::Network("gate dropped".to_string()))),
                None => Err(FetchError::Network("no gate left".to_string())),
            }
        }
    }
}
