//! Auto-Refresh Toggle
//!
//! OFF is the initial state. Switching ON runs one fetch right away and
//! arms a repeating timer; switching OFF drops the timer handle, which
//! disarms it. Runs already in flight are left to finish.
//!
//! Timers and spawning are injected ([`Ticker`], [`LocalSpawn`]) so the
//! browser build uses `gloo-timers` and `wasm-bindgen-futures` while tests
//! drive ticks by hand on a `LocalPool`.

use futures::future::LocalBoxFuture;
use futures::task::{LocalSpawn, LocalSpawnExt};
use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

use super::fetch::FetchOutcome;

pub const DEFAULT_REFRESH_PERIOD: Duration = Duration::from_millis(3000);

/// Largest backoff exponent honoured, whatever is configured
const MAX_EXPONENT_CAP: u32 = 10;

/// Starts one fetch run
pub type RunFn = Rc<dyn Fn() -> LocalBoxFuture<'static, FetchOutcome>>;

/// Repeating timer
///
/// `every` arms a timer calling `tick` once per period until the returned
/// handle is dropped.
pub trait Ticker {
    type Handle;

    fn every(&self, period: Duration, tick: Box<dyn FnMut()>) -> Self::Handle;
}

/// Toggle state
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RefreshState {
    #[default]
    Off,
    On,
}

impl RefreshState {
    pub fn label(&self) -> &'static str {
        match self {
            RefreshState::On => "▶️ Auto-Refresh: ON",
            RefreshState::Off => "⏸️ Auto-Refresh: OFF",
        }
    }

    pub fn button_class(&self) -> &'static str {
        match self {
            RefreshState::On => "btn btn-primary",
            RefreshState::Off => "btn btn-secondary",
        }
    }
}

/// Tick thinning after consecutive failures
///
/// With `n` failures in a row only every `2^min(n, max_exponent)`-th tick
/// fetches. A successful or empty response resets the count. An exponent
/// of 0 never skips.
#[derive(Debug, Default)]
pub struct Backoff {
    max_exponent: u32,
    failures: Cell<u32>,
    waited: Cell<u32>,
}

impl Backoff {
    pub fn new(max_exponent: u32) -> Self {
        Self {
            max_exponent: max_exponent.min(MAX_EXPONENT_CAP),
            ..Self::default()
        }
    }

    /// Ticks per fetch at the current failure count
    pub fn stride(&self) -> u32 {
        1 << self.failures.get().min(self.max_exponent)
    }

    /// Whether this tick should fetch
    pub fn admit(&self) -> bool {
        let waited = self.waited.get() + 1;
        if waited >= self.stride() {
            self.waited.set(0);
            true
        } else {
            self.waited.set(waited);
            false
        }
    }

    pub fn record(&self, outcome: FetchOutcome) {
        match outcome {
            FetchOutcome::Failed => self.failures.set(self.failures.get().saturating_add(1)),
            FetchOutcome::Loaded(_) | FetchOutcome::Empty => self.failures.set(0),
            FetchOutcome::Superseded => {}
        }
    }

    pub fn reset(&self) {
        self.failures.set(0);
        self.waited.set(0);
    }
}

/// The auto-refresh toggle
pub struct AutoRefresh<T: Ticker, S> {
    ticker: T,
    spawner: S,
    period: Duration,
    run: RunFn,
    backoff: Rc<Backoff>,
    timer: Option<T::Handle>,
}

impl<T, S> AutoRefresh<T, S>
where
    T: Ticker,
    S: LocalSpawn + Clone + 'static,
{
    pub fn new(ticker: T, spawner: S, run: RunFn) -> Self {
        Self {
            ticker,
            spawner,
            period: DEFAULT_REFRESH_PERIOD,
            run,
            backoff: Rc::new(Backoff::default()),
            timer: None,
        }
    }

    pub fn period(mut self, period: Duration) -> Self {
        self.period = period;
        self
    }

    pub fn backoff(mut self, max_exponent: u32) -> Self {
        self.backoff = Rc::new(Backoff::new(max_exponent));
        self
    }

    pub fn state(&self) -> RefreshState {
        if self.timer.is_some() {
            RefreshState::On
        } else {
            RefreshState::Off
        }
    }

    /// Flip the state and return the new one
    pub fn toggle(&mut self) -> RefreshState {
        match self.state() {
            RefreshState::Off => self.start(),
            RefreshState::On => self.stop(),
        }
        self.state()
    }

    pub fn start(&mut self) {
        if self.timer.is_some() {
            return;
        }

        self.backoff.reset();
        spawn_run(&self.spawner, &self.run, &self.backoff);

        let spawner = self.spawner.clone();
        let run = Rc::clone(&self.run);
        let backoff = Rc::clone(&self.backoff);
        let tick = move || {
            if backoff.admit() {
                spawn_run(&spawner, &run, &backoff);
            }
        };
        self.timer = Some(self.ticker.every(self.period, Box::new(tick)));
    }

    pub fn stop(&mut self) {
        self.timer = None;
    }
}

fn spawn_run<S: LocalSpawn>(spawner: &S, run: &RunFn, backoff: &Rc<Backoff>) {
    let pending = run();
    let backoff = Rc::clone(backoff);
    // A spawner only refuses work once it is shut down; nothing left to update then.
    let _ = spawner.spawn_local(async move {
        backoff.record(pending.await);
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::LocalPool;
    use futures::FutureExt;
    use std::cell::RefCell;

    /// Timer fired by hand; a dropped handle stops its callbacks
    #[derive(Clone, Default)]
    struct FakeTicker {
        timers: Rc<RefCell<Vec<(Duration, Rc<Cell<bool>>, Box<dyn FnMut()>)>>>,
    }

    struct FakeHandle(Rc<Cell<bool>>);

    impl Drop for FakeHandle {
        fn drop(&mut self) {
            self.0.set(false);
        }
    }

    impl Ticker for FakeTicker {
        type Handle = FakeHandle;

        fn every(&self, period: Duration, tick: Box<dyn FnMut()>) -> FakeHandle {
            let armed = Rc::new(Cell::new(true));
            self.timers
                .borrow_mut()
                .push((period, Rc::clone(&armed), tick));
            FakeHandle(armed)
        }
    }

    impl FakeTicker {
        fn fire(&self) {
            for (_, armed, tick) in self.timers.borrow_mut().iter_mut() {
                if armed.get() {
                    tick();
                }
            }
        }

        fn armed(&self) -> usize {
            self.timers.borrow().iter().filter(|(_, armed, _)| armed.get()).count()
        }
    }

    /// Run function answering from a script of outcomes, counting calls
    fn counting_run(script: Vec<FetchOutcome>) -> (RunFn, Rc<Cell<usize>>) {
        let calls = Rc::new(Cell::new(0));
        let script = Rc::new(RefCell::new(script.into_iter()));
        let counter = Rc::clone(&calls);
        let run: RunFn = Rc::new(move || {
            counter.set(counter.get() + 1);
            let outcome = script.borrow_mut().next().unwrap_or(FetchOutcome::Loaded(1));
            async move { outcome }.boxed_local()
        });
        (run, calls)
    }

    #[test]
    fn test_initial_state() {
        let pool = LocalPool::new();
        let (run, calls) = counting_run(Vec::new());
        let refresh = AutoRefresh::new(FakeTicker::default(), pool.spawner(), run);

        assert_eq!(refresh.state(), RefreshState::Off);
        assert_eq!(refresh.state().label(), "⏸️ Auto-Refresh: OFF");
        assert_eq!(calls.get(), 0);
    }

    #[test]
    fn test_on_fetches_immediately_then_every_tick() {
        let mut pool = LocalPool::new();
        let ticker = FakeTicker::default();
        let (run, calls) = counting_run(Vec::new());
        let mut refresh = AutoRefresh::new(ticker.clone(), pool.spawner(), run);

        assert_eq!(refresh.toggle(), RefreshState::On);
        assert_eq!(refresh.state().label(), "▶️ Auto-Refresh: ON");
        assert_eq!(calls.get(), 1);
        assert_eq!(ticker.timers.borrow()[0].0, Duration::from_millis(3000));

        ticker.fire();
        ticker.fire();
        pool.run_until_stalled();
        assert_eq!(calls.get(), 3);
    }

    #[test]
    fn test_on_then_off_runs_once() {
        let mut pool = LocalPool::new();
        let ticker = FakeTicker::default();
        let (run, calls) = counting_run(Vec::new());
        let mut refresh = AutoRefresh::new(ticker.clone(), pool.spawner(), run);

        refresh.toggle();
        refresh.toggle();
        pool.run_until_stalled();
        ticker.fire();
        pool.run_until_stalled();

        assert_eq!(refresh.state(), RefreshState::Off);
        assert_eq!(ticker.armed(), 0);
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn test_restart_arms_a_single_timer() {
        let mut pool = LocalPool::new();
        let ticker = FakeTicker::default();
        let (run, calls) = counting_run(Vec::new());
        let mut refresh = AutoRefresh::new(ticker.clone(), pool.spawner(), run)
            .period(Duration::from_millis(500));

        refresh.start();
        refresh.start();
        refresh.stop();
        refresh.start();
        pool.run_until_stalled();

        assert_eq!(ticker.armed(), 1);
        assert_eq!(calls.get(), 2);
        ticker.fire();
        assert_eq!(calls.get(), 3);
    }

    #[test]
    fn test_backoff_stride() {
        let backoff = Backoff::new(2);
        assert_eq!(backoff.stride(), 1);

        backoff.record(FetchOutcome::Failed);
        assert_eq!(backoff.stride(), 2);
        backoff.record(FetchOutcome::Failed);
        backoff.record(FetchOutcome::Failed);
        assert_eq!(backoff.stride(), 4);

        backoff.record(FetchOutcome::Superseded);
        assert_eq!(backoff.failures.get(), 3);

        backoff.record(FetchOutcome::Empty);
        assert_eq!(backoff.stride(), 1);
    }

    #[test]
    fn test_backoff_admit() {
        let backoff = Backoff::new(3);
        backoff.record(FetchOutcome::Failed);

        let admitted: Vec<bool> = (0..4).map(|_| backoff.admit()).collect();
        assert_eq!(admitted, vec![false, true, false, true]);
    }

    #[test]
    fn test_zero_exponent_never_skips() {
        let backoff = Backoff::new(0);
        for _ in 0..5 {
            backoff.record(FetchOutcome::Failed);
        }
        assert!((0..3).all(|_| backoff.admit()));
    }

    #[test]
    fn test_failures_thin_out_ticks() {
        let mut pool = LocalPool::new();
        let ticker = FakeTicker::default();
        let (run, calls) = counting_run(vec![FetchOutcome::Failed; 10]);
        let mut refresh = AutoRefresh::new(ticker.clone(), pool.spawner(), run).backoff(1);

        refresh.start();
        pool.run_until_stalled();
        assert_eq!(calls.get(), 1);

        // One failure recorded: every second tick fetches
        for _ in 0..4 {
            ticker.fire();
            pool.run_until_stalled();
        }
        assert_eq!(calls.get(), 3);
    }
}
