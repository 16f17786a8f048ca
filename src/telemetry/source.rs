//! Telemetry Sources
//!
//! Where the readings served at `/api/telemetry` come from.
//!
//! - `SimulatedSource`: a fresh random batch on every call
//! - `SystemSource`: background sampling of the host into a bounded history

use async_trait::async_trait;
use rand_core::{OsRng, RngCore};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use sysinfo::System;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;

use super::error::{TelemetryError, TelemetryResult};
use super::types::TelemetryReading;

/// Simulated CPU usage range (percent)
const SIM_CPU_MIN: f64 = 10.0;
const SIM_CPU_SPAN: f64 = 90.0;

/// Simulated memory usage range (percent)
const SIM_MEMORY_MIN: f64 = 20.0;
const SIM_MEMORY_SPAN: f64 = 70.0;

/// Common trait for everything that can produce a batch of readings
#[async_trait]
pub trait TelemetrySource: Send + Sync {
    /// Short name used in logs and health output
    fn name(&self) -> &str;

    /// Current batch of readings, oldest first
    ///
    /// An empty batch is a valid answer.
    async fn snapshot(&self) -> TelemetryResult<Vec<TelemetryReading>>;
}

/// Which source the server should run
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    /// Random readings, regenerated per request
    #[default]
    Simulated,
    /// Readings sampled from this host
    System,
}

impl std::fmt::Display for SourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SourceKind::Simulated => write!(f, "simulated"),
            SourceKind::System => write!(f, "system"),
        }
    }
}

impl std::str::FromStr for SourceKind {
    type Err = TelemetryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "simulated" | "random" => Ok(SourceKind::Simulated),
            "system" | "host" => Ok(SourceKind::System),
            other => Err(TelemetryError::UnknownSource(other.to_string())),
        }
    }
}

// ============================================
// SIMULATED SOURCE
// ============================================

/// Random readings: CPU in [10, 100), memory in [20, 90)
pub struct SimulatedSource<R = OsRng> {
    batch_size: usize,
    rng: Mutex<R>,
}

impl SimulatedSource<OsRng> {
    /// Create a simulated source backed by the OS random generator
    pub fn new(batch_size: usize) -> Self {
        Self::with_rng(batch_size, OsRng)
    }
}

impl<R: RngCore + Send> SimulatedSource<R> {
    /// Create a simulated source with a specific generator
    pub fn with_rng(batch_size: usize, rng: R) -> Self {
        Self {
            batch_size,
            rng: Mutex::new(rng),
        }
    }

    /// Produce one reading stamped now
    pub fn reading(&self) -> TelemetryReading {
        let mut rng = match self.rng.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        let cpu = SIM_CPU_MIN + unit_interval(&mut *rng) * SIM_CPU_SPAN;
        let memory = SIM_MEMORY_MIN + unit_interval(&mut *rng) * SIM_MEMORY_SPAN;
        TelemetryReading::new(cpu, memory)
    }
}

#[async_trait]
impl<R: RngCore + Send> TelemetrySource for SimulatedSource<R> {
    fn name(&self) -> &str {
        "simulated"
    }

    async fn snapshot(&self) -> TelemetryResult<Vec<TelemetryReading>> {
        Ok((0..self.batch_size).map(|_| self.reading()).collect())
    }
}

/// Uniform value in [0, 1) from the top 53 bits of a `u64`
fn unit_interval<R: RngCore + ?Sized>(rng: &mut R) -> f64 {
    (rng.next_u64() >> 11) as f64 / (1u64 << 53) as f64
}

// ============================================
// SYSTEM SOURCE
// ============================================

/// Host readings sampled in the background
///
/// The sampler task is aborted when the source is dropped. While the most
/// recent sample failed, snapshots fail with [`TelemetryError::Sampling`].
pub struct SystemSource {
    batch_size: usize,
    history: Arc<RwLock<VecDeque<TelemetryReading>>>,
    /// Error from the most recent sample, if it failed
    fault: Arc<RwLock<Option<String>>>,
    sampler: Option<JoinHandle<()>>,
}

impl SystemSource {
    /// Start sampling the host every `interval`, keeping at most `capacity` readings
    pub fn spawn(batch_size: usize, interval: Duration, capacity: usize) -> Self {
        let history = Arc::new(RwLock::new(VecDeque::with_capacity(capacity)));
        let interval = interval.max(sysinfo::MINIMUM_CPU_UPDATE_INTERVAL);
        let fault = Arc::new(RwLock::new(None));
        let task_history = Arc::clone(&history);
        let task_fault = Arc::clone(&fault);

        let sampler = tokio::spawn(async move {
            let mut sys = System::new();
            // CPU usage is a delta between two refreshes
            sys.refresh_cpu_usage();

            let mut ticker = tokio::time::interval(interval);
            ticker.tick().await;

            loop {
                ticker.tick().await;
                match sample_host(&mut sys) {
                    Ok(reading) => {
                        tracing::trace!(
                            cpu = reading.cpu_usage,
                            memory = reading.memory_usage,
                            "Sampled host"
                        );
                        *task_fault.write().await = None;
                        let mut history = task_history.write().await;
                        push_bounded(&mut history, reading, capacity);
                    }
                    Err(e) => {
                        tracing::warn!("Host sampling failed: {}", e);
                        *task_fault.write().await = Some(e.to_string());
                    }
                }
            }
        });

        tracing::info!(
            "System sampler started (interval {:?}, capacity {})",
            interval,
            capacity
        );

        Self {
            batch_size,
            history,
            fault,
            sampler: Some(sampler),
        }
    }

    /// Build a source over an existing history, without a sampler
    pub fn from_history(batch_size: usize, readings: Vec<TelemetryReading>) -> Self {
        Self {
            batch_size,
            history: Arc::new(RwLock::new(readings.into())),
            fault: Arc::new(RwLock::new(None)),
            sampler: None,
        }
    }

    /// Number of readings currently held
    pub async fn history_len(&self) -> usize {
        self.history.read().await.len()
    }
}

impl Drop for SystemSource {
    fn drop(&mut self) {
        if let Some(handle) = self.sampler.take() {
            handle.abort();
        }
    }
}

#[async_trait]
impl TelemetrySource for SystemSource {
    fn name(&self) -> &str {
        "system"
    }

    async fn snapshot(&self) -> TelemetryResult<Vec<TelemetryReading>> {
        if let Some(fault) = self.fault.read().await.as_ref() {
            return Err(TelemetryError::Sampling(fault.clone()));
        }

        let history = self.history.read().await;
        let skip = history.len().saturating_sub(self.batch_size);
        Ok(history.iter().skip(skip).cloned().collect())
    }
}

/// Refresh and read global CPU and memory usage
fn sample_host(sys: &mut System) -> TelemetryResult<TelemetryReading> {
    sys.refresh_cpu_usage();
    sys.refresh_memory();

    let cpu_usages: Vec<f32> = sys.cpus().iter().map(|cpu| cpu.cpu_usage()).collect();
    host_reading(&cpu_usages, sys.used_memory(), sys.total_memory())
}

/// Mean CPU usage and used share of memory
fn host_reading(
    cpu_usages: &[f32],
    used_memory: u64,
    total_memory: u64,
) -> TelemetryResult<TelemetryReading> {
    if cpu_usages.is_empty() {
        return Err(TelemetryError::Sampling("host reports no CPUs".to_string()));
    }
    if total_memory == 0 {
        return Err(TelemetryError::Sampling("host reports no memory".to_string()));
    }

    let cpu = cpu_usages.iter().map(|&usage| usage as f64).sum::<f64>() / cpu_usages.len() as f64;
    let memory = used_memory as f64 / total_memory as f64 * 100.0;
    Ok(TelemetryReading::new(cpu, memory))
}

/// Push a reading, evicting the oldest when at capacity
fn push_bounded(history: &mut VecDeque<TelemetryReading>, reading: TelemetryReading, capacity: usize) {
    if capacity == 0 {
        return;
    }
    while history.len() >= capacity {
        history.pop_front();
    }
    history.push_back(reading);
}
