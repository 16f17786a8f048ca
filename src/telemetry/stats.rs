//! Summary statistics over a batch of readings

use serde::Serialize;

use super::types::{TelemetryReading, TelemetrySample};

/// Count, means and extremes of one batch
#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
pub struct Summary {
    pub count: usize,
    pub avg_cpu: f64,
    pub min_cpu: f64,
    pub max_cpu: f64,
    pub avg_memory: f64,
}

impl Summary {
    /// Summarize `(cpu, memory)` pairs; `None` for an empty batch
    pub fn from_pairs(pairs: impl IntoIterator<Item = (f64, f64)>) -> Option<Self> {
        let mut count = 0usize;
        let mut cpu_sum = 0.0;
        let mut memory_sum = 0.0;
        let mut min_cpu = f64::INFINITY;
        let mut max_cpu = f64::NEG_INFINITY;

        for (cpu, memory) in pairs {
            count += 1;
            cpu_sum += cpu;
            memory_sum += memory;
            min_cpu = min_cpu.min(cpu);
            max_cpu = max_cpu.max(cpu);
        }

        if count == 0 {
            return None;
        }

        Some(Self {
            count,
            avg_cpu: cpu_sum / count as f64,
            min_cpu,
            max_cpu,
            avg_memory: memory_sum / count as f64,
        })
    }

    pub fn from_readings(readings: &[TelemetryReading]) -> Option<Self> {
        Self::from_pairs(readings.iter().map(|r| (r.cpu_usage, r.memory_usage)))
    }

    pub fn from_samples(samples: &[TelemetrySample]) -> Option<Self> {
        Self::from_pairs(samples.iter().map(|s| (s.cpu_usage, s.memory_usage)))
    }
}

impl std::fmt::Display for Summary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} readings, avg CPU {:.2}%, min CPU {:.2}%, max CPU {:.2}%, avg memory {:.2}%",
            self.count, self.avg_cpu, self.min_cpu, self.max_cpu, self.avg_memory
        )
    }
}
