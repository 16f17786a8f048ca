//! Batch summary
//!
//! Derived from the same slice the cards are rendered from, so the two
//! always describe the same batch.

use super::sample::TelemetrySample;

/// Aggregate view of one batch
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Summary {
    pub count: usize,
    pub avg_cpu: f64,
    pub avg_memory: f64,
    pub max_cpu: f64,
}

impl Summary {
    pub fn avg_cpu_label(&self) -> String {
        format_percent(self.avg_cpu)
    }

    pub fn avg_memory_label(&self) -> String {
        format_percent(self.avg_memory)
    }

    pub fn max_cpu_label(&self) -> String {
        format_percent(self.max_cpu)
    }
}

/// Summarize a batch; `None` for an empty one
///
/// A `NaN` percentage poisons every aggregate it feeds, including the peak.
pub fn summarize(samples: &[TelemetrySample]) -> Option<Summary> {
    if samples.is_empty() {
        return None;
    }

    let count = samples.len();
    let (cpu_total, memory_total, max_cpu) = samples.iter().fold(
        (0.0, 0.0, f64::NEG_INFINITY),
        |(cpu, memory, max), sample| {
            let max = if max.is_nan() || sample.cpu_usage.is_nan() {
                f64::NAN
            } else {
                max.max(sample.cpu_usage)
            };
            (cpu + sample.cpu_usage, memory + sample.memory_usage, max)
        },
    );

    Some(Summary {
        count,
        avg_cpu: cpu_total / count as f64,
        avg_memory: memory_total / count as f64,
        max_cpu,
    })
}

/// Two-decimal percentage label, e.g. `42.50%`
pub fn format_percent(value: f64) -> String {
    format!("{:.2}%", value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::telemetry::testing::sample;

    #[test]
    fn test_summarize() {
        let samples = vec![sample("t1", 50.0, 40.0), sample("t2", 90.0, 50.0)];
        let summary = summarize(&samples).unwrap();

        assert_eq!(
            summary,
            Summary {
                count: 2,
                avg_cpu: 70.0,
                avg_memory: 45.0,
                max_cpu: 90.0,
            }
        );
        assert_eq!(summary.avg_cpu_label(), "70.00%");
        assert_eq!(summary.avg_memory_label(), "45.00%");
        assert_eq!(summary.max_cpu_label(), "90.00%");
    }

    #[test]
    fn test_single_sample() {
        let summary = summarize(&[sample("t1", 12.5, 33.0)]).unwrap();
        assert_eq!(summary.count, 1);
        assert_eq!(summary.avg_cpu, 12.5);
        assert_eq!(summary.max_cpu, 12.5);
    }

    #[test]
    fn test_means_within_bounds() {
        // Linear congruential sequence scaled to [0, 100)
        let mut state: u64 = 0x2545_f491;
        let mut next = move || {
            state = state.wrapping_mul(6_364_136_223_846_793_005).wrapping_add(1_442_695_040_888_963_407);
            (state >> 11) as f64 / (1u64 << 53) as f64 * 100.0
        };

        for len in 1..=40 {
            let samples: Vec<_> = (0..len)
                .map(|i| sample(&format!("t{}", i), next(), next()))
                .collect();
            let summary = summarize(&samples).unwrap();

            let cpus: Vec<f64> = samples.iter().map(|s| s.cpu_usage).collect();
            let memories: Vec<f64> = samples.iter().map(|s| s.memory_usage).collect();
            let min_cpu = cpus.iter().cloned().fold(f64::INFINITY, f64::min);
            let max_cpu = cpus.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
            let min_memory = memories.iter().cloned().fold(f64::INFINITY, f64::min);
            let max_memory = memories.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
            let eps = 1e-9;

            assert_eq!(summary.count, len);
            assert_eq!(summary.max_cpu, max_cpu);
            assert!(summary.avg_cpu >= min_cpu - eps && summary.avg_cpu <= max_cpu + eps);
            assert!(summary.avg_memory >= min_memory - eps && summary.avg_memory <= max_memory + eps);
        }
    }

    #[test]
    fn test_empty_batch() {
        assert_eq!(summarize(&[]), None);
    }

    #[test]
    fn test_nan_propagates() {
        let samples = vec![sample("t1", f64::NAN, 40.0), sample("t2", 90.0, 50.0)];
        let summary = summarize(&samples).unwrap();

        assert!(summary.avg_cpu.is_nan());
        assert!(summary.max_cpu.is_nan());
        assert_eq!(summary.avg_memory, 45.0);
        assert_eq!(summary.max_cpu_label(), "NaN%");
    }

    #[test]
    fn test_out_of_range_values_kept() {
        let samples = vec![sample("t1", 150.0, -5.0)];
        let summary = summarize(&samples).unwrap();
        assert_eq!(summary.max_cpu, 150.0);
        assert_eq!(summary.avg_memory, -5.0);
    }
}
