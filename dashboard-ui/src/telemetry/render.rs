//! Card rendering
//!
//! Turns a batch into one view-model per sample, in response order.
//! Bar widths are the raw percentage: nothing is clamped, so 150 renders
//! wider than its track and -5 renders empty.

use super::sample::TelemetrySample;
use super::stats::format_percent;

/// Which metric a bar shows
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BarKind {
    Cpu,
    Memory,
}

impl BarKind {
    pub fn label(&self) -> &'static str {
        match self {
            BarKind::Cpu => "CPU Usage",
            BarKind::Memory => "Memory Usage",
        }
    }

    /// Fill class for the bar
    pub fn css_class(&self) -> &'static str {
        match self {
            BarKind::Cpu => "progress-fill cpu-progress",
            BarKind::Memory => "progress-fill memory-progress",
        }
    }
}

/// A percentage bar
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bar {
    pub kind: BarKind,
    pub percent: f64,
}

impl Bar {
    /// Inline style for the fill element
    pub fn width_style(&self) -> String {
        format!("width: {}%", self.percent)
    }

    /// Metric value, two decimals
    pub fn value_label(&self) -> String {
        format_percent(self.percent)
    }

    /// Text inside the fill, one decimal
    pub fn fill_label(&self) -> String {
        format!("{:.1}%", self.percent)
    }
}

/// View-model for one reading
#[derive(Clone, Debug, PartialEq)]
pub struct Card {
    /// 1-based position in the batch
    pub index: usize,
    pub timestamp: String,
    pub cpu: Bar,
    pub memory: Bar,
}

impl Card {
    pub fn title(&self) -> String {
        format!("Reading #{}", self.index)
    }

    pub fn bars(&self) -> [Bar; 2] {
        [self.cpu, self.memory]
    }
}

/// One card per sample, numbered from 1
pub fn render(samples: &[TelemetrySample]) -> Vec<Card> {
    samples
        .iter()
        .enumerate()
        .map(|(i, sample)| Card {
            index: i + 1,
            timestamp: sample.timestamp.clone(),
            cpu: Bar {
                kind: BarKind::Cpu,
                percent: sample.cpu_usage,
            },
            memory: Bar {
                kind: BarKind::Memory,
                percent: sample.memory_usage,
            },
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::telemetry::testing::sample;

    #[test]
    fn test_render_in_order() {
        let cards = render(&[sample("t1", 50.0, 40.0), sample("t2", 90.0, 50.0)]);

        assert_eq!(cards.len(), 2);
        assert_eq!(cards[0].title(), "Reading #1");
        assert_eq!(cards[0].timestamp, "t1");
        assert_eq!(cards[1].title(), "Reading #2");
        assert_eq!(cards[1].timestamp, "t2");
    }

    #[test]
    fn test_labels() {
        let cards = render(&[sample("t1", 42.126, 7.0)]);
        let card = &cards[0];

        assert_eq!(card.cpu.value_label(), "42.13%");
        assert_eq!(card.cpu.fill_label(), "42.1%");
        assert_eq!(card.memory.value_label(), "7.00%");
        assert_eq!(card.memory.fill_label(), "7.0%");
        assert_eq!(card.memory.width_style(), "width: 7%");
    }

    #[test]
    fn test_width_is_not_clamped() {
        let cards = render(&[sample("t1", 150.0, -5.0)]);

        assert_eq!(cards[0].cpu.width_style(), "width: 150%");
        assert_eq!(cards[0].memory.width_style(), "width: -5%");
        assert_eq!(cards[0].cpu.value_label(), "150.00%");
    }

    #[test]
    fn test_timestamp_verbatim() {
        let cards = render(&[sample("  not a date ", 1.0, 2.0)]);
        assert_eq!(cards[0].timestamp, "  not a date ");
    }

    #[test]
    fn test_empty_batch() {
        assert!(render(&[]).is_empty());
    }
}
