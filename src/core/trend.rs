//! # Trend Visualizer
//!
//! Owns the trend overlay's visibility and the one live chart instance.
//!
//! ```text
//! open() ──► loading ──► render(data) ──► chart #n (previous disposed first)
//!                  └───► fail()       ──► closed
//! close() at any time: hides the overlay, keeps the chart
//! ```

use log::debug;

use crate::analysis::TrendData;
use crate::core::replies::capitalize;

/// Simple 24-bit color so `core` stays free of UI types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

/// Bar fill colors, assigned by index and cycled when there are more bars.
pub const PALETTE: [Rgb; 8] = [
    Rgb(0x00, 0xc6, 0xff),
    Rgb(0xff, 0x4d, 0x4d),
    Rgb(0xa2, 0x9b, 0xfe),
    Rgb(0x81, 0xec, 0xec),
    Rgb(0xfa, 0xb1, 0xa0),
    Rgb(0x55, 0xef, 0xc4),
    Rgb(0xff, 0xea, 0xa7),
    Rgb(0xe1, 0x70, 0x55),
];

pub const DATASET_LABEL: &str = "Emotion Frequency";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bar {
    pub label: String,
    pub value: u64,
    pub color: Rgb,
}

/// A rendered chart instance. Only [`TrendVisualizer`] creates or disposes these.
#[derive(Debug, PartialEq, Eq)]
pub struct TrendChart {
    generation: u64,
    bars: Vec<Bar>,
}

impl TrendChart {
    fn build(data: &TrendData, generation: u64) -> Self {
        let bars = data
            .iter()
            .enumerate()
            .map(|(i, (label, value))| Bar {
                label: capitalize(label),
                value,
                color: PALETTE[i % PALETTE.len()],
            })
            .collect();
        Self { generation, bars }
    }

    fn dispose(self) {
        debug!(
            "Disposed trend chart #{} ({} bars)",
            self.generation,
            self.bars.len()
        );
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn bars(&self) -> &[Bar] {
        &self.bars
    }

    pub fn max_value(&self) -> u64 {
        self.bars.iter().map(|bar| bar.value).max().unwrap_or(0)
    }

    /// Zero-based y-axis ticks with an integer step, at most `max_ticks` of them
    /// (never fewer than two). The last tick is at or above the tallest bar.
    pub fn y_ticks(&self, max_ticks: usize) -> Vec<u64> {
        let top = self.max_value().max(1);
        let intervals = (max_ticks.max(2) - 1) as u64;
        let step = top.div_ceil(intervals).max(1);

        let mut ticks = vec![0];
        let mut tick = 0;
        while tick < top {
            tick += step;
            ticks.push(tick);
        }
        ticks
    }
}

#[derive(Debug, Default)]
pub struct TrendVisualizer {
    visible: bool,
    loading: bool,
    chart: Option<TrendChart>,
    generation: u64,
}

impl TrendVisualizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Shows the overlay and marks a fetch as outstanding.
    pub fn open(&mut self) {
        self.visible = true;
        self.loading = true;
    }

    /// Hides the overlay. Safe to call in any state.
    pub fn close(&mut self) {
        self.visible = false;
    }

    /// Replaces the chart with one built from `data`.
    /// The previous instance is disposed before the new one exists.
    pub fn render(&mut self, data: &TrendData) -> &TrendChart {
        if let Some(previous) = self.chart.take() {
            previous.dispose();
        }

        self.generation += 1;
        self.loading = false;
        debug!(
            "Rendering trend chart #{} with {} categories",
            self.generation,
            data.len()
        );
        self.chart.insert(TrendChart::build(data, self.generation))
    }

    /// A fetch failed: nothing half-rendered stays on screen.
    pub fn fail(&mut self) {
        self.loading = false;
        self.close();
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn chart(&self) -> Option<&TrendChart> {
        self.chart.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn data(pairs: &[(&str, u64)]) -> TrendData {
        pairs.iter().map(|(k, v)| (*k, *v)).collect()
    }

    #[test]
    fn close_without_open_is_noop() {
        let mut trend = TrendVisualizer::new();
        trend.close();
        trend.close();
        assert!(!trend.is_visible());
        assert!(trend.chart().is_none());
    }

    #[test]
    fn open_shows_loading_overlay() {
        let mut trend = TrendVisualizer::new();
        trend.open();
        assert!(trend.is_visible());
        assert!(trend.is_loading());
    }

    #[test]
    fn render_builds_capitalized_bars() {
        let mut trend = TrendVisualizer::new();
        trend.open();
        let chart = trend.render(&data(&[("joy", 3), ("anger", 1)]));

        let labels: Vec<&str> = chart.bars().iter().map(|b| b.label.as_str()).collect();
        assert_eq!(labels, vec!["Anger", "Joy"]);
        assert_eq!(chart.bars()[1].value, 3);
        assert!(!trend.is_loading());
    }

    #[test]
    fn second_render_replaces_first() {
        let mut trend = TrendVisualizer::new();
        trend.render(&data(&[("joy", 1), ("fear", 2)]));
        trend.render(&data(&[("love", 7)]));

        let chart = trend.chart().unwrap();
        assert_eq!(chart.generation(), 2);
        // New dataset only, nothing merged from the first render
        assert_eq!(chart.bars().len(), 1);
        assert_eq!(chart.bars()[0].label, "Love");
    }

    #[test]
    fn palette_cycles_past_eight_categories() {
        let labels = ["a", "b", "c", "d", "e", "f", "g", "h", "i", "j"];
        let pairs: Vec<(&str, u64)> = labels.iter().map(|l| (*l, 1)).collect();
        let mut trend = TrendVisualizer::new();
        let chart = trend.render(&data(&pairs));

        assert_eq!(chart.bars()[0].color, PALETTE[0]);
        assert_eq!(chart.bars()[7].color, PALETTE[7]);
        assert_eq!(chart.bars()[8].color, PALETTE[0]);
        assert_eq!(chart.bars()[9].color, PALETTE[1]);
        // First eight are pairwise distinct
        for i in 0..8 {
            for j in (i + 1)..8 {
                assert_ne!(chart.bars()[i].color, chart.bars()[j].color);
            }
        }
    }

    #[test]
    fn fail_closes_overlay() {
        let mut trend = TrendVisualizer::new();
        trend.open();
        trend.fail();
        assert!(!trend.is_visible());
        assert!(!trend.is_loading());
    }

    #[test]
    fn y_ticks_step_by_one_for_small_counts() {
        let mut trend = TrendVisualizer::new();
        let chart = trend.render(&data(&[("joy", 4), ("fear", 2)]));
        assert_eq!(chart.y_ticks(10), vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn y_ticks_widen_step_to_fit() {
        let mut trend = TrendVisualizer::new();
        let chart = trend.render(&data(&[("joy", 41)]));
        let ticks = chart.y_ticks(5);
        assert_eq!(ticks, vec![0, 11, 22, 33, 44]);
        assert!(ticks.len() <= 5);
    }

    #[test]
    fn y_ticks_for_all_zero_data() {
        let mut trend = TrendVisualizer::new();
        let chart = trend.render(&data(&[("joy", 0), ("fear", 0)]));
        assert_eq!(chart.y_ticks(6), vec![0, 1]);
    }
}
