//! Live chart model.
//!
//! [`ChartState`] owns the label sequence (one integer Unix timestamp per
//! update) and one [`Series`] per [`SensorKind`]. Each series stores explicit
//! `(time, value)` samples, so a reading that omits a channel leaves that
//! series shorter than the label sequence without misaligning it.
//!
//! [`LiveChart`] is the updater: it appends a reading and asks the renderer
//! for a redraw through a [`RedrawHook`].

use crate::types::{SensorKind, SensorReading};
use chrono::{DateTime, Utc};
use std::collections::VecDeque;

/// A single plotted sample
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    /// Seconds since the Unix epoch, with millisecond resolution
    pub time: f64,
    pub value: f64,
}

/// Samples of one sensor channel
#[derive(Debug, Clone)]
pub struct Series {
    kind: SensorKind,
    samples: VecDeque<Sample>,
}

impl Series {
    fn new(kind: SensorKind) -> Self {
        Self {
            kind,
            samples: VecDeque::new(),
        }
    }

    pub fn kind(&self) -> SensorKind {
        self.kind
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn samples(&self) -> impl Iterator<Item = &Sample> {
        self.samples.iter()
    }

    /// Sample values in insertion order
    pub fn values(&self) -> Vec<f64> {
        self.samples.iter().map(|s| s.value).collect()
    }

    pub fn last_value(&self) -> Option<f64> {
        self.samples.back().map(|s| s.value)
    }

    /// Points for egui_plot, x relative to `origin`
    pub fn as_plot_points(&self, origin: f64) -> Vec<[f64; 2]> {
        self.samples
            .iter()
            .map(|s| [s.time - origin, s.value])
            .collect()
    }
}

/// Chart dataset: labels plus one series per sensor kind
#[derive(Debug, Clone)]
pub struct ChartState {
    labels: VecDeque<i64>,
    series: [Series; 4],
    history_limit: Option<usize>,
    revision: u64,
}

impl Default for ChartState {
    fn default() -> Self {
        Self::new(None)
    }
}

impl ChartState {
    /// Create an empty chart. `history_limit` caps the number of retained
    /// labels and samples per series; `None` keeps everything.
    pub fn new(history_limit: Option<usize>) -> Self {
        Self {
            labels: VecDeque::new(),
            series: SensorKind::ALL.map(Series::new),
            history_limit: history_limit.filter(|&n| n > 0),
            revision: 0,
        }
    }

    pub fn labels(&self) -> &VecDeque<i64> {
        &self.labels
    }

    pub fn series(&self, kind: SensorKind) -> &Series {
        &self.series[kind.index()]
    }

    pub fn all_series(&self) -> impl Iterator<Item = &Series> {
        self.series.iter()
    }

    /// Incremented on every update
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Time of the first retained sample, used as the plot origin
    pub fn origin(&self) -> Option<f64> {
        self.series
            .iter()
            .filter_map(|s| s.samples.front().map(|p| p.time))
            .reduce(f64::min)
    }

    /// Time of the most recent sample
    pub fn latest_time(&self) -> Option<f64> {
        self.series
            .iter()
            .filter_map(|s| s.samples.back().map(|p| p.time))
            .reduce(f64::max)
    }

    /// Append one update taken at `at`.
    ///
    /// The label sequence always grows by one; only channels present in
    /// `reading` get a sample.
    pub fn push(&mut self, reading: &SensorReading, at: DateTime<Utc>) {
        let time = at.timestamp_millis() as f64 / 1000.0;
        self.labels.push_back(at.timestamp());

        for (kind, value) in reading.present() {
            self.series[kind.index()]
                .samples
                .push_back(Sample { time, value });
        }

        self.enforce_limit();
        self.revision += 1;
    }

    /// Remove all labels and samples
    pub fn clear(&mut self) {
        self.labels.clear();
        for series in &mut self.series {
            series.samples.clear();
        }
        self.revision += 1;
    }

    fn enforce_limit(&mut self) {
        let Some(limit) = self.history_limit else {
            return;
        };
        while self.labels.len() > limit {
            self.labels.pop_front();
        }
        let oldest_label = self.labels.front().copied().unwrap_or(i64::MIN) as f64;
        for series in &mut self.series {
            while series.samples.len() > limit
                || series
                    .samples
                    .front()
                    .is_some_and(|s| s.time.floor() < oldest_label)
            {
                series.samples.pop_front();
            }
        }
    }
}

/// Something that can schedule a repaint of the chart
pub trait RedrawHook {
    fn request_redraw(&self);
}

impl RedrawHook for egui::Context {
    fn request_redraw(&self) {
        self.request_repaint();
    }
}

/// Hook for headless use
pub struct NoRedraw;

impl RedrawHook for NoRedraw {
    fn request_redraw(&self) {}
}

/// The chart updater: owns the dataset and triggers redraws
pub struct LiveChart {
    state: ChartState,
    redraw: Box<dyn RedrawHook>,
}

impl LiveChart {
    pub fn new(history_limit: Option<usize>, redraw: Box<dyn RedrawHook>) -> Self {
        Self {
            state: ChartState::new(history_limit),
            redraw,
        }
    }

    pub fn state(&self) -> &ChartState {
        &self.state
    }

    /// Append a reading stamped with the current time and redraw
    pub fn append_sample(&mut self, reading: &SensorReading) {
        self.append_sample_at(reading, Utc::now());
    }

    /// Append a reading stamped with `at` and redraw
    pub fn append_sample_at(&mut self, reading: &SensorReading, at: DateTime<Utc>) {
        self.state.push(reading, at);
        self.redraw.request_redraw();
    }

    pub fn clear(&mut self) {
        self.state.clear();
        self.redraw.request_redraw();
    }
}
