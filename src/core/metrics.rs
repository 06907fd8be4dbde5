use super::types::Tick;
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

pub const DEFAULT_METRICS_WINDOW: usize = 100;

/// Rolling samples derived from completed requests
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Metrics {
    pub wait_times: VecDeque<Tick>,
    pub travel_times: VecDeque<Tick>,
    pub elevator_utilization: VecDeque<f64>,
    pub peak_mode: bool,
    #[serde(skip, default = "default_window")]
    window: usize,
}

fn default_window() -> usize {
    DEFAULT_METRICS_WINDOW
}

impl Default for Metrics {
    fn default() -> Self {
        Self::with_window(DEFAULT_METRICS_WINDOW)
    }
}

fn push_bounded<T>(samples: &mut VecDeque<T>, sample: T, window: usize) {
    samples.push_back(sample);
    while samples.len() > window {
        samples.pop_front();
    }
}

fn mean(samples: impl Iterator<Item = f64>) -> f64 {
    let (sum, count) = samples.fold((0.0, 0usize), |(sum, count), x| (sum + x, count + 1));
    if count == 0 {
        0.0
    } else {
        sum / count as f64
    }
}

impl Metrics {
    pub fn with_window(window: usize) -> Self {
        Self {
            wait_times: VecDeque::with_capacity(window),
            travel_times: VecDeque::with_capacity(window),
            elevator_utilization: VecDeque::with_capacity(window),
            peak_mode: false,
            window,
        }
    }

    /// Record one completed request; the oldest samples fall out past the window
    pub fn record_completion(&mut self, wait_time: Tick, travel_time: Tick, utilization: f64) {
        push_bounded(&mut self.wait_times, wait_time, self.window);
        push_bounded(&mut self.travel_times, travel_time, self.window);
        push_bounded(&mut self.elevator_utilization, utilization, self.window);
        debug!(
            "[Metrics] wait={} travel={} utilization={:.2} (samples: {})",
            wait_time,
            travel_time,
            utilization,
            self.wait_times.len()
        );
    }

    pub fn average_wait_time(&self) -> f64 {
        mean(self.wait_times.iter().map(|&t| t as f64))
    }

    pub fn average_travel_time(&self) -> f64 {
        mean(self.travel_times.iter().map(|&t| t as f64))
    }

    pub fn max_wait_time(&self) -> Tick {
        self.wait_times.iter().copied().max().unwrap_or(0)
    }

    pub fn average_utilization(&self) -> f64 {
        mean(self.elevator_utilization.iter().copied())
    }

    /// Summarize the current window as a historical record
    pub fn summarize(&self, tick: Tick, requests_handled: usize) -> MetricsRecord {
        MetricsRecord {
            scenario: if self.peak_mode { "peak" } else { "normal" }.to_string(),
            tick,
            avg_wait_time: self.average_wait_time(),
            avg_travel_time: self.average_travel_time(),
            max_wait_time: self.max_wait_time(),
            elevator_utilization: self.average_utilization(),
            requests_handled,
        }
    }
}

/// Point-in-time summary handed to a metrics history store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricsRecord {
    pub scenario: String,
    pub tick: Tick,
    pub avg_wait_time: f64,
    pub avg_travel_time: f64,
    pub max_wait_time: Tick,
    pub elevator_utilization: f64,
    pub requests_handled: usize,
}
