use std::time::{Duration, Instant};

/// Stopwatch collecting the duration of each run.
#[derive(Default)]
pub struct Timer {
    laps: Vec<Duration>,
    started: Option<Instant>,
}

impl Timer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start(&mut self) {
        self.started = Some(Instant::now());
    }

    pub fn stop(&mut self) {
        if let Some(started) = self.started.take() {
            self.laps.push(started.elapsed());
        }
    }

    pub fn reset(&mut self) {
        self.laps.clear();
        self.started = None;
    }

    /// Drops the fastest and the slowest runs when enough runs remain.
    pub fn trim_extremes(&mut self) {
        if self.laps.len() > 2 {
            self.laps.sort_unstable();
            self.laps.pop();
            self.laps.remove(0);
        }
    }

    pub fn min(&self) -> f64 {
        self.laps.iter().min().map_or(0.0, Duration::as_secs_f64)
    }

    pub fn max(&self) -> f64 {
        self.laps.iter().max().map_or(0.0, Duration::as_secs_f64)
    }

    pub fn average(&self) -> f64 {
        if self.laps.is_empty() {
            return 0.0;
        }
        let total: Duration = self.laps.iter().sum();
        total.as_secs_f64() / self.laps.len() as f64
    }
}
