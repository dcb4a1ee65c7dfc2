//! Rolling recall-error tracking for training sessions.

use std::collections::VecDeque;

/// Mean recall error measured after one training cycle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ErrorSample {
    pub cycle: u64,
    pub value: f32,
}

/// A rolling window of per-cycle recall errors.
#[derive(Clone, Debug)]
pub struct RecallMetrics {
    /// Most recent per-cycle errors, oldest first.
    errors: VecDeque<ErrorSample>,

    /// Cycles kept before the oldest error is evicted.
    window: usize,

    /// Lowest error since the last reset, even if it has left the window.
    best: Option<f32>,

    /// Cycles recorded since the last reset, evicted ones included.
    total_recorded: u64,
}

/// Summary of a [`RecallMetrics`] window.
#[derive(Clone, Debug, PartialEq)]
pub struct MetricsReport {
    pub cycles_recorded: u64,
    pub latest_error: Option<f32>,
    pub mean_error: f32,
    pub std_dev: f32,
    pub best_error: Option<f32>,
    pub converging: bool,
}

impl RecallMetrics {
    /// Track the errors of the last `window` cycles (at least one).
    pub fn new(window: usize) -> Self {
        let window = window.max(1);
        Self {
            errors: VecDeque::with_capacity(window),
            window,
            best: None,
            total_recorded: 0,
        }
    }

    /// Record the mean recall error measured after `cycle`.
    pub fn record(&mut self, cycle: u64, value: f32) {
        if self.errors.len() == self.window {
            self.errors.pop_front();
        }
        self.errors.push_back(ErrorSample { cycle, value });
        self.best = Some(match self.best {
            Some(b) if b <= value => b,
            _ => value,
        });
        self.total_recorded += 1;
    }

    /// Error after the most recent cycle.
    pub fn latest(&self) -> Option<f32> {
        self.errors.back().map(|e| e.value)
    }

    fn values(&self) -> impl Iterator<Item = f32> + '_ {
        self.errors.iter().map(|e| e.value)
    }

    /// Average recall error across the cycles still in the window.
    pub fn mean(&self) -> f32 {
        match self.errors.len() {
            0 => 0.0,
            n => self.values().sum::<f32>() / n as f32,
        }
    }

    /// Spread of the windowed errors (Bessel-corrected); zero below two cycles.
    pub fn std_dev(&self) -> f32 {
        let n = self.errors.len();
        if n < 2 {
            return 0.0;
        }
        let mean = self.mean();
        let sq: f32 = self.values().map(|v| (v - mean) * (v - mean)).sum();
        (sq / (n - 1) as f32).sqrt()
    }

    pub fn best(&self) -> Option<f32> {
        self.best
    }

    /// True when the newest error in the window is below the oldest.
    pub fn is_converging(&self) -> bool {
        match (self.errors.front(), self.errors.back()) {
            (Some(first), Some(last)) if self.errors.len() >= 2 => last.value < first.value,
            _ => false,
        }
    }

    pub fn reset(&mut self) {
        self.errors.clear();
        self.best = None;
        self.total_recorded = 0;
    }

    pub fn report(&self) -> MetricsReport {
        MetricsReport {
            cycles_recorded: self.total_recorded,
            latest_error: self.latest(),
            mean_error: self.mean(),
            std_dev: self.std_dev(),
            best_error: self.best,
            converging: self.is_converging(),
        }
    }
}

impl Default for RecallMetrics {
    fn default() -> Self {
        Self::new(100)
    }
}
