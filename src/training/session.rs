//! Interactive training loop around one memory and its sample set.
//!
//! A session is either idle or training. While training, each
//! [`run_cycle`](TrainingSession::run_cycle) trains every stored pair once, in
//! insertion order, and records the mean recall error. Entering training
//! requires at least one sample and restarts the cycle counter; `reset` drops
//! the samples and clears the memory.

use tracing::{debug, info};

use crate::error::Result;
use crate::memory::{AssociativeMemory, MemoryConfig};
use crate::training::metrics::{MetricsReport, RecallMetrics};
use crate::training::samples::{TrainingSample, TrainingSet};

/// Whether cycles are currently being run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    Training,
}

pub struct TrainingSession {
    memory: AssociativeMemory,
    samples: TrainingSet,
    state: SessionState,
    cycles: u64,
    metrics: RecallMetrics,
}

impl TrainingSession {
    /// A session over a fresh memory built from `config`.
    pub fn new(config: MemoryConfig, capacity: usize) -> Result<Self> {
        let memory = AssociativeMemory::new(config)?;
        Ok(Self::with_memory(memory, capacity))
    }

    /// A session around an existing memory.
    pub fn with_memory(memory: AssociativeMemory, capacity: usize) -> Self {
        let samples = TrainingSet::new(memory.vec_len(), capacity);
        Self {
            memory,
            samples,
            state: SessionState::Idle,
            cycles: 0,
            metrics: RecallMetrics::default(),
        }
    }

    /// Store `v` as an auto-associative sample.
    pub fn add_sample(&mut self, v: Vec<f32>) -> Result<()> {
        self.samples.push_autoassociative(v)
    }

    /// Store a hetero-associative pair.
    pub fn add_pair(&mut self, target: Vec<f32>, input: Vec<f32>) -> Result<()> {
        self.samples.push(TrainingSample { target, input })
    }

    /// Flip between idle and training. Returns the new state.
    pub fn toggle_training(&mut self) -> SessionState {
        self.state = match self.state {
            SessionState::Training => {
                info!(cycles = self.cycles, "training stopped");
                SessionState::Idle
            }
            SessionState::Idle if self.samples.is_empty() => SessionState::Idle,
            SessionState::Idle => {
                self.cycles = 0;
                self.metrics.reset();
                info!(samples = self.samples.len(), "training started");
                SessionState::Training
            }
        };
        self.state
    }

    /// Train every sample once and return the resulting mean recall error.
    ///
    /// Does nothing and returns `None` while idle.
    pub fn run_cycle(&mut self) -> Result<Option<f32>> {
        if self.state == SessionState::Idle {
            return Ok(None);
        }
        for sample in &self.samples {
            self.memory.train(&sample.target, &sample.input)?;
        }
        self.cycles += 1;

        let error = self.mean_recall_error()?;
        self.metrics.record(self.cycles, error);
        debug!(cycle = self.cycles, error, "training cycle complete");
        Ok(Some(error))
    }

    /// Run up to `n` cycles, returning the error after the last one.
    pub fn train_cycles(&mut self, n: usize) -> Result<Option<f32>> {
        let mut last = None;
        for _ in 0..n {
            match self.run_cycle()? {
                Some(e) => last = Some(e),
                None => break,
            }
        }
        Ok(last)
    }

    /// Mean Euclidean distance between each sample's recall and its target.
    pub fn mean_recall_error(&mut self) -> Result<f32> {
        if self.samples.is_empty() {
            return Ok(0.0);
        }
        let mut total = 0.0f32;
        for sample in &self.samples {
            total += self.memory.recall_error(&sample.target, &sample.input)?;
        }
        Ok(total / self.samples.len() as f32)
    }

    pub fn recall(&mut self, result: &mut [f32], input: &[f32]) -> Result<()> {
        self.memory.recall(result, input)
    }

    /// Drop all samples, clear the memory and return to idle.
    pub fn reset(&mut self) {
        self.samples.clear();
        self.memory.clear();
        self.metrics.reset();
        self.state = SessionState::Idle;
        self.cycles = 0;
        info!("training session reset");
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    pub fn samples(&self) -> &TrainingSet {
        &self.samples
    }

    pub fn memory(&self) -> &AssociativeMemory {
        &self.memory
    }

    pub fn metrics(&self) -> &RecallMetrics {
        &self.metrics
    }

    pub fn report(&self) -> MetricsReport {
        self.metrics.report()
    }
}
