//! Training workflow on top of the memory.
//!
//! - **samples**: bounded set of `(target, input)` pairs
//! - **session**: idle/training state machine running training cycles
//! - **metrics**: rolling per-cycle recall error

pub mod metrics;
pub mod samples;
pub mod session;

pub use metrics::{MetricsReport, RecallMetrics};
pub use samples::{TrainingSample, TrainingSet};
pub use session::{SessionState, TrainingSession};
