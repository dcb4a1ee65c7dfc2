//! Bounded set of `(target, input)` training pairs.

use tracing::warn;

use crate::config::SAMPLE_CAPACITY;
use crate::error::{check_len, MemoryError, Result};

/// One association to be learned.
#[derive(Clone, Debug, PartialEq)]
pub struct TrainingSample {
    pub target: Vec<f32>,
    pub input: Vec<f32>,
}

impl TrainingSample {
    /// A sample that maps `v` to itself.
    pub fn autoassociative(v: Vec<f32>) -> Self {
        Self {
            target: v.clone(),
            input: v,
        }
    }
}

/// Training pairs of a fixed vector length, kept in insertion order.
#[derive(Clone, Debug)]
pub struct TrainingSet {
    vec_len: usize,
    capacity: usize,
    samples: Vec<TrainingSample>,
}

impl TrainingSet {
    pub fn new(vec_len: usize, capacity: usize) -> Self {
        Self {
            vec_len,
            capacity,
            samples: Vec::with_capacity(capacity),
        }
    }

    /// A set with the default capacity of 32 samples.
    pub fn with_default_capacity(vec_len: usize) -> Self {
        Self::new(vec_len, SAMPLE_CAPACITY)
    }

    /// Add a pair. Fails when full or when either vector has the wrong length.
    pub fn push(&mut self, sample: TrainingSample) -> Result<()> {
        check_len(self.vec_len, sample.target.len())?;
        check_len(self.vec_len, sample.input.len())?;
        if self.is_full() {
            warn!(capacity = self.capacity, "training set full, sample rejected");
            return Err(MemoryError::CapacityExceeded {
                capacity: self.capacity,
            });
        }
        self.samples.push(sample);
        Ok(())
    }

    /// Add a pair that maps `v` to itself.
    pub fn push_autoassociative(&mut self, v: Vec<f32>) -> Result<()> {
        self.push(TrainingSample::autoassociative(v))
    }

    pub fn clear(&mut self) {
        self.samples.clear();
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.samples.len() >= self.capacity
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn vec_len(&self) -> usize {
        self.vec_len
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TrainingSample> {
        self.samples.iter()
    }

    pub fn samples(&self) -> &[TrainingSample] {
        &self.samples
    }
}

impl<'a> IntoIterator for &'a TrainingSet {
    type Item = &'a TrainingSample;
    type IntoIter = std::slice::Iter<'a, TrainingSample>;

    fn into_iter(self) -> Self::IntoIter {
        self.samples.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_until_full() {
        let mut set = TrainingSet::new(4, 2);
        set.push_autoassociative(vec![1.0; 4]).unwrap();
        set.push(TrainingSample {
            target: vec![0.0; 4],
            input: vec![2.0; 4],
        })
        .unwrap();
        assert!(set.is_full());
        assert_eq!(
            set.push_autoassociative(vec![3.0; 4]),
            Err(MemoryError::CapacityExceeded { capacity: 2 })
        );
        assert_eq!(set.len(), 2);
        assert_eq!(set.samples()[0].target, set.samples()[0].input);
    }

    #[test]
    fn test_rejects_wrong_length() {
        let mut set = TrainingSet::with_default_capacity(8);
        assert_eq!(set.capacity(), 32);
        assert!(set.push_autoassociative(vec![0.0; 7]).is_err());
        assert!(set
            .push(TrainingSample {
                target: vec![0.0; 8],
                input: vec![0.0; 9],
            })
            .is_err());
        assert!(set.is_empty());
    }

    #[test]
    fn test_clear_and_order() {
        let mut set = TrainingSet::new(2, 4);
        for i in 0..3 {
            set.push_autoassociative(vec![i as f32; 2]).unwrap();
        }
        let firsts: Vec<f32> = set.iter().map(|s| s.input[0]).collect();
        assert_eq!(firsts, vec![0.0, 1.0, 2.0]);
        set.clear();
        assert!(set.is_empty());
        assert_eq!(set.vec_len(), 2);
    }
}
