//! Bounded in-memory example source with explicit wraparound.
use crate::error::{Result, ShuffleError};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LabeledExample {
    pub pixels: Vec<u8>,
    pub label: u8,
}

/// Serves a fixed set of examples in order, restarting at the first one after
/// the last. Requests never run dry; `wraps()` tells how often it restarted.
#[derive(Clone, Debug)]
pub struct CyclicSource {
    examples: Vec<LabeledExample>,
    cursor: usize,
    served: u64,
}

impl CyclicSource {
    pub fn new(examples: Vec<LabeledExample>) -> Result<Self> {
        if examples.is_empty() {
            return Err(ShuffleError::EmptySource);
        }
        Ok(Self {
            examples,
            cursor: 0,
            served: 0,
        })
    }

    pub fn len(&self) -> usize {
        self.examples.len()
    }

    /// Never true; construction rejects empty sources.
    pub fn is_empty(&self) -> bool {
        self.examples.is_empty()
    }

    /// Index of the example the next request returns.
    pub fn position(&self) -> usize {
        self.cursor
    }

    /// Completed passes over the data.
    pub fn wraps(&self) -> u64 {
        self.served / self.examples.len() as u64
    }

    pub fn reset(&mut self) {
        self.cursor = 0;
        self.served = 0;
    }

    pub fn next_example(&mut self) -> &LabeledExample {
        let i = self.cursor;
        self.cursor = (self.cursor + 1) % self.examples.len();
        self.served += 1;
        &self.examples[i]
    }

    /// `n` consecutive examples, wrapping around as needed.
    pub fn next_batch(&mut self, n: usize) -> Vec<LabeledExample> {
        (0..n).map(|_| self.next_example().clone()).collect()
    }
}

/// Vector of `num_classes` zeros with a single 1 at `label`.
pub fn one_hot(label: usize, num_classes: usize) -> Result<Vec<f32>> {
    if label >= num_classes {
        return Err(ShuffleError::InvalidLabel { label, num_classes });
    }
    let mut v = vec![0.0; num_classes];
    v[label] = 1.0;
    Ok(v)
}
