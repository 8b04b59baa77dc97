//! Sparse categorical transitions with per-branch rewards.

use serde::{Deserialize, Serialize};

use crate::error::ModelError;
use crate::PROB_TOLERANCE;

/// One sparse transition distribution: successor states, probabilities and
/// rewards as three parallel vectors of equal length.
///
/// The parallel layout (rather than a vector of branch records) keeps
/// probabilities and rewards contiguous for solvers that vectorize over
/// them. The three vectors always have the same length; mutation goes
/// through [`Transition::add`], which appends to all three at once.
///
/// Probabilities are not required to sum to 1 while a model is being
/// built; call [`Transition::normalize`] once construction is done.
/// Duplicate successor indices are permitted but discouraged.
///
/// # Example
///
/// ```rust
/// use rmdp_model::Transition;
///
/// let mut t = Transition::new();
/// t.add(0, 0.25, 1.0).unwrap();
/// t.add(3, 0.75, -2.0).unwrap();
/// assert!(t.is_normalized());
/// assert_eq!(t.indices, vec![0, 3]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Transition {
    /// Successor state ids.
    pub indices: Vec<usize>,
    /// Branch probabilities (non-negative; sum to 1 once normalized).
    pub probabilities: Vec<f64>,
    /// Per-branch rewards (any sign).
    pub rewards: Vec<f64>,
}

impl Transition {
    /// Create an empty transition.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one branch.
    ///
    /// The probability must be non-negative; the reward may be any real.
    /// No sum constraint is enforced here; building is incremental.
    pub fn add(&mut self, to: usize, probability: f64, reward: f64) -> Result<(), ModelError> {
        if probability < 0.0 {
            return Err(ModelError::OutOfRange {
                what: "probability",
                value: probability,
                lo: 0.0,
                hi: f64::INFINITY,
            });
        }
        self.indices.push(to);
        self.probabilities.push(probability);
        self.rewards.push(reward);
        Ok(())
    }

    /// Number of branches.
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    /// Whether the transition has no branches.
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Sum of the branch probabilities.
    pub fn sum_probabilities(&self) -> f64 {
        self.probabilities.iter().sum()
    }

    /// Whether the probabilities sum to 1 within [`PROB_TOLERANCE`].
    ///
    /// An empty transition sums to 0 and is therefore not normalized.
    pub fn is_normalized(&self) -> bool {
        (self.sum_probabilities() - 1.0).abs() <= PROB_TOLERANCE
    }

    /// Rescale the probabilities to sum to 1.
    ///
    /// # Errors
    ///
    /// [`ModelError::EmptyDistribution`] when the current sum is zero (an
    /// empty transition, or one whose branches all carry probability 0).
    pub fn normalize(&mut self) -> Result<(), ModelError> {
        let sum = self.sum_probabilities();
        if sum <= 0.0 {
            return Err(ModelError::EmptyDistribution);
        }
        for p in &mut self.probabilities {
            *p /= sum;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_keeps_vectors_parallel() {
        let mut t = Transition::new();
        t.add(1, 0.5, 2.0).unwrap();
        t.add(2, 0.5, -1.0).unwrap();

        assert_eq!(t.len(), 2);
        assert_eq!(t.indices.len(), t.probabilities.len());
        assert_eq!(t.probabilities.len(), t.rewards.len());
        assert_eq!(t.rewards[1], -1.0);
    }

    #[test]
    fn test_add_rejects_negative_probability() {
        let mut t = Transition::new();
        let result = t.add(0, -0.1, 0.0);
        assert!(matches!(result, Err(ModelError::OutOfRange { .. })));
        // nothing was appended
        assert!(t.is_empty());
    }

    #[test]
    fn test_negative_reward_is_legal() {
        let mut t = Transition::new();
        t.add(0, 1.0, -5.0).unwrap();
        assert_eq!(t.rewards[0], -5.0);
    }

    #[test]
    fn test_duplicate_successors_permitted() {
        let mut t = Transition::new();
        t.add(7, 0.5, 0.0).unwrap();
        t.add(7, 0.5, 1.0).unwrap();
        assert_eq!(t.indices, vec![7, 7]);
    }

    #[test]
    fn test_normalize_rescales() {
        let mut t = Transition::new();
        t.add(0, 2.0, 0.0).unwrap();
        t.add(1, 6.0, 0.0).unwrap();

        assert!(!t.is_normalized());
        t.normalize().unwrap();
        assert!(t.is_normalized());
        assert!((t.probabilities[0] - 0.25).abs() < 1e-12);
        assert!((t.probabilities[1] - 0.75).abs() < 1e-12);
    }

    #[test]
    fn test_normalize_idempotent() {
        let mut t = Transition::new();
        t.add(0, 1.0, 0.0).unwrap();
        t.add(1, 3.0, 0.0).unwrap();

        t.normalize().unwrap();
        let first: Vec<f64> = t.probabilities.clone();
        t.normalize().unwrap();

        for (a, b) in first.iter().zip(t.probabilities.iter()) {
            assert!((a - b).abs() <= PROB_TOLERANCE);
        }
    }

    #[test]
    fn test_normalize_empty_fails() {
        let mut t = Transition::new();
        assert!(matches!(t.normalize(), Err(ModelError::EmptyDistribution)));
    }

    #[test]
    fn test_normalize_zero_sum_fails() {
        let mut t = Transition::new();
        t.add(0, 0.0, 1.0).unwrap();
        assert!(matches!(t.normalize(), Err(ModelError::EmptyDistribution)));
    }
}
