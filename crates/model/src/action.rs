//! Actions: outcome collections with an L1 uncertainty set.

use serde::{Deserialize, Serialize};

use crate::error::ModelError;
use crate::transition::Transition;
use crate::PROB_TOLERANCE;

/// Lower and upper bound of an admissible threshold.
///
/// Two probability vectors can differ by at most 2 in L1 norm, so 0 means
/// no robustness and 2 means the adversary may pick any outcome mixture.
pub const THRESHOLD_RANGE: (f64, f64) = (0.0, 2.0);

pub(crate) fn check_threshold(threshold: f64) -> Result<(), ModelError> {
    let (lo, hi) = THRESHOLD_RANGE;
    if threshold < lo || threshold > hi {
        return Err(ModelError::OutOfRange {
            what: "threshold",
            value: threshold,
            lo,
            hi,
        });
    }
    Ok(())
}

/// One action at one state: an ordered collection of outcomes, each a
/// [`Transition`], plus the nominal outcome-mixing distribution and the L1
/// deviation budget around it.
///
/// The pair (`distribution`, `threshold`) encodes the uncertainty set
/// `{ q : q ≥ 0, Σq = 1, ‖q − distribution‖₁ ≤ threshold }` an adversary
/// may draw the outcome mixture from. The model stores these parameters;
/// solving the inner robust problem is a consumer's job.
///
/// Invariant: `distribution` is either empty or has exactly one entry per
/// outcome. Defaults are the non-robust case: no distribution, threshold 0.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Action {
    /// Alternative transition distributions the adversary selects between.
    pub outcomes: Vec<Transition>,
    /// Nominal mixing distribution over outcomes (empty, or one entry per
    /// outcome, non-negative, summing to 1).
    pub distribution: Vec<f64>,
    /// L1 radius of the admissible perturbation of `distribution`, in [0, 2].
    pub threshold: f64,
}

impl Action {
    /// Create an action with no outcomes.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of outcomes.
    pub fn outcome_count(&self) -> usize {
        self.outcomes.len()
    }

    /// Checked access to one outcome.
    pub fn outcome(&self, outcomeid: usize) -> Result<&Transition, ModelError> {
        self.outcomes.get(outcomeid).ok_or(ModelError::InvalidIndex {
            what: "outcome",
            id: outcomeid,
            count: self.outcomes.len(),
        })
    }

    /// Checked mutable access to one outcome.
    pub fn outcome_mut(&mut self, outcomeid: usize) -> Result<&mut Transition, ModelError> {
        let count = self.outcomes.len();
        self.outcomes.get_mut(outcomeid).ok_or(ModelError::InvalidIndex {
            what: "outcome",
            id: outcomeid,
            count,
        })
    }

    /// Append one branch to the selected outcome, materializing empty
    /// outcomes on the way when `outcomeid` is past the current end.
    pub fn add_outcome(
        &mut self,
        outcomeid: usize,
        toid: usize,
        probability: f64,
        reward: f64,
    ) -> Result<(), ModelError> {
        if outcomeid >= self.outcomes.len() {
            self.outcomes.resize_with(outcomeid + 1, Transition::new);
        }
        self.outcomes[outcomeid].add(toid, probability, reward)
    }

    /// Replace the nominal outcome distribution and threshold.
    ///
    /// # Errors
    ///
    /// - [`ModelError::ShapeMismatch`] when `distribution` does not have
    ///   exactly one entry per outcome,
    /// - [`ModelError::OutOfRange`] when the threshold is outside [0, 2] or
    ///   any entry is negative,
    /// - [`ModelError::NotNormalized`] when the entries do not sum to 1
    ///   within tolerance.
    pub fn set_distribution(
        &mut self,
        distribution: Vec<f64>,
        threshold: f64,
    ) -> Result<(), ModelError> {
        if distribution.len() != self.outcomes.len() {
            return Err(ModelError::ShapeMismatch {
                expected: self.outcomes.len(),
                got: distribution.len(),
            });
        }
        check_threshold(threshold)?;
        if let Some(&entry) = distribution.iter().find(|&&p| p < 0.0) {
            return Err(ModelError::OutOfRange {
                what: "distribution entry",
                value: entry,
                lo: 0.0,
                hi: 1.0,
            });
        }
        let sum: f64 = distribution.iter().sum();
        if (sum - 1.0).abs() > PROB_TOLERANCE {
            return Err(ModelError::NotNormalized { sum });
        }

        self.distribution = distribution;
        self.threshold = threshold;
        Ok(())
    }

    /// Install the uniform distribution over the current outcomes.
    ///
    /// An action with no outcomes gets the empty distribution; the
    /// threshold is set either way.
    pub fn set_uniform_distribution(&mut self, threshold: f64) -> Result<(), ModelError> {
        check_threshold(threshold)?;
        if self.outcomes.is_empty() {
            self.distribution.clear();
            self.threshold = threshold;
            return Ok(());
        }
        let p = 1.0 / self.outcomes.len() as f64;
        self.set_distribution(vec![p; self.outcomes.len()], threshold)
    }

    /// Assign a new threshold, validating it lies in [0, 2].
    pub fn set_threshold(&mut self, threshold: f64) -> Result<(), ModelError> {
        check_threshold(threshold)?;
        self.threshold = threshold;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_outcome_grows_with_empty_transitions() {
        let mut a = Action::new();
        a.add_outcome(2, 5, 1.0, 0.0).unwrap();

        assert_eq!(a.outcome_count(), 3);
        assert!(a.outcomes[0].is_empty());
        assert!(a.outcomes[1].is_empty());
        assert_eq!(a.outcomes[2].indices, vec![5]);
    }

    #[test]
    fn test_set_distribution_shape_mismatch() {
        let mut a = Action::new();
        a.add_outcome(0, 0, 1.0, 0.0).unwrap();
        a.add_outcome(1, 1, 1.0, 0.0).unwrap();

        let result = a.set_distribution(vec![1.0], 0.1);
        assert!(matches!(result, Err(ModelError::ShapeMismatch { expected: 2, got: 1 })));
    }

    #[test]
    fn test_set_distribution_not_normalized() {
        let mut a = Action::new();
        a.add_outcome(0, 0, 1.0, 0.0).unwrap();
        a.add_outcome(1, 1, 1.0, 0.0).unwrap();

        let result = a.set_distribution(vec![0.6, 0.6], 0.1);
        assert!(matches!(result, Err(ModelError::NotNormalized { .. })));
        // the action keeps its defaults on rejection
        assert!(a.distribution.is_empty());
        assert_eq!(a.threshold, 0.0);
    }

    #[test]
    fn test_set_distribution_negative_entry() {
        let mut a = Action::new();
        a.add_outcome(0, 0, 1.0, 0.0).unwrap();
        a.add_outcome(1, 1, 1.0, 0.0).unwrap();

        let result = a.set_distribution(vec![1.5, -0.5], 0.1);
        assert!(matches!(result, Err(ModelError::OutOfRange { .. })));
    }

    #[test]
    fn test_set_threshold_window() {
        let mut a = Action::new();
        a.set_threshold(0.0).unwrap();
        a.set_threshold(2.0).unwrap();
        assert_eq!(a.threshold, 2.0);

        assert!(matches!(a.set_threshold(2.5), Err(ModelError::OutOfRange { .. })));
        assert!(matches!(a.set_threshold(-0.1), Err(ModelError::OutOfRange { .. })));
        // rejected values leave the threshold untouched
        assert_eq!(a.threshold, 2.0);
    }

    #[test]
    fn test_set_uniform_distribution() {
        let mut a = Action::new();
        a.add_outcome(0, 0, 1.0, 0.0).unwrap();
        a.add_outcome(1, 1, 1.0, 0.0).unwrap();
        a.add_outcome(2, 2, 1.0, 0.0).unwrap();

        a.set_uniform_distribution(0.5).unwrap();
        for p in &a.distribution {
            assert!((p - 1.0 / 3.0).abs() <= PROB_TOLERANCE);
        }
        assert_eq!(a.threshold, 0.5);
    }

    #[test]
    fn test_set_uniform_distribution_no_outcomes() {
        let mut a = Action::new();
        a.set_uniform_distribution(1.0).unwrap();
        assert!(a.distribution.is_empty());
        assert_eq!(a.threshold, 1.0);
    }

    #[test]
    fn test_outcome_accessor_invalid() {
        let a = Action::new();
        assert!(matches!(
            a.outcome(0),
            Err(ModelError::InvalidIndex { what: "outcome", .. })
        ));
    }
}
