//! The top-level robust MDP container.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::action::check_threshold;
use crate::error::ModelError;
use crate::state::State;
use crate::transition::Transition;

/// A robust Markov decision process: an ordered collection of [`State`]s,
/// each holding actions, each holding outcome transitions.
///
/// States, actions, outcomes and branches are identified by dense 0-based
/// positional indices within their parent. Ownership is strict containment;
/// there are no cross-references, so a derived [`Clone`] is a fully
/// independent deep copy.
///
/// Construction follows a *grow-on-write* policy: adding a branch that
/// references state id `k` expands the state vector to `k + 1`, creating
/// empty states for any gap, and the same applies to actions and outcomes
/// further down. Callers can therefore stream edges without pre-declaring
/// the state space.
///
/// # Example
///
/// ```rust
/// use rmdp_model::Rmdp;
///
/// let mut mdp = Rmdp::new();
/// mdp.add_transition(0, 0, 0, 1, 0.5, 1.0).unwrap();
/// mdp.add_transition(0, 0, 0, 2, 0.5, 2.0).unwrap();
///
/// assert_eq!(mdp.state_count(), 3);
/// assert_eq!(mdp.transition_count(0, 0, 0).unwrap(), 2);
/// assert!(mdp.is_normalized());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Rmdp {
    /// The states, indexed by non-negative id.
    pub states: Vec<State>,
}

impl Rmdp {
    /// Create an empty process.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a process pre-sized with `count` empty states.
    pub fn with_states(count: usize) -> Self {
        let mut states = Vec::with_capacity(count);
        states.resize_with(count, State::new);
        Self { states }
    }

    fn state(&self, stateid: usize) -> Result<&State, ModelError> {
        self.states.get(stateid).ok_or(ModelError::InvalidIndex {
            what: "state",
            id: stateid,
            count: self.states.len(),
        })
    }

    fn state_mut(&mut self, stateid: usize) -> Result<&mut State, ModelError> {
        let count = self.states.len();
        self.states.get_mut(stateid).ok_or(ModelError::InvalidIndex {
            what: "state",
            id: stateid,
            count,
        })
    }

    // ------------------------------------------------------------------
    // Structural queries
    // ------------------------------------------------------------------

    /// Number of states.
    pub fn state_count(&self) -> usize {
        self.states.len()
    }

    /// Number of actions at a state.
    pub fn action_count(&self, stateid: usize) -> Result<usize, ModelError> {
        Ok(self.state(stateid)?.action_count())
    }

    /// Number of outcomes of an action.
    pub fn outcome_count(&self, stateid: usize, actionid: usize) -> Result<usize, ModelError> {
        Ok(self.state(stateid)?.action(actionid)?.outcome_count())
    }

    /// Number of branches of an outcome transition.
    pub fn transition_count(
        &self,
        stateid: usize,
        actionid: usize,
        outcomeid: usize,
    ) -> Result<usize, ModelError> {
        Ok(self.transition(stateid, actionid, outcomeid)?.len())
    }

    /// Number of samples (state-to-state branches) of an outcome.
    ///
    /// Same quantity as [`Rmdp::transition_count`]; both names are part of
    /// the public surface.
    pub fn sample_count(
        &self,
        stateid: usize,
        actionid: usize,
        outcomeid: usize,
    ) -> Result<usize, ModelError> {
        self.transition_count(stateid, actionid, outcomeid)
    }

    /// Checked access to one leaf transition.
    pub fn transition(
        &self,
        stateid: usize,
        actionid: usize,
        outcomeid: usize,
    ) -> Result<&Transition, ModelError> {
        self.state(stateid)?.action(actionid)?.outcome(outcomeid)
    }

    /// Checked mutable access to one leaf transition.
    pub fn transition_mut(
        &mut self,
        stateid: usize,
        actionid: usize,
        outcomeid: usize,
    ) -> Result<&mut Transition, ModelError> {
        self.state_mut(stateid)?
            .action_mut(actionid)?
            .outcome_mut(outcomeid)
    }

    // ------------------------------------------------------------------
    // Branch reads and writes
    // ------------------------------------------------------------------

    /// Target state of one branch.
    pub fn get_toid(
        &self,
        stateid: usize,
        actionid: usize,
        outcomeid: usize,
        sampleid: usize,
    ) -> Result<usize, ModelError> {
        let tran = self.transition(stateid, actionid, outcomeid)?;
        tran.indices
            .get(sampleid)
            .copied()
            .ok_or(ModelError::InvalidIndex {
                what: "sample",
                id: sampleid,
                count: tran.len(),
            })
    }

    /// Probability of one branch.
    pub fn get_probability(
        &self,
        stateid: usize,
        actionid: usize,
        outcomeid: usize,
        sampleid: usize,
    ) -> Result<f64, ModelError> {
        let tran = self.transition(stateid, actionid, outcomeid)?;
        tran.probabilities
            .get(sampleid)
            .copied()
            .ok_or(ModelError::InvalidIndex {
                what: "sample",
                id: sampleid,
                count: tran.len(),
            })
    }

    /// Reward of one branch.
    pub fn get_reward(
        &self,
        stateid: usize,
        actionid: usize,
        outcomeid: usize,
        sampleid: usize,
    ) -> Result<f64, ModelError> {
        let tran = self.transition(stateid, actionid, outcomeid)?;
        tran.rewards
            .get(sampleid)
            .copied()
            .ok_or(ModelError::InvalidIndex {
                what: "sample",
                id: sampleid,
                count: tran.len(),
            })
    }

    /// Overwrite the reward of one branch.
    pub fn set_reward(
        &mut self,
        stateid: usize,
        actionid: usize,
        outcomeid: usize,
        sampleid: usize,
        reward: f64,
    ) -> Result<(), ModelError> {
        let tran = self.transition_mut(stateid, actionid, outcomeid)?;
        let count = tran.len();
        match tran.rewards.get_mut(sampleid) {
            Some(slot) => {
                *slot = reward;
                Ok(())
            }
            None => Err(ModelError::InvalidIndex {
                what: "sample",
                id: sampleid,
                count,
            }),
        }
    }

    // ------------------------------------------------------------------
    // Construction
    // ------------------------------------------------------------------

    /// Append one branch, growing states, actions and outcomes as needed.
    ///
    /// `max(fromid, toid) + 1` becomes the new state count when larger than
    /// the current one; intermediate states are created empty.
    pub fn add_transition(
        &mut self,
        fromid: usize,
        actionid: usize,
        outcomeid: usize,
        toid: usize,
        probability: f64,
        reward: f64,
    ) -> Result<(), ModelError> {
        let needed = fromid.max(toid) + 1;
        if needed > self.states.len() {
            self.states.resize_with(needed, State::new);
        }
        self.states[fromid].add_action(actionid, outcomeid, toid, probability, reward)
    }

    /// Append one non-robust branch: outcome 0 of the given action.
    pub fn add_transition_d(
        &mut self,
        fromid: usize,
        actionid: usize,
        toid: usize,
        probability: f64,
        reward: f64,
    ) -> Result<(), ModelError> {
        self.add_transition(fromid, actionid, 0, toid, probability, reward)
    }

    /// Append many branches at once from six parallel slices.
    pub fn add_transitions(
        &mut self,
        fromids: &[usize],
        actionids: &[usize],
        outcomeids: &[usize],
        toids: &[usize],
        probabilities: &[f64],
        rewards: &[f64],
    ) -> Result<(), ModelError> {
        let n = fromids.len();
        for len in [
            actionids.len(),
            outcomeids.len(),
            toids.len(),
            probabilities.len(),
            rewards.len(),
        ] {
            if len != n {
                return Err(ModelError::ShapeMismatch {
                    expected: n,
                    got: len,
                });
            }
        }
        for l in 0..n {
            self.add_transition(
                fromids[l],
                actionids[l],
                outcomeids[l],
                toids[l],
                probabilities[l],
                rewards[l],
            )?;
        }
        Ok(())
    }

    // ------------------------------------------------------------------
    // Uncertainty-set edits
    // ------------------------------------------------------------------

    /// Replace one action's nominal outcome distribution and threshold.
    pub fn set_distribution(
        &mut self,
        stateid: usize,
        actionid: usize,
        distribution: Vec<f64>,
        threshold: f64,
    ) -> Result<(), ModelError> {
        self.state_mut(stateid)?
            .action_mut(actionid)?
            .set_distribution(distribution, threshold)
    }

    /// Assign one action's threshold.
    pub fn set_threshold(
        &mut self,
        stateid: usize,
        actionid: usize,
        threshold: f64,
    ) -> Result<(), ModelError> {
        self.state_mut(stateid)?
            .action_mut(actionid)?
            .set_threshold(threshold)
    }

    /// Read one action's threshold.
    pub fn get_threshold(&self, stateid: usize, actionid: usize) -> Result<f64, ModelError> {
        Ok(self.state(stateid)?.action(actionid)?.threshold)
    }

    /// Broadcast one threshold to every action of every state.
    pub fn set_uniform_thresholds(&mut self, threshold: f64) -> Result<(), ModelError> {
        check_threshold(threshold)?;
        for state in &mut self.states {
            state.set_thresholds(threshold)?;
        }
        Ok(())
    }

    /// Install, for every action, the uniform distribution over its current
    /// outcomes together with the given threshold.
    pub fn set_uniform_distribution(&mut self, threshold: f64) -> Result<(), ModelError> {
        check_threshold(threshold)?;
        for state in &mut self.states {
            for action in &mut state.actions {
                action.set_uniform_distribution(threshold)?;
            }
        }
        Ok(())
    }

    // ------------------------------------------------------------------
    // Normalization
    // ------------------------------------------------------------------

    /// Whether every non-empty leaf transition is normalized.
    ///
    /// Empty transitions (outcome gaps left by grow-on-write) are treated
    /// as trivially normalized, matching [`Rmdp::normalize`] skipping them.
    pub fn is_normalized(&self) -> bool {
        self.states
            .iter()
            .flat_map(|s| &s.actions)
            .flat_map(|a| &a.outcomes)
            .all(|t| t.is_empty() || t.is_normalized())
    }

    /// Normalize every leaf transition.
    ///
    /// Zero-sum transitions (empty ones included) are skipped rather than
    /// reported; [`Transition::normalize`] is the strict per-leaf variant.
    pub fn normalize(&mut self) {
        for state in &mut self.states {
            for action in &mut state.actions {
                for outcome in &mut action.outcomes {
                    let sum = outcome.sum_probabilities();
                    if sum > 0.0 {
                        for p in &mut outcome.probabilities {
                            *p /= sum;
                        }
                    }
                }
            }
        }
    }
}

/// Human-readable summary: one line per state with its action count, one
/// indented line per action with its outcome count and distribution size.
impl fmt::Display for Rmdp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, state) in self.states.iter().enumerate() {
            writeln!(f, "{} : {}", i, state.actions.len())?;
            for (j, action) in state.actions.iter().enumerate() {
                writeln!(
                    f,
                    "    {} : {} / {}",
                    j,
                    action.outcomes.len(),
                    action.distribution.len()
                )?;
            }
        }
        Ok(())
    }
}
