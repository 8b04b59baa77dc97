//! States: ordered action collections.

use serde::{Deserialize, Serialize};

use crate::action::Action;
use crate::error::ModelError;

/// One state of the process: an ordered collection of [`Action`]s.
///
/// A state with no actions is legal; downstream solvers treat it as
/// terminal/absorbing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct State {
    /// Actions available at this state.
    pub actions: Vec<Action>,
}

impl State {
    /// Create a state with no actions.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of actions.
    pub fn action_count(&self) -> usize {
        self.actions.len()
    }

    /// Checked access to one action.
    pub fn action(&self, actionid: usize) -> Result<&Action, ModelError> {
        self.actions.get(actionid).ok_or(ModelError::InvalidIndex {
            what: "action",
            id: actionid,
            count: self.actions.len(),
        })
    }

    /// Checked mutable access to one action.
    pub fn action_mut(&mut self, actionid: usize) -> Result<&mut Action, ModelError> {
        let count = self.actions.len();
        self.actions.get_mut(actionid).ok_or(ModelError::InvalidIndex {
            what: "action",
            id: actionid,
            count,
        })
    }

    /// Append one branch under the selected action and outcome, growing the
    /// action vector with empty actions when `actionid` is past the end.
    pub fn add_action(
        &mut self,
        actionid: usize,
        outcomeid: usize,
        toid: usize,
        probability: f64,
        reward: f64,
    ) -> Result<(), ModelError> {
        if actionid >= self.actions.len() {
            self.actions.resize_with(actionid + 1, Action::new);
        }
        self.actions[actionid].add_outcome(outcomeid, toid, probability, reward)
    }

    /// Broadcast one threshold to every contained action.
    pub fn set_thresholds(&mut self, threshold: f64) -> Result<(), ModelError> {
        for action in &mut self.actions {
            action.set_threshold(threshold)?;
        }
        Ok(())
    }
}
