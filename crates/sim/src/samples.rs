//! Typed sample containers for collected trajectories.
//!
//! The one-step MDP transition is factored into two halves so that outcome
//! uncertainty is observable in the sample streams:
//!
//! ```text
//!   DecState ──policy──▶ ExpState ──chance──▶ (reward, DecState')
//!      │                    │
//!      └── DecSample ───────┴── ExpSample
//! ```

use serde::{Deserialize, Serialize};

/// A transition from a decision state to an expectation state: one choice
/// made under the policy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecSample<DS, A, ES = (DS, A)> {
    /// Decision state the choice was made in.
    pub decstate_from: DS,
    /// Chosen action.
    pub action: A,
    /// Expectation state the choice led to.
    pub expstate_to: ES,
    /// Step index within the run, starting at 0.
    pub step: usize,
    /// Run index.
    pub run: usize,
}

/// A transition from an expectation state to a decision state: one
/// stochastic resolution into a reward and a successor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExpSample<DS, ES> {
    /// Expectation state being resolved.
    pub expstate_from: ES,
    /// Decision state the resolution produced.
    pub decstate_to: DS,
    /// Reward collected by the resolution.
    pub reward: f64,
    /// Sample weight (1.0 for plain Monte Carlo draws).
    pub weight: f64,
    /// Step index within the run, starting at 0.
    pub step: usize,
    /// Run index.
    pub run: usize,
}

/// All samples collected over a batch of runs: the initial decision state
/// of each run plus the two parallel sample streams.
///
/// The API only appends; collected samples are never rewritten.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Samples<DS, A, ES = (DS, A)> {
    /// One initial decision state per started run.
    pub initial: Vec<DS>,
    /// Decision → expectation samples.
    pub decsamples: Vec<DecSample<DS, A, ES>>,
    /// Expectation → decision samples.
    pub expsamples: Vec<ExpSample<DS, ES>>,
}

impl<DS, A, ES> Samples<DS, A, ES> {
    /// Create an empty sample store.
    pub fn new() -> Self {
        Self {
            initial: Vec::new(),
            decsamples: Vec::new(),
            expsamples: Vec::new(),
        }
    }

    /// Record the initial decision state of a run.
    pub fn add_initial(&mut self, decstate: DS) {
        self.initial.push(decstate);
    }

    /// Record a sample starting in a decision state.
    pub fn add_dec(&mut self, decsample: DecSample<DS, A, ES>) {
        self.decsamples.push(decsample);
    }

    /// Record a sample starting in an expectation state.
    pub fn add_exp(&mut self, expsample: ExpSample<DS, ES>) {
        self.expsamples.push(expsample);
    }

    /// Number of runs that recorded an initial state.
    pub fn run_count(&self) -> usize {
        self.initial.len()
    }

    /// Whether nothing has been collected yet.
    pub fn is_empty(&self) -> bool {
        self.initial.is_empty() && self.decsamples.is_empty() && self.expsamples.is_empty()
    }
}

impl<DS, A, ES> Default for Samples<DS, A, ES> {
    fn default() -> Self {
        Self::new()
    }
}
