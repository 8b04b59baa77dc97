//! The model-provider capability set and the trajectory generator.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::policy::Policy;
use crate::samples::{DecSample, ExpSample, Samples};

/// Capabilities a model provider exposes to the trajectory generator.
///
/// The provider is a swappable component: the generator is generic over it
/// and monomorphizes, so the inner loop carries no dynamic dispatch.
/// Stochastic providers own their randomness (typically a seeded generator
/// behind interior mutability); the termination coin of the generator is
/// injected separately.
pub trait Simulator {
    /// Observable state a policy chooses actions in.
    type DecState: Clone;
    /// Action representation.
    type Action: Clone;
    /// Intermediate state after the choice, before stochastic resolution.
    type ExpState: Clone;

    /// Draw an initial decision state.
    fn init_state(&self) -> Self::DecState;

    /// Deterministic decision → expectation transition for a chosen action.
    fn transition_dec(&self, decstate: &Self::DecState, action: &Self::Action) -> Self::ExpState;

    /// Stochastic expectation → decision transition producing a reward and
    /// the next decision state.
    fn transition_exp(&self, expstate: &Self::ExpState) -> (f64, Self::DecState);

    /// Terminal test.
    fn end_condition(&self, decstate: &Self::DecState) -> bool;

    /// Legal actions at a decision state (used by random and value-based
    /// policies).
    fn actions(&self, decstate: &Self::DecState) -> Vec<Self::Action>;
}

/// Bounds on a sample-collection batch.
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// Maximum steps per run.
    pub horizon: usize,
    /// Number of independent runs.
    pub runs: usize,
    /// Per-step termination probability; 0 disables the coin. Acts as a
    /// discount-equivalent survival test.
    pub prob_term: f64,
    /// Global cap on recorded transitions across all runs; `None` disables.
    pub tran_limit: Option<usize>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            horizon: 100,
            runs: 1,
            prob_term: 0.0,
            tran_limit: None,
        }
    }
}

impl SimConfig {
    /// Bounds with the given horizon and run count, no termination coin and
    /// no global cap.
    pub fn new(horizon: usize, runs: usize) -> Self {
        Self {
            horizon,
            runs,
            ..Self::default()
        }
    }

    /// Set the per-step termination probability.
    pub fn with_prob_term(mut self, prob_term: f64) -> Self {
        self.prob_term = prob_term;
        self
    }

    /// Set the global transition cap.
    pub fn with_tran_limit(mut self, tran_limit: usize) -> Self {
        self.tran_limit = Some(tran_limit);
        self
    }
}

/// Run the simulator and collect samples, drawing the termination coin
/// from the supplied generator.
///
/// Each run starts from a fresh `init_state` (recorded in the store) and
/// walks up to `horizon` steps. A step records one [`DecSample`] for the
/// policy's choice and one [`ExpSample`] (weight 1.0) for its stochastic
/// resolution, so the two streams stay the same length. The coin is
/// flipped only after a transition has been recorded, and before the
/// transition counter moves, so a run that survives the end condition always
/// contributes at least one transition when `prob_term < 1`. Once the
/// recorded total reaches `tran_limit`, collection stops across all runs.
///
/// Simulation itself never fails; any fault originates in the supplied
/// provider or policy.
pub fn simulate_with_rng<S, P, R>(
    simulator: &S,
    policy: &P,
    config: &SimConfig,
    rng: &mut R,
) -> Samples<S::DecState, S::Action, S::ExpState>
where
    S: Simulator,
    P: Policy<S::DecState, S::Action>,
    R: Rng + ?Sized,
{
    let mut samples = Samples::new();
    let mut transitions = 0usize;

    'runs: for run in 0..config.runs {
        let mut decstate = simulator.init_state();
        samples.add_initial(decstate.clone());

        for step in 0..config.horizon {
            if simulator.end_condition(&decstate) {
                break;
            }
            if let Some(limit) = config.tran_limit {
                if transitions >= limit {
                    break 'runs;
                }
            }

            let action = policy.act(&decstate);
            let expstate = simulator.transition_dec(&decstate, &action);
            samples.add_dec(DecSample {
                decstate_from: decstate.clone(),
                action,
                expstate_to: expstate.clone(),
                step,
                run,
            });

            let (reward, next) = simulator.transition_exp(&expstate);
            decstate = next;
            samples.add_exp(ExpSample {
                expstate_from: expstate,
                decstate_to: decstate.clone(),
                reward,
                weight: 1.0,
                step,
                run,
            });

            // the coin comes after the recorded transition and before the
            // counter increment
            if config.prob_term > 0.0 && rng.gen::<f64>() <= config.prob_term {
                break;
            }
            transitions += 1;
        }
    }

    samples
}

/// Run the simulator with an entropy-seeded generator.
///
/// Reproducibility is not part of this entry point's contract; use
/// [`simulate_with_rng`] with a seeded generator for deterministic batches.
pub fn simulate_stateless<S, P>(
    simulator: &S,
    policy: &P,
    config: &SimConfig,
) -> Samples<S::DecState, S::Action, S::ExpState>
where
    S: Simulator,
    P: Policy<S::DecState, S::Action>,
{
    let mut rng = SmallRng::from_entropy();
    simulate_with_rng(simulator, policy, config, &mut rng)
}
