//! Policies: decision state → action mappings.
//!
//! A policy is the swappable half of a sample-collection run: the same
//! model provider explored under different policies yields different
//! trajectory distributions.

use std::cell::RefCell;
use std::marker::PhantomData;

use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::simulator::Simulator;

/// A policy selects an action for a decision state.
pub trait Policy<DS, A> {
    /// Choose the action to take in `decstate`.
    fn act(&self, decstate: &DS) -> A;
}

// ============================================================================
// Constant Policy
// ============================================================================

/// A policy that always returns the same action.
///
/// Useful for testing and as a baseline.
#[derive(Debug, Clone)]
pub struct ConstantPolicy<A> {
    action: A,
}

impl<A: Clone> ConstantPolicy<A> {
    /// Create a policy that always returns the given action.
    pub fn new(action: A) -> Self {
        Self { action }
    }
}

impl<DS, A: Clone> Policy<DS, A> for ConstantPolicy<A> {
    fn act(&self, _decstate: &DS) -> A {
        self.action.clone()
    }
}

// ============================================================================
// Function Policy
// ============================================================================

/// A policy defined by a function.
///
/// Wraps any `Fn(&DS) -> A` as a policy.
pub struct FnPolicy<F, DS, A> {
    f: F,
    _phantom: PhantomData<(DS, A)>,
}

impl<F, DS, A> FnPolicy<F, DS, A>
where
    F: Fn(&DS) -> A,
{
    /// Create a policy from a function.
    pub fn new(f: F) -> Self {
        Self {
            f,
            _phantom: PhantomData,
        }
    }
}

impl<F, DS, A> Policy<DS, A> for FnPolicy<F, DS, A>
where
    F: Fn(&DS) -> A,
{
    fn act(&self, decstate: &DS) -> A {
        (self.f)(decstate)
    }
}

// ============================================================================
// Random Policy
// ============================================================================

/// A policy that draws uniformly from the provider's legal actions.
pub struct RandomPolicy<'a, S: Simulator> {
    simulator: &'a S,
    rng: RefCell<SmallRng>,
}

impl<'a, S: Simulator> RandomPolicy<'a, S> {
    /// Create a random policy with an entropy-derived seed.
    pub fn new(simulator: &'a S) -> Self {
        Self {
            simulator,
            rng: RefCell::new(SmallRng::from_entropy()),
        }
    }

    /// Create a random policy with a fixed seed.
    pub fn with_seed(simulator: &'a S, seed: u64) -> Self {
        Self {
            simulator,
            rng: RefCell::new(SmallRng::seed_from_u64(seed)),
        }
    }
}

impl<'a, S: Simulator> Policy<S::DecState, S::Action> for RandomPolicy<'a, S> {
    /// # Panics
    ///
    /// Panics when the provider reports no legal actions for `decstate`;
    /// a random policy cannot choose from an empty set.
    fn act(&self, decstate: &S::DecState) -> S::Action {
        let actions = self.simulator.actions(decstate);
        assert!(!actions.is_empty(), "no legal actions at decision state");
        let mut rng = self.rng.borrow_mut();
        actions.choose(&mut *rng).unwrap().clone()
    }
}
