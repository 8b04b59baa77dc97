//! # Decision/expectation sampling
//!
//! This crate drives a user-supplied process model to collect trajectories.
//! The usual one-step MDP transition is factored into two halves so that
//! uncertainty over outcomes is observable in the samples:
//!
//! - a **decision state** is where the policy chooses an action,
//! - an **expectation state** is the intermediate point after the choice
//!   and before chance resolves it into a reward and the next decision
//!   state.
//!
//! ## Core Components
//!
//! - [`Simulator`]: the capability set a model provider exposes
//!   (`init_state` / `transition_dec` / `transition_exp` / `end_condition`
//!   / `actions`)
//! - [`Policy`]: decision state → action, with stock
//!   [`ConstantPolicy`], [`FnPolicy`] and [`RandomPolicy`]
//! - [`simulate_stateless`] / [`simulate_with_rng`]: the trajectory
//!   generator, producing a [`Samples`] store with parallel
//!   [`DecSample`]/[`ExpSample`] streams
//!
//! ## Example
//!
//! ```rust
//! use rmdp_sim::{simulate_stateless, ConstantPolicy, SimConfig, Simulator};
//!
//! // A three-step counter: 0 → 1 → 2 → 3, reward 1 per step.
//! struct Counter;
//!
//! impl Simulator for Counter {
//!     type DecState = u32;
//!     type Action = u32;
//!     type ExpState = (u32, u32);
//!
//!     fn init_state(&self) -> u32 { 0 }
//!     fn transition_dec(&self, d: &u32, a: &u32) -> (u32, u32) { (*d, *a) }
//!     fn transition_exp(&self, e: &(u32, u32)) -> (f64, u32) { (1.0, e.0 + 1) }
//!     fn end_condition(&self, d: &u32) -> bool { *d >= 3 }
//!     fn actions(&self, _d: &u32) -> Vec<u32> { vec![0] }
//! }
//!
//! let samples = simulate_stateless(&Counter, &ConstantPolicy::new(0), &SimConfig::new(10, 2));
//! assert_eq!(samples.run_count(), 2);
//! assert_eq!(samples.expsamples.len(), 6);
//! ```
//!
//! Collection is single-threaded and never fails on its own account; any
//! fault originates in the supplied provider or policy. The generator's
//! termination coin is injectable through [`simulate_with_rng`] for
//! reproducible batches.

pub mod policy;
mod samples;
mod simulator;

pub use policy::{ConstantPolicy, FnPolicy, Policy, RandomPolicy};
pub use samples::{DecSample, ExpSample, Samples};
pub use simulator::{simulate_stateless, simulate_with_rng, SimConfig, Simulator};
