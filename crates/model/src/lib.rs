//! # Robust MDP data model
//!
//! This crate holds the data model for **robust Markov decision processes**
//! (RMDPs): finite MDPs where each (state, action) pair carries several
//! *outcomes* (alternative transition distributions an adversary may select
//! between) together with a nominal outcome-mixing distribution and an L1
//! deviation budget (the *threshold*) bounding the adversary's perturbation.
//!
//! ## Core Concepts
//!
//! - **Nesting is ownership**: an [`Rmdp`] owns [`State`]s, which own
//!   [`Action`]s, which own outcome [`Transition`]s. No cross-references.
//! - **Grow-on-write**: [`Rmdp::add_transition`] expands states, actions
//!   and outcomes to accommodate any id it mentions, so a model can be
//!   built by streaming edges.
//! - **Parallel vectors**: a [`Transition`] keeps successor ids,
//!   probabilities and rewards in three equal-length vectors for solvers
//!   that vectorize over them.
//! - **Uncertainty is data**: the (distribution, threshold) pair describes
//!   an L1 ball over outcome mixtures; solving the robust inner problem is
//!   out of scope here.
//!
//! ## Example
//!
//! ```rust
//! use rmdp_model::Rmdp;
//!
//! // Two states, one action, two outcomes the adversary picks between.
//! let mut mdp = Rmdp::new();
//! mdp.add_transition(0, 0, 0, 1, 1.0, 1.0).unwrap();
//! mdp.add_transition(0, 0, 1, 1, 1.0, -1.0).unwrap();
//! mdp.set_uniform_distribution(0.5).unwrap();
//!
//! assert_eq!(mdp.state_count(), 2);
//! assert_eq!(mdp.outcome_count(0, 0).unwrap(), 2);
//! assert!(mdp.is_normalized());
//! ```
//!
//! Persistence: the lossy six-column CSV wire format lives in [`csv`]
//! (distributions and thresholds are not serialized there, by design);
//! serde derives on every type provide full-fidelity snapshots.

mod action;
mod csv;
mod error;
mod rmdp;
mod state;
mod transition;

pub use action::{Action, THRESHOLD_RANGE};
pub use csv::CSV_HEADER;
pub use error::ModelError;
pub use rmdp::Rmdp;
pub use state::State;
pub use transition::Transition;

/// Tolerance for probability-sum comparisons.
pub const PROB_TOLERANCE: f64 = 1e-6;
