//! Collecting samples from a small stochastic process.
//!
//! Run with: cargo run -p rmdp-sim --example chain_walk
//!
//! The provider is a slippery 1-D walk; swapping the policy changes the
//! trajectory distribution while the provider stays untouched.

use std::cell::RefCell;

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use rmdp_sim::{simulate_with_rng, ConstantPolicy, RandomPolicy, SimConfig, Simulator};

/// Walk over 0..=8; moving right succeeds with probability 0.7, otherwise
/// the walker slips one step left. Reaching 8 pays 1 and ends the run.
struct Walk {
    rng: RefCell<SmallRng>,
}

impl Simulator for Walk {
    type DecState = i64;
    type Action = i64;
    type ExpState = (i64, i64);

    fn init_state(&self) -> i64 {
        0
    }

    fn transition_dec(&self, decstate: &i64, action: &i64) -> (i64, i64) {
        (*decstate, *action)
    }

    fn transition_exp(&self, expstate: &(i64, i64)) -> (f64, i64) {
        let (position, direction) = *expstate;
        let moved = if self.rng.borrow_mut().gen::<f64>() < 0.7 {
            direction
        } else {
            -direction
        };
        let next = (position + moved).clamp(0, 8);
        let reward = if next == 8 { 1.0 } else { 0.0 };
        (reward, next)
    }

    fn end_condition(&self, decstate: &i64) -> bool {
        *decstate >= 8
    }

    fn actions(&self, _decstate: &i64) -> Vec<i64> {
        vec![-1, 1]
    }
}

fn main() {
    let walk = Walk {
        rng: RefCell::new(SmallRng::seed_from_u64(17)),
    };
    let config = SimConfig::new(60, 20).with_prob_term(0.02);

    let always_right = ConstantPolicy::new(1);
    let samples = simulate_with_rng(
        &walk,
        &always_right,
        &config,
        &mut SmallRng::seed_from_u64(1),
    );
    let total: f64 = samples.expsamples.iter().map(|e| e.reward).sum();
    println!(
        "always-right: {} runs, {} transitions, total reward {}",
        samples.run_count(),
        samples.expsamples.len(),
        total
    );

    let random = RandomPolicy::with_seed(&walk, 5);
    let samples = simulate_with_rng(&walk, &random, &config, &mut SmallRng::seed_from_u64(1));
    let total: f64 = samples.expsamples.iter().map(|e| e.reward).sum();
    println!(
        "random:       {} runs, {} transitions, total reward {}",
        samples.run_count(),
        samples.expsamples.len(),
        total
    );
}
