//! End-to-end sample collection over a stochastic model provider.

use std::cell::RefCell;

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use rmdp_sim::{simulate_with_rng, ConstantPolicy, RandomPolicy, SimConfig, Simulator};

/// A slippery walk over 0..=goal: the chosen direction is followed with
/// probability 0.8, reversed otherwise. Reaching the goal pays 1.
struct SlipperyWalk {
    goal: i64,
    slip: f64,
    rng: RefCell<SmallRng>,
}

impl SlipperyWalk {
    fn new(goal: i64, seed: u64) -> Self {
        Self {
            goal,
            slip: 0.2,
            rng: RefCell::new(SmallRng::seed_from_u64(seed)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Dir {
    Left,
    Right,
}

impl Simulator for SlipperyWalk {
    type DecState = i64;
    type Action = Dir;
    type ExpState = (i64, Dir);

    fn init_state(&self) -> i64 {
        0
    }

    fn transition_dec(&self, decstate: &i64, action: &Dir) -> (i64, Dir) {
        (*decstate, *action)
    }

    fn transition_exp(&self, expstate: &(i64, Dir)) -> (f64, i64) {
        let (position, intended) = *expstate;
        let slipped = self.rng.borrow_mut().gen::<f64>() < self.slip;
        let step = match (intended, slipped) {
            (Dir::Right, false) | (Dir::Left, true) => 1,
            (Dir::Right, true) | (Dir::Left, false) => -1,
        };
        let next = (position + step).max(0);
        let reward = if next >= self.goal { 1.0 } else { 0.0 };
        (reward, next)
    }

    fn end_condition(&self, decstate: &i64) -> bool {
        *decstate >= self.goal
    }

    fn actions(&self, _decstate: &i64) -> Vec<Dir> {
        vec![Dir::Left, Dir::Right]
    }
}

#[test]
fn walk_collects_parallel_streams_per_run() {
    let walk = SlipperyWalk::new(5, 21);
    let policy = ConstantPolicy::new(Dir::Right);
    let config = SimConfig::new(40, 6);

    let samples = simulate_with_rng(&walk, &policy, &config, &mut SmallRng::seed_from_u64(1));

    assert_eq!(samples.run_count(), 6);
    assert_eq!(samples.decsamples.len(), samples.expsamples.len());

    for run in 0..6 {
        // one initial state per run, steps contiguous from 0
        let steps: Vec<usize> = samples
            .decsamples
            .iter()
            .filter(|d| d.run == run)
            .map(|d| d.step)
            .collect();
        let expected: Vec<usize> = (0..steps.len()).collect();
        assert_eq!(steps, expected);
        assert!(steps.len() <= 40);
    }

    // every recorded choice pairs with its resolution
    for (dec, exp) in samples.decsamples.iter().zip(samples.expsamples.iter()) {
        assert_eq!(dec.expstate_to, exp.expstate_from);
        assert_eq!(exp.weight, 1.0);
    }
}

#[test]
fn walk_terminates_at_goal_with_final_reward() {
    let walk = SlipperyWalk::new(3, 77);
    let policy = ConstantPolicy::new(Dir::Right);
    let config = SimConfig::new(200, 4);

    let samples = simulate_with_rng(&walk, &policy, &config, &mut SmallRng::seed_from_u64(2));

    for run in 0..4 {
        let run_samples: Vec<_> = samples.expsamples.iter().filter(|e| e.run == run).collect();
        let last = run_samples.last().expect("run produced samples");
        // a generous horizon lets every run reach the absorbing goal
        assert_eq!(last.decstate_to, 3);
        assert_eq!(last.reward, 1.0);
        // intermediate resolutions pay nothing
        for exp in &run_samples[..run_samples.len() - 1] {
            assert_eq!(exp.reward, 0.0);
        }
    }
}

#[test]
fn random_policy_explores_the_walk() {
    let walk = SlipperyWalk::new(4, 5);
    let policy = RandomPolicy::with_seed(&walk, 13);
    let config = SimConfig::new(30, 8).with_tran_limit(100);

    let samples = simulate_with_rng(&walk, &policy, &config, &mut SmallRng::seed_from_u64(3));

    assert!(samples.expsamples.len() <= 100);
    assert!(samples
        .decsamples
        .iter()
        .all(|d| d.action == Dir::Left || d.action == Dir::Right));
}

#[test]
fn termination_coin_shortens_runs() {
    let walk = SlipperyWalk::new(i64::MAX, 31);
    let policy = ConstantPolicy::new(Dir::Right);

    let coinless = SimConfig::new(50, 10);
    let coined = SimConfig::new(50, 10).with_prob_term(0.5);

    let full = simulate_with_rng(&walk, &policy, &coinless, &mut SmallRng::seed_from_u64(4));
    let short = simulate_with_rng(
        &SlipperyWalk::new(i64::MAX, 31),
        &policy,
        &coined,
        &mut SmallRng::seed_from_u64(4),
    );

    assert_eq!(full.expsamples.len(), 50 * 10);
    // a fair per-step coin cuts the batch well below the horizon bound,
    // but every non-terminal run still records at least one transition
    assert!(short.expsamples.len() < full.expsamples.len());
    for run in 0..10 {
        assert!(short.expsamples.iter().any(|e| e.run == run));
    }
}

#[test]
fn samples_serialize_for_downstream_tools() {
    let walk = SlipperyWalk::new(2, 91);
    let policy = ConstantPolicy::new(Dir::Right);
    let config = SimConfig::new(20, 1);

    let samples = simulate_with_rng(&walk, &policy, &config, &mut SmallRng::seed_from_u64(5));

    // Dir does not serialize; project the streams into plain records first
    let rows: Vec<(i64, usize, usize, f64)> = samples
        .expsamples
        .iter()
        .map(|e| (e.decstate_to, e.step, e.run, e.reward))
        .collect();
    let json = serde_json::to_string(&rows).unwrap();
    assert!(json.starts_with('['));
    let parsed: Vec<(i64, usize, usize, f64)> = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, rows);
}
