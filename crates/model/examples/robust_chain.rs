//! Building a small robust MDP and exporting it.
//!
//! Run with: cargo run -p rmdp-model --example robust_chain
//!
//! The model is a 3-state chain where the middle state has one action with
//! two outcomes: an optimistic transition kernel and a pessimistic one. The
//! (distribution, threshold) pair bounds how far an adversary may tilt the
//! mixture between them.

use rmdp_model::Rmdp;

fn main() {
    let mut mdp = Rmdp::new();

    // state 0: a single deterministic action into the chain
    mdp.add_transition_d(0, 0, 1, 1.0, 0.0).unwrap();

    // state 1, action 0, outcome 0: the optimistic kernel
    mdp.add_transition(1, 0, 0, 2, 0.9, 10.0).unwrap();
    mdp.add_transition(1, 0, 0, 0, 0.1, 0.0).unwrap();

    // state 1, action 0, outcome 1: the pessimistic kernel
    mdp.add_transition(1, 0, 1, 2, 0.4, 10.0).unwrap();
    mdp.add_transition(1, 0, 1, 0, 0.6, 0.0).unwrap();

    // state 2 stays action-free: terminal for downstream solvers

    // nominal mixture: both kernels equally likely, adversary may shift
    // up to 0.5 of L1 mass between them
    mdp.set_distribution(1, 0, vec![0.5, 0.5], 0.5).unwrap();

    println!("summary (state : actions / action : outcomes / dist):");
    println!("{}", mdp);

    println!("normalized: {}", mdp.is_normalized());

    println!("csv export:");
    let mut buffer = Vec::new();
    mdp.to_csv(&mut buffer, true).unwrap();
    print!("{}", String::from_utf8(buffer).unwrap());
}
