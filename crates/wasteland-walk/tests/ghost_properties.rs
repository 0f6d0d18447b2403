use proptest::prelude::*;
use wasteland_core::rng::RngHandle;
use wasteland_graph::{gen_ghost_rings, gen_random_network, ghost_start_label, ghost_terminal_label};
use wasteland_walk::{lcm_all, simulate_lockstep, synchronize, walk, walk_nodes, WalkOpts};

/// Smallest multiple of the largest value divisible by every value.
fn lcm_by_search(values: &[u64]) -> u64 {
    let max = *values.iter().max().unwrap();
    let mut candidate = max;
    while !values.iter().all(|v| candidate % v == 0) {
        candidate += max;
    }
    candidate
}

proptest! {
    #[test]
    fn lcm_matches_multiples_search(values in prop::collection::vec(1u64..40, 1..6)) {
        prop_assert_eq!(lcm_all(values.iter().copied()).unwrap(), lcm_by_search(&values));
    }

    #[test]
    fn lcm_ignores_order(values in prop::collection::vec(1u64..1000, 1..8), rotate in 0usize..8) {
        let mut permuted = values.clone();
        permuted.reverse();
        let shift = rotate % permuted.len();
        permuted.rotate_left(shift);
        prop_assert_eq!(
            lcm_all(values.iter().copied()).unwrap(),
            lcm_all(permuted.iter().copied()).unwrap()
        );
    }

    #[test]
    fn rings_synchronise_at_lcm(periods in prop::collection::vec(1u64..12, 1..5)) {
        let store = gen_ghost_rings(&periods).unwrap();
        let outcome = synchronize(&store, 'A', 'Z', &WalkOpts::default()).unwrap();
        let found: Vec<u64> = outcome.periods.iter().map(|p| p.steps).collect();
        prop_assert_eq!(&found, &periods);
        let expected = lcm_by_search(&periods);
        prop_assert_eq!(outcome.steps, expected);
        prop_assert_eq!(simulate_lockstep(&store, 'A', 'Z', expected).unwrap(), expected);
    }

    #[test]
    fn ring_walk_reaches_terminal_after_its_period(period in 1u64..50) {
        let store = gen_ghost_rings(&[period]).unwrap();
        let steps = walk(&store, &ghost_start_label(0), &ghost_terminal_label(0), &WalkOpts::default()).unwrap();
        prop_assert_eq!(steps, period);
    }

    #[test]
    fn parallel_and_lockstep_agree_on_random_networks(seed in any::<u64>(), nodes in 2usize..120) {
        let mut rng = RngHandle::from_seed(seed);
        let store = gen_random_network(nodes, 7, &mut rng).unwrap();
        let starts: Vec<&str> = store.all_nodes().iter().take(4).map(|n| n.label()).collect();
        let budget = WalkOpts::with_budget(500);
        let parallel = WalkOpts { parallel: true, ..budget.clone() };
        let a = walk_nodes(&store, &starts, 'Z', &budget);
        let b = walk_nodes(&store, &starts, 'Z', &parallel);
        match (a, b) {
            (Ok(a), Ok(b)) => prop_assert_eq!(a, b),
            (Err(a), Err(b)) => prop_assert_eq!(a, b),
            (a, b) => prop_assert!(false, "modes disagree: {:?} vs {:?}", a, b),
        }
    }
}
