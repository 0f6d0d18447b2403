use wasteland_graph::{parse_network, GraphStore};
use wasteland_walk::{simulate_lockstep, synchronize, walk, WalkOpts};

const BRANCHING: &str = "RL\n\nAAA = (BBB, CCC)\nBBB = (DDD, EEE)\nCCC = (ZZZ, GGG)\nDDD = (DDD, DDD)\nEEE = (EEE, EEE)\nGGG = (GGG, GGG)\nZZZ = (ZZZ, ZZZ)\n";

const GHOSTS: &str = "LR\n\n11A = (11B, XXX)\n11B = (XXX, 11Z)\n11Z = (11B, XXX)\n22A = (22B, XXX)\n22B = (22C, 22C)\n22C = (22Z, 22Z)\n22Z = (22B, 22B)\nXXX = (XXX, XXX)\n";

fn three_node_ring(symbols: &str) -> GraphStore {
    let mut store = GraphStore::from_symbols(symbols).unwrap();
    store
        .insert("AAA", "BBB", "BBB")
        .insert("BBB", "AAA", "ZZZ")
        .insert("ZZZ", "ZZZ", "ZZZ");
    store
}

#[test]
fn branching_example_takes_two_steps() {
    let store = parse_network(BRANCHING).unwrap();
    assert_eq!(walk(&store, "AAA", "ZZZ", &WalkOpts::default()).unwrap(), 2);
}

#[test]
fn three_node_ring_with_alternating_instructions() {
    let store = three_node_ring("LR");
    assert_eq!(walk(&store, "AAA", "ZZZ", &WalkOpts::default()).unwrap(), 2);
}

#[test]
fn three_node_ring_repeats_the_sequence() {
    let store = three_node_ring("LLR");
    assert_eq!(walk(&store, "AAA", "ZZZ", &WalkOpts::default()).unwrap(), 6);
}

#[test]
fn walk_from_terminal_to_itself_is_zero() {
    let store = three_node_ring("LLR");
    assert_eq!(walk(&store, "ZZZ", "ZZZ", &WalkOpts::default()).unwrap(), 0);
}

#[test]
fn ghosts_synchronise_at_lcm_of_first_hits() {
    let store = parse_network(GHOSTS).unwrap();
    let outcome = synchronize(&store, 'A', 'Z', &WalkOpts::default()).unwrap();
    let periods: Vec<(String, u64)> = outcome
        .periods
        .iter()
        .map(|p| (p.start.clone(), p.steps))
        .collect();
    assert_eq!(periods, [("11A".to_string(), 2), ("22A".to_string(), 3)]);
    assert_eq!(outcome.steps, 6);
}

#[test]
fn parallel_discovery_matches_lockstep() {
    let store = parse_network(GHOSTS).unwrap();
    let lockstep = synchronize(&store, 'A', 'Z', &WalkOpts::default()).unwrap();
    let parallel = synchronize(
        &store,
        'A',
        'Z',
        &WalkOpts {
            parallel: true,
            concurrency: 2,
            ..WalkOpts::default()
        },
    )
    .unwrap();
    assert_eq!(lockstep, parallel);
}

#[test]
fn no_start_nodes_is_a_hard_error() {
    let store = parse_network(BRANCHING).unwrap();
    let err = synchronize(&store, 'Q', 'Z', &WalkOpts::default()).unwrap_err();
    assert_eq!(err.code(), "no-start-nodes");
    assert_eq!(err.info().context["suffix"], "Q");
}

#[test]
fn budget_applies_to_each_walker() {
    let store = parse_network(GHOSTS).unwrap();
    let err = synchronize(&store, 'A', 'Z', &WalkOpts::with_budget(2)).unwrap_err();
    assert_eq!(err.code(), "step-budget-exceeded");
    assert_eq!(err.info().context["label"], "22A");
    assert!(synchronize(&store, 'A', 'Z', &WalkOpts::with_budget(3)).is_ok());
}

#[test]
fn lockstep_simulation_respects_budget() {
    let store = parse_network(GHOSTS).unwrap();
    let err = simulate_lockstep(&store, 'A', 'Z', 5).unwrap_err();
    assert_eq!(err.code(), "step-budget-exceeded");
    assert_eq!(simulate_lockstep(&store, 'A', 'Z', 6).unwrap(), 6);
}
