//! Unit tests for the search driver.

use super::*;
use crate::domain::NodeId;
use crate::graph::{Graph, GraphBuilder};

fn node(raw: usize) -> NodeId {
    NodeId::new(raw).unwrap()
}

fn graph(n: usize, edges: &[(usize, usize)]) -> Graph {
    GraphBuilder::new(n)
        .edges(edges.iter().copied())
        .build()
        .unwrap()
}

fn solve_with(graph: &Graph, window: usize) -> SearchResult {
    let config = SearchConfig::new(window);
    Planner::new(graph, &config).solve().unwrap()
}

fn solve(graph: &Graph) -> Outcome {
    solve_with(graph, DEFAULT_WINDOW).outcome
}

fn reached(time: u64, wait: u64) -> Outcome {
    Outcome::Reached(Answer { time, wait })
}

/// Exact answer by dynamic programming over time: the least wait with which
/// each node can be occupied at each step, up to `horizon`.
fn brute_force(graph: &Graph, horizon: u64) -> Option<Answer> {
    let n = graph.node_count();
    let target = n - 1;
    let mut best: Vec<Option<u64>> = vec![None; n];
    best[0] = Some(0);

    for time in 0..=horizon {
        if let Some(wait) = best[target] {
            return Some(Answer { time, wait });
        }
        let mut next: Vec<Option<u64>> = vec![None; n];
        let mut relax = |slot: usize, wait: u64| {
            if next[slot].is_none_or(|w| wait < w) {
                next[slot] = Some(wait);
            }
        };
        for u in graph.nodes() {
            let Some(wait) = best[u.index()] else {
                continue;
            };
            relax(u.index(), wait + 1);
            if let Some(via) = scheduled_ordinal(time, graph.degree(u)) {
                let v = graph.edge_at(u, via).unwrap();
                relax(v.index(), wait);
            }
        }
        best = next;
    }
    None
}

#[test]
fn single_edge_moves_immediately() {
    let g = graph(2, &[(1, 2)]);
    assert_eq!(solve(&g), reached(1, 0));
}

#[test]
fn no_edges_is_unreachable() {
    let g = graph(2, &[]);
    let result = solve_with(&g, DEFAULT_WINDOW);

    assert_eq!(result.outcome, Outcome::Unreachable);
    assert_eq!(result.stats.termination, Termination::FrontierExhausted);
    // The start node waits through the whole window and nothing else
    assert_eq!(result.stats.explored(), DEFAULT_WINDOW);
}

#[test]
fn path_of_three_takes_second_ordinal_at_middle() {
    // Node 2 lists its edges as [to 1, to 3]. It is reached at t=1, where
    // the schedule offers ordinal (1 mod 2) + 1 = 2, the edge to node 3.
    let g = graph(3, &[(1, 2), (2, 3)]);
    assert_eq!(solve(&g), reached(2, 0));
}

#[test]
fn waits_for_scheduled_edge() {
    // Node 1 offers the edge to 2 at t=0 and the edge to 3 at t=1
    let g = graph(3, &[(1, 2), (1, 3)]);
    assert_eq!(solve(&g), reached(2, 1));
}

#[test]
fn prefers_less_waiting_at_equal_time() {
    // Waiting at 1 and taking (1, 4) at t=1 arrives at t=2 with one wait;
    // going via 2 also arrives at t=2, without waiting.
    let g = graph(4, &[(1, 2), (1, 4), (2, 4)]);
    assert_eq!(solve(&g), reached(2, 0));
}

#[test]
fn start_is_target() {
    let g = graph(1, &[]);
    let result = solve_with(&g, DEFAULT_WINDOW);
    assert_eq!(result.outcome, reached(0, 0));
    assert_eq!(result.stats.termination, Termination::AnswerSettled);
}

#[test]
fn disconnected_target_is_unreachable() {
    let g = graph(4, &[(1, 2), (2, 3), (3, 1)]);
    assert_eq!(solve(&g), Outcome::Unreachable);
}

#[test]
fn terminates_once_answer_settled() {
    let g = graph(2, &[(1, 2)]);
    let result = solve_with(&g, DEFAULT_WINDOW);
    assert_eq!(result.stats.termination, Termination::AnswerSettled);
    assert!(result.stats.popped < 10);
}

#[test]
fn deterministic_across_runs() {
    let g = graph(5, &[(1, 2), (2, 3), (3, 1), (3, 4), (4, 5), (2, 5), (1, 4)]);
    let first = solve_with(&g, DEFAULT_WINDOW);
    let second = solve_with(&g, DEFAULT_WINDOW);
    assert_eq!(first, second);
}

#[test]
fn explicit_request() {
    let g = graph(3, &[(1, 2), (2, 3)]);
    let config = SearchConfig::default();
    let planner = Planner::new(&g, &config);

    let result = planner
        .search(&SearchRequest::new(node(3), node(1)))
        .unwrap();
    // From 3 (degree 1) to 2 at t=1, where ordinal 2 leads back to 3; node 2
    // waits until t=2 for the edge to 1.
    assert_eq!(result.outcome, reached(3, 1));
}

#[test]
fn request_out_of_range() {
    let g = graph(2, &[(1, 2)]);
    let config = SearchConfig::default();
    let planner = Planner::new(&g, &config);

    let err = planner
        .search(&SearchRequest::new(node(1), node(3)))
        .unwrap_err();
    assert_eq!(
        err,
        SearchError::NodeOutOfRange {
            node: node(3),
            node_count: 2
        }
    );
}

#[test]
fn empty_graph_rejected() {
    let g = Graph::with_nodes(0);
    let config = SearchConfig::default();
    let err = Planner::new(&g, &config).solve().unwrap_err();
    assert!(matches!(err, SearchError::InvalidRequest(_)));
}

#[test]
fn zero_window_rejected() {
    let g = graph(2, &[(1, 2)]);
    let config = SearchConfig::new(0);
    let err = Planner::new(&g, &config).solve().unwrap_err();
    assert_eq!(
        err.to_string(),
        "invalid search request: window must be at least 1"
    );
}

#[test]
fn oversized_window_rejected_before_allocating() {
    let g = graph(1, &[]);
    let config = SearchConfig::new(1 << 40);
    let request = SearchRequest::conventional(&g).unwrap();
    let err = SearchDriver::new(&g, &config, &request).err().unwrap();
    assert!(matches!(err, SearchError::InvalidRequest(_)));

    let config = SearchConfig::new(MAX_WINDOW + 1);
    assert!(Planner::new(&g, &config).solve().is_err());
}

#[test]
fn driver_steps_until_done() {
    let g = graph(2, &[(1, 2)]);
    let config = SearchConfig::default();
    let request = SearchRequest::conventional(&g).unwrap();
    let mut driver = SearchDriver::new(&g, &config, &request).unwrap();

    // The origin is admitted during initialisation
    assert_eq!(driver.store().best_time(node(1)), Some(0));

    match driver.step() {
        Step::Expanded { state, admitted } => {
            assert_eq!(state, SearchState::origin(node(1)));
            assert_eq!(admitted, 2);
        }
        other => panic!("unexpected step {other:?}"),
    }

    while !driver.is_done() {
        driver.step();
    }
    assert_eq!(
        driver.step(),
        Step::Done(Termination::AnswerSettled),
        "a finished driver stays finished"
    );
    assert_eq!(driver.finish().outcome, reached(1, 0));
}

#[test]
fn stale_states_are_discarded() {
    // Several routes reach node 3 at t=2 with different waits
    let g = graph(4, &[(1, 2), (1, 3), (2, 3), (3, 4)]);
    let config = SearchConfig::default();
    let request = SearchRequest::conventional(&g).unwrap();
    let mut driver = SearchDriver::new(&g, &config, &request).unwrap();

    loop {
        match driver.step() {
            Step::Stale(state) => assert!(!driver.store().is_valid(&state)),
            Step::Expanded { state, .. } => assert!(state.wait <= state.time),
            Step::Done(_) => break,
        }
    }
    let stats = driver.stats();
    assert_eq!(stats.popped, stats.explored() + stats.stale);
}

mod proptests {
    use super::*;
    use proptest::prelude::*;

    /// Small graphs: up to 6 nodes and 8 edges, self loops and parallel
    /// edges included.
    fn graph_strategy() -> impl Strategy<Value = Graph> {
        (2usize..=6)
            .prop_flat_map(|n| (Just(n), prop::collection::vec((1..=n, 1..=n), 0..=8)))
            .prop_map(|(n, edges)| graph(n, &edges))
    }

    // Earliest arrival never exceeds the sum of degrees (at most 16 here),
    // so this horizon separates "late" from "unreachable".
    const HORIZON: u64 = 64;

    proptest! {
        /// With a window wider than any reachable time, both objectives are exact
        #[test]
        fn matches_brute_force(g in graph_strategy()) {
            let expected = brute_force(&g, HORIZON);
            let outcome = solve(&g);
            prop_assert_eq!(outcome.answer(), expected);
        }

        /// Shrinking the window down to the max degree keeps time exact;
        /// waiting can only get worse
        #[test]
        fn narrow_window_keeps_time(g in graph_strategy()) {
            let window = g.max_degree().max(1);
            let wide = solve_with(&g, DEFAULT_WINDOW).outcome;
            let narrow = solve_with(&g, window).outcome;

            match (wide, narrow) {
                (Outcome::Reached(w), Outcome::Reached(n)) => {
                    prop_assert_eq!(w.time, n.time);
                    prop_assert!(w.wait <= n.wait);
                }
                (Outcome::Unreachable, Outcome::Unreachable) => {}
                other => prop_assert!(false, "reachability differs: {:?}", other),
            }
        }

        /// For any two windows covering the max degree, the larger one
        /// reports the same time and no more waiting
        #[test]
        fn wider_window_never_worse(
            g in graph_strategy(),
            extra in 0usize..12,
            widen in 1usize..24,
        ) {
            let smaller = g.max_degree().max(1) + extra;
            let larger = smaller + widen;
            let small = solve_with(&g, smaller).outcome;
            let large = solve_with(&g, larger).outcome;

            match (small, large) {
                (Outcome::Reached(s), Outcome::Reached(l)) => {
                    prop_assert_eq!(s.time, l.time);
                    prop_assert!(l.wait <= s.wait, "window {} gave {} but {} gave {}", larger, l, smaller, s);
                }
                (Outcome::Unreachable, Outcome::Unreachable) => {}
                other => prop_assert!(false, "reachability differs: {:?}", other),
            }
        }

        /// Baselines never move later, and admitted states keep wait <= time
        #[test]
        fn driver_invariants(g in graph_strategy(), window in 1usize..12) {
            let config = SearchConfig::new(window);
            let request = SearchRequest::conventional(&g).unwrap();
            let mut driver = SearchDriver::new(&g, &config, &request).unwrap();
            let mut baselines: Vec<Option<u64>> = g.nodes().map(|u| driver.store().best_time(u)).collect();

            loop {
                let step = driver.step();
                if let Step::Expanded { state, .. } = step {
                    prop_assert!(state.wait <= state.time);
                }
                for u in g.nodes() {
                    let now = driver.store().best_time(u);
                    if let Some(before) = baselines[u.index()] {
                        prop_assert!(now.is_some_and(|t| t <= before), "baseline of {} moved later", u);
                    }
                    for offset in 0..window {
                        if let (Some(base), Some(wait)) = (now, driver.store().best_wait(u, offset)) {
                            prop_assert!(wait <= base + offset as u64);
                        }
                    }
                    baselines[u.index()] = now;
                }
                if matches!(step, Step::Done(_)) {
                    break;
                }
            }
        }

        /// Identical input gives identical output and counters
        #[test]
        fn deterministic(g in graph_strategy()) {
            prop_assert_eq!(solve_with(&g, 8), solve_with(&g, 8));
        }
    }
}
