use hbfs_core::Snapshot;
use hbfs_gridworld::{GridWorld, Move};
use hbfs_search::{ExpandStatus, Search, SearchConfig, SearchError};

const OPEN_ROOM: &str = "
    #######
    #.....#
    #.....#
    #..A..#
    #.....#
    #.....#
    #######
";

const CELL: &str = "
    ###
    #A#
    ###
";

fn moves() -> Vec<Move> {
    vec![Move::Up, Move::Right, Move::Down, Move::Left]
}

fn world(map: &str) -> GridWorld {
    GridWorld::parse(map).unwrap()
}

#[test]
fn new_search_holds_only_the_root() {
    let search = Search::new(SearchConfig::default(), &world(OPEN_ROOM)).unwrap();
    assert_eq!(search.frontier().len(), 1);
    assert_eq!(search.visited().len(), 1);
    assert_eq!(search.nodes_created(), 1);
    assert!(search.root().is_root());
    assert_eq!(search.root().depth(), 0);
    assert!(!search.is_solved());
}

#[test]
fn first_expansion_pushes_one_child_per_distinct_action() {
    let root = world(OPEN_ROOM);
    let mut search = Search::with_actions(SearchConfig::default(), &root, moves()).unwrap();

    let status = search.expand().unwrap();
    assert_eq!(status, ExpandStatus::Expanded);
    assert_eq!(search.frontier().len(), 4);
    assert_eq!(search.visited().len(), 5);
    assert_eq!(search.stats().rejects, 0);
    assert_eq!(search.stats().expansions, 1);
    assert!(search.frontier().iter().all(|n| n.depth() == 1));
}

#[test]
fn duplicate_successors_are_rejected() {
    // Nil reproduces the root.
    let mut search = Search::new(SearchConfig::default(), &world(OPEN_ROOM)).unwrap();
    search.expand().unwrap();
    assert_eq!(search.frontier().len(), 4);
    assert_eq!(search.visited().len(), 5);
    assert_eq!(search.stats().rejects, 1);
}

#[test]
fn losing_terminals_are_pruned() {
    let map = "
        #####
        #.Ax#
        #####
    ";
    let mut search = Search::new(SearchConfig::default(), &world(map)).unwrap();
    assert_eq!(search.expand().unwrap(), ExpandStatus::Expanded);

    // Left survives; up, down and nil are duplicates; right falls into the pit.
    assert_eq!(search.frontier().len(), 1);
    assert_eq!(search.stats().rejects, 3);
    assert_eq!(search.visited().len(), 2);
    assert!(search.frontier().iter().all(|n| !n.is_terminal()));
    assert_eq!(search.best().unwrap().action(), Some(Move::Left));
}

#[test]
fn starved_frontier_is_reseeded_around_the_expanded_node() {
    let mut search = Search::new(SearchConfig::default(), &world(CELL)).unwrap();
    let actions = search.actions().len();

    assert_eq!(search.expand().unwrap(), ExpandStatus::Reseeded);
    assert_eq!(search.frontier().len(), actions + 1);
    assert_eq!(search.stats().empty_frontier_events, 1);
    assert!(search.frontier().iter().any(|n| n.is_root()));
    assert!(search.visited().contains(search.root().digest()));

    // The reseeded nodes share one digest; draining them starves the frontier again.
    let mut status = search.expand().unwrap();
    while status == ExpandStatus::Expanded {
        status = search.expand().unwrap();
    }
    assert_eq!(status, ExpandStatus::Reseeded);
    assert_eq!(search.stats().empty_frontier_events, 2);
    assert!(search.frontier().len() <= search.config().max_frontier_len);
}

#[test]
fn solved_expansion_leaves_the_frontier_unchanged() {
    let map = "
        #####
        #.AE#
        #####
    ";
    let mut search = Search::new(SearchConfig::default(), &world(map)).unwrap();
    let root_digest = search.root().digest();

    assert_eq!(search.expand().unwrap(), ExpandStatus::Solved);
    assert_eq!(search.frontier().len(), 1);
    assert_eq!(search.best().unwrap().digest(), root_digest);
    assert_eq!(search.visited().len(), 1);

    let solution = search.solution().unwrap();
    assert!(solution.snapshot().is_win());
    assert_eq!(solution.action_path(), vec![Move::Right]);

    assert_eq!(search.expand().unwrap(), ExpandStatus::Solved);
    assert_eq!(search.frontier().len(), 1);

    let mut plan = search.solution_plan().unwrap();
    assert_eq!(plan.pop_next(), Some(Move::Right));
    assert!(plan.is_empty());
}

#[test]
fn search_finds_a_key_door_exit_plan() {
    let map = "
        #########
        #k......#
        #.#####.#
        #...A...#
        #######D#
        #E......#
        #########
    ";
    let root = world(map);
    let mut search = Search::new(SearchConfig::default(), &root).unwrap();

    let mut status = ExpandStatus::Expanded;
    for _ in 0..5_000 {
        status = search.expand().unwrap();
        if status.is_solved() {
            break;
        }
    }
    assert!(status.is_solved(), "no plan after {} expansions", search.stats().expansions);

    let mut replay = root.clone();
    for action in search.solution().unwrap().action_path() {
        replay.advance(action);
    }
    assert!(replay.is_win());
}

#[test]
fn bounds_hold_after_every_expansion() {
    let config = SearchConfig {
        max_frontier_len: 8,
        carry_over_len: 3,
        max_visited_len: 10,
        ..SearchConfig::default()
    };
    let mut search = Search::new(config, &world(OPEN_ROOM)).unwrap();

    for _ in 0..300 {
        search.expand().unwrap();
        assert!(search.frontier().len() <= 8);
        assert!(search.visited().len() <= 10);
        assert!(search.frontier().high_water() <= 8);
    }
    let stats = search.stats();
    assert!(stats.frontier_compactions > 0);
    assert!(stats.compaction_discards > 0);
    assert!(stats.visited_resets > 0);
}

#[test]
fn frontier_nodes_replay_from_the_root() {
    let root = world(OPEN_ROOM);
    let mut search = Search::with_actions(SearchConfig::default(), &root, moves()).unwrap();
    for _ in 0..40 {
        search.expand().unwrap();
    }

    for node in search.frontier().iter() {
        let path = node.action_path();
        assert_eq!(path.len(), node.depth() as usize);
        assert_eq!(node.ancestors().count(), node.depth() as usize + 1);

        let mut replay = root.clone();
        for action in path {
            replay.advance(action);
        }
        assert_eq!(search.hasher().digest(&replay), node.digest());
    }
}

#[test]
fn best_effort_plan_follows_the_best_node() {
    let root = world(OPEN_ROOM);
    let mut search = Search::with_actions(SearchConfig::default(), &root, moves()).unwrap();
    search.expand().unwrap();

    let best = search.best().unwrap();
    let plan = search.best_effort_plan().unwrap();
    assert_eq!(plan.len(), best.depth() as usize);
    assert_eq!(plan.peek_next().copied(), best.action());
    assert!(search.solution_plan().is_none());
}

#[test]
fn best_effort_plan_skips_reseeded_losses() {
    // Both neighbours are pits; the reseed queues the losing moves next to the root.
    let mut search = Search::new(SearchConfig::default(), &world("#xAx#")).unwrap();
    assert_eq!(search.expand().unwrap(), ExpandStatus::Reseeded);

    assert!(search.best().unwrap().is_terminal());
    assert!(search.frontier().iter().any(|n| !n.is_terminal()));

    let plan = search.best_effort_plan().unwrap();
    assert!(plan.is_empty(), "fallback should stay at the root, got {plan:?}");
}

#[test]
fn terminal_root_is_rejected() {
    let mut done = world("#AE#");
    done.advance(Move::Right);
    assert!(done.is_terminal());

    let err = Search::new(SearchConfig::default(), &done).unwrap_err();
    assert_eq!(err, SearchError::InvalidInitialState);
}

#[test]
fn invalid_configs_are_rejected() {
    let room = world(OPEN_ROOM);

    let bad_carry = SearchConfig {
        carry_over_len: 2000,
        ..SearchConfig::default()
    };
    assert!(matches!(
        Search::new(bad_carry, &room),
        Err(SearchError::InvalidConfig { .. })
    ));

    let too_small = SearchConfig {
        max_frontier_len: 4,
        carry_over_len: 1,
        ..SearchConfig::default()
    };
    assert!(matches!(
        Search::new(too_small, &room),
        Err(SearchError::InvalidConfig { .. })
    ));

    let mut weights = SearchConfig::default().weights;
    weights.load = f64::NAN;
    let nan = SearchConfig::default().with_weights(weights);
    assert!(nan.validate().is_err());
}
