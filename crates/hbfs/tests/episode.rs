#![cfg(feature = "full")]

use std::time::Duration;

use hbfs::agent::{ControllerState, HbfsController, PlannerConfig};
use hbfs::core::{Deadline, Snapshot, TickContext};
use hbfs::gridworld::GridWorld;
use hbfs::tools::TraceLog;

const MAP: &str = "
    ##########
    #A...#...#
    #.##.#.#.#
    #..#...#E#
    ##########
";

#[test]
fn wall_clock_episode_reaches_the_exit() {
    let mut world = GridWorld::parse(MAP).expect("map");
    let config = PlannerConfig::default();
    let mut controller = HbfsController::start(
        config,
        &TickContext::new(world.tick(), 1),
        &world,
        Deadline::after(Duration::from_millis(60)),
    )
    .expect("start")
    .with_trace_sink(TraceLog::default());

    while !world.is_terminal() {
        let ctx = TickContext::new(world.tick(), 1);
        let action = controller
            .act(&ctx, &world, Deadline::after(Duration::from_millis(40)))
            .expect("act");
        world.advance(action);
    }

    assert!(world.is_win());
    assert_eq!(controller.state(), ControllerState::Acting);
    assert_eq!(controller.stats().solutions, 1);
}
