use hbfs_core::Snapshot;
use hbfs_gridworld::{GridWorld, Move};
use hbfs_search::probe_forward_model;

#[test]
fn probe_reports_movement_per_action() {
    let map = "
        #####
        #...#
        #.A.#
        #####
    ";
    let world = GridWorld::parse(map).unwrap();
    let probes = probe_forward_model(&world, &world.available_actions());
    assert_eq!(probes.len(), Move::ALL.len());

    for probe in &probes {
        match probe.action {
            Move::Nil | Move::Down => assert!(probe.is_inert(), "{probe:?}"),
            Move::Up | Move::Left | Move::Right => {
                assert!(probe.moves_on_first);
                assert!(probe.moves_on_repeat);
            }
        }
    }
}

#[test]
fn probe_does_not_touch_the_snapshot() {
    let world = GridWorld::parse("#A..#").unwrap();
    let _ = probe_forward_model(&world, &[Move::Right]);
    assert_eq!(world.tick(), 0);
    assert_eq!(world.avatar(), hbfs_core::GridPos::new(1, 0));
}
