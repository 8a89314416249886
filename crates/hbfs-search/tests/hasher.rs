use hbfs_core::{EntityCategory, EntitySighting, GridPos, InteractionEvent, Outcome, Snapshot};
use hbfs_search::StructuralHasher;

#[derive(Debug, Clone)]
struct Scene {
    avatar: Option<GridPos>,
    entities: Vec<EntitySighting>,
    events: Vec<InteractionEvent>,
}

impl Snapshot for Scene {
    type Action = u8;

    fn available_actions(&self) -> Vec<u8> {
        vec![0]
    }

    fn noop_action(&self) -> u8 {
        0
    }

    fn advance(&mut self, _action: u8) {}

    fn is_terminal(&self) -> bool {
        false
    }

    fn winner(&self) -> Outcome {
        Outcome::Pending
    }

    fn avatar_position(&self) -> Option<GridPos> {
        self.avatar
    }

    fn entities(&self) -> Vec<EntitySighting> {
        self.entities.clone()
    }

    fn events(&self) -> &[InteractionEvent] {
        &self.events
    }
}

fn sighting(category: EntityCategory, type_id: u32, x: i32, y: i32) -> EntitySighting {
    EntitySighting {
        category,
        type_id,
        position: GridPos::new(x, y),
    }
}

fn scene(avatar: (i32, i32), entities: Vec<EntitySighting>) -> Scene {
    Scene {
        avatar: Some(GridPos::new(avatar.0, avatar.1)),
        entities,
        events: Vec::new(),
    }
}

#[test]
fn entity_order_does_not_matter() {
    let a = sighting(EntityCategory::Npc, 3, 4, 1);
    let b = sighting(EntityCategory::Resource, 7, 0, 2);
    let c = sighting(EntityCategory::Immovable, 1, 5, 5);

    let hasher = StructuralHasher::default();
    let one = hasher.digest(&scene((1, 1), vec![a, b, c]));
    let two = hasher.digest(&scene((1, 1), vec![c, a, b]));
    assert_eq!(one, two);
}

#[test]
fn event_history_is_not_part_of_the_digest() {
    let hasher = StructuralHasher::default();
    let quiet = scene((2, 2), vec![sighting(EntityCategory::Portal, 5, 0, 0)]);
    let mut noisy = quiet.clone();
    noisy.events.push(InteractionEvent {
        tick: 4,
        active_type: 0,
        passive_type: 5,
    });
    assert_eq!(hasher.digest(&quiet), hasher.digest(&noisy));
}

#[test]
fn avatar_entities_and_categories_all_distinguish_states() {
    let hasher = StructuralHasher::default();
    let base = scene((1, 1), vec![sighting(EntityCategory::Movable, 2, 3, 3)]);
    let digest = hasher.digest(&base);

    let moved_avatar = scene((1, 2), base.entities.clone());
    assert_ne!(hasher.digest(&moved_avatar), digest);

    let moved_box = scene((1, 1), vec![sighting(EntityCategory::Movable, 2, 3, 4)]);
    assert_ne!(hasher.digest(&moved_box), digest);

    let other_category = scene((1, 1), vec![sighting(EntityCategory::Resource, 2, 3, 3)]);
    assert_ne!(hasher.digest(&other_category), digest);

    let other_type = scene((1, 1), vec![sighting(EntityCategory::Movable, 9, 3, 3)]);
    assert_ne!(hasher.digest(&other_type), digest);

    let no_avatar = Scene {
        avatar: None,
        ..base.clone()
    };
    assert_ne!(hasher.digest(&no_avatar), digest);
}

#[test]
fn coarse_buckets_fold_nearby_positions() {
    let fine = StructuralHasher::new(1);
    let coarse = StructuralHasher::new(4);

    let left = scene((0, 0), vec![sighting(EntityCategory::Npc, 1, 8, 8)]);
    let right = scene((3, 2), vec![sighting(EntityCategory::Npc, 1, 9, 11)]);

    assert_ne!(fine.digest(&left), fine.digest(&right));
    assert_eq!(coarse.digest(&left), coarse.digest(&right));
}

#[test]
fn invalid_bucket_sizes_are_clamped() {
    assert_eq!(StructuralHasher::new(0).position_bucket(), 1);
    assert_eq!(StructuralHasher::new(-3), StructuralHasher::default());
}
