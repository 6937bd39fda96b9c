//! Property checks: the grid must agree with a brute-force overlap scan.

use std::collections::BTreeSet;

use glam::{IVec2, UVec2};
use proptest::prelude::*;
use tessera_common::{Aabb, EntityId};
use tessera_spatial::SpatialIndex;

const WORLD: u32 = 256;

fn shape() -> impl Strategy<Value = Aabb> {
    (-16i32..272, -16i32..272, 0u32..80, 0u32..80)
        .prop_map(|(x, y, w, h)| Aabb::from_position_size(IVec2::new(x, y), UVec2::new(w, h)))
}

fn brute_force(shapes: &[(EntityId, Aabb)]) -> BTreeSet<(EntityId, EntityId)> {
    let mut pairs = BTreeSet::new();
    for (i, (a, sa)) in shapes.iter().enumerate() {
        for (b, sb) in &shapes[i + 1..] {
            if sa.overlaps(sb) {
                pairs.insert(((*a).min(*b), (*a).max(*b)));
            }
        }
    }
    pairs
}

fn build(shapes: &[(EntityId, Aabb)]) -> SpatialIndex {
    let mut index = SpatialIndex::new(UVec2::splat(WORLD));
    for (id, s) in shapes {
        index.add(*id, *s);
    }
    index
}

fn labelled(shapes: Vec<Aabb>) -> Vec<(EntityId, Aabb)> {
    shapes
        .into_iter()
        .enumerate()
        .map(|(i, s)| (EntityId(i as u32), s))
        .collect()
}

proptest! {
    #[test]
    fn pairs_match_brute_force(shapes in prop::collection::vec(shape(), 0..40)) {
        let shapes = labelled(shapes);
        let index = build(&shapes);
        let pairs = index.overlapping_pairs();

        for (a, b) in &pairs {
            prop_assert!(a < b);
        }
        prop_assert_eq!(pairs, brute_force(&shapes));
    }

    #[test]
    fn pairs_survive_moves(
        shapes in prop::collection::vec(shape(), 1..30),
        moves in prop::collection::vec(shape(), 1..30),
    ) {
        let mut shapes = labelled(shapes);
        let mut index = build(&shapes);
        for (slot, next) in shapes.iter_mut().zip(moves) {
            index.update(slot.0, next);
            slot.1 = next;
        }
        prop_assert_eq!(index.overlapping_pairs(), brute_force(&shapes));
    }

    #[test]
    fn removed_ids_never_reappear(
        shapes in prop::collection::vec(shape(), 1..30),
        victim in any::<prop::sample::Index>(),
    ) {
        let shapes = labelled(shapes);
        let mut index = build(&shapes);
        let (id, former) = shapes[victim.index(shapes.len())];
        index.remove(id);

        prop_assert!(!index.query_rect(former).contains(&id));
        let everywhere = Aabb::new(IVec2::splat(-32), IVec2::splat(300));
        prop_assert!(!index.query_rect(everywhere).contains(&id));
        prop_assert!(index.overlapping_pairs().iter().all(|(a, b)| *a != id && *b != id));
        let centre = (former.top_left + former.bottom_right) / 2;
        prop_assert!(!index.query_point(centre).contains(&id));
    }

    #[test]
    fn point_hits_are_strictly_inside(
        shapes in prop::collection::vec(shape(), 0..30),
        x in -8i32..264,
        y in -8i32..264,
    ) {
        let shapes = labelled(shapes);
        let index = build(&shapes);
        let point = IVec2::new(x, y);
        let expected: BTreeSet<EntityId> = shapes
            .iter()
            .filter(|(_, s)| s.contains_strict(point))
            .map(|(id, _)| *id)
            .collect();
        prop_assert_eq!(index.query_point(point), expected);
    }
}
