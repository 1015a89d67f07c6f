//! Resource node placement

use emberwild_logic::geometry::Vec3;
use hecs::World;
use rand::Rng;

use crate::components::{NodeId, NodeKind, ResourceNode};

use super::scatter_point;

/// Trees, rocks and bushes are scattered within this half-width.
pub const NODE_HALF_EXTENT: f32 = 50.0;
/// Radius around the origin kept free of scattered nodes.
pub const NODE_CLEARING: f32 = 5.0;
/// Fixed water sources.
pub const WATER_SOURCES: [(f32, f32); 2] = [(20.0, 20.0), (-30.0, -15.0)];

/// How many scattered nodes of each kind to place.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TerrainCounts {
    pub trees: usize,
    pub rocks: usize,
    pub bushes: usize,
}

/// Place scattered nodes and the fixed water sources. Returns the number of
/// nodes spawned.
pub fn generate_terrain(
    world: &mut World,
    counts: TerrainCounts,
    next_id: &mut u32,
    rng: &mut impl Rng,
) -> usize {
    let mut spawned = 0;
    let groups = [
        (NodeKind::Tree, counts.trees),
        (NodeKind::Rock, counts.rocks),
        (NodeKind::Bush, counts.bushes),
    ];
    for (kind, count) in groups {
        for _ in 0..count {
            let position = scatter_point(NODE_HALF_EXTENT, NODE_CLEARING, rng);
            spawn_node(world, kind, position, next_id, rng);
            spawned += 1;
        }
    }
    for (x, z) in WATER_SOURCES {
        spawn_node(world, NodeKind::Water, Vec3::ground(x, z), next_id, rng);
        spawned += 1;
    }
    spawned
}

pub fn spawn_node(
    world: &mut World,
    kind: NodeKind,
    position: Vec3,
    next_id: &mut u32,
    rng: &mut impl Rng,
) -> NodeId {
    let id = NodeId(*next_id);
    *next_id = next_id.saturating_add(1);
    world.spawn((ResourceNode {
        id,
        kind,
        position,
        resource: kind.roll_resource(rng),
    },));
    id
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_generate_terrain() {
        let mut rng = StdRng::seed_from_u64(8);
        let mut world = World::new();
        let mut next_id = 1;
        let counts = TerrainCounts {
            trees: 5,
            rocks: 4,
            bushes: 3,
        };

        assert_eq!(generate_terrain(&mut world, counts, &mut next_id, &mut rng), 14);

        let mut water = 0;
        for (_, node) in world.query::<&ResourceNode>().iter() {
            match node.kind {
                NodeKind::Water => {
                    water += 1;
                    assert_eq!(node.resource, "water_bottle");
                }
                _ => assert!(node.position.distance_xz(&Vec3::ZERO) >= NODE_CLEARING),
            }
        }
        assert_eq!(water, 2);
    }
}
