//! Resource regrowth - depleted nodes return after a delay

use hecs::World;
use rand::Rng;

use crate::components::ResourceNode;
use crate::generation::scatter_point;

use super::Schedule;

/// Respawn nodes whose regrow time has come, each at a fresh random spot
/// within `half_extent` outside the `clearing` around the origin.
pub fn regrowth_system(
    world: &mut World,
    pending: &mut Schedule<ResourceNode>,
    now_ms: f64,
    half_extent: f32,
    clearing: f32,
    rng: &mut impl Rng,
) -> usize {
    let due = pending.take_due(now_ms);
    let count = due.len();
    for mut node in due {
        node.position = scatter_point(half_extent, clearing, rng);
        world.spawn((node,));
    }
    count
}
