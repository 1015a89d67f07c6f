//! Carcass cleanup - dead animals linger, then leave the world

use hecs::World;

use crate::components::{Animal, Behavior};

/// Despawn animals dead for at least `linger_ms`. Returns the removed
/// records, ordered by id, so the caller can schedule replacements.
pub fn carcass_system(world: &mut World, now_ms: f64, linger_ms: f64) -> Vec<Animal> {
    let expired: Vec<(hecs::Entity, Animal)> = world
        .query::<&Animal>()
        .iter()
        .filter(|(_, animal)| match animal.behavior {
            Behavior::Dead { since_ms } => now_ms - since_ms >= linger_ms,
            _ => false,
        })
        .map(|(entity, animal)| (entity, animal.clone()))
        .collect();

    let mut removed = Vec::with_capacity(expired.len());
    for (entity, animal) in expired {
        if world.despawn(entity).is_ok() {
            removed.push(animal);
        }
    }
    removed.sort_by_key(|a| a.id);
    removed
}
