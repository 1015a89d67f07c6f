//! Wildlife generation

use emberwild_logic::animals::create_animal;
use hecs::World;
use log::debug;
use rand::Rng;

use crate::components::{AnimalId, AnimalKind};

use super::scatter_point;

/// Spawn `count` animals of random kind. Ids are taken from `next_id`,
/// which is advanced past the last one used.
pub fn generate_wildlife(
    world: &mut World,
    count: usize,
    half_extent: f32,
    clearing: f32,
    now_ms: f64,
    next_id: &mut u32,
    rng: &mut impl Rng,
) -> Vec<AnimalId> {
    (0..count)
        .map(|_| {
            let kind = AnimalKind::random(rng);
            spawn_wild_animal(world, kind, half_extent, clearing, now_ms, next_id, rng)
        })
        .collect()
}

/// Spawn one animal of `kind` at a random point.
pub fn spawn_wild_animal(
    world: &mut World,
    kind: AnimalKind,
    half_extent: f32,
    clearing: f32,
    now_ms: f64,
    next_id: &mut u32,
    rng: &mut impl Rng,
) -> AnimalId {
    let id = AnimalId(*next_id);
    *next_id = next_id.saturating_add(1);
    let position = scatter_point(half_extent, clearing, rng);
    let animal = create_animal(id, kind, position, now_ms, rng);
    debug!("spawned {:?} {} at ({:.1}, {:.1})", kind, id, position.x, position.z);
    world.spawn((animal,));
    id
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::Animal;
    use emberwild_logic::geometry::Vec3;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_generate_wildlife() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut world = World::new();
        let mut next_id = 1;

        let ids = generate_wildlife(&mut world, 10, 40.0, 10.0, 0.0, &mut next_id, &mut rng);
        assert_eq!(ids.len(), 10);
        assert_eq!(next_id, 11);

        let mut seen: Vec<AnimalId> = Vec::new();
        for (_, animal) in world.query::<&Animal>().iter() {
            assert!(!seen.contains(&animal.id));
            seen.push(animal.id);
            assert!(animal.position.distance_xz(&Vec3::ZERO) >= 10.0);
            assert_eq!(animal.health, animal.kind.base_health());
        }
        assert_eq!(seen.len(), 10);
    }
}
