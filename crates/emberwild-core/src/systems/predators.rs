//! Predator strikes - wolves in reach bite the player on a cooldown

use emberwild_logic::constants::ai::ATTACK_RANGE;
use emberwild_logic::geometry::Vec3;
use hecs::World;

use crate::components::{Animal, AnimalId, Behavior};

/// A single bite landed this tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Strike {
    pub by: AnimalId,
    pub damage: f32,
}

/// Collect strikes from attacking animals within [`ATTACK_RANGE`] whose
/// cooldown has elapsed, and restart their cooldown. Damage is left for
/// the caller to apply.
pub fn predator_system(
    world: &mut World,
    player: Vec3,
    now_ms: f64,
    damage: f32,
    interval_ms: f64,
) -> Vec<Strike> {
    let mut strikes = Vec::new();
    for (_, animal) in world.query_mut::<&mut Animal>() {
        if !animal.kind.is_predator() || !animal.strike_ready(now_ms, interval_ms) {
            continue;
        }
        if animal.position.distance_xz(&player) >= ATTACK_RANGE {
            continue;
        }
        animal.behavior = Behavior::Attacking {
            last_strike_ms: Some(now_ms),
        };
        strikes.push(Strike {
            by: animal.id,
            damage,
        });
    }
    strikes.sort_by_key(|s| s.by);
    strikes
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::AnimalKind;
    use emberwild_logic::animals::create_animal;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn attacking_wolf(at: Vec3) -> Animal {
        let mut rng = StdRng::seed_from_u64(0);
        let mut wolf = create_animal(AnimalId(7), AnimalKind::Wolf, at, 0.0, &mut rng);
        wolf.behavior = Behavior::Attacking {
            last_strike_ms: None,
        };
        wolf
    }

    #[test]
    fn test_strike_respects_cooldown() {
        let mut world = World::new();
        world.spawn((attacking_wolf(Vec3::ground(1.0, 1.0)),));

        let first = predator_system(&mut world, Vec3::ZERO, 0.0, 5.0, 1000.0);
        assert_eq!(first, vec![Strike { by: AnimalId(7), damage: 5.0 }]);

        assert!(predator_system(&mut world, Vec3::ZERO, 500.0, 5.0, 1000.0).is_empty());
        assert_eq!(predator_system(&mut world, Vec3::ZERO, 1000.0, 5.0, 1000.0).len(), 1);
    }

    #[test]
    fn test_no_strike_out_of_range_or_when_not_attacking() {
        let mut world = World::new();
        world.spawn((attacking_wolf(Vec3::ground(6.0, 0.0)),));
        let mut idle = attacking_wolf(Vec3::ground(0.5, 0.0));
        idle.id = AnimalId(8);
        idle.behavior = Behavior::Idle;
        world.spawn((idle,));

        assert!(predator_system(&mut world, Vec3::ZERO, 0.0, 5.0, 1000.0).is_empty());
    }
}
