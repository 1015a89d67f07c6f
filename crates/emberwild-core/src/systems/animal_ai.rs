//! Animal AI system - one decision per living animal per tick

use emberwild_logic::animals::update_animal_ai;
use emberwild_logic::geometry::{Vec3, WorldBounds};
use hecs::World;
use rand::Rng;

use crate::components::Animal;

/// Run the AI for every animal and merge its update.
///
/// `frame_delta` is already frame-scaled. Dead animals come back with an
/// empty update and are left alone.
pub fn animal_ai_system(
    world: &mut World,
    player: Vec3,
    frame_delta: f32,
    now_ms: f64,
    bounds: &WorldBounds,
    rng: &mut impl Rng,
) {
    for (_, animal) in world.query_mut::<&mut Animal>() {
        let update = update_animal_ai(animal, player, frame_delta, now_ms, bounds, rng);
        if !update.is_empty() {
            animal.apply(&update);
        }
    }
}
