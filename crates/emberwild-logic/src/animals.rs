//! Animal records and the per-animal behavior state machine.
//!
//! Behavior is a tagged union: wandering carries its target, attacking its
//! last strike time, dead the time of death. Nothing ever leaves `Dead`.
//!
//! The AI functions are pure. They read an [`Animal`] and return an
//! [`AnimalUpdate`] holding only the fields that change; the caller merges it
//! with [`Animal::apply`].

use std::f32::consts::TAU;
use std::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::constants::ai::{
    ARRIVAL_DISTANCE, ATTACK_RANGE, BEHAVIOR_CHANGE_INTERVAL_MS, DETECTION_RANGE,
    FLEE_SPEED_MULTIPLIER, WANDER_MAX_DISTANCE, WANDER_MIN_DISTANCE,
};
use crate::geometry::{Vec3, WorldBounds};

/// Unique per spawned animal; never reused within a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AnimalId(pub u32);

impl fmt::Display for AnimalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "animal#{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AnimalKind {
    Deer,
    Rabbit,
    Wolf,
}

/// An item and count granted on a kill.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Drop {
    pub item_id: &'static str,
    pub quantity: u32,
}

const DEER_DROPS: &[Drop] = &[
    Drop {
        item_id: "meat",
        quantity: 2,
    },
    Drop {
        item_id: "leather",
        quantity: 1,
    },
];
const RABBIT_DROPS: &[Drop] = &[Drop {
    item_id: "meat",
    quantity: 1,
}];
const WOLF_DROPS: &[Drop] = &[
    Drop {
        item_id: "meat",
        quantity: 1,
    },
    Drop {
        item_id: "leather",
        quantity: 2,
    },
];

impl AnimalKind {
    pub const ALL: [AnimalKind; 3] = [AnimalKind::Deer, AnimalKind::Rabbit, AnimalKind::Wolf];

    pub fn base_health(&self) -> f32 {
        match self {
            AnimalKind::Deer => 50.0,
            AnimalKind::Rabbit => 20.0,
            AnimalKind::Wolf => 80.0,
        }
    }

    /// Units per frame.
    pub fn speed(&self) -> f32 {
        match self {
            AnimalKind::Deer => 0.08,
            AnimalKind::Rabbit => 0.12,
            AnimalKind::Wolf => 0.06,
        }
    }

    pub fn drops(&self) -> &'static [Drop] {
        match self {
            AnimalKind::Deer => DEER_DROPS,
            AnimalKind::Rabbit => RABBIT_DROPS,
            AnimalKind::Wolf => WOLF_DROPS,
        }
    }

    /// Predators chase the player; everything else runs.
    pub fn is_predator(&self) -> bool {
        matches!(self, AnimalKind::Wolf)
    }

    pub fn random(rng: &mut impl Rng) -> Self {
        Self::ALL[rng.gen_range(0..Self::ALL.len())]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Behavior {
    Idle,
    Wandering { target: Vec3 },
    Fleeing,
    /// `last_strike_ms` is `None` until the first strike lands.
    Attacking { last_strike_ms: Option<f64> },
    Dead { since_ms: f64 },
}

impl Behavior {
    pub fn is_dead(&self) -> bool {
        matches!(self, Behavior::Dead { .. })
    }

    pub fn name(&self) -> &'static str {
        match self {
            Behavior::Idle => "idle",
            Behavior::Wandering { .. } => "wandering",
            Behavior::Fleeing => "fleeing",
            Behavior::Attacking { .. } => "attacking",
            Behavior::Dead { .. } => "dead",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Animal {
    pub id: AnimalId,
    pub kind: AnimalKind,
    pub position: Vec3,
    /// Facing in radians; 0 looks along +Z.
    pub rotation: f32,
    pub health: f32,
    pub max_health: f32,
    pub speed: f32,
    pub behavior: Behavior,
    /// Simulation time of the last idle/wander re-roll or hit.
    pub last_behavior_change_ms: f64,
}

/// Fields of an [`Animal`] that changed this step.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AnimalUpdate {
    pub position: Option<Vec3>,
    pub rotation: Option<f32>,
    pub health: Option<f32>,
    pub behavior: Option<Behavior>,
    pub last_behavior_change_ms: Option<f64>,
}

impl AnimalUpdate {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

impl Animal {
    pub fn is_dead(&self) -> bool {
        self.behavior.is_dead()
    }

    pub fn drops(&self) -> &'static [Drop] {
        self.kind.drops()
    }

    /// Merge an update. A dead animal ignores every update, and health
    /// never rises above `max_health`.
    pub fn apply(&mut self, update: &AnimalUpdate) {
        if self.is_dead() {
            return;
        }
        if let Some(position) = update.position {
            self.position = position;
        }
        if let Some(rotation) = update.rotation {
            self.rotation = rotation;
        }
        if let Some(health) = update.health {
            self.health = health.clamp(0.0, self.max_health);
        }
        if let Some(behavior) = update.behavior {
            self.behavior = behavior;
        }
        if let Some(at) = update.last_behavior_change_ms {
            self.last_behavior_change_ms = at;
        }
    }

    /// Whether an attacking animal may strike again at `now_ms`.
    pub fn strike_ready(&self, now_ms: f64, interval_ms: f64) -> bool {
        match self.behavior {
            Behavior::Attacking { last_strike_ms } => {
                last_strike_ms.map_or(true, |last| now_ms - last >= interval_ms)
            }
            _ => false,
        }
    }
}

/// Spawn-time record with the kind's base stats, random facing, idle.
pub fn create_animal(
    id: AnimalId,
    kind: AnimalKind,
    position: Vec3,
    now_ms: f64,
    rng: &mut impl Rng,
) -> Animal {
    let health = kind.base_health();
    Animal {
        id,
        kind,
        position: Vec3::ground(position.x, position.z),
        rotation: rng.gen_range(0.0..TAU),
        health,
        max_health: health,
        speed: kind.speed(),
        behavior: Behavior::Idle,
        last_behavior_change_ms: now_ms,
    }
}

/// One AI decision.
///
/// `delta` is in frame-scaled units (one unit per nominal frame); movement
/// per call is `speed * delta` along a unit heading.
pub fn update_animal_ai(
    animal: &Animal,
    player: Vec3,
    delta: f32,
    now_ms: f64,
    bounds: &WorldBounds,
    rng: &mut impl Rng,
) -> AnimalUpdate {
    if animal.is_dead() {
        return AnimalUpdate::default();
    }

    let distance = animal.position.distance_xz(&player);
    let reroll_due = now_ms - animal.last_behavior_change_ms > BEHAVIOR_CHANGE_INTERVAL_MS;
    let mut update = AnimalUpdate::default();

    if animal.kind.is_predator() {
        if distance < DETECTION_RANGE {
            let heading = animal.position.heading_to(&player);
            update.rotation = Some(heading);
            update.behavior = Some(Behavior::Attacking {
                last_strike_ms: match animal.behavior {
                    Behavior::Attacking { last_strike_ms } => last_strike_ms,
                    _ => None,
                },
            });
            // Inside striking range the wolf holds its ground.
            if distance >= ATTACK_RANGE {
                update.position = Some(animal.position.step(heading, animal.speed * delta));
            }
        } else if reroll_due {
            update = idle_or_wander(animal, now_ms, bounds, rng);
        }
    } else if distance < DETECTION_RANGE {
        let heading = player.heading_to(&animal.position);
        update.rotation = Some(heading);
        update.behavior = Some(Behavior::Fleeing);
        let flee_speed = animal.speed * FLEE_SPEED_MULTIPLIER;
        update.position = Some(animal.position.step(heading, flee_speed * delta));
    } else if reroll_due {
        update = idle_or_wander(animal, now_ms, bounds, rng);
    }

    if update.behavior.is_none() {
        if let Behavior::Wandering { target } = animal.behavior {
            if animal.position.distance_xz(&target) < ARRIVAL_DISTANCE {
                update.behavior = Some(Behavior::Idle);
            } else {
                let heading = animal.position.heading_to(&target);
                update.rotation = Some(heading);
                update.position = Some(animal.position.step(heading, animal.speed * delta));
            }
        }
    }

    if let Some(position) = update.position {
        update.position = Some(bounds.clamp(position));
    }

    update
}

/// Coin flip between idling and wandering to a random nearby point.
fn idle_or_wander(
    animal: &Animal,
    now_ms: f64,
    bounds: &WorldBounds,
    rng: &mut impl Rng,
) -> AnimalUpdate {
    let behavior = if rng.gen_bool(0.5) {
        let distance = rng.gen_range(WANDER_MIN_DISTANCE..WANDER_MAX_DISTANCE);
        let angle = rng.gen_range(0.0..TAU);
        Behavior::Wandering {
            target: bounds.clamp(animal.position.step(angle, distance)),
        }
    } else {
        Behavior::Idle
    };
    AnimalUpdate {
        behavior: Some(behavior),
        last_behavior_change_ms: Some(now_ms),
        ..AnimalUpdate::default()
    }
}

/// Apply a hit. Dead animals are unaffected. A fatal hit returns only the
/// zeroed health and `Dead`; a survivable one makes the animal flee and
/// restarts its re-roll timer.
pub fn damage_animal(animal: &Animal, damage: f32, now_ms: f64) -> AnimalUpdate {
    if animal.is_dead() {
        return AnimalUpdate::default();
    }
    let health = (animal.health - damage.max(0.0)).max(0.0);
    if health <= 0.0 {
        return AnimalUpdate {
            health: Some(0.0),
            behavior: Some(Behavior::Dead { since_ms: now_ms }),
            ..AnimalUpdate::default()
        };
    }
    AnimalUpdate {
        health: Some(health),
        behavior: Some(Behavior::Fleeing),
        last_behavior_change_ms: Some(now_ms),
        ..AnimalUpdate::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(7)
    }

    fn spawn(kind: AnimalKind, x: f32, z: f32) -> Animal {
        create_animal(AnimalId(1), kind, Vec3::ground(x, z), 0.0, &mut rng())
    }

    fn step(animal: &mut Animal, player: Vec3, now_ms: f64, rng: &mut StdRng) {
        let update = update_animal_ai(animal, player, 1.0, now_ms, &WorldBounds::default(), rng);
        animal.apply(&update);
    }

    #[test]
    fn test_create_uses_base_stats() {
        let deer = spawn(AnimalKind::Deer, 3.0, 4.0);
        assert_eq!(deer.health, 50.0);
        assert_eq!(deer.max_health, 50.0);
        assert_eq!(deer.speed, 0.08);
        assert_eq!(deer.behavior, Behavior::Idle);
        assert_eq!(deer.position, Vec3::ground(3.0, 4.0));
        assert!((0.0..TAU).contains(&deer.rotation));

        let wolf = spawn(AnimalKind::Wolf, 0.0, 0.0);
        assert_eq!(wolf.health, 80.0);
        assert_eq!(wolf.drops()[1], Drop { item_id: "leather", quantity: 2 });
        assert_eq!(spawn(AnimalKind::Rabbit, 0.0, 0.0).speed, 0.12);
    }

    #[test]
    fn test_prey_flees_player() {
        let mut r = rng();
        let player = Vec3::ground(0.0, 0.0);
        for kind in [AnimalKind::Deer, AnimalKind::Rabbit] {
            let mut animal = spawn(kind, 1.0, 1.0);
            let mut last = animal.position.distance_xz(&player);
            for frame in 0..30 {
                step(&mut animal, player, frame as f64 * 16.0, &mut r);
                assert_eq!(animal.behavior, Behavior::Fleeing);
                let d = animal.position.distance_xz(&player);
                assert!(d > last, "{kind:?} closed in: {d} <= {last}");
                last = d;
            }
        }
    }

    #[test]
    fn test_flee_speed_is_one_and_a_half_base() {
        let deer = spawn(AnimalKind::Deer, 5.0, 0.0);
        let update = update_animal_ai(
            &deer,
            Vec3::ZERO,
            1.0,
            0.0,
            &WorldBounds::default(),
            &mut rng(),
        );
        let moved = deer.position.distance_xz(&update.position.unwrap());
        assert!((moved - 0.12).abs() < 1e-5);
    }

    #[test]
    fn test_wolf_pursues_inside_detection() {
        let mut r = rng();
        let player = Vec3::ground(0.0, 0.0);
        let mut wolf = spawn(AnimalKind::Wolf, 10.0, 0.0);
        let start = wolf.position.distance_xz(&player);
        step(&mut wolf, player, 0.0, &mut r);
        assert!(matches!(wolf.behavior, Behavior::Attacking { last_strike_ms: None }));
        assert!(wolf.position.distance_xz(&player) < start);
        // Facing points at the player.
        let facing = wolf.position.step(wolf.rotation, 1.0);
        assert!(facing.distance_xz(&player) < wolf.position.distance_xz(&player));
    }

    #[test]
    fn test_wolf_holds_inside_attack_range() {
        let wolf = spawn(AnimalKind::Wolf, 2.0, 0.0);
        let update = update_animal_ai(
            &wolf,
            Vec3::ZERO,
            1.0,
            0.0,
            &WorldBounds::default(),
            &mut rng(),
        );
        assert!(update.position.is_none());
        assert!(matches!(update.behavior, Some(Behavior::Attacking { .. })));
    }

    #[test]
    fn test_attacking_keeps_strike_time() {
        let mut wolf = spawn(AnimalKind::Wolf, 2.0, 0.0);
        wolf.behavior = Behavior::Attacking {
            last_strike_ms: Some(500.0),
        };
        let update = update_animal_ai(
            &wolf,
            Vec3::ZERO,
            1.0,
            600.0,
            &WorldBounds::default(),
            &mut rng(),
        );
        assert_eq!(
            update.behavior,
            Some(Behavior::Attacking {
                last_strike_ms: Some(500.0)
            })
        );
        wolf.apply(&update);
        assert!(!wolf.strike_ready(1000.0, 1000.0));
        assert!(wolf.strike_ready(1500.0, 1000.0));
    }

    #[test]
    fn test_reroll_waits_for_interval() {
        let far = Vec3::ground(40.0, 40.0);
        let animal = spawn(AnimalKind::Deer, 0.0, 0.0);
        let bounds = WorldBounds::default();
        let mut r = rng();

        let early = update_animal_ai(&animal, far, 1.0, 3000.0, &bounds, &mut r);
        assert!(early.is_empty());

        let due = update_animal_ai(&animal, far, 1.0, 3001.0, &bounds, &mut r);
        assert_eq!(due.last_behavior_change_ms, Some(3001.0));
        assert!(matches!(
            due.behavior,
            Some(Behavior::Idle) | Some(Behavior::Wandering { .. })
        ));
    }

    #[test]
    fn test_wander_target_distance() {
        let bounds = WorldBounds::default();
        let mut r = rng();
        let animal = spawn(AnimalKind::Rabbit, 0.0, 0.0);
        let mut wandered = 0;
        for _ in 0..200 {
            if let Some(Behavior::Wandering { target }) =
                idle_or_wander(&animal, 0.0, &bounds, &mut r).behavior
            {
                let d = animal.position.distance_xz(&target);
                assert!((WANDER_MIN_DISTANCE - 1e-3..WANDER_MAX_DISTANCE).contains(&d));
                wandered += 1;
            }
        }
        // A fair coin over 200 flips.
        assert!(wandered > 50 && wandered < 150);
    }

    #[test]
    fn test_wandering_moves_then_arrives() {
        let mut r = rng();
        let far = Vec3::ground(-40.0, -40.0);
        let mut deer = spawn(AnimalKind::Deer, 0.0, 0.0);
        deer.behavior = Behavior::Wandering {
            target: Vec3::ground(0.0, 2.0),
        };

        step(&mut deer, far, 10.0, &mut r);
        assert!((deer.position.z - 0.08).abs() < 1e-5);
        assert!(matches!(deer.behavior, Behavior::Wandering { .. }));

        deer.position = Vec3::ground(0.0, 1.5);
        step(&mut deer, far, 20.0, &mut r);
        assert_eq!(deer.behavior, Behavior::Idle);
    }

    #[test]
    fn test_positions_clamped_to_bounds() {
        let mut r = rng();
        let mut rabbit = spawn(AnimalKind::Rabbit, 44.95, 0.0);
        for frame in 0..20 {
            step(&mut rabbit, Vec3::ground(40.0, 0.0), frame as f64, &mut r);
        }
        assert!(rabbit.position.x <= 45.0);
        assert_eq!(rabbit.position.x, 45.0);
    }

    #[test]
    fn test_damage_flees_then_kills() {
        let deer = spawn(AnimalKind::Deer, 0.0, 0.0);
        let hit = damage_animal(&deer, 20.0, 1234.0);
        assert_eq!(hit.health, Some(30.0));
        assert_eq!(hit.behavior, Some(Behavior::Fleeing));
        assert_eq!(hit.last_behavior_change_ms, Some(1234.0));

        let mut deer = deer;
        deer.apply(&hit);
        let kill = damage_animal(&deer, 100.0, 2000.0);
        assert_eq!(
            kill,
            AnimalUpdate {
                health: Some(0.0),
                behavior: Some(Behavior::Dead { since_ms: 2000.0 }),
                ..AnimalUpdate::default()
            }
        );
    }

    #[test]
    fn test_dead_is_terminal() {
        let mut r = rng();
        let mut wolf = spawn(AnimalKind::Wolf, 1.0, 0.0);
        wolf.apply(&damage_animal(&wolf, 500.0, 0.0));
        assert!(wolf.is_dead());

        assert!(damage_animal(&wolf, 10.0, 5.0).is_empty());
        for frame in 0..10 {
            step(&mut wolf, Vec3::ZERO, 10_000.0 * frame as f64, &mut r);
            assert!(wolf.is_dead());
        }
        wolf.apply(&AnimalUpdate {
            behavior: Some(Behavior::Idle),
            health: Some(50.0),
            ..AnimalUpdate::default()
        });
        assert!(wolf.is_dead());
        assert_eq!(wolf.health, 0.0);
    }

    #[test]
    fn test_negative_damage_does_not_heal() {
        let deer = spawn(AnimalKind::Deer, 0.0, 0.0);
        let update = damage_animal(&deer, -30.0, 0.0);
        assert_eq!(update.health, Some(50.0));
    }
}
