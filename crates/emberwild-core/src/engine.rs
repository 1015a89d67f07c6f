//! Game store - the single owner of all mutable simulation state
//!
//! The driver calls [`GameStore::tick`] once per frame with the elapsed
//! seconds. Everything else is either a read accessor or an action method;
//! every mutation goes through `&mut self`.

use emberwild_logic::animals::{create_animal, AnimalUpdate};
use emberwild_logic::clock::{TimeOfDay, Weather, WorldClock};
use emberwild_logic::constants::HOTBAR_SLOTS;
use emberwild_logic::geometry::{Vec3, WorldBounds};
use emberwild_logic::inventory::Inventory;
use emberwild_logic::items::ItemTemplate;
use emberwild_logic::stats::{PlayerStats, StatsUpdate};
use hecs::{Entity, World};
use log::{debug, info, warn};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::components::*;
use crate::config::{ConfigError, SimConfig};
use crate::events::{EventLog, GameEvent};
use crate::generation::{generate_terrain, generate_wildlife, spawn_wild_animal, TerrainCounts};
use crate::persistence::{self, MemoryStorage, SaveData, SaveError, SaveStorage, SAVE_KEY};
use crate::systems::*;

/// Central game state container
pub struct GameStore {
    world: World,
    pub(crate) rng: StdRng,
    config: SimConfig,
    bounds: WorldBounds,

    pub(crate) stats: PlayerStats,
    pub(crate) inventory: Inventory,
    hotbar: Hotbar,
    selected_slot: usize,
    pub(crate) player: PlayerTransform,
    clock: WorldClock,
    language: Language,
    paused: bool,
    crafting_open: bool,

    /// Unpaused simulated milliseconds since the store was created.
    sim_ms: f64,
    /// Seconds accumulated toward the next survival step.
    stats_timer: f32,
    death_reported: bool,

    next_animal_id: u32,
    next_node_id: u32,
    respawns: Schedule<()>,
    pub(crate) regrowth: Schedule<ResourceNode>,

    pub(crate) events: EventLog,
    storage: Box<dyn SaveStorage>,
}

impl Default for GameStore {
    /// Empty world, default config, in-memory saves.
    fn default() -> Self {
        Self::build(SimConfig::default(), Box::new(MemoryStorage::new()))
    }
}

impl GameStore {
    /// An empty store (no animals, no resource nodes) backed by `storage`.
    pub fn new(config: SimConfig, storage: Box<dyn SaveStorage>) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::build(config, storage))
    }

    /// A populated world with in-memory saves.
    pub fn new_world(config: SimConfig) -> Result<Self, ConfigError> {
        let mut store = Self::new(config, Box::new(MemoryStorage::new()))?;
        store.populate();
        Ok(store)
    }

    fn build(config: SimConfig, storage: Box<dyn SaveStorage>) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            world: World::new(),
            rng,
            bounds: WorldBounds::new(config.world_half_extent),
            stats: PlayerStats::default(),
            inventory: Inventory::new(),
            hotbar: Hotbar::default(),
            selected_slot: 0,
            player: PlayerTransform::default(),
            clock: WorldClock::at(config.start_day_time),
            language: Language::default(),
            paused: false,
            crafting_open: false,
            sim_ms: 0.0,
            stats_timer: 0.0,
            death_reported: false,
            next_animal_id: 1,
            next_node_id: 1,
            respawns: Schedule::new(),
            regrowth: Schedule::new(),
            events: EventLog::new(),
            storage,
            config,
        }
    }

    /// Spawn the configured wildlife and resource nodes.
    pub fn populate(&mut self) {
        let animals = generate_wildlife(
            &mut self.world,
            self.config.initial_animals,
            self.config.spawn_half_extent,
            self.config.spawn_clearing,
            self.sim_ms,
            &mut self.next_animal_id,
            &mut self.rng,
        );
        let counts = TerrainCounts {
            trees: self.config.trees,
            rocks: self.config.rocks,
            bushes: self.config.bushes,
        };
        let nodes = generate_terrain(&mut self.world, counts, &mut self.next_node_id, &mut self.rng);
        info!(
            "world created: {} animals, {} resource nodes, seed {:?}",
            animals.len(),
            nodes,
            self.config.seed
        );
    }

    /// Advance the simulation by `delta_seconds`.
    ///
    /// Does nothing while paused or for a non-positive delta.
    pub fn tick(&mut self, delta_seconds: f32) {
        if self.paused || !(delta_seconds > 0.0) {
            return;
        }
        self.sim_ms += delta_seconds as f64 * 1000.0;

        if self.clock.advance(delta_seconds, self.config.day_rate) {
            debug!("day {} begins", self.clock.days);
        }

        // Animal speeds are per nominal frame.
        let frame_delta = delta_seconds * self.config.frame_scale;
        animal_ai_system(
            &mut self.world,
            self.player.position,
            frame_delta,
            self.sim_ms,
            &self.bounds,
            &mut self.rng,
        );

        let strikes = predator_system(
            &mut self.world,
            self.player.position,
            self.sim_ms,
            self.config.wolf_damage,
            self.config.wolf_strike_interval_ms,
        );
        for strike in strikes {
            self.stats.damage(strike.damage);
            self.events.push(GameEvent::PlayerAttacked {
                by: strike.by,
                damage: strike.damage,
            });
        }

        for animal in carcass_system(&mut self.world, self.sim_ms, self.config.corpse_linger_ms) {
            debug!("{} carcass removed", animal.id);
            self.respawns
                .schedule(self.sim_ms + self.config.respawn_delay_ms, ());
        }
        for () in self.respawns.take_due(self.sim_ms) {
            let kind = AnimalKind::random(&mut self.rng);
            let id = spawn_wild_animal(
                &mut self.world,
                kind,
                self.config.spawn_half_extent,
                self.config.spawn_clearing,
                self.sim_ms,
                &mut self.next_animal_id,
                &mut self.rng,
            );
            self.events.push(GameEvent::AnimalSpawned { id, kind });
        }

        regrowth_system(
            &mut self.world,
            &mut self.regrowth,
            self.sim_ms,
            crate::generation::NODE_HALF_EXTENT,
            crate::generation::NODE_CLEARING,
            &mut self.rng,
        );

        survival_system(
            &mut self.stats,
            &mut self.stats_timer,
            delta_seconds,
            self.config.stats_interval_secs,
            self.clock.weather,
            &self.config.survival,
        );

        self.check_player_death();
    }

    /// Emit `PlayerDied` once per death. Healing back above zero re-arms it.
    pub(crate) fn check_player_death(&mut self) {
        if self.stats.is_dead() {
            if !self.death_reported {
                self.death_reported = true;
                info!("player died at {:.0}ms", self.sim_ms);
                self.events.push(GameEvent::PlayerDied);
            }
        } else {
            self.death_reported = false;
        }
    }

    // ── Player stats ──

    /// Merge provided fields; every stat is clamped to `[0, 100]`.
    pub fn update_player_stats(&mut self, update: StatsUpdate) {
        self.stats.apply(update);
        self.check_player_death();
    }

    pub fn damage_player(&mut self, amount: f32) {
        self.stats.damage(amount);
        self.check_player_death();
    }

    pub fn heal_player(&mut self, amount: f32) {
        self.stats.heal(amount);
        self.check_player_death();
    }

    // ── Inventory ──

    pub fn add_item(&mut self, template: &ItemTemplate, quantity: u32) {
        self.inventory.add(template, quantity);
    }

    /// Remove up to `quantity`, deleting the stack when it runs out.
    /// Returns the number actually removed.
    pub fn remove_item(&mut self, item_id: &str, quantity: u32) -> u32 {
        self.inventory.remove(item_id, quantity)
    }

    pub fn get_item_count(&self, item_id: &str) -> u32 {
        self.inventory.count(item_id)
    }

    // ── Hotbar and flags ──

    /// Out-of-range slots are ignored.
    pub fn select_slot(&mut self, slot: usize) {
        if slot < HOTBAR_SLOTS {
            self.selected_slot = slot;
        }
    }

    pub fn set_hotbar_slot(&mut self, slot: usize, item_id: Option<String>) -> bool {
        self.hotbar.set(slot, item_id)
    }

    /// Item id in the selected hotbar slot.
    pub fn selected_item(&self) -> Option<&str> {
        self.hotbar.get(self.selected_slot)
    }

    pub fn set_time_of_day(&mut self, fraction: f32) {
        self.clock.set_day_time(fraction);
    }

    pub fn set_weather(&mut self, weather: Weather) {
        self.clock.weather = weather;
    }

    /// Flip the crafting panel flag and return the new value.
    pub fn toggle_crafting(&mut self) -> bool {
        self.crafting_open = !self.crafting_open;
        self.crafting_open
    }

    pub fn set_paused(&mut self, paused: bool) {
        self.paused = paused;
    }

    pub fn set_language(&mut self, language: Language) {
        self.language = language;
    }

    /// Position and facing from the input layer. Non-finite values are ignored.
    pub fn set_player_transform(&mut self, position: Vec3, yaw: f32) {
        if [position.x, position.y, position.z, yaw]
            .iter()
            .all(|v| v.is_finite())
        {
            self.player = PlayerTransform { position, yaw };
        }
    }

    // ── Animals ──

    fn animal_entity(&self, id: AnimalId) -> Option<Entity> {
        self.world
            .query::<&Animal>()
            .iter()
            .find(|(_, animal)| animal.id == id)
            .map(|(entity, _)| entity)
    }

    pub(crate) fn with_animal_mut<R>(
        &mut self,
        id: AnimalId,
        f: impl FnOnce(&mut Animal) -> R,
    ) -> Option<R> {
        let entity = self.animal_entity(id)?;
        let mut animal = self.world.get::<&mut Animal>(entity).ok()?;
        Some(f(&mut animal))
    }

    /// Replace the whole population.
    pub fn set_animals(&mut self, animals: Vec<Animal>) {
        let existing: Vec<Entity> = self
            .world
            .query::<&Animal>()
            .iter()
            .map(|(entity, _)| entity)
            .collect();
        for entity in existing {
            let _ = self.world.despawn(entity);
        }
        for animal in animals {
            self.add_animal(animal);
        }
    }

    /// Insert an animal, replacing any with the same id.
    pub fn add_animal(&mut self, animal: Animal) {
        self.next_animal_id = self.next_animal_id.max(animal.id.0.saturating_add(1));
        if let Some(entity) = self.animal_entity(animal.id) {
            let _ = self.world.despawn(entity);
        }
        self.world.spawn((animal,));
    }

    pub fn remove_animal(&mut self, id: AnimalId) -> Option<Animal> {
        let entity = self.animal_entity(id)?;
        self.world.remove_one::<Animal>(entity).ok().map(|animal| {
            let _ = self.world.despawn(entity);
            animal
        })
    }

    /// Merge a partial update; unknown ids are ignored.
    pub fn update_animal(&mut self, id: AnimalId, update: &AnimalUpdate) -> bool {
        self.with_animal_mut(id, |animal| animal.apply(update)).is_some()
    }

    /// Spawn a fresh animal of `kind` at `position`.
    pub fn spawn_animal(&mut self, kind: AnimalKind, position: Vec3) -> AnimalId {
        let id = AnimalId(self.next_animal_id);
        self.next_animal_id = self.next_animal_id.saturating_add(1);
        let animal = create_animal(id, kind, self.bounds.clamp(position), self.sim_ms, &mut self.rng);
        debug!("spawned {:?} {} on request", kind, id);
        self.world.spawn((animal,));
        self.events.push(GameEvent::AnimalSpawned { id, kind });
        id
    }

    /// All animals, ordered by id.
    pub fn animals(&self) -> Vec<Animal> {
        let mut animals: Vec<Animal> = self
            .world
            .query::<&Animal>()
            .iter()
            .map(|(_, animal)| animal.clone())
            .collect();
        animals.sort_by_key(|a| a.id);
        animals
    }

    pub fn animal(&self, id: AnimalId) -> Option<Animal> {
        self.world
            .query::<&Animal>()
            .iter()
            .find(|(_, animal)| animal.id == id)
            .map(|(_, animal)| animal.clone())
    }

    pub fn animal_count(&self) -> usize {
        self.world.query::<&Animal>().iter().count()
    }

    /// Removed carcasses still waiting for a replacement.
    pub fn pending_respawns(&self) -> usize {
        self.respawns.len()
    }

    // ── Resource nodes ──

    pub(crate) fn node_entry(&self, id: NodeId) -> Option<(Entity, ResourceNode)> {
        self.world
            .query::<&ResourceNode>()
            .iter()
            .find(|(_, node)| node.id == id)
            .map(|(entity, node)| (entity, node.clone()))
    }

    pub(crate) fn despawn(&mut self, entity: Entity) {
        let _ = self.world.despawn(entity);
    }

    /// Place a node by hand.
    pub fn spawn_node(&mut self, kind: NodeKind, position: Vec3) -> NodeId {
        crate::generation::spawn_node(
            &mut self.world,
            kind,
            position,
            &mut self.next_node_id,
            &mut self.rng,
        )
    }

    /// Nodes currently standing, ordered by id.
    pub fn nodes(&self) -> Vec<ResourceNode> {
        let mut nodes: Vec<ResourceNode> = self
            .world
            .query::<&ResourceNode>()
            .iter()
            .map(|(_, node)| node.clone())
            .collect();
        nodes.sort_by_key(|n| n.id);
        nodes
    }

    pub fn node(&self, id: NodeId) -> Option<ResourceNode> {
        self.node_entry(id).map(|(_, node)| node)
    }

    /// Nodes gathered and waiting to regrow.
    pub fn regrowing_nodes(&self) -> usize {
        self.regrowth.len()
    }

    // ── Persistence ──

    /// Snapshot of everything a save records.
    pub fn snapshot(&self) -> SaveData {
        SaveData {
            player: self.stats,
            inventory: self.inventory.items().to_vec(),
            hotbar: self.hotbar.slots().to_vec(),
            selected_slot: self.selected_slot,
            day_time: self.clock.day_time(),
            weather: self.clock.weather,
            language: self.language,
            player_position: self.player.position,
            player_yaw: self.player.yaw,
            stats_timer: self.stats_timer,
        }
    }

    /// Write the snapshot under the save key, replacing any earlier save.
    pub fn save_game(&mut self) -> Result<(), SaveError> {
        let bytes = persistence::encode(&self.snapshot())?;
        self.storage.write(SAVE_KEY, &bytes)?;
        info!("game saved ({} bytes)", bytes.len());
        self.events.push(GameEvent::GameSaved);
        Ok(())
    }

    /// Restore the saved snapshot. On any failure the cause is logged, the
    /// store is left untouched and `false` is returned.
    pub fn load_game(&mut self) -> bool {
        match self.read_save() {
            Ok((data, inventory, hotbar)) => {
                self.stats = data.player;
                self.inventory = inventory;
                self.hotbar = hotbar;
                self.selected_slot = data.selected_slot;
                self.clock.set_day_time(data.day_time);
                self.clock.weather = data.weather;
                self.language = data.language;
                self.player = PlayerTransform {
                    position: data.player_position,
                    yaw: data.player_yaw,
                };
                self.stats_timer = data.stats_timer;
                self.death_reported = self.stats.is_dead();
                info!("game loaded");
                self.events.push(GameEvent::GameLoaded);
                true
            }
            Err(e) => {
                warn!("failed to load game: {e}");
                false
            }
        }
    }

    /// Decode and convert a save without touching the store.
    fn read_save(&self) -> Result<(SaveData, Inventory, Hotbar), SaveError> {
        let bytes = self
            .storage
            .read(SAVE_KEY)?
            .ok_or_else(|| SaveError::NotFound(SAVE_KEY.to_string()))?;
        let data = persistence::decode(&bytes)?;
        let inventory = data.inventory()?;
        let hotbar = Hotbar::from_slots(data.hotbar.clone())
            .ok_or_else(|| SaveError::Invalid("bad hotbar".to_string()))?;
        Ok((data, inventory, hotbar))
    }

    pub fn has_saved_game(&self) -> bool {
        self.storage.exists(SAVE_KEY)
    }

    pub fn delete_save(&mut self) -> Result<(), SaveError> {
        self.storage.remove(SAVE_KEY)?;
        info!("save deleted");
        Ok(())
    }

    // ── Events ──

    /// Hand queued events to the presentation layer.
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        self.events.drain()
    }

    pub fn pending_events(&self) -> &[GameEvent] {
        self.events.pending()
    }

    // ── Read access ──

    pub fn stats(&self) -> &PlayerStats {
        &self.stats
    }

    pub fn inventory(&self) -> &Inventory {
        &self.inventory
    }

    pub fn hotbar(&self) -> &Hotbar {
        &self.hotbar
    }

    pub fn selected_slot(&self) -> usize {
        self.selected_slot
    }

    pub fn clock(&self) -> &WorldClock {
        &self.clock
    }

    pub fn day_time(&self) -> f32 {
        self.clock.day_time()
    }

    pub fn time_of_day(&self) -> TimeOfDay {
        self.clock.time_of_day()
    }

    pub fn weather(&self) -> Weather {
        self.clock.weather
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn is_crafting_open(&self) -> bool {
        self.crafting_open
    }

    pub fn player(&self) -> &PlayerTransform {
        &self.player
    }

    pub fn sim_ms(&self) -> f64 {
        self.sim_ms
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn bounds(&self) -> &WorldBounds {
        &self.bounds
    }
}
