//! Domain events - discrete things that happened during a tick or action.
//!
//! The store only records them at the right logical moment; turning them
//! into toasts, sounds or log lines is the presentation layer's job.

use serde::{Deserialize, Serialize};

use crate::components::{AnimalId, AnimalKind};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    ItemGathered { item_id: String, quantity: u32 },
    ItemCrafted { item_id: String, quantity: u32 },
    ItemConsumed { item_id: String },
    AnimalKilled {
        id: AnimalId,
        kind: AnimalKind,
        drops: Vec<(String, u32)>,
    },
    AnimalSpawned { id: AnimalId, kind: AnimalKind },
    PlayerAttacked { by: AnimalId, damage: f32 },
    PlayerDied,
    /// Tried to shoot without arrows.
    NoArrows,
    /// Selected slot or requested item has nothing usable.
    NothingToUse,
    /// Target was too far away.
    OutOfReach,
    ToolBroke { item_id: String },
    CannotCraft { recipe_id: String },
    GameSaved,
    GameLoaded,
}

impl GameEvent {
    /// Short machine-readable tag, handy for localization lookups.
    pub fn key(&self) -> &'static str {
        match self {
            GameEvent::ItemGathered { .. } => "item_gathered",
            GameEvent::ItemCrafted { .. } => "item_crafted",
            GameEvent::ItemConsumed { .. } => "item_consumed",
            GameEvent::AnimalKilled { .. } => "animal_killed",
            GameEvent::AnimalSpawned { .. } => "animal_spawned",
            GameEvent::PlayerAttacked { .. } => "player_attacked",
            GameEvent::PlayerDied => "player_died",
            GameEvent::NoArrows => "no_arrows",
            GameEvent::NothingToUse => "nothing_to_use",
            GameEvent::OutOfReach => "out_of_reach",
            GameEvent::ToolBroke { .. } => "tool_broke",
            GameEvent::CannotCraft { .. } => "cannot_craft",
            GameEvent::GameSaved => "game_saved",
            GameEvent::GameLoaded => "game_loaded",
        }
    }
}

/// Pending events, oldest first.
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    pending: Vec<GameEvent>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: GameEvent) {
        self.pending.push(event);
    }

    pub fn pending(&self) -> &[GameEvent] {
        &self.pending
    }

    pub fn drain(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.pending)
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}
