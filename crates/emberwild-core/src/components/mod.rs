//! Component and state definitions for the game store.
//!
//! Animals and resource nodes live as entities in the store's ECS world;
//! player-side state (hotbar, transform, language) is plain data owned by
//! the store directly.

mod nodes;
mod player;

pub use emberwild_logic::animals::{Animal, AnimalId, AnimalKind, AnimalUpdate, Behavior};
pub use nodes::*;
pub use player::*;
