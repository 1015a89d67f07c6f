//! Emberwild Core - survival game simulation store
//!
//! Owns the whole mutable game state: player stats, inventory, hotbar, the
//! world clock and the wildlife and resource nodes living in a `hecs` world.
//! A render/input layer drives it once per frame and reads state back.
//!
//! # Architecture
//!
//! - **Components**: data attached to entities (animals, resource nodes) and
//!   player-side state
//! - **Systems**: per-tick logic over the world (AI, predator strikes,
//!   carcass cleanup, regrowth, survival decay)
//! - **Engine**: [`GameStore`](engine::GameStore), the single owner that
//!   runs the systems and exposes the action API
//!
//! # Example
//!
//! ```rust,no_run
//! use emberwild_core::prelude::*;
//!
//! let mut store = GameStore::new_world(SimConfig::default()).unwrap();
//!
//! loop {
//!     store.tick(1.0 / 60.0);
//!     for event in store.drain_events() {
//!         println!("{}", event.key());
//!     }
//! }
//! ```

pub mod actions;
pub mod components;
pub mod config;
pub mod engine;
pub mod events;
pub mod generation;
pub mod persistence;
pub mod systems;

/// Commonly used types for convenient importing
pub mod prelude {
    pub use crate::components::*;
    pub use crate::config::SimConfig;
    pub use crate::engine::GameStore;
    pub use crate::events::GameEvent;
    pub use crate::persistence::{FileStorage, MemoryStorage, SaveStorage};
    pub use emberwild_logic::clock::{TimeOfDay, Weather};
    pub use emberwild_logic::geometry::Vec3;
    pub use emberwild_logic::items::Weapon;
}
