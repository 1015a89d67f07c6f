//! Systems - logic that operates on components

mod animal_ai;
mod lifecycle;
mod predators;
mod regrowth;
mod schedule;
mod survival;

pub use animal_ai::*;
pub use lifecycle::*;
pub use predators::*;
pub use regrowth::*;
pub use schedule::*;
pub use survival::*;
