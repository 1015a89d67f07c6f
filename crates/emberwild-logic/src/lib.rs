//! Pure survival rules for Emberwild.
//!
//! This crate contains all game logic that is independent of any engine,
//! storage, or renderer. Functions take plain data and return results, so
//! they are unit-testable and shared by the game store and the headless
//! harness alike.
//!
//! # Module Overview
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`animals`] | Animal records, behavior state machine, AI and damage |
//! | [`clock`] | Day fraction, time-of-day classification, weather |
//! | [`constants`] | Stat bounds, AI ranges, timing gates, world size |
//! | [`geometry`] | Vectors, ground-plane distance, world bounds |
//! | [`inventory`] | Stackable, id-keyed item storage with tool wear |
//! | [`items`] | Item catalog, consumable effects, weapons |
//! | [`recipes`] | Static recipe book and all-or-nothing crafting |
//! | [`stats`] | Player stats, clamping, the coarse survival step |

pub mod animals;
pub mod clock;
pub mod constants;
pub mod geometry;
pub mod inventory;
pub mod items;
pub mod recipes;
pub mod stats;
