//! Save/Load functionality for persisting the player's session
//!
//! A single save slot lives under a fixed key in a [`SaveStorage`] backend.
//! The snapshot is encoded with bincode. Loading decodes and validates the
//! whole snapshot before the store touches any of its own state.

use std::collections::{HashMap, HashSet};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use emberwild_logic::clock::Weather;
use emberwild_logic::constants::HOTBAR_SLOTS;
use emberwild_logic::geometry::Vec3;
use emberwild_logic::inventory::{Inventory, InventoryItem};
use emberwild_logic::stats::PlayerStats;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::components::Language;

/// The one save slot.
pub const SAVE_KEY: &str = "emberwild-save";

/// Errors that can occur during save/load
#[derive(Debug, Error)]
pub enum SaveError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Codec(#[from] Box<bincode::ErrorKind>),

    #[error("no saved game under key {0:?}")]
    NotFound(String),

    #[error("saved game is invalid: {0}")]
    Invalid(String),
}

/// Serializable snapshot of the player's session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaveData {
    pub player: PlayerStats,
    pub inventory: Vec<InventoryItem>,
    pub hotbar: Vec<Option<String>>,
    pub selected_slot: usize,
    pub day_time: f32,
    pub weather: Weather,
    pub language: Language,
    pub player_position: Vec3,
    pub player_yaw: f32,
    /// Seconds accumulated toward the next survival step.
    pub stats_timer: f32,
}

impl SaveData {
    /// Reject snapshots that would break store invariants.
    pub fn validate(&self) -> Result<(), SaveError> {
        if !self.player.in_bounds() {
            return Err(SaveError::Invalid("player stats out of range".into()));
        }
        self.inventory_checked()?;
        if self.hotbar.len() != HOTBAR_SLOTS {
            return Err(SaveError::Invalid(format!(
                "expected {HOTBAR_SLOTS} hotbar slots, found {}",
                self.hotbar.len()
            )));
        }
        if self.selected_slot >= HOTBAR_SLOTS {
            return Err(SaveError::Invalid(format!(
                "selected slot {} out of range",
                self.selected_slot
            )));
        }
        if !(0.0..1.0).contains(&self.day_time) {
            return Err(SaveError::Invalid(format!("day time {} out of range", self.day_time)));
        }
        let finite = [
            self.player_position.x,
            self.player_position.y,
            self.player_position.z,
            self.player_yaw,
            self.stats_timer,
        ];
        if finite.iter().any(|v| !v.is_finite()) {
            return Err(SaveError::Invalid("non-finite player transform".into()));
        }
        Ok(())
    }

    /// Inventory as stored, rejecting empty and duplicate stacks.
    fn inventory_checked(&self) -> Result<Inventory, SaveError> {
        let mut seen = HashSet::new();
        for item in &self.inventory {
            if item.quantity == 0 {
                return Err(SaveError::Invalid("inventory has an empty stack".into()));
            }
            if !seen.insert(item.id.as_str()) {
                return Err(SaveError::Invalid(format!(
                    "inventory has duplicate stacks of {:?}",
                    item.id
                )));
            }
        }
        Ok(Inventory::from_items(self.inventory.clone()))
    }

    /// Validated inventory, ready to install.
    pub fn inventory(&self) -> Result<Inventory, SaveError> {
        self.inventory_checked()
    }
}

pub fn encode(data: &SaveData) -> Result<Vec<u8>, SaveError> {
    Ok(bincode::serialize(data)?)
}

/// Decode and validate a snapshot.
pub fn decode(bytes: &[u8]) -> Result<SaveData, SaveError> {
    let data: SaveData = bincode::deserialize(bytes)?;
    data.validate()?;
    Ok(data)
}

/// Keyed byte storage for saves.
pub trait SaveStorage: Send {
    /// `Ok(None)` when nothing is stored under `key`.
    fn read(&self, key: &str) -> Result<Option<Vec<u8>>, SaveError>;
    /// Replace whatever is stored under `key`.
    fn write(&mut self, key: &str, bytes: &[u8]) -> Result<(), SaveError>;
    fn exists(&self, key: &str) -> bool;
    /// Removing a missing key is not an error.
    fn remove(&mut self, key: &str) -> Result<(), SaveError>;
}

/// In-process storage; contents vanish with the store.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    entries: HashMap<String, Vec<u8>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SaveStorage for MemoryStorage {
    fn read(&self, key: &str) -> Result<Option<Vec<u8>>, SaveError> {
        Ok(self.entries.get(key).cloned())
    }

    fn write(&mut self, key: &str, bytes: &[u8]) -> Result<(), SaveError> {
        self.entries.insert(key.to_string(), bytes.to_vec());
        Ok(())
    }

    fn exists(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    fn remove(&mut self, key: &str) -> Result<(), SaveError> {
        self.entries.remove(key);
        Ok(())
    }
}

/// One file per key under a directory.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    /// Creates the directory if needed.
    pub fn new(dir: impl AsRef<Path>) -> Result<Self, SaveError> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.sav"))
    }
}

impl SaveStorage for FileStorage {
    fn read(&self, key: &str) -> Result<Option<Vec<u8>>, SaveError> {
        match fs::read(self.path_for(key)) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn write(&mut self, key: &str, bytes: &[u8]) -> Result<(), SaveError> {
        // Write beside the target then rename, so a crash mid-write never
        // leaves a truncated save behind.
        let path = self.path_for(key);
        let tmp = path.with_extension("sav.tmp");
        {
            let mut file = fs::File::create(&tmp)?;
            file.write_all(bytes)?;
            file.sync_all()?;
        }
        fs::rename(&tmp, &path)?;
        Ok(())
    }

    fn exists(&self, key: &str) -> bool {
        self.path_for(key).is_file()
    }

    fn remove(&mut self, key: &str) -> Result<(), SaveError> {
        match fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
