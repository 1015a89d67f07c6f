//! Player-side state: where the player stands, the hotbar, UI language.

use emberwild_logic::constants::HOTBAR_SLOTS;
use emberwild_logic::geometry::Vec3;
use serde::{Deserialize, Serialize};

/// Player world position and facing, supplied by the input layer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlayerTransform {
    pub position: Vec3,
    /// Yaw in radians.
    pub yaw: f32,
}

impl Default for PlayerTransform {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 2.0, 0.0),
            yaw: 0.0,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Language {
    #[default]
    En,
    Tr,
}

/// Eight quick-use slots, each naming an item id or empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hotbar {
    slots: Vec<Option<String>>,
}

impl Default for Hotbar {
    /// The fixed starting layout.
    fn default() -> Self {
        let layout = [
            "bow",
            "torch",
            "water_bottle",
            "apple",
            "meat",
            "axe",
            "knife",
            "pickaxe",
        ];
        Self {
            slots: layout.iter().map(|id| Some(id.to_string())).collect(),
        }
    }
}

impl Hotbar {
    pub fn empty() -> Self {
        Self {
            slots: vec![None; HOTBAR_SLOTS],
        }
    }

    /// Build from saved slots. Returns `None` unless exactly eight are given.
    pub fn from_slots(slots: Vec<Option<String>>) -> Option<Self> {
        (slots.len() == HOTBAR_SLOTS).then_some(Self { slots })
    }

    pub fn slots(&self) -> &[Option<String>] {
        &self.slots
    }

    pub fn get(&self, slot: usize) -> Option<&str> {
        self.slots.get(slot).and_then(|s| s.as_deref())
    }

    /// Assign a slot; out-of-range slots are ignored.
    pub fn set(&mut self, slot: usize, item_id: Option<String>) -> bool {
        match self.slots.get_mut(slot) {
            Some(entry) => {
                *entry = item_id;
                true
            }
            None => false,
        }
    }
}
