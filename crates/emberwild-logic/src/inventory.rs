//! Stackable inventory keyed by item id.
//!
//! Invariants held by every method:
//! - at most one entry per item id
//! - every entry has `quantity >= 1`

use serde::{Deserialize, Serialize};

use crate::items::{ItemKind, ItemTemplate};

/// One stack of an item type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryItem {
    pub id: String,
    pub name: String,
    pub name_key: String,
    pub icon: String,
    pub kind: ItemKind,
    pub quantity: u32,
    /// Remaining uses of the tool at the top of the stack.
    pub durability: Option<u32>,
    pub max_durability: Option<u32>,
}

impl InventoryItem {
    pub fn from_template(template: &ItemTemplate, quantity: u32) -> Self {
        Self {
            id: template.id.clone(),
            name: template.name.clone(),
            name_key: template.name_key.clone(),
            icon: template.icon.clone(),
            kind: template.kind,
            quantity,
            durability: template.max_durability,
            max_durability: template.max_durability,
        }
    }
}

/// Outcome of wearing down a tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Wear {
    /// Not held, or not a tool with durability.
    NotApplicable,
    Worn { remaining: u32 },
    /// The last point was used and one unit of the tool was removed.
    Broke,
}

/// Ordered item stacks. Insertion order is display order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Inventory {
    items: Vec<InventoryItem>,
}

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from raw stacks, merging duplicate ids and dropping empty ones.
    pub fn from_items(items: impl IntoIterator<Item = InventoryItem>) -> Self {
        let mut inventory = Self::new();
        for item in items {
            if item.quantity == 0 {
                continue;
            }
            match inventory.position(&item.id) {
                Some(idx) => {
                    let merged = &mut inventory.items[idx].quantity;
                    *merged = merged.saturating_add(item.quantity);
                }
                None => inventory.items.push(item),
            }
        }
        inventory
    }

    pub fn items(&self) -> &[InventoryItem] {
        &self.items
    }

    pub fn get(&self, id: &str) -> Option<&InventoryItem> {
        self.items.iter().find(|i| i.id == id)
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.items.iter().position(|i| i.id == id)
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Add `quantity` of an item, merging into an existing stack. Stacks
    /// saturate at `u32::MAX`.
    pub fn add(&mut self, template: &ItemTemplate, quantity: u32) {
        if quantity == 0 {
            return;
        }
        match self.position(&template.id) {
            Some(idx) => {
                let held = &mut self.items[idx].quantity;
                *held = held.saturating_add(quantity);
            }
            None => self
                .items
                .push(InventoryItem::from_template(template, quantity)),
        }
    }

    /// Remove up to `quantity`; the stack is deleted once it reaches zero.
    /// Absent items are ignored. Returns how many were actually removed.
    pub fn remove(&mut self, id: &str, quantity: u32) -> u32 {
        let Some(idx) = self.position(id) else {
            return 0;
        };
        let held = self.items[idx].quantity;
        if held <= quantity {
            self.items.remove(idx);
            held
        } else {
            self.items[idx].quantity = held - quantity;
            quantity
        }
    }

    pub fn count(&self, id: &str) -> u32 {
        self.get(id).map_or(0, |i| i.quantity)
    }

    pub fn has(&self, id: &str, quantity: u32) -> bool {
        self.count(id) >= quantity
    }

    /// Use one point of durability from the top tool of a stack. When it
    /// runs out one unit is removed and the next unit starts fresh.
    pub fn wear(&mut self, id: &str) -> Wear {
        let Some(idx) = self.position(id) else {
            return Wear::NotApplicable;
        };
        let entry = &mut self.items[idx];
        let Some(durability) = entry.durability else {
            return Wear::NotApplicable;
        };
        if durability > 1 {
            entry.durability = Some(durability - 1);
            return Wear::Worn {
                remaining: durability - 1,
            };
        }
        entry.durability = entry.max_durability;
        self.remove(id, 1);
        Wear::Broke
    }

    /// True when no id appears twice and every quantity is positive.
    pub fn is_consistent(&self) -> bool {
        self.items.iter().enumerate().all(|(i, item)| {
            item.quantity > 0 && !self.items[..i].iter().any(|other| other.id == item.id)
        })
    }
}
