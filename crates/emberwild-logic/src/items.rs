//! Item catalog - every item the player can hold, what eating it does, and
//! how hard it hits.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ItemKind {
    Resource,
    Tool,
    Consumable,
}

/// Everything about an item except how many are held.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemTemplate {
    pub id: String,
    pub name: String,
    /// Localization key for the display name.
    pub name_key: String,
    pub icon: String,
    pub kind: ItemKind,
    pub max_durability: Option<u32>,
}

struct ItemDef {
    id: &'static str,
    name: &'static str,
    icon: &'static str,
    kind: ItemKind,
    max_durability: Option<u32>,
}

const fn def(
    id: &'static str,
    name: &'static str,
    icon: &'static str,
    kind: ItemKind,
    max_durability: Option<u32>,
) -> ItemDef {
    ItemDef {
        id,
        name,
        icon,
        kind,
        max_durability,
    }
}

const CATALOG: &[ItemDef] = &[
    // Resources
    def("wood", "Wood", "🪵", ItemKind::Resource, None),
    def("stone", "Stone", "🪨", ItemKind::Resource, None),
    def("leather", "Leather", "🟫", ItemKind::Resource, None),
    def("arrow", "Arrow", "➶", ItemKind::Resource, None),
    // Consumables
    def("apple", "Apple", "🍎", ItemKind::Consumable, None),
    def("berry", "Berry", "🫐", ItemKind::Consumable, None),
    def("meat", "Meat", "🥩", ItemKind::Consumable, None),
    def("cooked_meat", "Cooked Meat", "🍖", ItemKind::Consumable, None),
    def("water_bottle", "Water Bottle", "💧", ItemKind::Consumable, None),
    // Tools
    def("axe", "Axe", "🪓", ItemKind::Tool, Some(50)),
    def("pickaxe", "Pickaxe", "⛏️", ItemKind::Tool, Some(50)),
    def("knife", "Knife", "🔪", ItemKind::Tool, Some(30)),
    def("campfire", "Campfire", "🔥", ItemKind::Tool, Some(100)),
    def("bow", "Bow", "🏹", ItemKind::Tool, Some(60)),
    def("torch", "Torch", "🔦", ItemKind::Tool, Some(80)),
];

/// Look up an item template by id.
pub fn item(id: &str) -> Option<ItemTemplate> {
    CATALOG.iter().find(|d| d.id == id).map(|d| ItemTemplate {
        id: d.id.to_string(),
        name: d.name.to_string(),
        name_key: d.id.to_string(),
        icon: d.icon.to_string(),
        kind: d.kind,
        max_durability: d.max_durability,
    })
}

/// Ids of every catalogued item, in catalog order.
pub fn all_item_ids() -> impl Iterator<Item = &'static str> {
    CATALOG.iter().map(|d| d.id)
}

/// What consuming one unit restores.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConsumeEffect {
    pub hunger: f32,
    pub thirst: f32,
    pub health: f32,
}

pub fn consume_effect(id: &str) -> Option<ConsumeEffect> {
    let (hunger, thirst, health) = match id {
        "apple" => (15.0, 5.0, 0.0),
        "berry" => (10.0, 8.0, 0.0),
        "meat" => (30.0, 0.0, 5.0),
        "cooked_meat" => (45.0, 0.0, 10.0),
        "water_bottle" => (0.0, 35.0, 0.0),
        _ => return None,
    };
    Some(ConsumeEffect {
        hunger,
        thirst,
        health,
    })
}

/// How the player hits an animal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Weapon {
    Bow,
    Knife,
    Axe,
    Fists,
}

impl Weapon {
    /// The weapon an item acts as, if any.
    pub fn from_item(id: &str) -> Option<Self> {
        match id {
            "bow" => Some(Weapon::Bow),
            "knife" => Some(Weapon::Knife),
            "axe" => Some(Weapon::Axe),
            _ => None,
        }
    }

    pub fn damage(&self) -> f32 {
        match self {
            Weapon::Bow => 25.0,
            Weapon::Knife => 20.0,
            Weapon::Axe => 15.0,
            Weapon::Fists => 5.0,
        }
    }

    /// Maximum XZ distance to the target.
    pub fn range(&self) -> f32 {
        match self {
            Weapon::Bow => 30.0,
            Weapon::Knife | Weapon::Axe => 3.0,
            Weapon::Fists => 2.0,
        }
    }

    /// Item consumed per shot.
    pub fn ammo(&self) -> Option<&'static str> {
        match self {
            Weapon::Bow => Some("arrow"),
            _ => None,
        }
    }

    /// Item that wears down per hit.
    pub fn item_id(&self) -> Option<&'static str> {
        match self {
            Weapon::Bow => Some("bow"),
            Weapon::Knife => Some("knife"),
            Weapon::Axe => Some("axe"),
            Weapon::Fists => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_ids_unique() {
        let ids: Vec<_> = all_item_ids().collect();
        let mut sorted = ids.clone();
        sorted.sort_unstable();
        sorted.dedup();
        assert_eq!(ids.len(), sorted.len());
    }

    #[test]
    fn test_tools_have_durability() {
        for id in all_item_ids() {
            let template = item(id).unwrap();
            assert_eq!(
                template.kind == ItemKind::Tool,
                template.max_durability.is_some(),
                "{id}"
            );
        }
    }

    #[test]
    fn test_consumables_have_effects() {
        for id in all_item_ids() {
            let template = item(id).unwrap();
            assert_eq!(
                template.kind == ItemKind::Consumable,
                consume_effect(id).is_some(),
                "{id}"
            );
        }
    }

    #[test]
    fn test_unknown_item() {
        assert!(item("diamond").is_none());
        assert!(consume_effect("wood").is_none());
    }

    #[test]
    fn test_weapons() {
        assert_eq!(Weapon::from_item("bow"), Some(Weapon::Bow));
        assert_eq!(Weapon::from_item("apple"), None);
        assert_eq!(Weapon::Bow.ammo(), Some("arrow"));
        assert!(Weapon::Bow.range() > Weapon::Knife.range());
        assert!(Weapon::Knife.damage() > Weapon::Fists.damage());
    }
}
