//! Player actions: gathering, eating, crafting, hunting and cooking
//!
//! Every action is a no-op while the game is paused. Outcomes are reported
//! through [`GameEvent`]s; the returned `bool` says whether anything changed.

use emberwild_logic::animals::damage_animal;
use emberwild_logic::inventory::Wear;
use emberwild_logic::items::{consume_effect, item, Weapon};
use emberwild_logic::recipes::{self, CraftingRecipe};
use log::debug;
use rand::Rng;

use crate::components::{AnimalId, NodeId};
use crate::engine::GameStore;
use crate::events::GameEvent;

impl GameStore {
    /// Gather from a resource node within reach.
    ///
    /// Yields one or two units, plus one when the node's tool is in the
    /// selected slot (which costs that tool a point of durability).
    /// Depletable nodes are removed and scheduled to regrow.
    pub fn gather(&mut self, node_id: NodeId) -> bool {
        if self.is_paused() {
            return false;
        }
        let Some((entity, node)) = self.node_entry(node_id) else {
            self.events.push(GameEvent::NothingToUse);
            return false;
        };
        if node.position.distance_xz(&self.player.position) > self.config().gather_reach {
            self.events.push(GameEvent::OutOfReach);
            return false;
        }
        let Some(template) = item(node.resource) else {
            return false;
        };

        let mut quantity = self.rng.gen_range(1..=2);
        if let Some(tool) = node.kind.tool() {
            if self.selected_item() == Some(tool) && self.inventory.has(tool, 1) {
                quantity += 1;
                self.wear_tool(tool);
            }
        }

        self.inventory.add(&template, quantity);
        self.events.push(GameEvent::ItemGathered {
            item_id: template.id.clone(),
            quantity,
        });

        if node.kind.depletes() {
            self.despawn(entity);
            let at = self.sim_ms() + self.config().regrow_delay_ms;
            self.regrowth.schedule(at, node);
        }
        true
    }

    fn wear_tool(&mut self, tool: &str) {
        if self.inventory.wear(tool) == Wear::Broke {
            debug!("{tool} broke");
            self.events.push(GameEvent::ToolBroke {
                item_id: tool.to_string(),
            });
        }
    }

    /// Eat or drink one unit of a held consumable.
    pub fn consume(&mut self, item_id: &str) -> bool {
        if self.is_paused() {
            return false;
        }
        let effect = match consume_effect(item_id) {
            Some(effect) if self.inventory.has(item_id, 1) => effect,
            _ => {
                self.events.push(GameEvent::NothingToUse);
                return false;
            }
        };
        self.inventory.remove(item_id, 1);
        self.stats.restore(effect.hunger, effect.thirst, effect.health);
        self.check_player_death();
        self.events.push(GameEvent::ItemConsumed {
            item_id: item_id.to_string(),
        });
        true
    }

    pub fn can_craft(&self, recipe_id: &str) -> bool {
        recipes::recipe(recipe_id).is_some_and(|r| recipes::can_craft(&self.inventory, r))
    }

    /// Craft by recipe id. Unknown recipes and missing ingredients emit
    /// `CannotCraft` and leave the inventory alone.
    pub fn craft(&mut self, recipe_id: &str) -> bool {
        if self.is_paused() {
            return false;
        }
        match recipes::recipe(recipe_id) {
            Some(recipe) => self.craft_recipe(recipe),
            None => {
                self.events.push(GameEvent::CannotCraft {
                    recipe_id: recipe_id.to_string(),
                });
                false
            }
        }
    }

    pub fn craft_recipe(&mut self, recipe: &CraftingRecipe) -> bool {
        if self.is_paused() {
            return false;
        }
        if !recipes::craft(&mut self.inventory, recipe) {
            self.events.push(GameEvent::CannotCraft {
                recipe_id: recipe.id.clone(),
            });
            return false;
        }
        self.events.push(GameEvent::ItemCrafted {
            item_id: recipe.result.id.clone(),
            quantity: recipe.result_quantity,
        });
        true
    }

    /// Hit an animal with `weapon`.
    ///
    /// The weapon item must be held (fists always are). A bow also needs and
    /// spends one arrow. A killing blow moves the drop table into the
    /// inventory.
    pub fn attack_animal(&mut self, id: AnimalId, weapon: Weapon) -> bool {
        if self.is_paused() {
            return false;
        }
        let target = match self.animal(id) {
            Some(animal) if !animal.is_dead() => animal,
            _ => {
                self.events.push(GameEvent::NothingToUse);
                return false;
            }
        };
        if let Some(weapon_item) = weapon.item_id() {
            if !self.inventory.has(weapon_item, 1) {
                self.events.push(GameEvent::NothingToUse);
                return false;
            }
        }
        if target.position.distance_xz(&self.player.position) > weapon.range() {
            self.events.push(GameEvent::OutOfReach);
            return false;
        }
        if let Some(ammo) = weapon.ammo() {
            if !self.inventory.has(ammo, 1) {
                self.events.push(GameEvent::NoArrows);
                return false;
            }
            self.inventory.remove(ammo, 1);
        }
        if let Some(weapon_item) = weapon.item_id() {
            self.wear_tool(weapon_item);
        }

        let update = damage_animal(&target, weapon.damage(), self.sim_ms());
        self.update_animal(id, &update);

        if update.behavior.is_some_and(|b| b.is_dead()) {
            let mut drops = Vec::new();
            for drop in target.drops() {
                if let Some(template) = item(drop.item_id) {
                    self.inventory.add(&template, drop.quantity);
                    drops.push((drop.item_id.to_string(), drop.quantity));
                }
            }
            debug!("{} ({:?}) killed with {:?}", id, target.kind, weapon);
            self.events.push(GameEvent::AnimalKilled {
                id,
                kind: target.kind,
                drops,
            });
        }
        true
    }

    /// Use whatever is in the selected slot: eat a consumable, swing or shoot
    /// a weapon at `target`, or cook at a campfire.
    pub fn use_selected(&mut self, target: Option<AnimalId>) -> bool {
        if self.is_paused() {
            return false;
        }
        let Some(item_id) = self.selected_item().map(str::to_owned) else {
            self.events.push(GameEvent::NothingToUse);
            return false;
        };
        if !self.inventory.has(&item_id, 1) {
            self.events.push(GameEvent::NothingToUse);
            return false;
        }
        if consume_effect(&item_id).is_some() {
            return self.consume(&item_id);
        }
        if let Some(weapon) = Weapon::from_item(&item_id) {
            return match target {
                Some(id) => self.attack_animal(id, weapon),
                None => {
                    self.events.push(GameEvent::NothingToUse);
                    false
                }
            };
        }
        if item_id == "campfire" {
            return self.cook_meat();
        }
        self.events.push(GameEvent::NothingToUse);
        false
    }

    /// Turn one raw meat into cooked meat. Needs a campfire.
    pub fn cook_meat(&mut self) -> bool {
        if self.is_paused() {
            return false;
        }
        let cooked = match item("cooked_meat") {
            Some(template) if self.inventory.has("campfire", 1) && self.inventory.has("meat", 1) => {
                template
            }
            _ => {
                self.events.push(GameEvent::NothingToUse);
                return false;
            }
        };
        self.inventory.remove("meat", 1);
        self.inventory.add(&cooked, 1);
        self.events.push(GameEvent::ItemCrafted {
            item_id: cooked.id.clone(),
            quantity: 1,
        });
        true
    }
}

#[cfg(test)]
mod tests {
    use crate::components::{AnimalKind, NodeKind};
    use crate::config::SimConfig;
    use crate::engine::GameStore;
    use crate::events::GameEvent;
    use crate::persistence::MemoryStorage;
    use emberwild_logic::geometry::Vec3;
    use emberwild_logic::items::{item, Weapon};

    fn store() -> GameStore {
        GameStore::new(SimConfig::seeded(21), Box::new(MemoryStorage::new())).unwrap()
    }

    fn give(store: &mut GameStore, id: &str, quantity: u32) {
        store.add_item(&item(id).unwrap(), quantity);
    }

    #[test]
    fn test_gather_tree_with_axe() {
        let mut store = store();
        give(&mut store, "axe", 1);
        store.select_slot(5);
        let tree = store.spawn_node(NodeKind::Tree, Vec3::ground(2.0, 0.0));

        assert!(store.gather(tree));
        let wood = store.get_item_count("wood");
        assert!((2..=3).contains(&wood));
        assert_eq!(store.inventory().get("axe").unwrap().durability, Some(49));
        assert!(store.node(tree).is_none());
        assert_eq!(store.regrowing_nodes(), 1);

        // Regrows after 30 s.
        for _ in 0..31 {
            store.tick(1.0);
        }
        assert!(store.node(tree).is_some());
    }

    #[test]
    fn test_gather_out_of_reach_and_water() {
        let mut store = store();
        let far = store.spawn_node(NodeKind::Rock, Vec3::ground(10.0, 0.0));
        assert!(!store.gather(far));
        assert_eq!(store.drain_events(), vec![GameEvent::OutOfReach]);

        let water = store.spawn_node(NodeKind::Water, Vec3::ground(0.0, 3.0));
        assert!(store.gather(water));
        assert!(store.gather(water));
        assert!(store.node(water).is_some());
        assert!(store.get_item_count("water_bottle") >= 2);
    }

    #[test]
    fn test_consume_restores_and_removes() {
        let mut store = store();
        give(&mut store, "cooked_meat", 1);
        store.update_player_stats(emberwild_logic::stats::StatsUpdate {
            hunger: Some(20.0),
            health: Some(50.0),
            ..Default::default()
        });

        assert!(store.consume("cooked_meat"));
        assert_eq!(store.stats().hunger, 65.0);
        assert_eq!(store.stats().health, 60.0);
        assert_eq!(store.get_item_count("cooked_meat"), 0);

        assert!(!store.consume("cooked_meat"));
        give(&mut store, "wood", 1);
        assert!(!store.consume("wood"));
    }

    #[test]
    fn test_craft_by_id() {
        let mut store = store();
        give(&mut store, "wood", 5);
        give(&mut store, "stone", 3);
        assert!(store.can_craft("axe"));
        assert!(store.craft("axe"));
        assert_eq!(store.get_item_count("wood"), 2);
        assert_eq!(store.get_item_count("stone"), 1);
        assert_eq!(store.get_item_count("axe"), 1);

        assert!(!store.craft("campfire"));
        assert!(!store.craft("rocket"));
        let events = store.drain_events();
        assert_eq!(events.len(), 3);
        assert_eq!(events[0].key(), "item_crafted");
        assert_eq!(events[2].key(), "cannot_craft");
    }

    #[test]
    fn test_bow_needs_arrows() {
        let mut store = store();
        give(&mut store, "bow", 1);
        let rabbit = store.spawn_animal(AnimalKind::Rabbit, Vec3::ground(10.0, 0.0));
        store.drain_events();

        assert!(!store.attack_animal(rabbit, Weapon::Bow));
        assert_eq!(store.drain_events(), vec![GameEvent::NoArrows]);

        give(&mut store, "arrow", 1);
        assert!(store.attack_animal(rabbit, Weapon::Bow));
        assert_eq!(store.get_item_count("arrow"), 0);
        assert!(store.animal(rabbit).unwrap().is_dead());
        assert_eq!(store.get_item_count("meat"), 1);
        match store.drain_events().as_slice() {
            [GameEvent::AnimalKilled { id, kind, drops }] => {
                assert_eq!(*id, rabbit);
                assert_eq!(*kind, AnimalKind::Rabbit);
                assert_eq!(drops, &vec![("meat".to_string(), 1)]);
            }
            other => panic!("unexpected events {other:?}"),
        }

        // Dead animals cannot be hit again.
        give(&mut store, "arrow", 1);
        assert!(!store.attack_animal(rabbit, Weapon::Bow));
        assert_eq!(store.get_item_count("arrow"), 1);
    }

    #[test]
    fn test_melee_range_and_fists() {
        let mut store = store();
        let deer = store.spawn_animal(AnimalKind::Deer, Vec3::ground(2.5, 0.0));
        assert!(!store.attack_animal(deer, Weapon::Fists));
        assert!(!store.attack_animal(deer, Weapon::Knife));

        give(&mut store, "knife", 1);
        assert!(store.attack_animal(deer, Weapon::Knife));
        assert_eq!(store.animal(deer).unwrap().health, 30.0);
        assert_eq!(store.inventory().get("knife").unwrap().durability, Some(29));
    }

    #[test]
    fn test_use_selected_dispatch() {
        let mut store = store();
        store.select_slot(3);
        assert!(!store.use_selected(None));

        give(&mut store, "apple", 1);
        assert!(store.use_selected(None));
        assert_eq!(store.get_item_count("apple"), 0);

        give(&mut store, "knife", 1);
        store.select_slot(6);
        let rabbit = store.spawn_animal(AnimalKind::Rabbit, Vec3::ground(1.0, 0.0));
        assert!(!store.use_selected(None));
        assert!(store.use_selected(Some(rabbit)));
        assert!(store.animal(rabbit).unwrap().is_dead());
    }

    #[test]
    fn test_cook_meat() {
        let mut store = store();
        give(&mut store, "meat", 2);
        assert!(!store.cook_meat());

        give(&mut store, "campfire", 1);
        assert!(store.cook_meat());
        assert_eq!(store.get_item_count("meat"), 1);
        assert_eq!(store.get_item_count("cooked_meat"), 1);
    }

    #[test]
    fn test_actions_blocked_while_paused() {
        let mut store = store();
        give(&mut store, "apple", 1);
        give(&mut store, "wood", 5);
        give(&mut store, "stone", 5);
        store.set_paused(true);

        assert!(!store.consume("apple"));
        assert!(!store.craft("axe"));
        assert_eq!(store.get_item_count("apple"), 1);
        assert_eq!(store.get_item_count("wood"), 5);
        assert!(store.drain_events().is_empty());
    }
}
