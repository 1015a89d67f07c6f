//! Crafting recipes and the all-or-nothing craft operation.

use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

use crate::inventory::Inventory;
use crate::items::{item, ItemTemplate};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ingredient {
    pub item_id: String,
    pub quantity: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CraftingRecipe {
    pub id: String,
    pub name_key: String,
    pub ingredients: Vec<Ingredient>,
    pub result: ItemTemplate,
    pub result_quantity: u32,
}

type RecipeRow = (&'static str, &'static [(&'static str, u32)], u32);

/// Recipe id (also the result item id), ingredients, result quantity.
const RECIPE_TABLE: &[RecipeRow] = &[
    ("axe", &[("wood", 3), ("stone", 2)], 1),
    ("pickaxe", &[("wood", 3), ("stone", 3)], 1),
    ("knife", &[("wood", 1), ("stone", 2)], 1),
    ("campfire", &[("wood", 5), ("stone", 3)], 1),
    ("bow", &[("wood", 3), ("leather", 1)], 1),
    ("arrow", &[("wood", 1), ("stone", 1)], 4),
    ("torch", &[("wood", 2), ("leather", 1)], 1),
];

fn build(&(id, ingredients, result_quantity): &RecipeRow) -> Option<CraftingRecipe> {
    Some(CraftingRecipe {
        id: id.to_string(),
        name_key: id.to_string(),
        ingredients: ingredients
            .iter()
            .map(|&(item_id, quantity)| Ingredient {
                item_id: item_id.to_string(),
                quantity,
            })
            .collect(),
        result: item(id)?,
        result_quantity,
    })
}

/// The static recipe book. Rows whose result is not in the item catalog
/// are skipped.
pub fn recipes() -> &'static [CraftingRecipe] {
    static RECIPES: OnceLock<Vec<CraftingRecipe>> = OnceLock::new();
    RECIPES.get_or_init(|| RECIPE_TABLE.iter().filter_map(build).collect())
}

pub fn recipe(id: &str) -> Option<&'static CraftingRecipe> {
    recipes().iter().find(|r| r.id == id)
}

/// True iff every ingredient is held in at least the required quantity.
pub fn can_craft(inventory: &Inventory, recipe: &CraftingRecipe) -> bool {
    recipe
        .ingredients
        .iter()
        .all(|ing| inventory.has(&ing.item_id, ing.quantity))
}

/// Consume the ingredients and add the result. Returns false and leaves the
/// inventory untouched if anything is short.
pub fn craft(inventory: &mut Inventory, recipe: &CraftingRecipe) -> bool {
    if !can_craft(inventory, recipe) {
        return false;
    }

    // Work on a copy so a shortfall discovered mid-way (e.g. the same item
    // listed twice) never commits partial consumption.
    let mut staged = inventory.clone();
    for ing in &recipe.ingredients {
        if staged.remove(&ing.item_id, ing.quantity) != ing.quantity {
            return false;
        }
    }
    staged.add(&recipe.result, recipe.result_quantity);
    *inventory = staged;
    true
}
