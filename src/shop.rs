//! Cosmetic skin catalog

use serde::Serialize;

/// Skin every player owns from the start
pub const DEFAULT_SKIN_ID: &str = "default";
/// Color used when an equipped skin id is unknown to the catalog
pub const DEFAULT_SKIN_COLOR: &str = "#00f2ff";

/// A purchasable avatar color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StoreItem {
    pub id: &'static str,
    pub name: &'static str,
    pub color: &'static str,
    /// Price in orbs
    pub price: u32,
}

const fn item(id: &'static str, name: &'static str, color: &'static str, price: u32) -> StoreItem {
    StoreItem {
        id,
        name,
        color,
        price,
    }
}

pub const SHOP_ITEMS: [StoreItem; 16] = [
    item(DEFAULT_SKIN_ID, "Neon Blue", DEFAULT_SKIN_COLOR, 0),
    item("crimson", "Crimson", "#ff0055", 50),
    item("lime", "Toxic Lime", "#33ff00", 100),
    item("blaze", "Blaze", "#ff6600", 120),
    item("glacier", "Glacier", "#aeeeee", 130),
    item("plasma", "Plasma", "#aa00ff", 150),
    item("violet", "Electric Violet", "#8f00ff", 175),
    item("white", "Pure White", "#ffffff", 200),
    item("matrix", "Matrix Green", "#00ff44", 250),
    item("shadow", "Shadow", "#333333", 300),
    item("sunset", "Sunset", "#ff4500", 350),
    item("inferno", "Inferno", "#ff2200", 400),
    item("gold", "Golden", "#ffd700", 500),
    item("diamond", "Diamond", "#b9f2ff", 600),
    item("obsidian", "Obsidian", "#1a1a1a", 800),
    item("void", "Void", "#000000", 1000),
];

pub fn find_item(id: &str) -> Option<&'static StoreItem> {
    SHOP_ITEMS.iter().find(|item| item.id == id)
}

/// Resolve a skin id to its color, falling back to the default skin color
pub fn skin_color(id: &str) -> &'static str {
    find_item(id).map(|item| item.color).unwrap_or(DEFAULT_SKIN_COLOR)
}
