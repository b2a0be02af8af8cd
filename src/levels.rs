//! Level catalog
//!
//! Static level definitions. The simulation reads these by index and never
//! mutates them.

use serde::Serialize;

use crate::sim::AvatarMode;

/// Five-color level palette (`#rrggbb` strings)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Palette {
    pub background: &'static str,
    pub ground: &'static str,
    /// Fallback avatar color when no skin is equipped
    pub player: &'static str,
    pub obstacle: &'static str,
    /// Background grid lines
    pub secondary: &'static str,
}

/// A playable level
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LevelDefinition {
    pub id: u32,
    pub name: &'static str,
    pub difficulty: &'static str,
    /// Scroll speed in distance units per tick
    pub speed: f32,
    pub mode: AvatarMode,
    /// Distance required to complete the level
    pub length: f32,
    pub palette: Palette,
}

const fn level(
    id: u32,
    name: &'static str,
    difficulty: &'static str,
    speed: f32,
    mode: AvatarMode,
    length: f32,
    palette: [&'static str; 5],
) -> LevelDefinition {
    LevelDefinition {
        id,
        name,
        difficulty,
        speed,
        mode,
        length,
        palette: Palette {
            background: palette[0],
            ground: palette[1],
            player: palette[2],
            obstacle: palette[3],
            secondary: palette[4],
        },
    }
}

use AvatarMode::{Cube, Ship};

/// All levels in menu order
#[rustfmt::skip]
pub const LEVELS: [LevelDefinition; 13] = [
    level(1, "NEON BREEZE", "EASY", 6.5, Cube, 5000.0,
        ["#0f0f16", "#00f2ff", "#00f2ff", "#ff0055", "#1f1f2e"]),
    level(2, "GLACIAL DRIFT", "NORMAL", 7.0, Cube, 6000.0,
        ["#0a1a2a", "#aaddff", "#ffffff", "#0055ff", "#1a3a5a"]),
    level(3, "TOXIC SEWERS", "NORMAL", 7.5, Cube, 6500.0,
        ["#051a05", "#33ff00", "#ccff00", "#006600", "#0f2e0f"]),
    level(4, "CRIMSON VELOCITY", "HARD", 8.5, Cube, 8000.0,
        ["#1a0505", "#ff0000", "#ffcc00", "#ffffff", "#2e0f0f"]),
    level(5, "SOLAR FLARE", "HARD", 9.0, Ship, 7000.0,
        ["#2a1a00", "#ffaa00", "#ffff00", "#ff4400", "#4a2a00"]),
    level(6, "VOID FLIGHT", "EXPERT", 7.5, Ship, 6000.0,
        ["#05001a", "#aa00ff", "#00ffcc", "#ff00aa", "#1a002e"]),
    level(7, "MIDNIGHT CITY", "EXPERT", 9.5, Cube, 9000.0,
        ["#000033", "#ff00ff", "#00ffff", "#ffff00", "#000066"]),
    level(8, "CYBER PUNK", "INSANE", 10.0, Ship, 8500.0,
        ["#110022", "#00ffea", "#ff00aa", "#ccff00", "#220044"]),
    level(9, "GOLDEN AGE", "INSANE", 10.5, Cube, 10000.0,
        ["#1a1500", "#ffcc00", "#ffffff", "#000000", "#332a00"]),
    level(10, "ABYSSAL ZONE", "DEMON", 11.0, Ship, 12000.0,
        ["#000000", "#333333", "#ff0000", "#660000", "#111111"]),
    level(11, "COTTON CANDY", "EASY", 6.0, Cube, 4500.0,
        ["#2a2030", "#ffaad4", "#aaddff", "#ffffff", "#403050"]),
    level(12, "INFERNO", "DEMON", 12.0, Ship, 15000.0,
        ["#330000", "#ffaa00", "#ffffff", "#ff0000", "#660000"]),
    level(13, "ZENITH", "LEGENDARY", 13.0, Cube, 20000.0,
        ["#eeeeee", "#000000", "#000000", "#ff0000", "#cccccc"]),
];

/// Wrap any index into the catalog range
pub fn wrap_index(index: usize) -> usize {
    index % LEVELS.len()
}

/// Look up a level, wrapping out-of-range indices
pub fn level_at(index: usize) -> &'static LevelDefinition {
    let wrapped = wrap_index(index);
    if wrapped != index {
        log::info!("Level index {} out of range, wrapped to {}", index, wrapped);
    }
    &LEVELS[wrapped]
}

/// Next level in menu order (wraps)
pub fn next_index(index: usize) -> usize {
    wrap_index(wrap_index(index) + 1)
}

/// Previous level in menu order (wraps)
pub fn prev_index(index: usize) -> usize {
    let index = wrap_index(index);
    (index + LEVELS.len() - 1) % LEVELS.len()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_shape() {
        assert_eq!(LEVELS.len(), 13);
        for (i, level) in LEVELS.iter().enumerate() {
            assert_eq!(level.id as usize, i + 1);
            assert!(level.speed > 0.0);
            assert!(level.length > 0.0);
        }
        assert_eq!(LEVELS[0].mode, AvatarMode::Cube);
        assert_eq!(LEVELS[4].mode, AvatarMode::Ship);
    }

    #[test]
    fn test_level_at_wraps() {
        assert_eq!(level_at(0).name, "NEON BREEZE");
        assert_eq!(level_at(13).name, "NEON BREEZE");
        assert_eq!(level_at(14).id, 2);
    }

    #[test]
    fn test_menu_cycling() {
        assert_eq!(next_index(12), 0);
        assert_eq!(prev_index(0), 12);
        assert_eq!(prev_index(5), 4);
    }
}
