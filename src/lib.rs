//! Neon Dash - A side-scrolling cube/ship reflex runner
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, generation, collisions, run state)
//! - `renderer`: Stateless CPU-side vertex building from simulation state
//! - `persistence`: Key-value storage for progression and settings
//! - `progression`: Orbs, skin unlocks and the shop rules
//! - `levels` / `shop`: Static catalogs

pub mod levels;
pub mod persistence;
pub mod progression;
pub mod renderer;
pub mod settings;
pub mod shop;
pub mod sim;

pub use levels::{LEVELS, LevelDefinition, Palette};
pub use progression::Progression;
pub use settings::{QualityPreset, Settings};

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (tuning constants are per 60 Hz tick)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Default viewport size used before the presentation layer reports one
    pub const DEFAULT_VIEWPORT_WIDTH: f32 = 1280.0;
    pub const DEFAULT_VIEWPORT_HEIGHT: f32 = 720.0;
    /// Height of the ground strip at the bottom of the viewport
    pub const GROUND_HEIGHT: f32 = 100.0;

    /// Avatar is a fixed square, placed at 20% of the viewport width
    pub const AVATAR_SIZE: f32 = 40.0;
    pub const AVATAR_LANE: f32 = 0.2;

    /// Cube physics (per tick)
    pub const GRAVITY: f32 = 0.6;
    pub const JUMP_FORCE: f32 = -11.5;
    /// Degrees per tick while airborne
    pub const CUBE_SPIN: f32 = 6.0;
    pub const CUBE_SETTLE: f32 = 0.2;

    /// Ship physics (per tick)
    pub const SHIP_GRAVITY: f32 = 0.4;
    pub const SHIP_LIFT: f32 = -0.5;
    pub const SHIP_MAX_RISE: f32 = -8.0;
    pub const SHIP_TILT_GAIN: f32 = 4.0;
    pub const SHIP_MAX_TILT: f32 = 45.0;
    pub const SHIP_TILT_SMOOTHING: f32 = 0.1;

    /// Hitbox inset on every side of the avatar box
    pub const HITBOX_MARGIN: f32 = 8.0;
    /// How far below an obstacle top the avatar's previous bottom may be and still land
    pub const LANDING_BUFFER: f32 = 15.0;

    /// Particles per burst
    pub const PARTICLE_COUNT: usize = 15;
    /// Life lost per tick (life starts at 1.0)
    pub const PARTICLE_DECAY: f32 = 0.03;
    pub const PARTICLE_SPEED: f32 = 10.0;

    /// Orbs granted per full 10% of progress
    pub const ORBS_PER_TEN_PERCENT: u32 = 1;
    pub const COMPLETION_BONUS: u32 = 20;
}

/// Parse a `#rrggbb` color into linear-ish RGBA floats.
///
/// Falls back to white for anything that is not a 6-digit hex color.
pub fn parse_hex_color(hex: &str) -> [f32; 4] {
    let digits = hex.trim_start_matches('#');
    if digits.len() != 6 || !digits.is_ascii() {
        return [1.0, 1.0, 1.0, 1.0];
    }
    let channel = |i: usize| {
        u8::from_str_radix(&digits[i..i + 2], 16)
            .map(|v| v as f32 / 255.0)
            .unwrap_or(1.0)
    };
    [channel(0), channel(2), channel(4), 1.0]
}
