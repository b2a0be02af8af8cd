//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One tick per fixed timestep, tuning constants are per tick
//! - Seeded RNG only (layout and cosmetic streams are separate)
//! - Stable iteration order (obstacles by spawn order)
//! - No rendering or platform dependencies

pub mod collision;
pub mod controller;
pub mod generator;
pub mod particles;
pub mod physics;
pub mod run;
pub mod state;
pub mod tick;

pub use collision::{Aabb, CollisionReport, Contact};
pub use controller::Simulation;
pub use generator::{PatternState, WeightedTable};
pub use run::{progress_percent, reward};
pub use state::{
    Avatar, AvatarMode, GameEvent, MAX_PARTICLES, Obstacle, ObstacleKind, Particle, RunOutcome,
    RunPhase, SimulationState, Viewport,
};
pub use tick::{TickInput, tick};
