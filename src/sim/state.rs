//! Simulation state and entity types
//!
//! Everything a tick reads or writes lives in [`SimulationState`]; there is
//! no ambient mutable state anywhere else in the crate.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::Aabb;
use super::generator::PatternState;
use crate::consts::*;

/// Lifecycle of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RunPhase {
    /// Idle, nothing simulates except leftover particles
    #[default]
    Menu,
    /// Simulation active
    Playing,
    /// Run ended in a lethal collision
    GameOver,
    /// Run reached the level length
    LevelComplete,
}

impl RunPhase {
    pub fn is_terminal(self) -> bool {
        matches!(self, RunPhase::GameOver | RunPhase::LevelComplete)
    }
}

/// How the avatar responds to the hold signal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AvatarMode {
    /// Jumps while grounded, spins in the air
    Cube,
    /// Thrusts upward while holding, falls otherwise
    Ship,
}

/// Drawing surface size reported by the presentation layer
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: DEFAULT_VIEWPORT_WIDTH,
            height: DEFAULT_VIEWPORT_HEIGHT,
        }
    }
}

impl Viewport {
    /// Clamped so that the floor never sits above the ceiling
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width: width.max(1.0),
            height: height.max(GROUND_HEIGHT + AVATAR_SIZE),
        }
    }

    /// Y coordinate of the ground surface
    #[inline]
    pub fn ground_y(&self) -> f32 {
        self.height - GROUND_HEIGHT
    }

    /// Lowest allowed avatar y (top edge) for an avatar of the given height
    #[inline]
    pub fn floor_y(&self, avatar_height: f32) -> f32 {
        self.ground_y() - avatar_height
    }
}

/// The player-controlled avatar
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Avatar {
    /// Top-left corner
    pub pos: Vec2,
    /// Side length of the square
    pub size: f32,
    /// Vertical velocity (positive is down)
    pub vel_y: f32,
    /// Degrees
    pub rotation: f32,
    pub grounded: bool,
    pub color: String,
    pub mode: AvatarMode,
}

impl Avatar {
    /// Spawn for a fresh run: on the floor for Cube, mid-air for Ship
    pub fn spawn(mode: AvatarMode, color: &str, viewport: &Viewport) -> Self {
        let x = viewport.width * AVATAR_LANE;
        let (y, grounded) = match mode {
            AvatarMode::Cube => (viewport.floor_y(AVATAR_SIZE), true),
            AvatarMode::Ship => (viewport.height / 2.0, false),
        };
        Self {
            pos: Vec2::new(x, y),
            size: AVATAR_SIZE,
            vel_y: 0.0,
            rotation: 0.0,
            grounded,
            color: color.to_string(),
            mode,
        }
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::new(self.pos, Vec2::splat(self.size))
    }

    /// Forgiving hitbox used for obstacle collisions
    pub fn hitbox(&self) -> Aabb {
        self.bounds().inset(HITBOX_MARGIN)
    }

    pub fn center(&self) -> Vec2 {
        self.pos + Vec2::splat(self.size / 2.0)
    }

    /// Bottom-center point (jump particles spawn here)
    pub fn feet(&self) -> Vec2 {
        Vec2::new(self.pos.x + self.size / 2.0, self.pos.y + self.size)
    }
}

/// Obstacle types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObstacleKind {
    /// Always lethal on contact
    Spike,
    /// Can be landed on from above
    Block,
}

/// A scrolling obstacle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: u32,
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    pub kind: ObstacleKind,
    /// Set once the avatar has cleared it (scored)
    pub passed: bool,
}

impl Obstacle {
    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::new(self.pos, self.size)
    }

    /// Ceiling spikes hang from y = 0 and point down
    pub fn hangs_from_ceiling(&self) -> bool {
        self.kind == ObstacleKind::Spike && self.pos.y <= 0.0
    }
}

/// A particle for visual effects
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    /// 0-1, decreases every tick
    pub life: f32,
    pub color: [f32; 4],
    pub radius: f32,
}

/// Things that happened during a tick, drained by the presentation layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    RunStarted { level_index: usize },
    Jumped,
    Landed { obstacle_id: u32 },
    ObstaclePassed { obstacle_id: u32 },
    Crashed { obstacle_id: u32 },
    RunEnded(RunOutcome),
}

/// Summary of a finished run, for the persistence collaborator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunOutcome {
    pub completed: bool,
    /// Progress percent at the moment the run ended
    pub progress: u32,
    pub orbs_earned: u32,
}

/// Complete simulation state
#[derive(Debug, Clone)]
pub struct SimulationState {
    /// Seed both random streams were derived from
    pub seed: u64,
    pub phase: RunPhase,
    /// Catalog index of the level being played
    pub level_index: usize,
    pub viewport: Viewport,
    pub avatar: Avatar,
    /// Ordered by spawn (rightmost last)
    pub obstacles: Vec<Obstacle>,
    /// Visual particles (not gameplay-affecting)
    pub particles: Vec<Particle>,
    pub distance: f32,
    pub score: u32,
    /// 0-100
    pub progress: u32,
    pub pattern: PatternState,
    /// Ticks simulated in the current run
    pub time_ticks: u64,
    /// Particle cap (0 disables particles)
    pub max_particles: usize,
    /// Outcome of the last finished run
    pub last_outcome: Option<RunOutcome>,
    /// Pending events (see [`SimulationState::drain_events`])
    pub events: Vec<GameEvent>,
    /// Obstacle generation randomness
    pub(crate) rng: Pcg32,
    /// Cosmetic randomness, kept apart so particle settings never change layouts
    pub(crate) fx_rng: Pcg32,
    next_id: u32,
}

/// Default particle cap
pub const MAX_PARTICLES: usize = 256;

impl SimulationState {
    pub fn new(seed: u64, viewport: Viewport) -> Self {
        Self {
            seed,
            phase: RunPhase::Menu,
            level_index: 0,
            viewport,
            avatar: Avatar::spawn(AvatarMode::Cube, crate::shop::DEFAULT_SKIN_COLOR, &viewport),
            obstacles: Vec::new(),
            particles: Vec::new(),
            distance: 0.0,
            score: 0,
            progress: 0,
            pattern: PatternState::Idle,
            time_ticks: 0,
            max_particles: MAX_PARTICLES,
            last_outcome: None,
            events: Vec::new(),
            rng: Pcg32::seed_from_u64(seed),
            fx_rng: Pcg32::seed_from_u64(seed.wrapping_add(0x9E37_79B9_7F4A_7C15)),
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id = self.next_id.wrapping_add(1);
        id
    }

    /// Clear every per-run field and spawn the avatar for `mode`
    pub fn reset_run(&mut self, level_index: usize, mode: AvatarMode, color: &str) {
        self.level_index = level_index;
        self.avatar = Avatar::spawn(mode, color, &self.viewport);
        self.obstacles.clear();
        self.particles.clear();
        self.distance = 0.0;
        self.score = 0;
        self.progress = 0;
        self.pattern = PatternState::Idle;
        self.time_ticks = 0;
        self.last_outcome = None;
    }

    /// Take all pending events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Rightmost (most recently spawned) obstacle
    pub fn last_obstacle(&self) -> Option<&Obstacle> {
        self.obstacles.last()
    }
}
