//! Simulation controller
//!
//! Owns the [`SimulationState`], the latched hold signal and the run
//! commands (start / retry / acknowledge). Presentation code talks to this
//! type only; it never mutates the state directly.

use super::run;
use super::state::{GameEvent, RunOutcome, RunPhase, SimulationState, Viewport};
use super::tick::{TickInput, tick};
use crate::consts::{MAX_SUBSTEPS, SIM_DT};
use crate::levels::{self, LevelDefinition};
use crate::shop::DEFAULT_SKIN_COLOR;

/// Single owner of all simulation state
#[derive(Debug, Clone)]
pub struct Simulation {
    state: SimulationState,
    /// Last write wins; read once at the start of each tick
    hold: bool,
    /// Equipped skin color applied at the next run start
    avatar_color: String,
    /// Frame time not yet consumed by fixed ticks
    accumulator: f32,
}

impl Simulation {
    pub fn new(seed: u64, viewport: Viewport) -> Self {
        Self {
            state: SimulationState::new(seed, viewport),
            hold: false,
            avatar_color: DEFAULT_SKIN_COLOR.to_string(),
            accumulator: 0.0,
        }
    }

    pub fn state(&self) -> &SimulationState {
        &self.state
    }

    pub fn phase(&self) -> RunPhase {
        self.state.phase
    }

    pub fn level_index(&self) -> usize {
        self.state.level_index
    }

    pub fn level(&self) -> &'static LevelDefinition {
        levels::level_at(self.state.level_index)
    }

    pub fn is_holding(&self) -> bool {
        self.hold
    }

    /// Color resolved from the equipped skin; takes effect at the next start
    pub fn set_avatar_color(&mut self, color: &str) {
        self.avatar_color = color.to_string();
        if self.state.phase == RunPhase::Menu {
            self.state.avatar.color = self.avatar_color.clone();
        }
    }

    /// Particle cap from settings (0 disables particles)
    pub fn set_max_particles(&mut self, cap: usize) {
        self.state.max_particles = cap;
        if self.state.particles.len() > cap {
            let excess = self.state.particles.len() - cap;
            self.state.particles.drain(..excess);
        }
    }

    /// New drawing surface size. On the menu the idle avatar is re-seated on the floor.
    pub fn resize(&mut self, width: f32, height: f32) {
        self.state.viewport = Viewport::new(width, height);
        if self.state.phase == RunPhase::Menu {
            let floor = self.state.viewport.floor_y(self.state.avatar.size);
            self.state.avatar.pos.y = floor;
            self.state.avatar.pos.x = self.state.viewport.width * crate::consts::AVATAR_LANE;
        }
    }

    /// Input began. Ignored unless a run is in progress.
    pub fn begin_hold(&mut self) {
        if self.state.phase == RunPhase::Playing {
            self.hold = true;
        }
    }

    /// Input ended
    pub fn end_hold(&mut self) {
        self.hold = false;
    }

    /// Menu -> Playing on the given level (index wraps into the catalog)
    pub fn start(&mut self, level_index: usize) -> bool {
        if self.state.phase != RunPhase::Menu {
            log::debug!("Ignoring start in {:?}", self.state.phase);
            return false;
        }
        self.begin_run(levels::wrap_index(level_index));
        true
    }

    /// GameOver | LevelComplete -> Playing on the same level
    pub fn retry(&mut self) -> bool {
        if !self.state.phase.is_terminal() {
            log::debug!("Ignoring retry in {:?}", self.state.phase);
            return false;
        }
        self.begin_run(self.state.level_index);
        true
    }

    /// GameOver | LevelComplete -> Menu
    pub fn acknowledge(&mut self) -> bool {
        if !self.state.phase.is_terminal() {
            log::debug!("Ignoring acknowledge in {:?}", self.state.phase);
            return false;
        }
        self.state.phase = RunPhase::Menu;
        self.hold = false;
        self.accumulator = 0.0;
        let level = self.level();
        self.state.reset_run(self.state.level_index, level.mode, &self.avatar_color);
        // Menu always shows the idle avatar on the floor
        self.state.avatar.pos.y = self.state.viewport.floor_y(self.state.avatar.size);
        self.state.avatar.grounded = true;
        true
    }

    fn begin_run(&mut self, level_index: usize) {
        let level = levels::level_at(level_index);
        self.state.reset_run(level_index, level.mode, &self.avatar_color);
        self.state.phase = RunPhase::Playing;
        self.state.events.push(GameEvent::RunStarted { level_index });
        self.hold = false;
        self.accumulator = 0.0;
        log::info!(
            "Starting level {} '{}' ({:?}, speed {}, length {})",
            level.id,
            level.name,
            level.mode,
            level.speed,
            level.length
        );
    }

    /// Run exactly one tick. Returns the outcome if this tick ended the run.
    pub fn step(&mut self) -> Option<RunOutcome> {
        let was_playing = self.state.phase == RunPhase::Playing;
        let input = TickInput { hold: self.hold };
        let level = self.level();
        tick(&mut self.state, &input, level);
        if was_playing && self.state.phase.is_terminal() {
            self.state.last_outcome
        } else {
            None
        }
    }

    /// Consume `dt` seconds of frame time in fixed ticks.
    ///
    /// Stops scheduling ticks the moment a run ends; leftover time is dropped.
    /// Non-finite frame times are skipped.
    pub fn update(&mut self, dt: f32) -> Option<RunOutcome> {
        if !dt.is_finite() {
            log::debug!("Skipping frame with dt {}", dt);
            return None;
        }
        self.accumulator += dt.clamp(0.0, 0.1);

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            self.accumulator -= SIM_DT;
            substeps += 1;
            if let Some(outcome) = self.step() {
                self.accumulator = 0.0;
                return Some(outcome);
            }
        }
        if substeps == MAX_SUBSTEPS {
            // Too far behind; catching up would only stutter
            self.accumulator = 0.0;
        }
        None
    }

    /// Progress percent of the current run
    pub fn progress(&self) -> u32 {
        self.state.progress
    }

    pub fn score(&self) -> u32 {
        self.state.score
    }

    /// Take the pending events.
    ///
    /// Every tick appends to the queue, so hosts must drain it once per frame.
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        self.state.drain_events()
    }

    /// Reward the current run would earn if it ended now
    pub fn pending_reward(&self) -> u32 {
        run::reward(
            self.state.progress,
            self.state.phase == RunPhase::LevelComplete,
        )
    }
}
