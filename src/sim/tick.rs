//! Per-frame simulation tick
//!
//! One call advances the run by exactly one frame. Stage order is fixed:
//! physics, obstacle generation and scrolling, collision, scoring, progress,
//! terminal transition, then particle decay. Collision therefore always sees
//! the avatar's post-physics position and the obstacles' post-scroll
//! positions.

use super::collision;
use super::generator;
use super::particles;
use super::physics;
use super::run;
use super::state::{GameEvent, Obstacle, RunPhase, SimulationState};
use crate::levels::LevelDefinition;
use crate::parse_hex_color;

/// Input sampled for a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    /// Latched hold signal (press or touch held down)
    pub hold: bool,
}

impl TickInput {
    pub fn holding() -> Self {
        Self { hold: true }
    }
}

const CRASH_COLOR: [f32; 4] = [1.0, 1.0, 1.0, 1.0];

/// Advance the simulation by one tick
pub fn tick(state: &mut SimulationState, input: &TickInput, level: &LevelDefinition) {
    if state.phase != RunPhase::Playing {
        // Leftover bursts keep fading on menus and result screens
        particles::update(&mut state.particles);
        return;
    }

    state.time_ticks += 1;

    // --- Physics ---
    let floor_y = state.viewport.floor_y(state.avatar.size);
    if physics::integrate(&mut state.avatar, input.hold, floor_y) {
        state.events.push(GameEvent::Jumped);
        particles::spawn_burst(
            &mut state.particles,
            &mut state.fx_rng,
            state.avatar.feet(),
            parse_hex_color(level.palette.ground),
            state.max_particles,
        );
    }

    // --- Generation ---
    let last_x = state.last_obstacle().map(|o| o.pos.x);
    let placements = generator::plan_spawns(
        &mut state.pattern,
        last_x,
        level.mode,
        level.speed,
        &state.viewport,
        &mut state.rng,
    );
    for placement in placements {
        let id = state.next_entity_id();
        state.obstacles.push(Obstacle {
            id,
            pos: placement.pos,
            size: placement.size,
            kind: placement.kind,
            passed: false,
        });
    }
    generator::advance(&mut state.obstacles, level.speed);

    // --- Collision ---
    let report = collision::resolve(&mut state.avatar, &state.obstacles);
    for obstacle_id in report.landings {
        state.events.push(GameEvent::Landed { obstacle_id });
    }
    if let Some(obstacle_id) = report.lethal {
        state.events.push(GameEvent::Crashed { obstacle_id });
        particles::spawn_burst(
            &mut state.particles,
            &mut state.fx_rng,
            state.avatar.center(),
            CRASH_COLOR,
            state.max_particles,
        );
    }

    // --- Scoring ---
    for obstacle_id in collision::mark_passed(state.avatar.pos.x, &mut state.obstacles) {
        state.score += 1;
        state.events.push(GameEvent::ObstaclePassed { obstacle_id });
    }

    // --- Progress ---
    state.distance += level.speed;
    state.progress = state
        .progress
        .max(run::progress_percent(state.distance, level.length));

    // --- Terminal transition (a crash beats crossing the finish line) ---
    if report.lethal.is_some() {
        run::finish(state, false);
    } else if state.distance >= level.length {
        state.progress = 100;
        run::finish(state, true);
    }

    particles::update(&mut state.particles);
}
