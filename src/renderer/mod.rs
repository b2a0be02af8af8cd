//! CPU-side rendering module
//!
//! Stateless: `build_frame` turns a simulation snapshot into a triangle list
//! in screen pixels (origin top-left, y down). Uploading and drawing the
//! buffer is left to whatever backend hosts the game.

pub mod shapes;
pub mod vertex;

use glam::Vec2;

pub use vertex::{Vertex, colors};

use crate::consts::GROUND_HEIGHT;
use crate::levels::LevelDefinition;
use crate::parse_hex_color;
use crate::settings::Settings;
use crate::sim::{Avatar, AvatarMode, Obstacle, ObstacleKind, RunPhase, SimulationState};

/// Background grid cell size in pixels
pub const GRID_SIZE: f32 = 50.0;
/// Grid scrolls at half the run speed
pub const GRID_PARALLAX: f32 = 0.5;
const GRID_LINE: f32 = 1.0;
const GROUND_LINE: f32 = 2.0;
const OUTLINE: f32 = 2.0;
const PROGRESS_BAR_HEIGHT: f32 = 6.0;
const PARTICLE_SEGMENTS: u32 = 8;

/// Build the full frame for the current state
pub fn build_frame(
    state: &SimulationState,
    level: &LevelDefinition,
    settings: &Settings,
) -> Vec<Vertex> {
    let mut out = Vec::with_capacity(
        2048 + state.obstacles.len() * 24 + state.particles.len() * PARTICLE_SEGMENTS as usize * 3,
    );
    let palette = &level.palette;
    let width = state.viewport.width;
    let height = state.viewport.height;

    // Background
    shapes::rect(
        &mut out,
        Vec2::ZERO,
        Vec2::new(width, height),
        parse_hex_color(palette.background),
    );
    if settings.quality.grid_enabled() {
        draw_grid(&mut out, state, parse_hex_color(palette.secondary));
    }

    // Ground strip with a bright top edge
    let ground_y = state.viewport.ground_y();
    shapes::rect(
        &mut out,
        Vec2::new(0.0, ground_y),
        Vec2::new(width, GROUND_HEIGHT),
        parse_hex_color(palette.ground),
    );
    shapes::rect(
        &mut out,
        Vec2::new(0.0, ground_y - GROUND_LINE / 2.0),
        Vec2::new(width, GROUND_LINE),
        colors::WHITE,
    );

    let obstacle_color = parse_hex_color(palette.obstacle);
    for obstacle in &state.obstacles {
        draw_obstacle(&mut out, obstacle, level.mode, obstacle_color);
    }

    // The avatar disappears in the crash burst
    if state.phase != RunPhase::GameOver {
        draw_avatar(&mut out, &state.avatar);
    }

    for particle in &state.particles {
        let mut color = particle.color;
        color[3] *= particle.life.clamp(0.0, 1.0);
        shapes::circle(&mut out, particle.pos, particle.radius, color, PARTICLE_SEGMENTS);
    }

    if settings.show_progress && state.phase == RunPhase::Playing {
        draw_progress(&mut out, width, state.progress, parse_hex_color(palette.player));
    }

    out
}

fn draw_grid(out: &mut Vec<Vertex>, state: &SimulationState, color: [f32; 4]) {
    let width = state.viewport.width;
    let height = state.viewport.height;
    let offset = (state.distance * GRID_PARALLAX) % GRID_SIZE;

    let mut x = -offset;
    while x < width {
        shapes::rect(out, Vec2::new(x, 0.0), Vec2::new(GRID_LINE, height), color);
        x += GRID_SIZE;
    }
    let mut y = 0.0;
    while y < height {
        shapes::rect(out, Vec2::new(0.0, y), Vec2::new(width, GRID_LINE), color);
        y += GRID_SIZE;
    }
}

fn draw_obstacle(out: &mut Vec<Vertex>, obstacle: &Obstacle, mode: AvatarMode, color: [f32; 4]) {
    let (pos, size) = (obstacle.pos, obstacle.size);
    match obstacle.kind {
        ObstacleKind::Spike => {
            let mid = pos.x + size.x / 2.0;
            if mode == AvatarMode::Ship && obstacle.hangs_from_ceiling() {
                // Points down from the ceiling
                shapes::triangle(
                    out,
                    pos,
                    Vec2::new(mid, pos.y + size.y),
                    Vec2::new(pos.x + size.x, pos.y),
                    color,
                );
            } else {
                shapes::triangle(
                    out,
                    Vec2::new(pos.x, pos.y + size.y),
                    Vec2::new(mid, pos.y),
                    pos + size,
                    color,
                );
            }
        }
        ObstacleKind::Block => {
            shapes::rect(out, pos, size, color);
            shapes::rect_outline(out, pos, size, OUTLINE, colors::WHITE);
            shapes::rect(out, pos, Vec2::new(size.x, size.y / 2.0), colors::BLOCK_SHEEN);
        }
    }
}

fn draw_avatar(out: &mut Vec<Vertex>, avatar: &Avatar) {
    let color = parse_hex_color(&avatar.color);
    let center = avatar.center();
    let s = avatar.size;

    match avatar.mode {
        AvatarMode::Cube => {
            shapes::rotated_square(out, center, s / 2.0, avatar.rotation, color);
            shapes::rotated_square(out, center, s / 4.0, avatar.rotation, colors::BLACK);
        }
        AvatarMode::Ship => {
            // Nose points along +x before tilting
            let hull = [
                Vec2::new(s / 2.0, 0.0),
                Vec2::new(-s / 2.0, -s / 3.0),
                Vec2::new(-s / 2.0, s / 3.0),
            ];
            let cockpit = [
                Vec2::new(s / 4.0, 0.0),
                Vec2::new(-s / 4.0, -s / 6.0),
                Vec2::new(-s / 4.0, s / 6.0),
            ];
            shapes::rotated_triangle(out, center, hull, avatar.rotation, color);
            shapes::rotated_triangle(out, center, cockpit, avatar.rotation, colors::BLACK);
        }
    }
}

fn draw_progress(out: &mut Vec<Vertex>, width: f32, progress: u32, color: [f32; 4]) {
    shapes::rect(
        out,
        Vec2::ZERO,
        Vec2::new(width, PROGRESS_BAR_HEIGHT),
        colors::PROGRESS_TRACK,
    );
    let filled = width * progress.min(100) as f32 / 100.0;
    if filled > 0.0 {
        shapes::rect(out, Vec2::ZERO, Vec2::new(filled, PROGRESS_BAR_HEIGHT), color);
    }
}
