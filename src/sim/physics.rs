//! Avatar physics integration
//!
//! Per-tick (not per-second) units throughout; one call advances one frame.

use super::state::{Avatar, AvatarMode};
use crate::consts::*;

/// Exponential ease of `current` toward `target`
#[inline]
fn ease(current: f32, target: f32, factor: f32) -> f32 {
    current + (target - current) * factor
}

/// Nearest multiple of 90 degrees
#[inline]
pub fn nearest_right_angle(degrees: f32) -> f32 {
    (degrees / 90.0).round() * 90.0
}

/// Advance the avatar by one tick.
///
/// `hold` is the latched input read at the start of the tick and `floor_y`
/// the lowest allowed top edge. Returns true if a cube jump fired.
pub fn integrate(avatar: &mut Avatar, hold: bool, floor_y: f32) -> bool {
    let jumped = match avatar.mode {
        AvatarMode::Cube => integrate_cube(avatar, hold),
        AvatarMode::Ship => {
            integrate_ship(avatar, hold);
            false
        }
    };
    clamp_to_bounds(avatar, floor_y);
    jumped
}

fn integrate_cube(avatar: &mut Avatar, hold: bool) -> bool {
    // Holding re-triggers the jump on every grounded tick
    let jumped = hold && avatar.grounded;
    if jumped {
        avatar.vel_y = JUMP_FORCE;
        avatar.grounded = false;
    }

    avatar.vel_y += GRAVITY;
    avatar.pos.y += avatar.vel_y;

    if avatar.grounded {
        let upright = nearest_right_angle(avatar.rotation);
        avatar.rotation = ease(avatar.rotation, upright, CUBE_SETTLE);
    } else {
        avatar.rotation += CUBE_SPIN;
    }
    jumped
}

fn integrate_ship(avatar: &mut Avatar, hold: bool) {
    if hold {
        avatar.vel_y = (avatar.vel_y + SHIP_LIFT).max(SHIP_MAX_RISE);
    } else {
        avatar.vel_y += SHIP_GRAVITY;
    }
    avatar.pos.y += avatar.vel_y;

    let tilt = (avatar.vel_y * SHIP_TILT_GAIN).clamp(-SHIP_MAX_TILT, SHIP_MAX_TILT);
    avatar.rotation = ease(avatar.rotation, tilt, SHIP_TILT_SMOOTHING);
}

/// Keep the avatar between the ceiling (0) and `floor_y`
pub fn clamp_to_bounds(avatar: &mut Avatar, floor_y: f32) {
    if avatar.pos.y >= floor_y {
        avatar.pos.y = floor_y;
        avatar.vel_y = 0.0;
        avatar.grounded = true;
    } else if avatar.pos.y <= 0.0 {
        avatar.pos.y = 0.0;
        // The ceiling is not ground: only the ship loses its velocity
        if avatar.mode == AvatarMode::Ship {
            avatar.vel_y = 0.0;
        }
    }
}
