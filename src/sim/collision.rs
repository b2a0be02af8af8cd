//! Collision detection and response
//!
//! Axis-aligned boxes only. The interesting part is the landing test: a
//! contact with a block counts as a landing when the avatar is falling and
//! its previous bottom edge (estimated as `y - vel_y`) was at or above the
//! block top plus a small forgiveness buffer. Everything else is lethal.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::state::{Avatar, Obstacle, ObstacleKind};
use crate::consts::LANDING_BUFFER;

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    pub fn new(pos: Vec2, size: Vec2) -> Self {
        Self {
            min: pos,
            max: pos + size,
        }
    }

    /// Shrink by `margin` on every side
    pub fn inset(&self, margin: f32) -> Self {
        Self {
            min: self.min + Vec2::splat(margin),
            max: self.max - Vec2::splat(margin),
        }
    }

    #[inline]
    pub fn size(&self) -> Vec2 {
        self.max - self.min
    }

    /// Strict overlap: touching edges do not count
    #[inline]
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.min.x < other.max.x
            && self.max.x > other.min.x
            && self.min.y < other.max.y
            && self.max.y > other.min.y
    }
}

/// How an overlapping contact resolves
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Contact {
    /// Avatar lands on top of the obstacle
    Landing,
    /// Run ends
    Lethal,
}

/// Result of resolving the avatar against every obstacle
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CollisionReport {
    /// Obstacles the avatar landed on this tick
    pub landings: Vec<u32>,
    /// First lethal obstacle, if any
    pub lethal: Option<u32>,
}

/// Classify an overlapping contact.
///
/// Spikes are always lethal regardless of approach.
pub fn classify(avatar: &Avatar, obstacle: &Obstacle) -> Contact {
    let prev_y = avatar.pos.y - avatar.vel_y;
    let falling = avatar.vel_y >= 0.0;
    let was_above = prev_y + avatar.size <= obstacle.pos.y + LANDING_BUFFER;

    if obstacle.kind == ObstacleKind::Block && falling && was_above {
        Contact::Landing
    } else {
        Contact::Lethal
    }
}

/// Snap the avatar on top of an obstacle, never past the ceiling
pub fn land_on(avatar: &mut Avatar, obstacle: &Obstacle) {
    avatar.pos.y = (obstacle.pos.y - avatar.size).max(0.0);
    avatar.vel_y = 0.0;
    avatar.grounded = true;
}

/// Test the avatar against all obstacles in order, applying landings.
///
/// Stops at the first lethal contact: once the run is lost, later
/// obstacles cannot change the outcome.
pub fn resolve(avatar: &mut Avatar, obstacles: &[Obstacle]) -> CollisionReport {
    let mut report = CollisionReport::default();

    for obstacle in obstacles {
        // Hitbox is recomputed per obstacle since a landing moves the avatar
        if !avatar.hitbox().overlaps(&obstacle.bounds()) {
            continue;
        }
        match classify(avatar, obstacle) {
            Contact::Landing => {
                land_on(avatar, obstacle);
                report.landings.push(obstacle.id);
            }
            Contact::Lethal => {
                report.lethal = Some(obstacle.id);
                break;
            }
        }
    }

    report
}

/// Mark obstacles whose right edge has passed the avatar's left edge.
///
/// Returns the ids scored this tick; each obstacle scores at most once.
pub fn mark_passed(avatar_x: f32, obstacles: &mut [Obstacle]) -> Vec<u32> {
    let mut scored = Vec::new();
    for obstacle in obstacles.iter_mut() {
        if !obstacle.passed && obstacle.right() < avatar_x {
            obstacle.passed = true;
            scored.push(obstacle.id);
        }
    }
    scored
}
