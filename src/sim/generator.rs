//! Procedural obstacle generation
//!
//! New obstacles appear at the right edge of the viewport once the last one
//! has scrolled far enough in. Which obstacle appears is picked from a
//! weighted table per avatar mode. The stairs pattern spans several ticks
//! and is tracked by [`PatternState`]; while it runs, the normal spacing
//! gate is bypassed.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::state::{AvatarMode, Obstacle, ObstacleKind, Viewport};

/// Cube spacing: gap = base + speed * per_speed
pub const CUBE_MIN_GAP_BASE: f32 = 200.0;
pub const CUBE_MIN_GAP_PER_SPEED: f32 = 10.0;
pub const CUBE_MAX_GAP_BASE: f32 = 500.0;
pub const CUBE_MAX_GAP_PER_SPEED: f32 = 20.0;

/// Ship spacing is speed-independent
pub const SHIP_MIN_GAP: f32 = 400.0;
pub const SHIP_MAX_GAP: f32 = 700.0;

pub const SPIKE_SIZE: f32 = 40.0;
pub const BLOCK_SIZE: f32 = 50.0;

pub const STAIR_WIDTH: f32 = 60.0;
pub const STAIR_STEP_HEIGHT: f32 = 50.0;
pub const STAIR_STEPS: u8 = 3;
pub const STAIR_GAP_BASE: f32 = 50.0;
pub const STAIR_GAP_PER_SPEED: f32 = 4.0;

pub const GATE_WIDTH: f32 = 60.0;
pub const GATE_GAP_HEIGHT: f32 = 180.0;
/// Minimum height of each gate segment
pub const GATE_MIN_SEGMENT: f32 = 50.0;
pub const MID_AIR_BLOCK_SIZE: f32 = 80.0;
/// Mid-air blocks keep this far from the ceiling
pub const MID_AIR_MARGIN: f32 = 50.0;
/// Minimum space between a mid-air block and the ground
pub const MID_AIR_FLOOR_CLEARANCE: f32 = 20.0;
pub const SHIP_SPIKE_SIZE: f32 = 50.0;

/// Multi-tick generation pattern
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PatternState {
    /// Normal spacing-gated spawning
    #[default]
    Idle,
    /// Stairs in progress with `placed` steps already spawned
    Stairs { placed: u8 },
}

/// Variants picked when the cube spacing gate opens
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CubeVariant {
    Spike,
    Block,
    Stairs,
}

/// Variants picked when the ship spacing gate opens
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShipVariant {
    Spike,
    MidAirBlock,
    Gate,
}

/// Weighted variant table sampled with a single roll in [0, 1)
#[derive(Debug, Clone, Copy)]
pub struct WeightedTable<T: Copy + 'static> {
    entries: &'static [(T, f32)],
}

impl<T: Copy + 'static> WeightedTable<T> {
    pub const fn new(entries: &'static [(T, f32)]) -> Self {
        Self { entries }
    }

    pub fn total_weight(&self) -> f32 {
        self.entries.iter().map(|(_, w)| w).sum()
    }

    /// Map a roll in [0, 1) onto the cumulative weights.
    ///
    /// Rolls at or above 1 resolve to the last entry.
    pub fn pick(&self, roll: f32) -> T {
        let target = roll.clamp(0.0, 1.0) * self.total_weight();
        let mut acc = 0.0;
        for &(variant, weight) in self.entries {
            acc += weight;
            if target < acc {
                return variant;
            }
        }
        self.entries[self.entries.len() - 1].0
    }

    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> T {
        self.pick(rng.random::<f32>())
    }
}

pub const CUBE_TABLE: WeightedTable<CubeVariant> = WeightedTable::new(&[
    (CubeVariant::Spike, 0.5),
    (CubeVariant::Block, 0.3),
    (CubeVariant::Stairs, 0.2),
]);

pub const SHIP_TABLE: WeightedTable<ShipVariant> = WeightedTable::new(&[
    (ShipVariant::Spike, 0.3),
    (ShipVariant::MidAirBlock, 0.3),
    (ShipVariant::Gate, 0.4),
]);

/// An obstacle to be created (the state assigns ids)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub pos: Vec2,
    pub size: Vec2,
    pub kind: ObstacleKind,
}

impl Placement {
    fn on_ground(x: f32, viewport: &Viewport, width: f32, height: f32, kind: ObstacleKind) -> Self {
        Self {
            pos: Vec2::new(x, viewport.ground_y() - height),
            size: Vec2::new(width, height),
            kind,
        }
    }
}

/// Spacing range `[min, max]` for a mode at a given speed
pub fn gap_range(mode: AvatarMode, speed: f32) -> (f32, f32) {
    match mode {
        AvatarMode::Cube => (
            CUBE_MIN_GAP_BASE + speed * CUBE_MIN_GAP_PER_SPEED,
            CUBE_MAX_GAP_BASE + speed * CUBE_MAX_GAP_PER_SPEED,
        ),
        AvatarMode::Ship => (SHIP_MIN_GAP, SHIP_MAX_GAP),
    }
}

/// Horizontal distance between consecutive stair steps
pub fn stair_gap(speed: f32) -> f32 {
    STAIR_GAP_BASE + speed * STAIR_GAP_PER_SPEED
}

fn uniform<R: Rng + ?Sized>(rng: &mut R, lo: f32, hi: f32) -> f32 {
    lo + rng.random::<f32>() * (hi - lo).max(0.0)
}

/// Decide what to spawn this tick.
///
/// `last_x` is the left edge of the rightmost existing obstacle.
pub fn plan_spawns<R: Rng + ?Sized>(
    pattern: &mut PatternState,
    last_x: Option<f32>,
    mode: AvatarMode,
    speed: f32,
    viewport: &Viewport,
    rng: &mut R,
) -> Vec<Placement> {
    let spawn_x = viewport.width;
    let room = last_x.map(|x| spawn_x - x);

    if let PatternState::Stairs { placed } = *pattern {
        if room.is_some_and(|r| r <= stair_gap(speed)) {
            return Vec::new();
        }
        let height = STAIR_STEP_HEIGHT * f32::from(placed + 1);
        let step =
            Placement::on_ground(spawn_x, viewport, STAIR_WIDTH, height, ObstacleKind::Block);
        let placed = placed + 1;
        *pattern = if placed >= STAIR_STEPS {
            log::debug!("Stairs pattern finished");
            PatternState::Idle
        } else {
            PatternState::Stairs { placed }
        };
        return vec![step];
    }

    let (min_gap, max_gap) = gap_range(mode, speed);
    if let Some(room) = room {
        let threshold = uniform(rng, min_gap, max_gap);
        if room <= threshold {
            return Vec::new();
        }
    }

    match mode {
        AvatarMode::Cube => plan_cube(pattern, spawn_x, viewport, rng),
        AvatarMode::Ship => plan_ship(spawn_x, viewport, rng),
    }
}

fn plan_cube<R: Rng + ?Sized>(
    pattern: &mut PatternState,
    x: f32,
    viewport: &Viewport,
    rng: &mut R,
) -> Vec<Placement> {
    let placement = match CUBE_TABLE.sample(rng) {
        CubeVariant::Spike => {
            Placement::on_ground(x, viewport, SPIKE_SIZE, SPIKE_SIZE, ObstacleKind::Spike)
        }
        CubeVariant::Block => {
            Placement::on_ground(x, viewport, BLOCK_SIZE, BLOCK_SIZE, ObstacleKind::Block)
        }
        CubeVariant::Stairs => {
            log::debug!("Stairs pattern started");
            *pattern = PatternState::Stairs { placed: 1 };
            Placement::on_ground(x, viewport, STAIR_WIDTH, STAIR_STEP_HEIGHT, ObstacleKind::Block)
        }
    };
    vec![placement]
}

fn plan_ship<R: Rng + ?Sized>(x: f32, viewport: &Viewport, rng: &mut R) -> Vec<Placement> {
    let ground = viewport.ground_y();
    match SHIP_TABLE.sample(rng) {
        ShipVariant::Gate => {
            let gap_y = uniform(
                rng,
                GATE_MIN_SEGMENT,
                ground - GATE_GAP_HEIGHT - GATE_MIN_SEGMENT,
            );
            let bottom_y = gap_y + GATE_GAP_HEIGHT;
            vec![
                Placement {
                    pos: Vec2::new(x, 0.0),
                    size: Vec2::new(GATE_WIDTH, gap_y),
                    kind: ObstacleKind::Block,
                },
                Placement {
                    pos: Vec2::new(x, bottom_y),
                    size: Vec2::new(GATE_WIDTH, (ground - bottom_y).max(0.0)),
                    kind: ObstacleKind::Block,
                },
            ]
        }
        ShipVariant::MidAirBlock => {
            let y = uniform(
                rng,
                MID_AIR_MARGIN,
                ground - MID_AIR_BLOCK_SIZE - MID_AIR_FLOOR_CLEARANCE,
            );
            vec![Placement {
                pos: Vec2::new(x, y),
                size: Vec2::splat(MID_AIR_BLOCK_SIZE),
                kind: ObstacleKind::Block,
            }]
        }
        ShipVariant::Spike => {
            let y = if rng.random::<f32>() > 0.5 {
                ground - SHIP_SPIKE_SIZE
            } else {
                0.0
            };
            vec![Placement {
                pos: Vec2::new(x, y),
                size: Vec2::splat(SHIP_SPIKE_SIZE),
                kind: ObstacleKind::Spike,
            }]
        }
    }
}

/// Scroll every obstacle left and drop those fully past the left edge
pub fn advance(obstacles: &mut Vec<Obstacle>, speed: f32) {
    for obstacle in obstacles.iter_mut() {
        obstacle.pos.x -= speed;
    }
    obstacles.retain(|o| o.right() >= 0.0);
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn rng() -> Pcg32 {
        Pcg32::seed_from_u64(42)
    }

    #[test]
    fn test_weighted_table_pick() {
        assert_eq!(CUBE_TABLE.pick(0.0), CubeVariant::Spike);
        assert_eq!(CUBE_TABLE.pick(0.49), CubeVariant::Spike);
        assert_eq!(CUBE_TABLE.pick(0.5), CubeVariant::Block);
        assert_eq!(CUBE_TABLE.pick(0.79), CubeVariant::Block);
        assert_eq!(CUBE_TABLE.pick(0.81), CubeVariant::Stairs);
        assert_eq!(CUBE_TABLE.pick(1.0), CubeVariant::Stairs);

        assert_eq!(SHIP_TABLE.pick(0.1), ShipVariant::Spike);
        assert_eq!(SHIP_TABLE.pick(0.45), ShipVariant::MidAirBlock);
        assert_eq!(SHIP_TABLE.pick(0.61), ShipVariant::Gate);
    }

    #[test]
    fn test_weighted_table_distribution() {
        let mut rng = rng();
        let mut stairs = 0;
        let n = 10_000;
        for _ in 0..n {
            if CUBE_TABLE.sample(&mut rng) == CubeVariant::Stairs {
                stairs += 1;
            }
        }
        let ratio = stairs as f32 / n as f32;
        assert!((ratio - 0.2).abs() < 0.03, "stairs ratio {}", ratio);
    }

    #[test]
    fn test_gap_range_widens_with_speed() {
        let (slow_min, slow_max) = gap_range(AvatarMode::Cube, 6.5);
        let (fast_min, fast_max) = gap_range(AvatarMode::Cube, 13.0);
        assert_eq!(slow_min, 265.0);
        assert_eq!(slow_max, 630.0);
        assert!(fast_min > slow_min && fast_max > slow_max);
        assert_eq!(gap_range(AvatarMode::Ship, 13.0), (400.0, 700.0));
    }

    #[test]
    fn test_first_spawn_is_immediate() {
        let mut pattern = PatternState::Idle;
        let vp = Viewport::default();
        let spawns = plan_spawns(&mut pattern, None, AvatarMode::Cube, 6.5, &vp, &mut rng());
        assert!(!spawns.is_empty());
        assert!(spawns.iter().all(|p| p.pos.x == vp.width));
    }

    #[test]
    fn test_spacing_gate_blocks_close_spawns() {
        let vp = Viewport::default();
        let mut rng = rng();
        let (min_gap, _) = gap_range(AvatarMode::Cube, 6.5);
        for _ in 0..100 {
            let mut pattern = PatternState::Idle;
            let last_x = Some(vp.width - min_gap);
            let spawns = plan_spawns(&mut pattern, last_x, AvatarMode::Cube, 6.5, &vp, &mut rng);
            assert!(spawns.is_empty());
        }
    }

    #[test]
    fn test_spacing_gate_opens_past_max_gap() {
        let vp = Viewport::default();
        let mut rng = rng();
        let (_, max_gap) = gap_range(AvatarMode::Ship, 9.0);
        let mut pattern = PatternState::Idle;
        let last_x = Some(vp.width - max_gap - 1.0);
        let spawns = plan_spawns(&mut pattern, last_x, AvatarMode::Ship, 9.0, &vp, &mut rng);
        assert!(!spawns.is_empty());
    }

    #[test]
    fn test_stairs_pattern_runs_three_steps() {
        let vp = Viewport::default();
        let speed = 6.5;
        let mut rng = rng();
        let mut pattern = PatternState::Stairs { placed: 1 };

        // Not enough room yet
        let close = Some(vp.width - stair_gap(speed));
        let early = plan_spawns(&mut pattern, close, AvatarMode::Cube, speed, &vp, &mut rng);
        assert!(early.is_empty());
        assert_eq!(pattern, PatternState::Stairs { placed: 1 });

        let room = Some(vp.width - stair_gap(speed) - 1.0);
        let second = plan_spawns(&mut pattern, room, AvatarMode::Cube, speed, &vp, &mut rng);
        assert_eq!(second.len(), 1);
        assert_eq!(second[0].size.y, 100.0);
        assert_eq!(second[0].pos.y + second[0].size.y, vp.ground_y());
        assert_eq!(pattern, PatternState::Stairs { placed: 2 });

        let third = plan_spawns(&mut pattern, room, AvatarMode::Cube, speed, &vp, &mut rng);
        assert_eq!(third[0].size.y, 150.0);
        assert_eq!(third[0].kind, ObstacleKind::Block);
        assert_eq!(pattern, PatternState::Idle);
    }

    #[test]
    fn test_cube_placements_sit_on_ground() {
        let vp = Viewport::default();
        let mut rng = rng();
        for _ in 0..200 {
            let mut pattern = PatternState::Idle;
            for p in plan_spawns(&mut pattern, None, AvatarMode::Cube, 8.5, &vp, &mut rng) {
                assert_eq!(p.pos.y + p.size.y, vp.ground_y());
                match p.kind {
                    ObstacleKind::Spike => assert_eq!(p.size, Vec2::splat(SPIKE_SIZE)),
                    ObstacleKind::Block => {
                        assert!(p.size.x == BLOCK_SIZE || p.size.x == STAIR_WIDTH)
                    }
                }
            }
        }
    }

    #[test]
    fn test_ship_gate_segments_have_minimum_height() {
        let vp = Viewport::default();
        let mut rng = rng();
        let mut gates = 0;
        for _ in 0..500 {
            let mut pattern = PatternState::Idle;
            let spawns = plan_spawns(&mut pattern, None, AvatarMode::Ship, 9.0, &vp, &mut rng);
            assert_eq!(pattern, PatternState::Idle);
            if spawns.len() == 2 {
                gates += 1;
                let (top, bottom) = (spawns[0], spawns[1]);
                assert_eq!(top.pos.y, 0.0);
                assert!(top.size.y >= GATE_MIN_SEGMENT);
                assert!(bottom.size.y >= GATE_MIN_SEGMENT - 0.001);
                assert!((bottom.pos.y - (top.size.y + GATE_GAP_HEIGHT)).abs() < 0.001);
                assert!((bottom.pos.y + bottom.size.y - vp.ground_y()).abs() < 0.001);
            }
        }
        assert!(gates > 0);
    }

    #[test]
    fn test_ship_spikes_on_floor_or_ceiling() {
        let vp = Viewport::default();
        let mut rng = rng();
        for _ in 0..300 {
            let mut pattern = PatternState::Idle;
            for p in plan_spawns(&mut pattern, None, AvatarMode::Ship, 9.0, &vp, &mut rng) {
                if p.kind == ObstacleKind::Spike {
                    assert!(p.pos.y == 0.0 || p.pos.y + p.size.y == vp.ground_y());
                }
            }
        }
    }

    #[test]
    fn test_advance_scrolls_and_culls() {
        let mut obstacles = vec![
            Obstacle {
                id: 1,
                pos: Vec2::new(5.0, 0.0),
                size: Vec2::splat(40.0),
                kind: ObstacleKind::Spike,
                passed: true,
            },
            Obstacle {
                id: 2,
                pos: Vec2::new(-35.0, 0.0),
                size: Vec2::splat(40.0),
                kind: ObstacleKind::Spike,
                passed: true,
            },
        ];
        advance(&mut obstacles, 6.5);
        assert_eq!(obstacles.len(), 1);
        assert_eq!(obstacles[0].id, 1);
        assert_eq!(obstacles[0].pos.x, -1.5);
    }
}
