//! Neon Dash entry point
//!
//! Headless native driver: plays one level with the hold input latched down,
//! credits the reward and saves progression. Set `NEON_DASH_LEVEL` (1-based)
//! to pick the level, `NEON_DASH_QUALITY` (low / medium / high) to change and
//! persist the quality preset, and `RUST_LOG` to control logging.

use std::time::{SystemTime, UNIX_EPOCH};

use neon_dash::consts::SIM_DT;
use neon_dash::persistence::{self, FileStorage};
use neon_dash::renderer;
use neon_dash::sim::{GameEvent, Simulation, Viewport};
use neon_dash::{LEVELS, Settings};

/// Directory (relative to the working directory) holding the JSON files
const DATA_DIR: &str = ".neon-dash";
/// Give up after ten simulated minutes
const MAX_FRAMES: u32 = 60 * 60 * 10;

fn level_from_env() -> usize {
    match std::env::var("NEON_DASH_LEVEL") {
        Ok(raw) => match raw.trim().parse::<usize>() {
            Ok(n) if n >= 1 => n - 1,
            _ => {
                log::warn!("NEON_DASH_LEVEL={:?} is not a level number, using 1", raw);
                0
            }
        },
        Err(_) => 0,
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Neon Dash (native) starting...");

    let mut storage = FileStorage::new(DATA_DIR);
    let mut progression = persistence::load_progression(&storage);
    let mut settings = Settings::load(&storage);
    if let Ok(name) = std::env::var("NEON_DASH_QUALITY") {
        if settings.apply_quality_name(&name) {
            if let Err(e) = settings.save(&mut storage) {
                log::warn!("Settings not saved: {}", e);
            }
        }
    }
    log::info!(
        "{} orbs, {} skins unlocked, equipped '{}'",
        progression.orbs,
        progression.unlocked_skins.len(),
        progression.equipped_skin
    );

    let seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0);
    let mut sim = Simulation::new(seed, Viewport::default());
    sim.set_max_particles(settings.max_particles());
    sim.set_avatar_color(progression.equipped_color());
    log::info!("Game initialized with seed: {}", seed);

    let index = level_from_env() % LEVELS.len();
    sim.start(index);
    sim.begin_hold();

    let mut outcome = None;
    let mut jumps = 0u32;
    let mut vertices = 0usize;
    for frame in 0..MAX_FRAMES {
        outcome = sim.update(SIM_DT);

        for event in sim.drain_events() {
            match event {
                GameEvent::Jumped => jumps += 1,
                GameEvent::Crashed { obstacle_id } => {
                    log::info!("Crashed into obstacle #{} on frame {}", obstacle_id, frame)
                }
                other => log::debug!("{:?}", other),
            }
        }

        vertices = renderer::build_frame(sim.state(), sim.level(), &settings).len();
        if outcome.is_some() {
            break;
        }
    }

    let Some(outcome) = outcome else {
        log::warn!("Run did not finish within {} frames", MAX_FRAMES);
        return;
    };

    log::info!(
        "{} at {}% after {} jumps, score {} (last frame {} vertices)",
        if outcome.completed { "LEVEL COMPLETE" } else { "GAME OVER" },
        outcome.progress,
        jumps,
        sim.score(),
        vertices
    );

    progression.apply_reward(outcome.orbs_earned);
    if let Err(e) = persistence::save_progression(&mut storage, &progression) {
        log::warn!("Progression not saved: {}", e);
    }
}
