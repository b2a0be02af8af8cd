//! Run lifecycle: progress, rewards and terminal transitions

use super::state::{GameEvent, RunOutcome, RunPhase, SimulationState};
use crate::consts::{COMPLETION_BONUS, ORBS_PER_TEN_PERCENT};

/// Integer progress percent for a distance, clamped to [0, 100]
pub fn progress_percent(distance: f32, length: f32) -> u32 {
    if length <= 0.0 {
        return 100;
    }
    ((distance / length) * 100.0).floor().clamp(0.0, 100.0) as u32
}

/// Orbs earned for a finished run
pub fn reward(progress: u32, completed: bool) -> u32 {
    let mut orbs = (progress.min(100) / 10) * ORBS_PER_TEN_PERCENT;
    if completed {
        orbs += COMPLETION_BONUS;
    }
    orbs
}

/// Move a playing run into its terminal phase and report the outcome.
///
/// Does nothing unless the run is currently playing.
pub fn finish(state: &mut SimulationState, completed: bool) -> Option<RunOutcome> {
    if state.phase != RunPhase::Playing {
        return None;
    }

    let outcome = RunOutcome {
        completed,
        progress: state.progress,
        orbs_earned: reward(state.progress, completed),
    };
    state.phase = if completed {
        RunPhase::LevelComplete
    } else {
        RunPhase::GameOver
    };
    state.last_outcome = Some(outcome);
    state.events.push(GameEvent::RunEnded(outcome));

    log::info!(
        "Run {} on level {} at {}% (score {}, +{} orbs)",
        if completed { "completed" } else { "failed" },
        state.level_index + 1,
        outcome.progress,
        state.score,
        outcome.orbs_earned
    );
    Some(outcome)
}
