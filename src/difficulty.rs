use crate::constants::*;
use crate::types::Difficulty;

impl Difficulty {
    /// Gap reduction applied each time a pipe is cleared.
    pub fn shrink_per_pipe(&self) -> f64 {
        match self {
            Difficulty::Normal => 0.0,
            Difficulty::Hard => HARD_SHRINK_PER_PIPE,
            Difficulty::ExtraHard => EXTRA_HARD_SHRINK_PER_PIPE,
        }
    }
}

pub fn on_pipe_passed(gap_size: f64, difficulty: Difficulty) -> f64 {
    match difficulty {
        Difficulty::Normal => gap_size,
        _ => (gap_size - difficulty.shrink_per_pipe()).max(MIN_GAP),
    }
}

/// Gap to use after a difficulty switch.
///
/// Moving between Hard and ExtraHard mid-session keeps the shrunk gap so the
/// squeeze continues where it was. Every other switch starts from the base gap.
pub fn on_difficulty_changed(old: Difficulty, new: Difficulty, session_active: bool, gap_size: f64) -> f64 {
    match (old, new) {
        (_, Difficulty::Normal) => BASE_GAP,
        (Difficulty::Hard | Difficulty::ExtraHard, Difficulty::Hard | Difficulty::ExtraHard) if session_active => gap_size,
        _ => BASE_GAP,
    }
}
