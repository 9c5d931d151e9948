//! Autonomous play.
//!
//! The policy flaps when the bird is falling and about to sink below the
//! safe line just above the lower pipe segment.

use crate::constants::*;
use crate::entities::{Bird, Pipe};
use crate::timer::TimerToken;
use crate::types::Phase;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AutobotState {
    pub enabled: bool,
    pub restart_scheduled: bool,
    pub pending: Option<TimerToken>,
}

impl AutobotState {
    /// Drops the reference to a pending restart, returning its token.
    pub fn clear_restart(&mut self) -> Option<TimerToken> {
        self.restart_scheduled = false;
        self.pending.take()
    }
}

/// Lowest point the bird's bottom edge may reach before flapping.
pub fn target_bottom_y(pipe: &Pipe, bird_radius: f64) -> f64 {
    pipe.gap_end_y() - (bird_radius / 2.0 + AUTOBOT_SAFETY_EXTRA)
}

pub fn should_flap(bird: &Bird, pipe: Option<&Pipe>, screen_height: f64) -> bool {
    match pipe.filter(|p| p.is_valid()) {
        Some(pipe) => bird.y_velocity >= 0.0 && bird.bottom() >= target_bottom_y(pipe, bird.radius),
        None => {
            bird.y_velocity > AUTOBOT_FALLBACK_VELOCITY
                && bird.bottom() > AUTOBOT_FALLBACK_HEIGHT_FRACTION * screen_height
        }
    }
}

/// Delay before the first auto-flap after switching the bot on, or `None`
/// when a session is already underway.
pub fn enable_delay_ms(phase: Phase) -> Option<u64> {
    match phase {
        Phase::Idle => Some(AUTOBOT_ENABLE_DELAY_IDLE_MS),
        Phase::GameOver => Some(AUTOBOT_ENABLE_DELAY_OVER_MS),
        Phase::Running | Phase::Paused => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bird(y: f64, velocity: f64) -> Bird {
        let mut bird = Bird::new(BIRD_X, y);
        bird.y_velocity = velocity;
        bird
    }

    #[test]
    fn flaps_when_falling_onto_lower_segment() {
        let pipe = Pipe::new(200.0, 100.0, BASE_GAP);
        // target = 255 - 10.5 = 244.5
        assert!(should_flap(&bird(230.0, 1.0), Some(&pipe), SCREEN_HEIGHT));
        assert!(should_flap(&bird(229.5, 0.0), Some(&pipe), SCREEN_HEIGHT));
    }

    #[test]
    fn holds_while_rising_or_high_enough() {
        let pipe = Pipe::new(200.0, 100.0, BASE_GAP);
        assert!(!should_flap(&bird(240.0, -2.0), Some(&pipe), SCREEN_HEIGHT));
        assert!(!should_flap(&bird(200.0, 3.0), Some(&pipe), SCREEN_HEIGHT));
    }

    #[test]
    fn falls_back_to_screen_threshold_without_pipe() {
        let threshold = AUTOBOT_FALLBACK_HEIGHT_FRACTION * SCREEN_HEIGHT;
        let low = threshold - BIRD_RADIUS + 1.0;
        assert!(should_flap(&bird(low, 0.5), None, SCREEN_HEIGHT));
        assert!(!should_flap(&bird(low, 0.1), None, SCREEN_HEIGHT));
        assert!(!should_flap(&bird(100.0, 5.0), None, SCREEN_HEIGHT));
    }

    #[test]
    fn malformed_pipe_uses_fallback() {
        let broken = Pipe::new(100.0, f64::NAN, BASE_GAP);
        assert!(!should_flap(&bird(100.0, 1.0), Some(&broken), SCREEN_HEIGHT));
        assert!(should_flap(&bird(400.0, 1.0), Some(&broken), SCREEN_HEIGHT));
    }

    #[test]
    fn enable_delay_depends_on_phase() {
        assert_eq!(enable_delay_ms(Phase::Idle), Some(AUTOBOT_ENABLE_DELAY_IDLE_MS));
        assert_eq!(enable_delay_ms(Phase::GameOver), Some(AUTOBOT_ENABLE_DELAY_OVER_MS));
        assert_eq!(enable_delay_ms(Phase::Running), None);
        assert_eq!(enable_delay_ms(Phase::Paused), None);
    }
}
