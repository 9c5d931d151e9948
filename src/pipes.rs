//! Gap placement: three reference positions per session, visited in order.

use crate::constants::*;
use log::warn;
use rand::Rng;

#[derive(Clone, Debug, PartialEq)]
pub struct PipePositionCycle {
    positions: [f64; 3],
    index: usize,
}

impl PipePositionCycle {
    /// Builds the cycle for a session and picks a random starting slot.
    pub fn new(gap_size: f64, playable_height: f64, bird_radius: f64, rng: &mut impl Rng) -> Self {
        let positions = compute_cycle(gap_size, playable_height, bird_radius);
        PipePositionCycle {
            positions,
            index: rng.gen_range(0..positions.len()),
        }
    }

    pub fn with_start(positions: [f64; 3], index: usize) -> Self {
        PipePositionCycle {
            positions,
            index: index % positions.len(),
        }
    }

    pub fn positions(&self) -> [f64; 3] {
        self.positions
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn current(&self) -> f64 {
        self.positions[self.index]
    }

    /// Steps to the next slot and returns its gap start.
    pub fn advance(&mut self) -> f64 {
        let (index, gap_start_y) = advance(&self.positions, self.index);
        self.index = index;
        gap_start_y
    }
}

/// Valid `[min, max]` range for the top edge of a gap. Always `max > min`.
pub fn gap_range(gap_size: f64, playable_height: f64, bird_radius: f64) -> (f64, f64) {
    let min_segment = MIN_SEGMENT_HEIGHT.max(2.0 * bird_radius);
    let min = min_segment;
    let max = playable_height - gap_size - min_segment;
    if max > min {
        return (min, max);
    }

    warn!(
        "Gap {} too large for playable height {}, widening range",
        gap_size, playable_height
    );
    let min = CYCLE_FALLBACK_MARGIN;
    let max = (playable_height - gap_size - CYCLE_FALLBACK_MARGIN).max(min + CYCLE_FALLBACK_MARGIN);
    (min, max)
}

pub fn compute_cycle(gap_size: f64, playable_height: f64, bird_radius: f64) -> [f64; 3] {
    let (min, max) = gap_range(gap_size, playable_height, bird_radius);
    let span = max - min;
    CYCLE_FRACTIONS.map(|fraction| (min + span * fraction).clamp(min, max))
}

pub fn advance(positions: &[f64; 3], index: usize) -> (usize, f64) {
    let next = (index + 1) % positions.len();
    (next, positions[next])
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    const EPS: f64 = 1e-9;

    #[test]
    fn cycle_uses_quarter_three_quarter_half() {
        let cycle = compute_cycle(BASE_GAP, PLAYABLE_HEIGHT, BIRD_RADIUS);
        let (min, max) = gap_range(BASE_GAP, PLAYABLE_HEIGHT, BIRD_RADIUS);
        assert!((min - 30.0).abs() < EPS);
        assert!((max - 307.0).abs() < EPS);
        assert!((cycle[0] - 99.25).abs() < EPS);
        assert!((cycle[1] - 237.75).abs() < EPS);
        assert!((cycle[2] - 168.5).abs() < EPS);
    }

    #[test]
    fn every_position_leaves_both_segments() {
        for y in compute_cycle(BASE_GAP, PLAYABLE_HEIGHT, BIRD_RADIUS) {
            assert!(y >= 0.0);
            assert!(y + BASE_GAP <= PLAYABLE_HEIGHT);
        }
    }

    #[test]
    fn oversized_gap_still_gives_ordered_range() {
        let (min, max) = gap_range(480.0, PLAYABLE_HEIGHT, BIRD_RADIUS);
        assert!(max > min);
        let cycle = compute_cycle(480.0, PLAYABLE_HEIGHT, BIRD_RADIUS);
        for y in cycle {
            assert!(y >= min && y <= max);
        }
    }

    #[test]
    fn advance_wraps_after_three() {
        let positions = [10.0, 20.0, 30.0];
        assert_eq!(advance(&positions, 0), (1, 20.0));
        assert_eq!(advance(&positions, 1), (2, 30.0));
        assert_eq!(advance(&positions, 2), (0, 10.0));
    }

    #[test]
    fn random_start_is_within_cycle() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..20 {
            let cycle = PipePositionCycle::new(BASE_GAP, PLAYABLE_HEIGHT, BIRD_RADIUS, &mut rng);
            assert!(cycle.index() < 3);
            assert!((cycle.current() - cycle.positions()[cycle.index()]).abs() < EPS);
        }
    }

    #[test]
    fn cycle_advance_returns_next_slot() {
        let mut cycle = PipePositionCycle::with_start([1.0, 2.0, 3.0], 2);
        assert!((cycle.advance() - 1.0).abs() < EPS);
        assert_eq!(cycle.index(), 0);
        assert!((cycle.advance() - 2.0).abs() < EPS);
    }
}
