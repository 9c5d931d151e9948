use crate::entities::{Bird, Pipe};

pub fn hits_pipe(bird: &Bird, pipe: &Pipe) -> bool {
    if !pipe.is_valid() {
        return false;
    }
    let overlaps_horizontally = bird.x() + bird.radius > pipe.x && bird.x() - bird.radius < pipe.x + pipe.width;
    overlaps_horizontally && (bird.top() < pipe.gap_start_y || bird.bottom() > pipe.gap_end_y())
}

pub fn hits_ground(bird: &Bird, ground_y: f64) -> bool {
    bird.bottom() > ground_y
}

pub fn hits_ceiling(bird: &Bird) -> bool {
    bird.top() < 0.0
}

/// Any collision this frame. A missing or malformed pipe only disables the
/// pipe test; ground and ceiling are always checked.
pub fn check(bird: &Bird, pipe: Option<&Pipe>, ground_y: f64) -> bool {
    pipe.is_some_and(|p| hits_pipe(bird, p)) || hits_ground(bird, ground_y) || hits_ceiling(bird)
}
