use crate::constants::*;
use log::debug;

// --- Bird ---
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bird {
    x: f64, // Fixed for the whole run
    pub y: f64,
    pub y_velocity: f64,
    pub radius: f64,
}

impl Bird {
    pub fn new(x: f64, y: f64) -> Self {
        Bird {
            x,
            y,
            y_velocity: 0.0,
            radius: BIRD_RADIUS,
        }
    }

    pub fn x(&self) -> f64 {
        self.x
    }

    /// One integration step: gravity first, then position. No bounds clamping;
    /// leaving the screen is detected as a collision instead.
    pub fn update(&mut self, gravity: f64) {
        self.y_velocity += gravity;
        self.y += self.y_velocity;
    }

    /// Overwrites the vertical speed, whatever it was before.
    pub fn flap(&mut self, strength: f64) {
        self.y_velocity = strength;
        debug!("Flap: y = {}, velocity = {}", self.y, self.y_velocity);
    }

    pub fn top(&self) -> f64 {
        self.y - self.radius
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.radius
    }
}

impl Default for Bird {
    fn default() -> Self {
        Bird::new(BIRD_X, BIRD_START_Y)
    }
}

// --- Pipe ---
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Pipe {
    pub x: f64,
    pub width: f64,
    pub gap_start_y: f64, // Bottom edge of the upper segment
    pub gap_size: f64,
}

impl Pipe {
    pub fn new(x: f64, gap_start_y: f64, gap_size: f64) -> Self {
        Pipe {
            x,
            width: PIPE_WIDTH,
            gap_start_y,
            gap_size,
        }
    }

    pub fn gap_end_y(&self) -> f64 {
        self.gap_start_y + self.gap_size
    }

    /// Geometry usable for collision and drawing.
    pub fn is_valid(&self) -> bool {
        self.x.is_finite() && self.width.is_finite() && self.gap_start_y.is_finite() && self.gap_size.is_finite()
    }

    pub fn update(&mut self, scroll_speed: f64) {
        self.x -= scroll_speed;
    }

    /// Fully past the left edge of the screen.
    pub fn is_off_screen(&self) -> bool {
        self.x < -self.width
    }

    /// Moves the pipe back to the right edge with a new gap.
    pub fn respawn(&mut self, screen_width: f64, gap_start_y: f64, gap_size: f64) {
        self.x = screen_width;
        self.gap_start_y = gap_start_y;
        self.gap_size = gap_size;
    }
}
