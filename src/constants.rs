// --- Screen ---
pub const SCREEN_WIDTH: f64 = 288.0;
pub const SCREEN_HEIGHT: f64 = 512.0;
pub const BASE_HEIGHT: f64 = 20.0; // Ground band at the bottom of the screen
pub const GROUND_Y: f64 = SCREEN_HEIGHT - BASE_HEIGHT;
pub const PLAYABLE_HEIGHT: f64 = GROUND_Y;

// --- Bird ---
pub const BIRD_RADIUS: f64 = 15.0;
pub const BIRD_X: f64 = 50.0;
pub const BIRD_START_Y: f64 = SCREEN_HEIGHT / 2.0;

// --- Physics (per tick) ---
pub const GRAVITY: f64 = 0.5;
pub const FLAP_STRENGTH: f64 = -8.0;
pub const SCROLL_SPEED: f64 = 3.0;

// --- Pipes ---
pub const PIPE_WIDTH: f64 = 50.0;
pub const BASE_GAP: f64 = 155.0;
pub const MIN_GAP: f64 = 3.5 * BIRD_RADIUS;
pub const MIN_SEGMENT_HEIGHT: f64 = 2.0 * BIRD_RADIUS;
pub const CYCLE_FALLBACK_MARGIN: f64 = 5.0; // Used when the gap leaves no valid range
pub const CYCLE_FRACTIONS: [f64; 3] = [0.25, 0.75, 0.50];

// --- Difficulty ---
pub const HARD_SHRINK_PER_PIPE: f64 = 2.0;
pub const EXTRA_HARD_SHRINK_PER_PIPE: f64 = 5.0;

// --- Autobot ---
pub const AUTOBOT_FALLBACK_VELOCITY: f64 = 0.2;
pub const AUTOBOT_FALLBACK_HEIGHT_FRACTION: f64 = 0.70;
pub const AUTOBOT_SAFETY_EXTRA: f64 = 3.0; // Added to half the bird radius
pub const AUTOBOT_RESTART_DELAY_MS: u64 = 1500;
pub const AUTOBOT_ENABLE_DELAY_IDLE_MS: u64 = 250;
pub const AUTOBOT_ENABLE_DELAY_OVER_MS: u64 = 10;

// --- Frame pacing ---
pub const FRAME_MS: u64 = 16; // ~60 FPS
