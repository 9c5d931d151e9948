//! The game state machine.
//!
//! Owns the session, the bird, the single pipe, the gap cycle and the
//! autobot overlay. The host calls [`Game::handle_command`] for input and
//! [`Game::tick`] once per frame, then reads [`Game::snapshot`] to draw.

use log::{debug, info};
use rand::Rng;

use crate::autobot::{self, AutobotState};
use crate::collision;
use crate::constants::*;
use crate::difficulty;
use crate::entities::{Bird, Pipe};
use crate::pipes::PipePositionCycle;
use crate::timer::Scheduler;
use crate::types::{Command, Difficulty, Phase};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GameSession {
    pub score: u32,
    pub phase: Phase,
    pub difficulty: Difficulty,
    pub pipe_gap: f64,
}

impl Default for GameSession {
    fn default() -> Self {
        GameSession {
            score: 0,
            phase: Phase::Idle,
            difficulty: Difficulty::Normal,
            pipe_gap: BASE_GAP,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScheduledAction {
    AutoStart,
    AutoRestart,
}

/// Read-only view handed to the renderer after each tick.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderSnapshot {
    pub bird_x: f64,
    pub bird_y: f64,
    pub bird_radius: f64,
    pub pipe: Option<Pipe>,
    pub ground_y: f64,
    pub score: u32,
    pub best_score: u32,
    pub phase: Phase,
    pub difficulty_label: &'static str,
    pub gap_label: String,
    pub autobot_enabled: bool,
}

pub struct Game<R: Rng> {
    session: GameSession,
    bird: Bird,
    pipe: Option<Pipe>,
    cycle: Option<PipePositionCycle>,
    autobot: AutobotState,
    scheduler: Scheduler<ScheduledAction>,
    rng: R,
    best_score: u32,
    now_ms: u64,
}

impl<R: Rng> Game<R> {
    pub fn new(rng: R) -> Self {
        Game {
            session: GameSession::default(),
            bird: Bird::default(),
            pipe: None,
            cycle: None,
            autobot: AutobotState::default(),
            scheduler: Scheduler::new(),
            rng,
            best_score: 0,
            now_ms: 0,
        }
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    pub fn phase(&self) -> Phase {
        self.session.phase
    }

    pub fn score(&self) -> u32 {
        self.session.score
    }

    pub fn best_score(&self) -> u32 {
        self.best_score
    }

    pub fn bird(&self) -> &Bird {
        &self.bird
    }

    pub fn pipe(&self) -> Option<&Pipe> {
        self.pipe.as_ref()
    }

    pub fn cycle(&self) -> Option<&PipePositionCycle> {
        self.cycle.as_ref()
    }

    pub fn autobot(&self) -> &AutobotState {
        &self.autobot
    }

    pub fn pending_timers(&self) -> usize {
        self.scheduler.len()
    }

    /// Applies a player command. Any pending autobot restart is superseded.
    pub fn handle_command(&mut self, command: Command, now_ms: u64) {
        self.advance_clock(now_ms);
        self.cancel_autobot_timer();

        match command {
            Command::Flap => self.flap(),
            Command::TogglePause => self.toggle_pause(),
            Command::CycleDifficulty => self.set_difficulty(self.session.difficulty.next()),
            Command::ToggleAutobot => self.toggle_autobot(),
        }

        // The bot is still in charge of an ended session: re-arm from now.
        if self.autobot.enabled && !self.session.phase.is_session_active() {
            let delay = match self.session.phase {
                Phase::GameOver => AUTOBOT_RESTART_DELAY_MS,
                _ => AUTOBOT_ENABLE_DELAY_IDLE_MS,
            };
            self.arm_autobot(delay, ScheduledAction::AutoRestart);
        }
    }

    /// One frame. Fires due timers, then advances the simulation if running.
    pub fn tick(&mut self, now_ms: u64) {
        self.advance_clock(now_ms);
        self.fire_timers();

        if self.session.phase == Phase::Running {
            self.step();
        }
    }

    pub fn snapshot(&self) -> RenderSnapshot {
        RenderSnapshot {
            bird_x: self.bird.x(),
            bird_y: self.bird.y,
            bird_radius: self.bird.radius,
            pipe: self.pipe.filter(|p| p.is_valid()),
            ground_y: GROUND_Y,
            score: self.session.score,
            best_score: self.best_score,
            phase: self.session.phase,
            difficulty_label: self.session.difficulty.name(),
            gap_label: format!("Gap: {:.0}", self.session.pipe_gap),
            autobot_enabled: self.autobot.enabled,
        }
    }

    fn advance_clock(&mut self, now_ms: u64) {
        self.now_ms = self.now_ms.max(now_ms);
    }

    fn flap(&mut self) {
        match self.session.phase {
            Phase::Idle | Phase::GameOver => {
                self.reset();
                self.bird.flap(FLAP_STRENGTH);
            }
            Phase::Running => self.bird.flap(FLAP_STRENGTH),
            Phase::Paused => debug!("Flap ignored while paused."),
        }
    }

    fn reset(&mut self) {
        let cycle = PipePositionCycle::new(BASE_GAP, PLAYABLE_HEIGHT, BIRD_RADIUS, &mut self.rng);
        self.bird = Bird::default();
        self.session.pipe_gap = BASE_GAP;
        self.session.score = 0;
        self.session.phase = Phase::Running;
        self.pipe = Some(Pipe::new(SCREEN_WIDTH, cycle.current(), BASE_GAP));
        info!(
            "Session started. Difficulty: {}, cycle: {:?}, start index: {}",
            self.session.difficulty.name(),
            cycle.positions(),
            cycle.index()
        );
        self.cycle = Some(cycle);
    }

    fn toggle_pause(&mut self) {
        self.session.phase = match self.session.phase {
            Phase::Running => Phase::Paused,
            Phase::Paused => Phase::Running,
            other => {
                debug!("Pause ignored in phase {:?}.", other);
                return;
            }
        };
        info!("Phase is now {:?}.", self.session.phase);
    }

    fn set_difficulty(&mut self, new: Difficulty) {
        let old = self.session.difficulty;
        let active = self.session.phase.is_session_active();
        self.session.pipe_gap = difficulty::on_difficulty_changed(old, new, active, self.session.pipe_gap);
        self.session.difficulty = new;
        info!(
            "Difficulty changed from {} to {}. Gap: {}",
            old.name(),
            new.name(),
            self.session.pipe_gap
        );
    }

    fn toggle_autobot(&mut self) {
        self.autobot.enabled = !self.autobot.enabled;
        info!("Autobot {}.", if self.autobot.enabled { "enabled" } else { "disabled" });
        if !self.autobot.enabled {
            return;
        }
        if let Some(delay) = autobot::enable_delay_ms(self.session.phase) {
            self.arm_autobot(delay, ScheduledAction::AutoStart);
        }
    }

    /// Schedules a single auto-flap. At most one is outstanding at a time.
    fn arm_autobot(&mut self, delay_ms: u64, action: ScheduledAction) {
        if self.autobot.restart_scheduled {
            return;
        }
        let token = self.scheduler.schedule(self.now_ms, delay_ms, action);
        self.autobot.pending = Some(token);
        self.autobot.restart_scheduled = true;
        info!("Autobot {:?} scheduled in {} ms.", action, delay_ms);
    }

    fn cancel_autobot_timer(&mut self) {
        if let Some(token) = self.autobot.clear_restart() {
            if self.scheduler.cancel(token) {
                info!("Pending autobot flap cancelled.");
            }
        }
    }

    fn fire_timers(&mut self) {
        for (token, action) in self.scheduler.take_due(self.now_ms) {
            if self.autobot.pending == Some(token) {
                self.autobot.clear_restart();
            }
            // State may have moved on since scheduling.
            if self.autobot.enabled && !self.session.phase.is_session_active() {
                info!("Autobot {:?} fired.", action);
                self.flap();
            } else {
                debug!("Stale autobot {:?} ignored.", action);
            }
        }
    }

    fn step(&mut self) {
        self.bird.update(GRAVITY);

        if self.autobot.enabled && autobot::should_flap(&self.bird, self.pipe.as_ref(), SCREEN_HEIGHT) {
            self.bird.flap(FLAP_STRENGTH);
        }

        if let Some(pipe) = self.pipe.as_mut() {
            pipe.update(SCROLL_SPEED);
            if pipe.is_off_screen() {
                let gap_start_y = match self.cycle.as_mut() {
                    Some(cycle) => cycle.advance(),
                    None => pipe.gap_start_y,
                };
                self.session.score += 1;
                self.session.pipe_gap = difficulty::on_pipe_passed(self.session.pipe_gap, self.session.difficulty);
                pipe.respawn(SCREEN_WIDTH, gap_start_y, self.session.pipe_gap);
                debug!(
                    "Pipe respawned. Score: {}, gap start: {}, gap: {}",
                    self.session.score, gap_start_y, self.session.pipe_gap
                );
            }
        }

        if collision::check(&self.bird, self.pipe.as_ref(), GROUND_Y) {
            self.game_over();
        }
    }

    fn game_over(&mut self) {
        self.session.phase = Phase::GameOver;
        self.best_score = self.best_score.max(self.session.score);
        info!("Game over. Score: {}, best: {}", self.session.score, self.best_score);
        if self.autobot.enabled {
            self.arm_autobot(AUTOBOT_RESTART_DELAY_MS, ScheduledAction::AutoRestart);
        }
    }
}
