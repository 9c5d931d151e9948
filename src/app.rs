use std::io::{self, Read, Write};
use std::time::{Duration, Instant};
use crossterm::{
    cursor::MoveTo,
    event::{self, Event},
};
use log::{error, info};
use rand::Rng;

use crate::constants::FRAME_MS;
use crate::game::Game;
use crate::rendering::{banner, hud_line, GameGrid, OutputTarget};
use crate::terminal_io::{map_event, InputAction, SimulatedInput};
use crate::types::Command;

/// Terminal shell around [`Game`]: reads keys, drives the frame clock, draws.
pub struct App {
    pub terminal_width: u16,
    pub terminal_height: u16,
    pub stdout_target: OutputTarget,
    simulated_input: Option<SimulatedInput>,
    debug_mode_active: bool,
    max_frames: Option<u64>,
}

impl App {
    pub fn new(
        terminal_width: u16,
        terminal_height: u16,
        stdout_target: OutputTarget,
        simulated_input: Option<SimulatedInput>,
        debug_mode_active: bool,
        max_frames: Option<u64>,
    ) -> Self {
        App {
            terminal_width,
            terminal_height,
            stdout_target,
            simulated_input,
            debug_mode_active,
            max_frames,
        }
    }

    pub fn run<R: Rng>(&mut self, game: &mut Game<R>) -> io::Result<()> {
        if !self.debug_mode_active {
            self.show_title_screen()?;
        }

        let started = Instant::now();
        let mut running = true;
        let mut frame_count: u64 = 0;
        // Board keeps two rows for the HUD and controls.
        let mut game_grid = GameGrid::new(self.terminal_width, self.terminal_height.saturating_sub(2));

        while running && self.max_frames.is_none_or(|max| frame_count < max) {
            let now_ms = if self.debug_mode_active {
                frame_count * FRAME_MS
            } else {
                started.elapsed().as_millis() as u64
            };

            if let Some(action) = self.handle_input(frame_count)? {
                match action {
                    InputAction::Quit => {
                        info!("Quit requested at frame {}.", frame_count);
                        running = false;
                    }
                    InputAction::Game(command) => game.handle_command(command, now_ms),
                }
            }

            game.tick(now_ms);

            if game_grid.width != self.terminal_width || game_grid.height != self.terminal_height.saturating_sub(2) {
                game_grid = GameGrid::new(self.terminal_width, self.terminal_height.saturating_sub(2));
            }
            game_grid.clear();
            game_grid.draw_snapshot(&game.snapshot());
            self.render(&game_grid, game)?;

            frame_count += 1;
        }

        info!("Game loop ended after {} frames. Best score: {}", frame_count, game.best_score());
        if !self.debug_mode_active {
            self.show_exit_screen(game.best_score())?;
        }
        Ok(())
    }

    /// Press the autobot key on the player's behalf before the first frame.
    pub fn start_with_autobot<R: Rng>(game: &mut Game<R>) {
        game.handle_command(Command::ToggleAutobot, 0);
    }

    fn handle_input(&mut self, frame_count: u64) -> io::Result<Option<InputAction>> {
        let mut current_event: Option<Event> = None;
        if self.debug_mode_active {
            if let Some(sim_input) = &mut self.simulated_input {
                if sim_input.poll(frame_count)? {
                    current_event = Some(sim_input.read()?);
                }
            }
        } else if event::poll(Duration::from_millis(FRAME_MS)).map_err(|e| { error!("Failed to poll event: {}", e); e })? {
            current_event = Some(event::read().map_err(|e| { error!("Failed to read event: {}", e); e })?);
        }

        Ok(match current_event {
            Some(Event::Resize(new_width, new_height)) => {
                self.terminal_width = new_width;
                self.terminal_height = new_height;
                info!("Terminal resized to {}x{}", new_width, new_height);
                None
            }
            Some(event) => map_event(&event),
            None => None,
        })
    }

    fn render<R: Rng>(&mut self, game_grid: &GameGrid, game: &Game<R>) -> io::Result<()> {
        let snapshot = game.snapshot();
        game_grid.render(&mut self.stdout_target).map_err(|e| { error!("Failed to render game grid: {}", e); e })?;

        let hud_y = game_grid.height;
        self.stdout_target.execute_move_to(MoveTo(0, hud_y))?;
        write!(self.stdout_target, "{:<width$}", hud_line(&snapshot), width = self.terminal_width as usize)?;
        self.stdout_target.execute_move_to(MoveTo(0, hud_y.saturating_add(1)))?;
        write!(self.stdout_target, "Space/Up: Flap  p: Pause  d: Difficulty  a: Autobot  q: Quit")?;

        if let Some(message) = banner(&snapshot) {
            let banner_x = (self.terminal_width / 2).saturating_sub(message.len() as u16 / 2);
            let banner_y = game_grid.height / 3;
            self.stdout_target.execute_move_to(MoveTo(banner_x, banner_y))?;
            write!(self.stdout_target, "{}", message)?;
        }

        self.stdout_target.flush().map_err(|e| { error!("Failed to flush stdout during game loop: {}", e); e })?;

        if let OutputTarget::ScreenBuffer(sb) = &self.stdout_target {
            sb.print_to_log();
        }
        Ok(())
    }

    fn show_title_screen(&mut self) -> io::Result<()> {
        let title_art = [
            r" ___ _                         ",
            r"| __| |__ _ _ __ _ __ _  _    ",
            r"| _|| / _` | '_ \ '_ \ || |   ",
            r"|_| |_\__,_| .__/ .__/\_, |   ",
            r"           |_|  |_|   |__/    ",
            r"          with autobot        ",
        ];

        let title_start_y = (self.terminal_height / 2).saturating_sub(title_art.len() as u16 / 2);
        for (i, line) in title_art.iter().enumerate() {
            let x = (self.terminal_width / 2).saturating_sub(line.len() as u16 / 2);
            self.stdout_target.execute_move_to(MoveTo(x, title_start_y + i as u16))?;
            write!(self.stdout_target, "{}", line)?;
        }

        let press_any_key_msg = "Press any key to continue...";
        let msg_x = (self.terminal_width / 2).saturating_sub(press_any_key_msg.len() as u16 / 2);
        self.stdout_target.execute_move_to(MoveTo(msg_x, self.terminal_height.saturating_sub(5)))?;
        write!(self.stdout_target, "{}", press_any_key_msg)?;
        self.stdout_target.flush()?;
        info!("Title screen displayed. Waiting for key press.");

        let _ = io::stdin().read(&mut [0u8])?;

        let game_grid_dummy = GameGrid::new(self.terminal_width, self.terminal_height);
        game_grid_dummy.clear_screen_manual(&mut self.stdout_target, self.terminal_width, self.terminal_height)?;
        self.stdout_target.flush()?;
        Ok(())
    }

    fn show_exit_screen(&mut self, best_score: u32) -> io::Result<()> {
        let game_grid_dummy = GameGrid::new(self.terminal_width, self.terminal_height);
        game_grid_dummy.clear_screen_manual(&mut self.stdout_target, self.terminal_width, self.terminal_height)?;

        let best_msg = format!("Best Score: {}", best_score);
        let best_x = (self.terminal_width / 2).saturating_sub(best_msg.len() as u16 / 2);
        self.stdout_target.execute_move_to(MoveTo(best_x, self.terminal_height / 2))?;
        write!(self.stdout_target, "{}", best_msg)?;
        self.stdout_target.execute_move_to(MoveTo(0, self.terminal_height.saturating_sub(1)))?;
        self.stdout_target.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rendering::ScreenBuffer;
    use crate::types::Phase;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn debug_run_follows_the_script() {
        let mut app = App::new(
            40,
            20,
            OutputTarget::ScreenBuffer(ScreenBuffer::new(40, 20)),
            Some(SimulatedInput::demo_script(60)),
            true,
            Some(200),
        );
        let mut game = Game::new(StdRng::seed_from_u64(3));
        app.run(&mut game).unwrap();

        // Script enabled the autobot before quitting at frame 60.
        assert!(game.autobot().enabled);
        assert_ne!(game.phase(), Phase::Idle);
        assert_eq!(game.session().difficulty, crate::types::Difficulty::Hard);
    }

    #[test]
    fn frame_limit_stops_the_loop() {
        let mut app = App::new(
            30,
            12,
            OutputTarget::ScreenBuffer(ScreenBuffer::new(30, 12)),
            Some(SimulatedInput::new(Default::default())),
            true,
            Some(5),
        );
        let mut game = Game::new(StdRng::seed_from_u64(1));
        app.run(&mut game).unwrap();
        assert_eq!(game.phase(), Phase::Idle);

        if let OutputTarget::ScreenBuffer(sb) = &app.stdout_target {
            assert!(sb.row(10).starts_with("Score: 0"));
        } else {
            panic!("expected screen buffer");
        }
    }
}
