use std::io::{self, Write};
use log::info;
use crossterm::{
    cursor::MoveTo,
    execute,
};

use crate::constants::{SCREEN_HEIGHT, SCREEN_WIDTH};
use crate::game::RenderSnapshot;
use crate::types::Phase;

// --- ScreenBuffer for simulated rendering ---
pub struct ScreenBuffer {
    pub buffer: Vec<Vec<char>>,
    pub width: u16,
    pub height: u16,
    pub cursor_x: u16,
    pub cursor_y: u16,
}

impl ScreenBuffer {
    pub fn new(width: u16, height: u16) -> Self {
        ScreenBuffer {
            buffer: vec![vec![' '; width as usize]; height as usize],
            width,
            height,
            cursor_x: 0,
            cursor_y: 0,
        }
    }

    pub fn move_to(&mut self, x: u16, y: u16) {
        self.cursor_x = x;
        self.cursor_y = y;
    }

    pub fn write_char(&mut self, c: char) {
        if self.cursor_y < self.height && self.cursor_x < self.width {
            self.buffer[self.cursor_y as usize][self.cursor_x as usize] = c;
        }
    }

    pub fn write_str(&mut self, s: &str) {
        for c in s.chars() {
            self.write_char(c);
            self.cursor_x = self.cursor_x.saturating_add(1);
        }
    }

    pub fn row(&self, y: u16) -> String {
        self.buffer.get(y as usize).map(|r| r.iter().collect()).unwrap_or_default()
    }

    pub fn print_to_log(&self) {
        info!("--- Screen Buffer ---");
        for row in &self.buffer {
            info!("{}", row.iter().collect::<String>());
        }
        info!("---------------------");
    }
}

impl Write for ScreenBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let s = String::from_utf8_lossy(buf);
        self.write_str(&s);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

// --- OutputTarget enum to handle stdout or ScreenBuffer ---
pub enum OutputTarget {
    Stdout(io::Stdout),
    ScreenBuffer(ScreenBuffer),
}

impl OutputTarget {
    pub fn execute_move_to(&mut self, command: MoveTo) -> io::Result<()> {
        match self {
            OutputTarget::Stdout(s) => execute!(s, command),
            OutputTarget::ScreenBuffer(sb) => {
                sb.move_to(command.0, command.1);
                Ok(())
            },
        }
    }

    pub fn execute_other_command(&mut self, command: impl crossterm::Command) -> io::Result<()> {
        match self {
            OutputTarget::Stdout(s) => execute!(s, command),
            OutputTarget::ScreenBuffer(_) => Ok(()), // Ignore in debug mode
        }
    }
}

impl Write for OutputTarget {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            OutputTarget::Stdout(s) => s.write(buf),
            OutputTarget::ScreenBuffer(sb) => sb.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            OutputTarget::Stdout(s) => s.flush(),
            OutputTarget::ScreenBuffer(sb) => sb.flush(),
        }
    }
}

pub const PIPE_CHAR: char = '#';
pub const BIRD_CHAR: char = 'O';
pub const GROUND_CHAR: char = '=';

// --- GameGrid: the world scaled down to terminal cells ---
pub struct GameGrid {
    pub grid: Vec<Vec<char>>,
    pub width: u16,
    pub height: u16,
}

impl GameGrid {
    pub fn new(width: u16, height: u16) -> Self {
        GameGrid {
            grid: vec![vec![' '; width as usize]; height as usize],
            width,
            height,
        }
    }

    pub fn set_char(&mut self, x: u16, y: u16, c: char) {
        if y < self.height && x < self.width {
            self.grid[y as usize][x as usize] = c;
        }
    }

    pub fn get_char(&self, x: u16, y: u16) -> Option<char> {
        self.grid.get(y as usize).and_then(|row| row.get(x as usize)).copied()
    }

    pub fn clear(&mut self) {
        self.grid = vec![vec![' '; self.width as usize]; self.height as usize];
    }

    fn col(&self, world_x: f64) -> i64 {
        (world_x * self.width as f64 / SCREEN_WIDTH).floor() as i64
    }

    fn row(&self, world_y: f64) -> i64 {
        (world_y * self.height as f64 / SCREEN_HEIGHT).floor() as i64
    }

    fn fill_rect(&mut self, x0: f64, y0: f64, x1: f64, y1: f64, c: char) {
        if x1 <= x0 || y1 <= y0 {
            return;
        }
        let (c0, c1) = (self.col(x0).max(0), self.col(x1).min(self.width as i64 - 1));
        let (r0, r1) = (self.row(y0).max(0), self.row(y1).min(self.height as i64 - 1));
        for y in r0..=r1 {
            for x in c0..=c1 {
                self.set_char(x as u16, y as u16, c);
            }
        }
    }

    /// Draws pipe segments, ground band and bird.
    pub fn draw_snapshot(&mut self, snapshot: &RenderSnapshot) {
        if let Some(pipe) = &snapshot.pipe {
            let right = pipe.x + pipe.width;
            self.fill_rect(pipe.x, 0.0, right, pipe.gap_start_y, PIPE_CHAR);
            // The lower segment stops at the ground band.
            self.fill_rect(pipe.x, pipe.gap_end_y(), right, snapshot.ground_y, PIPE_CHAR);
        }
        self.fill_rect(0.0, snapshot.ground_y, SCREEN_WIDTH, SCREEN_HEIGHT, GROUND_CHAR);

        let (bx, by) = (self.col(snapshot.bird_x), self.row(snapshot.bird_y));
        if bx >= 0 && by >= 0 {
            self.set_char(bx as u16, by as u16, BIRD_CHAR);
        }
    }

    pub fn render(&self, stdout: &mut OutputTarget) -> io::Result<()> {
        for y in 0..self.height {
            stdout.execute_move_to(MoveTo(0, y))?;
            write!(stdout, "{}", self.grid[y as usize].iter().collect::<String>())?;
        }
        Ok(())
    }

    pub fn clear_screen_manual(&self, stdout: &mut OutputTarget, terminal_width: u16, terminal_height: u16) -> io::Result<()> {
        for y in 0..terminal_height {
            stdout.execute_move_to(MoveTo(0, y))?;
            write!(stdout, "{}", " ".repeat(terminal_width as usize))?;
        }
        stdout.execute_move_to(MoveTo(0, 0))?;
        Ok(())
    }
}

pub fn hud_line(snapshot: &RenderSnapshot) -> String {
    format!(
        "Score: {}  Best: {}  {}  {}  Autobot: {}",
        snapshot.score,
        snapshot.best_score,
        snapshot.difficulty_label,
        snapshot.gap_label,
        if snapshot.autobot_enabled { "ON" } else { "OFF" }
    )
}

/// Centered message for the current phase, if any.
pub fn banner(snapshot: &RenderSnapshot) -> Option<String> {
    match snapshot.phase {
        Phase::Idle => Some("Press Space to start".to_string()),
        Phase::Paused => Some("PAUSED".to_string()),
        Phase::GameOver => Some(format!("GAME OVER! Score: {}", snapshot.score)),
        Phase::Running => None,
    }
}
