use std::env;
use std::io::{self, Write};
use crossterm::{
    cursor::{Hide, Show},
    terminal::{disable_raw_mode, enable_raw_mode, size},
};
use log::{error, info};

use flappy_autobot::app::App;
use flappy_autobot::game::Game;
use flappy_autobot::rendering::{GameGrid, OutputTarget, ScreenBuffer};
use flappy_autobot::terminal_io::SimulatedInput;

const LOG_FILE: &str = "flappy-autobot.log";
const DEBUG_DEFAULT_FRAMES: u64 = 600;

fn main() -> io::Result<()> {
    if let Err(e) = simple_logging::log_to_file(LOG_FILE, log::LevelFilter::Info) {
        eprintln!("Could not open {}: {}", LOG_FILE, e);
    }
    info!("Starting flappy-autobot.");

    let args: Vec<String> = env::args().skip(1).collect();
    let debug_mode_active = args.first().is_some_and(|a| a == "--debug");
    let autobot_on_start = args.iter().any(|a| a == "--autobot");
    let numbers: Vec<u64> = args.iter().filter_map(|a| a.parse::<u64>().ok()).collect();

    let mut stdout_target;
    let mut simulated_input: Option<SimulatedInput> = None;
    let terminal_width: u16;
    let terminal_height: u16;
    let max_frames: Option<u64>;

    if debug_mode_active {
        info!("Debug mode enabled.");
        terminal_width = numbers.first().map(|&w| w as u16).unwrap_or(80);
        terminal_height = numbers.get(1).map(|&h| h as u16).unwrap_or(24);
        max_frames = Some(numbers.get(2).copied().unwrap_or(DEBUG_DEFAULT_FRAMES));
        info!("Debug resolution set to {}x{}", terminal_width, terminal_height);
        stdout_target = OutputTarget::ScreenBuffer(ScreenBuffer::new(terminal_width, terminal_height));
        simulated_input = Some(SimulatedInput::demo_script(max_frames.unwrap_or(DEBUG_DEFAULT_FRAMES).saturating_sub(1)));
    } else {
        max_frames = numbers.first().copied();
        enable_raw_mode().map_err(|e| { error!("Failed to enable raw mode: {}", e); e })?;
        let (width, height) = size().map_err(|e| { error!("Failed to get terminal size: {}", e); e })?;
        terminal_width = width;
        terminal_height = height;
        stdout_target = OutputTarget::Stdout(io::stdout());
        info!("Terminal size: {}x{}", terminal_width, terminal_height);

        let game_grid_dummy = GameGrid::new(terminal_width, terminal_height);
        game_grid_dummy.clear_screen_manual(&mut stdout_target, terminal_width, terminal_height).map_err(|e| { error!("Failed to clear screen manually: {}", e); e })?;
        stdout_target.execute_other_command(Hide).map_err(|e| { error!("Failed to hide cursor: {}", e); e })?;
        stdout_target.flush().map_err(|e| { error!("Failed to flush stdout after initial clear: {}", e); e })?;
    }

    let mut game = Game::new(rand::thread_rng());
    if autobot_on_start {
        App::start_with_autobot(&mut game);
    }

    let mut app = App::new(terminal_width, terminal_height, stdout_target, simulated_input, debug_mode_active, max_frames);
    let result = app.run(&mut game);
    if let Err(e) = &result {
        error!("Game loop failed: {}", e);
    }

    if !debug_mode_active {
        app.stdout_target.execute_other_command(Show).map_err(|e| { error!("Failed to show cursor on exit: {}", e); e })?;
        disable_raw_mode().map_err(|e| { error!("Failed to disable raw mode on exit: {}", e); e })?;
    }
    info!("Exiting flappy-autobot.");
    result
}
