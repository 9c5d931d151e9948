pub mod app;
pub mod autobot;
pub mod collision;
pub mod constants;
pub mod difficulty;
pub mod entities;
pub mod game;
pub mod pipes;
pub mod rendering;
pub mod terminal_io;
pub mod timer;
pub mod types;

pub use game::{Game, GameSession, RenderSnapshot};
pub use types::{Command, Difficulty, Phase};
