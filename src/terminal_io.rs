use std::collections::HashMap;
use std::io;
use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind};

use crate::types::Command;

/// What a key press means to the shell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputAction {
    Game(Command),
    Quit,
}

pub fn map_key(key_event: KeyEvent) -> Option<InputAction> {
    if key_event.kind == KeyEventKind::Release {
        return None;
    }
    match key_event.code {
        KeyCode::Char(' ') | KeyCode::Up => Some(InputAction::Game(Command::Flap)),
        KeyCode::Char('p') | KeyCode::Char('P') => Some(InputAction::Game(Command::TogglePause)),
        KeyCode::Char('d') | KeyCode::Char('D') => Some(InputAction::Game(Command::CycleDifficulty)),
        KeyCode::Char('a') | KeyCode::Char('A') => Some(InputAction::Game(Command::ToggleAutobot)),
        KeyCode::Char('q') | KeyCode::Esc => Some(InputAction::Quit),
        _ => None,
    }
}

pub fn map_event(event: &Event) -> Option<InputAction> {
    match event {
        Event::Key(key_event) => map_key(*key_event),
        _ => None,
    }
}

// --- SimulatedInput for debugging ---
pub struct SimulatedInput {
    events: HashMap<u64, Event>,
    current_frame: u64,
}

impl SimulatedInput {
    pub fn new(events: HashMap<u64, Event>) -> Self {
        SimulatedInput { events, current_frame: 0 }
    }

    /// Scripted run used by `--debug`: start, toggle difficulty, hand over
    /// to the autobot, then quit.
    pub fn demo_script(quit_frame: u64) -> Self {
        let mut events = HashMap::new();
        events.insert(1, Event::Key(KeyCode::Char('d').into()));
        events.insert(2, Event::Key(KeyCode::Char(' ').into()));
        events.insert(20, Event::Key(KeyCode::Char(' ').into()));
        events.insert(40, Event::Key(KeyCode::Char('a').into()));
        events.insert(quit_frame, Event::Key(KeyCode::Char('q').into()));
        SimulatedInput::new(events)
    }

    pub fn poll(&mut self, frame_count: u64) -> io::Result<bool> {
        self.current_frame = frame_count;
        Ok(self.events.contains_key(&frame_count))
    }

    pub fn read(&mut self) -> io::Result<Event> {
        if let Some(event) = self.events.remove(&self.current_frame) {
            Ok(event)
        } else {
            Ok(Event::Key(KeyCode::Null.into()))
        }
    }
}
