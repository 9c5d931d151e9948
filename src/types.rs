/// Overall game phase.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Running,
    Paused,
    GameOver,
}

impl Phase {
    /// A session exists and has not ended.
    pub fn is_session_active(&self) -> bool {
        matches!(self, Phase::Running | Phase::Paused)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Difficulty {
    #[default]
    Normal,
    Hard,
    ExtraHard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Normal, Difficulty::Hard, Difficulty::ExtraHard];

    /// Next level in the cycle Normal -> Hard -> ExtraHard -> Normal.
    pub fn next(&self) -> Self {
        match self {
            Difficulty::Normal => Difficulty::Hard,
            Difficulty::Hard => Difficulty::ExtraHard,
            Difficulty::ExtraHard => Difficulty::Normal,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Difficulty::Normal => "Normal",
            Difficulty::Hard => "Hard",
            Difficulty::ExtraHard => "Extra Hard",
        }
    }
}

/// Discrete commands delivered by whatever input source drives the game.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    Flap,
    TogglePause,
    CycleDifficulty,
    ToggleAutobot,
}
