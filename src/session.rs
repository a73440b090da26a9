use crate::difficulty::DifficultySettings;
use crate::maze::Position;
use crate::streak::Feedback;
use crate::timer::Countdown;

/// Mutable bookkeeping for one run through a level
#[derive(Debug, Clone, PartialEq)]
pub struct SessionState {
    pub player_pos: Position,
    // Append-only; revisits are recorded again
    pub player_path: Vec<Position>,
    pub lives: u32,
    pub correct_streak: u32,
    pub incorrect_streak: u32,
    pub moves: u32,
    pub countdown: Countdown,
    pub feedback: Option<Feedback>,
}

impl SessionState {
    pub fn fresh(settings: &DifficultySettings) -> Self {
        Self {
            lives: settings.lives,
            countdown: Countdown::new(settings.timer_seconds),
            ..Self::default()
        }
    }

    pub fn record_correct(&mut self, to: Position) {
        self.player_pos = to;
        self.player_path.push(to);
        self.correct_streak += 1;
        self.incorrect_streak = 0;
    }

    /// Wrong cell or timeout: streaks flip and a life is lost.
    pub fn record_miss(&mut self) {
        self.incorrect_streak += 1;
        self.correct_streak = 0;
        self.lives = self.lives.saturating_sub(1);
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            player_pos: Position::ORIGIN,
            player_path: vec![Position::ORIGIN],
            lives: 0,
            correct_streak: 0,
            incorrect_streak: 0,
            moves: 0,
            countdown: Countdown::new(0),
            feedback: None,
        }
    }
}
