use ratatui::Frame;
use soundpath::game::GameState;

use crate::{ui::menu::render_difficulty_menu, App};

/// A UI Screen boundary: responsible for rendering one game state
pub trait Screen {
    fn render(&self, app: &App, f: &mut Frame);
}

/// Tier picker
pub struct DifficultyScreen;

impl Screen for DifficultyScreen {
    fn render(&self, app: &App, f: &mut Frame) {
        render_difficulty_menu(app, f);
    }
}

/// Board in play, or the finished board with its banner
pub struct BoardScreen;

impl Screen for BoardScreen {
    fn render(&self, app: &App, f: &mut Frame) {
        f.render_widget(app, f.area());
    }
}

/// Helper to construct the appropriate screen for the current state
pub fn current_screen(state: GameState) -> Box<dyn Screen> {
    match state {
        GameState::DifficultySelection => Box::new(DifficultyScreen),
        GameState::Playing | GameState::Won | GameState::Lost => Box::new(BoardScreen),
    }
}
