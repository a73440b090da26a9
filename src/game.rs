//! Pathfinder game state machine.
//!
//! `DifficultySelection -> Playing -> Won | Lost`, and back to selection on
//! restart. The game owns its random source and the only countdown, so every
//! transition goes through `&mut Game`.

use crate::difficulty::{Difficulty, DifficultySettings};
use crate::maze::{generate_level, Level, Position};
use crate::session::SessionState;
use crate::streak::{select_feedback, Feedback};
use crate::vocabulary::WordBank;
use rand::rngs::StdRng;
use rand::SeedableRng;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameState {
    DifficultySelection,
    Playing,
    Won,
    Lost,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    /// Not playing; nothing happened
    Ignored,
    /// Not a single orthogonal step from the player
    Rejected,
    Correct,
    Incorrect,
    Won,
    Lost,
}

impl MoveOutcome {
    /// Whether the move was taken (and the countdown refilled)
    pub fn accepted(self) -> bool {
        !matches!(self, MoveOutcome::Ignored | MoveOutcome::Rejected)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    Idle,
    Running,
    TimedOut,
    Lost,
}

/// Read-only view handed to the renderer
#[derive(Debug, Clone, Copy)]
pub struct Snapshot<'a> {
    pub state: GameState,
    pub difficulty: Option<Difficulty>,
    pub level: Option<&'a Level>,
    pub player_pos: Position,
    pub player_path: &'a [Position],
    pub lives: u32,
    pub max_lives: u32,
    pub correct_streak: u32,
    pub incorrect_streak: u32,
    pub moves: u32,
    pub timer: u32,
    pub timer_seconds: u32,
    pub feedback: Option<Feedback>,
    pub target_label: Option<&'a str>,
}

#[derive(Debug)]
pub struct Game {
    bank: WordBank,
    rng: StdRng,
    state: GameState,
    difficulty: Option<Difficulty>,
    level: Option<Level>,
    session_state: SessionState,
}

impl Game {
    pub fn new(bank: WordBank, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self::with_rng(bank, rng)
    }

    pub fn with_rng(bank: WordBank, rng: StdRng) -> Self {
        Self {
            bank,
            rng,
            state: GameState::DifficultySelection,
            difficulty: None,
            level: None,
            session_state: SessionState::default(),
        }
    }

    /// Generate a fresh level for `difficulty` and start playing it.
    pub fn select_difficulty(&mut self, difficulty: Difficulty) {
        let settings = difficulty.settings();
        let level = generate_level(
            &mut self.rng,
            settings.grid_size,
            settings.hardened,
            &self.bank,
        );
        self.start_level(difficulty, level);
    }

    /// Start playing a prebuilt level.
    ///
    /// Panics if the level's size does not match the difficulty tier.
    pub fn start_level(&mut self, difficulty: Difficulty, level: Level) {
        let settings = difficulty.settings();
        assert_eq!(
            level.grid_size, settings.grid_size,
            "level does not fit the {difficulty} tier"
        );

        tracing::info!(
            %difficulty,
            grid_size = settings.grid_size,
            lives = settings.lives,
            target = %level.path_sound,
            "level started"
        );

        self.session_state = SessionState::fresh(&settings);
        self.difficulty = Some(difficulty);
        self.level = Some(level);
        self.state = GameState::Playing;
    }

    /// New level at the current difficulty once a game has ended.
    pub fn replay(&mut self) -> bool {
        match (self.state, self.difficulty) {
            (GameState::Won | GameState::Lost, Some(difficulty)) => {
                self.select_difficulty(difficulty);
                true
            }
            _ => false,
        }
    }

    pub fn restart(&mut self) {
        tracing::debug!(state = ?self.state, "restart");
        self.session_state = SessionState::default();
        self.level = None;
        self.state = GameState::DifficultySelection;
    }

    pub fn attempt_move(&mut self, target: Position) -> MoveOutcome {
        if self.state != GameState::Playing {
            return MoveOutcome::Ignored;
        }
        let Some(level) = self.level.as_ref() else {
            return MoveOutcome::Ignored;
        };
        let Some(cell) = level.grid.get(target) else {
            return MoveOutcome::Rejected;
        };
        let session = &mut self.session_state;
        if !session.player_pos.is_adjacent(&target) {
            return MoveOutcome::Rejected;
        }

        session.countdown.restart();
        session.moves += 1;

        let outcome = if cell.is_path {
            session.record_correct(target);
            if target == level.terminal() {
                self.state = GameState::Won;
                MoveOutcome::Won
            } else {
                MoveOutcome::Correct
            }
        } else {
            session.record_miss();
            if session.lives == 0 || self.settings().is_some_and(|s| s.hardened) {
                self.state = GameState::Lost;
                MoveOutcome::Lost
            } else {
                MoveOutcome::Incorrect
            }
        };

        tracing::debug!(
            row = target.row,
            col = target.col,
            ?outcome,
            lives = self.session_state.lives,
            "move"
        );
        self.log_terminal_state();
        self.refresh_feedback();
        outcome
    }

    /// One second of the countdown.
    pub fn on_tick(&mut self) -> TickOutcome {
        if self.state != GameState::Playing {
            return TickOutcome::Idle;
        }
        let session = &mut self.session_state;
        if !session.countdown.tick() {
            return TickOutcome::Running;
        }

        session.record_miss();
        tracing::debug!(lives = session.lives, "timed out");

        let outcome = if session.lives == 0 {
            self.state = GameState::Lost;
            TickOutcome::Lost
        } else {
            session.countdown.restart();
            TickOutcome::TimedOut
        };
        self.log_terminal_state();
        self.refresh_feedback();
        outcome
    }

    fn refresh_feedback(&mut self) {
        let session = &mut self.session_state;
        session.feedback = select_feedback(
            &mut self.rng,
            session.correct_streak,
            session.incorrect_streak,
        );
    }

    fn log_terminal_state(&self) {
        match self.state {
            GameState::Won => tracing::info!(moves = self.session_state.moves, "level won"),
            GameState::Lost => tracing::info!(moves = self.session_state.moves, "level lost"),
            _ => {}
        }
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn difficulty(&self) -> Option<Difficulty> {
        self.difficulty
    }

    pub fn settings(&self) -> Option<DifficultySettings> {
        self.difficulty.map(Difficulty::settings)
    }

    pub fn level(&self) -> Option<&Level> {
        self.level.as_ref()
    }

    /// Read-only view of the session bookkeeping
    pub fn session(&self) -> &SessionState {
        &self.session_state
    }

    pub fn has_finished(&self) -> bool {
        matches!(self.state, GameState::Won | GameState::Lost)
    }

    pub fn snapshot(&self) -> Snapshot<'_> {
        let s = &self.session_state;
        let settings = self.settings();
        Snapshot {
            state: self.state,
            difficulty: self.difficulty,
            level: self.level.as_ref(),
            player_pos: s.player_pos,
            player_path: &s.player_path,
            lives: s.lives,
            max_lives: settings.map_or(0, |st| st.lives),
            correct_streak: s.correct_streak,
            incorrect_streak: s.incorrect_streak,
            moves: s.moves,
            timer: s.countdown.remaining(),
            timer_seconds: s.countdown.duration(),
            feedback: s.feedback,
            target_label: self.level.as_ref().map(|l| self.bank.label(l.path_sound)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::maze::{Cell, Grid};
    use crate::vocabulary::SoundClass;
    use assert_matches::assert_matches;

    /// Path runs along the top row, then down the last column.
    fn l_shaped_level(size: usize) -> Level {
        let mut path: Vec<Position> = (0..size).map(|c| Position::new(0, c)).collect();
        path.extend((1..size).map(|r| Position::new(r, size - 1)));

        let cells = (0..size * size)
            .map(|i| {
                let pos = Position::new(i / size, i % size);
                let is_path = path.contains(&pos);
                Cell {
                    word: if is_path { "think" } else { "this" }.to_string(),
                    is_path,
                }
            })
            .collect();
        Level::new(Grid::from_cells(size, cells), SoundClass::A, path)
    }

    fn game_on(difficulty: Difficulty) -> Game {
        let mut game = Game::new(WordBank::builtin(), Some(1));
        let size = difficulty.settings().grid_size;
        game.start_level(difficulty, l_shaped_level(size));
        game
    }

    fn walk_to_win(game: &mut Game) -> MoveOutcome {
        let path = game.level().unwrap().path.clone();
        let mut last = MoveOutcome::Ignored;
        for pos in path.into_iter().skip(1) {
            last = game.attempt_move(pos);
        }
        last
    }

    #[test]
    fn test_starts_in_difficulty_selection() {
        let game = Game::new(WordBank::builtin(), Some(1));
        assert_eq!(game.state(), GameState::DifficultySelection);
        assert!(game.level().is_none());
    }

    #[test]
    fn test_select_difficulty_initializes_session() {
        let mut game = Game::new(WordBank::builtin(), Some(3));
        game.select_difficulty(Difficulty::Hard);

        let snap = game.snapshot();
        assert_eq!(snap.state, GameState::Playing);
        assert_eq!(snap.level.unwrap().grid_size, 7);
        assert_eq!(snap.player_pos, Position::ORIGIN);
        assert_eq!(snap.player_path, &[Position::ORIGIN]);
        assert_eq!(snap.lives, 3);
        assert_eq!(snap.timer, 10);
        assert_eq!((snap.correct_streak, snap.incorrect_streak), (0, 0));
        assert!(snap.target_label.is_some());
    }

    #[test]
    fn test_moves_ignored_outside_playing() {
        let mut game = Game::new(WordBank::builtin(), Some(1));
        assert_eq!(game.attempt_move(Position::new(0, 1)), MoveOutcome::Ignored);
    }

    #[test]
    fn test_non_adjacent_moves_rejected() {
        let mut game = game_on(Difficulty::Easy);
        let before = game.session().clone();

        for target in [
            Position::new(1, 1),
            Position::new(0, 2),
            Position::ORIGIN,
            Position::new(0, 9),
        ] {
            assert_eq!(game.attempt_move(target), MoveOutcome::Rejected);
        }
        assert_eq!(game.session(), &before);
    }

    #[test]
    fn test_correct_move_advances_and_resets_timer() {
        let mut game = game_on(Difficulty::Easy);
        for _ in 0..5 {
            game.on_tick();
        }
        assert_eq!(game.snapshot().timer, 10);

        assert_eq!(game.attempt_move(Position::new(0, 1)), MoveOutcome::Correct);
        let snap = game.snapshot();
        assert_eq!(snap.player_pos, Position::new(0, 1));
        assert_eq!(snap.player_path, &[Position::ORIGIN, Position::new(0, 1)]);
        assert_eq!(snap.correct_streak, 1);
        assert_eq!(snap.timer, 15);
    }

    #[test]
    fn test_incorrect_move_costs_a_life_and_resets_timer() {
        let mut game = game_on(Difficulty::Easy);
        game.on_tick();

        assert_eq!(game.attempt_move(Position::new(1, 0)), MoveOutcome::Incorrect);
        let snap = game.snapshot();
        assert_eq!(snap.player_pos, Position::ORIGIN);
        assert_eq!(snap.lives, 4);
        assert_eq!(snap.incorrect_streak, 1);
        assert_eq!(snap.correct_streak, 0);
        assert_eq!(snap.timer, 15);
        assert_eq!(snap.player_path.len(), 1);
    }

    #[test]
    fn test_five_misses_on_easy() {
        let mut game = game_on(Difficulty::Easy);
        for _ in 0..4 {
            assert_eq!(game.attempt_move(Position::new(1, 0)), MoveOutcome::Incorrect);
        }
        assert_eq!(game.snapshot().lives, 1);
        assert_eq!(game.state(), GameState::Playing);

        assert_eq!(game.attempt_move(Position::new(1, 0)), MoveOutcome::Lost);
        assert_eq!(game.snapshot().lives, 0);
        assert_eq!(game.state(), GameState::Lost);
    }

    #[test]
    fn test_win_after_mistakes() {
        let mut game = game_on(Difficulty::Medium);
        game.attempt_move(Position::new(1, 0));
        game.attempt_move(Position::new(1, 0));
        assert_eq!(game.snapshot().lives, 2);

        assert_eq!(walk_to_win(&mut game), MoveOutcome::Won);
        assert_eq!(game.state(), GameState::Won);
        assert_eq!(game.snapshot().player_pos, Position::new(5, 5));
    }

    #[test]
    fn test_hardened_tier_loses_on_first_mistake() {
        let mut game = game_on(Difficulty::Nightmare);
        assert_eq!(game.attempt_move(Position::new(0, 1)), MoveOutcome::Correct);
        assert_eq!(game.attempt_move(Position::new(1, 1)), MoveOutcome::Lost);
        assert_eq!(game.state(), GameState::Lost);
    }

    #[test]
    fn test_moves_after_game_over_are_ignored() {
        let mut game = game_on(Difficulty::Nightmare);
        game.attempt_move(Position::new(1, 0));
        assert_eq!(game.attempt_move(Position::new(0, 1)), MoveOutcome::Ignored);
        assert_eq!(game.on_tick(), TickOutcome::Idle);
    }

    #[test]
    fn test_timeout_costs_a_life_and_restarts_timer() {
        let mut game = game_on(Difficulty::Easy);
        game.attempt_move(Position::new(0, 1));
        for _ in 0..14 {
            assert_eq!(game.on_tick(), TickOutcome::Running);
        }
        assert_eq!(game.on_tick(), TickOutcome::TimedOut);

        let snap = game.snapshot();
        assert_eq!(snap.lives, 4);
        assert_eq!(snap.correct_streak, 0);
        assert_eq!(snap.player_pos, Position::new(0, 1));
        assert_eq!(snap.moves, 1);
        assert_eq!(snap.timer, 15);
    }

    #[test]
    fn test_timeout_on_last_life_loses() {
        let mut game = game_on(Difficulty::Nightmare);
        let mut last = TickOutcome::Running;
        for _ in 0..8 {
            last = game.on_tick();
        }
        assert_eq!(last, TickOutcome::Lost);
        assert_eq!(game.state(), GameState::Lost);
        assert_eq!(game.snapshot().lives, 0);
    }

    #[test]
    fn test_restart_resets_session() {
        let mut game = game_on(Difficulty::Easy);
        game.attempt_move(Position::new(0, 1));
        game.attempt_move(Position::new(0, 2));
        game.attempt_move(Position::new(1, 2));

        game.restart();
        let snap = game.snapshot();
        assert_eq!(snap.state, GameState::DifficultySelection);
        assert_eq!(snap.player_path, &[Position::ORIGIN]);
        assert_eq!((snap.correct_streak, snap.incorrect_streak), (0, 0));
        assert!(snap.level.is_none());
    }

    #[test]
    fn test_replay_only_after_game_over() {
        let mut game = game_on(Difficulty::Easy);
        assert!(!game.replay());

        walk_to_win(&mut game);
        assert!(game.replay());
        assert_eq!(game.state(), GameState::Playing);
        assert_eq!(game.difficulty(), Some(Difficulty::Easy));
        assert_eq!(game.snapshot().player_path, &[Position::ORIGIN]);
    }

    #[test]
    fn test_streak_feedback_kicks_in_at_two() {
        let mut game = game_on(Difficulty::Easy);
        game.attempt_move(Position::new(0, 1));
        assert!(game.snapshot().feedback.is_none());
        game.attempt_move(Position::new(0, 2));
        assert_matches!(
            game.snapshot().feedback,
            Some(Feedback { kind: crate::streak::FeedbackKind::Cheer, .. })
        );
        game.attempt_move(Position::new(1, 2));
        assert!(game.snapshot().feedback.is_none());
    }

    #[test]
    fn test_seeded_games_generate_same_level() {
        let mut a = Game::new(WordBank::builtin(), Some(99));
        let mut b = Game::new(WordBank::builtin(), Some(99));
        a.select_difficulty(Difficulty::Nightmare);
        b.select_difficulty(Difficulty::Nightmare);
        assert_eq!(a.level(), b.level());
    }

    #[test]
    #[should_panic(expected = "does not fit")]
    fn test_start_level_size_mismatch_panics() {
        let mut game = Game::new(WordBank::builtin(), Some(1));
        game.start_level(Difficulty::Hard, l_shaped_level(5));
    }
}
