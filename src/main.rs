mod ui;

use crate::ui::screen::current_screen;
use clap::{error::ErrorKind, CommandFactory, Parser};
use crossterm::{
    event::{KeyCode, KeyEvent, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Frame, Terminal,
};
use soundpath::{
    app_dirs::AppDirs,
    config::{Config, ConfigStore, FileConfigStore},
    difficulty::Difficulty,
    game::{Game, GameState},
    logging,
    maze::Step,
    runtime::{CrosstermEventSource, FixedTicker, GameEvent, Runner},
    vocabulary::WordBank,
};
use std::{
    error::Error,
    io::{self, stdin},
    path::PathBuf,
};

/// word maze for training your ear on english sounds
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "Walk a word maze from the top-left to the bottom-right corner, stepping only on words that share the target sound. Wrong steps and slow steps cost lives."
)]
pub struct Cli {
    /// start straight at this difficulty instead of showing the menu
    #[clap(short = 'd', long, value_enum)]
    difficulty: Option<Difficulty>,

    /// seed the random source for a reproducible maze
    #[clap(long)]
    seed: Option<u64>,

    /// path to a word bank json to use instead of the built-in one
    #[clap(short = 'w', long = "words")]
    word_bank: Option<PathBuf>,

    /// hide streak cheers and jeers
    #[clap(long)]
    no_feedback: bool,

    /// remember these options as the new defaults
    #[clap(long)]
    save: bool,
}

impl Cli {
    /// Overlay command line options on the stored configuration
    fn apply_to(&self, mut config: Config) -> Config {
        if self.difficulty.is_some() {
            config.difficulty = self.difficulty;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }
        if self.word_bank.is_some() {
            config.word_bank = self.word_bank.clone();
        }
        if self.no_feedback {
            config.show_feedback = false;
        }
        config
    }
}

/// What the event loop should do after a key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Continue,
    /// A move was taken or a level began; restart the tick window
    Rearm,
    Quit,
}

#[derive(Debug)]
pub struct App {
    pub game: Game,
    pub menu_index: usize,
    pub show_feedback: bool,
}

impl App {
    pub fn new(game: Game, show_feedback: bool) -> Self {
        let menu_index = game.difficulty().map_or(0, Difficulty::index);
        Self {
            game,
            menu_index,
            show_feedback,
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Control {
        if key.code == KeyCode::Esc
            || (key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c'))
        {
            return Control::Quit;
        }

        match self.game.state() {
            GameState::DifficultySelection => match key.code {
                KeyCode::Up | KeyCode::Char('k') => {
                    self.menu_index = self.menu_index.saturating_sub(1);
                    Control::Continue
                }
                KeyCode::Down | KeyCode::Char('j') => {
                    self.menu_index = (self.menu_index + 1).min(Difficulty::ALL.len() - 1);
                    Control::Continue
                }
                KeyCode::Enter => self.start(Difficulty::ALL[self.menu_index]),
                KeyCode::Char(c @ '1'..='4') => {
                    let idx = c as usize - '1' as usize;
                    self.menu_index = idx;
                    self.start(Difficulty::ALL[idx])
                }
                _ => Control::Continue,
            },
            GameState::Playing => match key.code {
                KeyCode::Char('r') => {
                    self.game.restart();
                    Control::Continue
                }
                code => match step_for(code) {
                    Some(dir) => self.step(dir),
                    None => Control::Continue,
                },
            },
            GameState::Won | GameState::Lost => match key.code {
                KeyCode::Char('n') if self.game.replay() => Control::Rearm,
                KeyCode::Char('r') => {
                    self.game.restart();
                    Control::Continue
                }
                _ => Control::Continue,
            },
        }
    }

    fn start(&mut self, difficulty: Difficulty) -> Control {
        self.game.select_difficulty(difficulty);
        Control::Rearm
    }

    fn step(&mut self, dir: Step) -> Control {
        let Some(target) = self.game.snapshot().player_pos.step(dir) else {
            return Control::Continue;
        };
        if self.game.attempt_move(target).accepted() {
            Control::Rearm
        } else {
            Control::Continue
        }
    }
}

fn step_for(code: KeyCode) -> Option<Step> {
    match code {
        KeyCode::Up | KeyCode::Char('k') | KeyCode::Char('w') => Some(Step::Up),
        KeyCode::Down | KeyCode::Char('j') | KeyCode::Char('s') => Some(Step::Down),
        KeyCode::Left | KeyCode::Char('h') | KeyCode::Char('a') => Some(Step::Left),
        KeyCode::Right | KeyCode::Char('l') | KeyCode::Char('d') => Some(Step::Right),
        _ => None,
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    if let Some(log_path) = AppDirs::log_path() {
        // Logging is best effort; the game runs without it
        let _ = logging::init_logging(&log_path);
    }

    let store = FileConfigStore::new();
    let config = cli.apply_to(store.load());
    if cli.save {
        store.save(&config)?;
        tracing::info!(path = %store.path().display(), "saved config");
    }

    let bank = match &config.word_bank {
        Some(path) => WordBank::from_path(path)?,
        None => WordBank::builtin(),
    };
    let mut game = Game::new(bank, config.seed);
    if let Some(difficulty) = config.difficulty {
        game.select_difficulty(difficulty);
    }
    let mut app = App::new(game, config.show_feedback);

    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = start_tui(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn start_tui<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<(), Box<dyn Error>> {
    let mut runner = Runner::new(CrosstermEventSource::new(), FixedTicker::default());

    loop {
        terminal.draw(|f| ui(app, f))?;

        match runner.step() {
            GameEvent::Tick => {
                app.game.on_tick();
            }
            GameEvent::Resize => {}
            GameEvent::Closed => {
                tracing::warn!("terminal input closed, exiting");
                break;
            }
            GameEvent::Key(key) => match app.handle_key(key) {
                Control::Quit => break,
                Control::Rearm => runner.rearm(),
                Control::Continue => {}
            },
        }
    }

    Ok(())
}

fn ui(app: &App, f: &mut Frame) {
    current_screen(app.game.state()).render(app, f);
}

#[cfg(test)]
mod tests {
    use super::*;
    use soundpath::maze::{Cell, Grid, Level, Position};
    use soundpath::vocabulary::SoundClass;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn new_app() -> App {
        App::new(Game::new(WordBank::builtin(), Some(7)), true)
    }

    /// Path straight down the first column, then along the bottom row.
    fn down_then_right(size: usize) -> Level {
        let mut path: Vec<Position> = (0..size).map(|r| Position::new(r, 0)).collect();
        path.extend((1..size).map(|c| Position::new(size - 1, c)));
        let cells = (0..size * size)
            .map(|i| {
                let pos = Position::new(i / size, i % size);
                Cell {
                    word: "word".to_string(),
                    is_path: path.contains(&pos),
                }
            })
            .collect();
        Level::new(Grid::from_cells(size, cells), SoundClass::B, path)
    }

    #[test]
    fn test_cli_default_values() {
        let cli = Cli::parse_from(["soundpath"]);
        assert_eq!(cli.difficulty, None);
        assert_eq!(cli.seed, None);
        assert_eq!(cli.word_bank, None);
        assert!(!cli.no_feedback);
        assert!(!cli.save);
    }

    #[test]
    fn test_cli_difficulty() {
        let cli = Cli::parse_from(["soundpath", "-d", "nightmare"]);
        assert_eq!(cli.difficulty, Some(Difficulty::Nightmare));

        let cli = Cli::parse_from(["soundpath", "--difficulty", "easy", "--seed", "42"]);
        assert_eq!(cli.difficulty, Some(Difficulty::Easy));
        assert_eq!(cli.seed, Some(42));
    }

    #[test]
    fn test_cli_rejects_unknown_difficulty() {
        assert!(Cli::try_parse_from(["soundpath", "-d", "insane"]).is_err());
    }

    #[test]
    fn test_cli_overrides_config() {
        let stored = Config {
            difficulty: Some(Difficulty::Hard),
            seed: Some(1),
            word_bank: None,
            show_feedback: true,
        };
        let cli = Cli::parse_from(["soundpath", "--seed", "9", "--no-feedback", "-w", "bank.json"]);
        let merged = cli.apply_to(stored);
        assert_eq!(merged.difficulty, Some(Difficulty::Hard));
        assert_eq!(merged.seed, Some(9));
        assert_eq!(merged.word_bank, Some(PathBuf::from("bank.json")));
        assert!(!merged.show_feedback);
    }

    #[test]
    fn test_menu_navigation_and_start() {
        let mut app = new_app();
        assert_eq!(app.handle_key(key(KeyCode::Up)), Control::Continue);
        assert_eq!(app.menu_index, 0);
        app.handle_key(key(KeyCode::Down));
        app.handle_key(key(KeyCode::Down));
        app.handle_key(key(KeyCode::Down));
        app.handle_key(key(KeyCode::Down));
        assert_eq!(app.menu_index, 3);

        assert_eq!(app.handle_key(key(KeyCode::Enter)), Control::Rearm);
        assert_eq!(app.game.state(), GameState::Playing);
        assert_eq!(app.game.difficulty(), Some(Difficulty::Nightmare));
    }

    #[test]
    fn test_number_keys_start_tier() {
        let mut app = new_app();
        assert_eq!(app.handle_key(key(KeyCode::Char('2'))), Control::Rearm);
        assert_eq!(app.game.difficulty(), Some(Difficulty::Medium));
        assert_eq!(app.menu_index, 1);
    }

    #[test]
    fn test_arrow_moves_and_rearm() {
        let mut app = new_app();
        app.game.start_level(Difficulty::Easy, down_then_right(5));

        // Off the top edge: nothing happens
        assert_eq!(app.handle_key(key(KeyCode::Up)), Control::Continue);
        // Right is a wrong cell but still an accepted move
        assert_eq!(app.handle_key(key(KeyCode::Right)), Control::Rearm);
        assert_eq!(app.game.snapshot().lives, 4);
        assert_eq!(app.handle_key(key(KeyCode::Char('j'))), Control::Rearm);
        assert_eq!(app.game.snapshot().player_pos, Position::new(1, 0));
    }

    #[test]
    fn test_full_walk_then_new_maze() {
        let mut app = new_app();
        app.game.start_level(Difficulty::Easy, down_then_right(5));
        for _ in 0..4 {
            app.handle_key(key(KeyCode::Down));
        }
        for _ in 0..4 {
            app.handle_key(key(KeyCode::Char('l')));
        }
        assert_eq!(app.game.state(), GameState::Won);

        // Movement keys do nothing once the game is over
        assert_eq!(app.handle_key(key(KeyCode::Left)), Control::Continue);
        assert_eq!(app.handle_key(key(KeyCode::Char('n'))), Control::Rearm);
        assert_eq!(app.game.state(), GameState::Playing);
    }

    #[test]
    fn test_restart_returns_to_menu() {
        let mut app = new_app();
        app.handle_key(key(KeyCode::Char('1')));
        assert_eq!(app.handle_key(key(KeyCode::Char('r'))), Control::Continue);
        assert_eq!(app.game.state(), GameState::DifficultySelection);
    }

    #[test]
    fn test_quit_keys() {
        let mut app = new_app();
        assert_eq!(app.handle_key(key(KeyCode::Esc)), Control::Quit);
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(app.handle_key(ctrl_c), Control::Quit);
    }

    #[test]
    fn test_app_new_tracks_preselected_difficulty() {
        let mut game = Game::new(WordBank::builtin(), Some(1));
        game.select_difficulty(Difficulty::Hard);
        let app = App::new(game, false);
        assert_eq!(app.menu_index, 2);
        assert!(!app.show_feedback);
    }

    #[test]
    fn test_ui_renders_each_state() {
        use ratatui::{backend::TestBackend, Terminal};

        let mut app = new_app();
        let mut terminal = Terminal::new(TestBackend::new(90, 26)).unwrap();
        terminal.draw(|f| ui(&app, f)).unwrap();

        app.handle_key(key(KeyCode::Char('3')));
        terminal.draw(|f| ui(&app, f)).unwrap();

        app.game.restart();
        app.game.start_level(Difficulty::Easy, down_then_right(5));
        app.handle_key(key(KeyCode::Right));
        for _ in 0..4 {
            app.handle_key(key(KeyCode::Right));
        }
        assert_eq!(app.game.state(), GameState::Lost);
        terminal.draw(|f| ui(&app, f)).unwrap();
    }
}
