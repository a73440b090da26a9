// Library surface for headless/integration tests and reuse.
// Terminal rendering stays in the binary (main.rs + ui).
pub mod app_dirs;
pub mod config;
pub mod difficulty;
pub mod game;
pub mod logging;
pub mod maze;
pub mod runtime;
pub mod session;
pub mod streak;
pub mod timer;
pub mod vocabulary;
