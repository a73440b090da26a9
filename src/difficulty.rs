use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Grid sizes the maze generator accepts
pub const SUPPORTED_GRID_SIZES: [usize; 4] = [5, 6, 7, 10];

#[derive(
    Debug, Copy, Clone, PartialEq, Eq, Hash, ValueEnum, Serialize, Deserialize, strum_macros::Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
    Nightmare,
}

/// Static per-tier configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DifficultySettings {
    pub grid_size: usize,
    pub lives: u32,
    pub timer_seconds: u32,
    pub display_name: &'static str,
    /// Single life, instant loss on any wrong step, no same-class decoys
    pub hardened: bool,
}

impl Difficulty {
    pub const ALL: [Difficulty; 4] = [
        Difficulty::Easy,
        Difficulty::Medium,
        Difficulty::Hard,
        Difficulty::Nightmare,
    ];

    pub fn settings(self) -> DifficultySettings {
        match self {
            Difficulty::Easy => DifficultySettings {
                grid_size: 5,
                lives: 5,
                timer_seconds: 15,
                display_name: "Easy",
                hardened: false,
            },
            Difficulty::Medium => DifficultySettings {
                grid_size: 6,
                lives: 4,
                timer_seconds: 12,
                display_name: "Medium",
                hardened: false,
            },
            Difficulty::Hard => DifficultySettings {
                grid_size: 7,
                lives: 3,
                timer_seconds: 10,
                display_name: "Hard",
                hardened: false,
            },
            Difficulty::Nightmare => DifficultySettings {
                grid_size: 10,
                lives: 1,
                timer_seconds: 8,
                display_name: "Nightmare",
                hardened: true,
            },
        }
    }

    /// Position in the selection menu
    pub fn index(self) -> usize {
        Self::ALL.iter().position(|&d| d == self).unwrap_or(0)
    }
}
