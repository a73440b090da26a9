use include_dir::{include_dir, Dir};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::Deserialize;
use std::collections::HashSet;
use std::path::Path;
use thiserror::Error;

static BANK_DIR: Dir = include_dir!("src/vocabulary/banks");

/// Name of the bank compiled into the binary
pub const BUILTIN_BANK: &str = "th_sounds";

/// One of the two pronunciation classes a learner has to tell apart
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum_macros::Display)]
pub enum SoundClass {
    A,
    B,
}

impl SoundClass {
    pub fn other(self) -> Self {
        match self {
            SoundClass::A => SoundClass::B,
            SoundClass::B => SoundClass::A,
        }
    }
}

#[derive(Debug, Error)]
pub enum VocabularyError {
    #[error("failed to read word bank: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse word bank: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("sound class {0} has no words")]
    EmptyPool(SoundClass),

    #[error("word '{0}' appears in both sound classes")]
    Overlap(String),

    #[error("no built-in word bank named '{0}'")]
    UnknownBank(String),
}

#[derive(Deserialize, Clone, Debug, PartialEq)]
pub struct SoundPool {
    pub label: String,
    pub words: Vec<String>,
}

/// Two disjoint word pools, one per sound class
#[derive(Deserialize, Clone, Debug, PartialEq)]
pub struct WordBank {
    pub name: String,
    class_a: SoundPool,
    class_b: SoundPool,
}

impl WordBank {
    pub fn new(name: impl Into<String>, class_a: SoundPool, class_b: SoundPool) -> Result<Self, VocabularyError> {
        let bank = Self {
            name: name.into(),
            class_a,
            class_b,
        };
        bank.validate()?;
        Ok(bank)
    }

    pub fn builtin() -> Self {
        // The embedded bank is validated by the test suite.
        Self::named(BUILTIN_BANK).unwrap_or_else(|e| panic!("built-in word bank is broken: {e}"))
    }

    pub fn named(name: &str) -> Result<Self, VocabularyError> {
        let file = BANK_DIR
            .get_file(format!("{name}.json"))
            .ok_or_else(|| VocabularyError::UnknownBank(name.to_string()))?;
        let contents = file
            .contents_utf8()
            .ok_or_else(|| VocabularyError::UnknownBank(name.to_string()))?;
        Self::from_json_str(contents)
    }

    pub fn from_json_str(s: &str) -> Result<Self, VocabularyError> {
        let bank: WordBank = serde_json::from_str(s)?;
        bank.validate()?;
        Ok(bank)
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, VocabularyError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    fn validate(&self) -> Result<(), VocabularyError> {
        for class in [SoundClass::A, SoundClass::B] {
            if self.pool(class).words.is_empty() {
                return Err(VocabularyError::EmptyPool(class));
            }
        }

        let a: HashSet<String> = self.class_a.words.iter().map(|w| w.to_lowercase()).collect();
        if let Some(shared) = self
            .class_b
            .words
            .iter()
            .find(|w| a.contains(&w.to_lowercase()))
        {
            return Err(VocabularyError::Overlap(shared.clone()));
        }

        Ok(())
    }

    pub fn pool(&self, class: SoundClass) -> &SoundPool {
        match class {
            SoundClass::A => &self.class_a,
            SoundClass::B => &self.class_b,
        }
    }

    pub fn label(&self, class: SoundClass) -> &str {
        &self.pool(class).label
    }

    pub fn random_word<R: Rng + ?Sized>(&self, rng: &mut R, class: SoundClass) -> &str {
        // Pools are never empty once validated
        self.pool(class)
            .words
            .choose(rng)
            .map(String::as_str)
            .unwrap_or_default()
    }

    /// Which class a word belongs to, if any. Case-insensitive, like validation.
    pub fn class_of(&self, word: &str) -> Option<SoundClass> {
        let word = word.to_lowercase();
        [SoundClass::A, SoundClass::B]
            .into_iter()
            .find(|&class| self.pool(class).words.iter().any(|w| w.to_lowercase() == word))
    }
}
