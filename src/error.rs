//! Errors that abort a game before or while it starts.

use crate::wordbank::Difficulty;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum HangmanError {
    #[error("invalid difficulty choice '{0}' (expected 1, 2 or 3)")]
    InvalidDifficultyChoice(String),

    #[error("cannot read word list '{}': {source}", path.display())]
    WordSourceUnavailable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("the {difficulty} word list is empty")]
    EmptyWordSource { difficulty: Difficulty },

    #[error("terminal error: {0}")]
    Terminal(#[from] io::Error),
}
