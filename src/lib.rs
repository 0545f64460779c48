// Library interface for hangman
// This allows integration tests to access internal modules

pub mod art;
pub mod cli;
pub mod error;
pub mod game;
pub mod game_state;
pub mod logging;
pub mod tui;
pub mod wordbank;

// Re-export commonly used items for easier testing
pub use error::HangmanError;
pub use game::{Game, GameConfig, Guess, Outcome, Status};
pub use game_state::{GameInterface, GameResult, GameView, UserAction, game_loop};
pub use wordbank::{
    Difficulty, FixedWords, WordProvider, WordSource, load_words_from_file, load_words_from_str,
};
