use crate::error::HangmanError;
use crate::game::{DEFAULT_MAX_ATTEMPTS, DEFAULT_WORD_PENALTY, GameConfig, Guess, Outcome};
use crate::game_state::{GameInterface, GameResult, GameView, UserAction};
use crate::wordbank::{Difficulty, WordSource};
use clap::{ArgAction, Parser};
use std::io::BufRead;
use std::path::PathBuf;

/// Hangman in the terminal
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Directory holding words_easy.txt, words_medium.txt and words_hard.txt
    #[arg(short = 'w', long = "words-dir", conflicts_with = "word_file")]
    pub words_dir: Option<PathBuf>,

    /// Single newline-delimited word list used for every difficulty
    #[arg(short = 'f', long = "word-file")]
    pub word_file: Option<PathBuf>,

    /// Difficulty (1/easy, 2/medium, 3/hard); asked interactively when omitted
    #[arg(short = 'd', long, value_parser = parse_difficulty)]
    pub difficulty: Option<Difficulty>,

    /// Wrong attempts allowed before the game is lost
    #[arg(short = 'm', long, default_value_t = DEFAULT_MAX_ATTEMPTS,
          value_parser = clap::value_parser!(u32).range(1..))]
    pub max_attempts: u32,

    /// Attempts charged for a wrong whole-word guess
    #[arg(long, default_value_t = DEFAULT_WORD_PENALTY)]
    pub word_penalty: u32,

    /// Reveal one random letter before the first turn
    #[arg(long)]
    pub reveal_letter: bool,

    /// Only accept single-letter guesses
    #[arg(long)]
    pub letters_only: bool,

    /// Seed for the random source, for reproducible games
    #[arg(long)]
    pub seed: Option<u64>,

    /// Use the full-screen terminal interface
    #[arg(long)]
    pub tui: bool,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count)]
    pub verbose: u8,

    /// Write log records to this file instead of stderr
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

impl Cli {
    pub fn game_config(&self) -> GameConfig {
        GameConfig {
            max_attempts: self.max_attempts,
            word_penalty: self.word_penalty,
            reveal_one_letter: self.reveal_letter,
            allow_word_guesses: !self.letters_only,
        }
    }

    pub fn word_source(&self) -> WordSource {
        match (&self.words_dir, &self.word_file) {
            (Some(dir), _) => WordSource::Directory(dir.clone()),
            (None, Some(path)) => WordSource::SingleFile(path.clone()),
            (None, None) => WordSource::discover(),
        }
    }
}

#[must_use]
pub fn parse_cli() -> Cli {
    Cli::parse()
}

fn parse_difficulty(value: &str) -> Result<Difficulty, String> {
    Difficulty::from_choice(value).map_err(|e| e.to_string())
}

// UI Input/Output functions

pub fn display_welcome() {
    println!(" ===== Welcome to Hangman! ===== ");
    println!("Guess the word before the man is hanged!");
}

pub fn display_difficulty_menu() {
    println!("Choose a difficulty:");
    println!("1. Easy");
    println!("2. Medium");
    println!("3. Hard");
}

pub fn display_state(view: &GameView) {
    println!("{}", view.frame);
    println!("Word: {}", view.masked_word);
    println!("Used letters: {}", view.used_letters_line());
    println!("Attempts left: {}", view.remaining_attempts);
}

/// Feedback line for one guess; `penalty` is the number of attempts it cost.
pub fn outcome_message(guess: &Guess, outcome: Outcome, penalty: u32) -> String {
    match (guess, outcome) {
        (Guess::Letter(c), Outcome::Rejected) => {
            format!("You already used '{c}'. Try another letter.")
        }
        (Guess::Letter(c), _) if penalty > 0 => format!("'{c}' is not in the word."),
        (Guess::Letter(c), _) => format!("'{c}' is in the word!"),
        (Guess::Word(w), Outcome::Won) => format!("'{w}' is the word!"),
        (Guess::Word(w), _) => format!("'{w}' is not the word (-{penalty} attempts)."),
    }
}

pub fn display_outcome(guess: &Guess, outcome: Outcome, penalty: u32) {
    println!("{}", outcome_message(guess, outcome, penalty));
}

pub fn display_result(result: &GameResult, view: &GameView) {
    match result {
        GameResult::Won { secret, .. } => {
            println!("---------------------------------------------");
            println!("Congratulations, you guessed the word: {secret}");
        }
        GameResult::Lost { secret, .. } => {
            display_state(view);
            println!("You lost! The word was: {secret}");
        }
        GameResult::Abandoned => println!("Exiting."),
    }
}

pub fn display_error(error: &HangmanError) {
    println!("Error: {error}");
}

/// Reads one line; `None` at end of input or on a read error.
fn read_trimmed<R: BufRead>(reader: &mut R) -> Option<String> {
    let mut input = String::new();
    match reader.read_line(&mut input) {
        Ok(0) | Err(_) => None,
        Ok(_) => Some(input.trim().to_string()),
    }
}

pub fn read_difficulty<R: BufRead>(reader: &mut R) -> Option<String> {
    display_difficulty_menu();
    read_trimmed(reader)
}

pub fn read_guess<R: BufRead>(reader: &mut R, allow_words: bool) -> Option<UserAction> {
    if allow_words {
        println!("\nEnter a letter or the whole word ('quit' to exit):");
    } else {
        println!("\nEnter a letter ('quit' to exit):");
    }
    let Some(input) = read_trimmed(reader) else {
        return Some(UserAction::Exit);
    };

    match input.to_lowercase().as_str() {
        "quit" | "exit" => Some(UserAction::Exit),
        _ => match Guess::parse(&input, allow_words) {
            Some(guess) => Some(UserAction::Guess(guess)),
            None => {
                if allow_words {
                    println!("Please enter a single letter or a word made of letters.");
                } else {
                    println!("Please enter a single valid letter.");
                }
                None
            }
        },
    }
}

/// CLI implementation of the GameInterface trait
/// This struct wraps a BufRead reader and implements the game interface for CLI interaction
pub struct CliInterface<R: BufRead> {
    reader: R,
}

impl<R: BufRead> CliInterface<R> {
    pub fn new(reader: R) -> Self {
        Self { reader }
    }
}

impl<R: BufRead> GameInterface for CliInterface<R> {
    fn display_welcome(&mut self) {
        display_welcome();
    }

    fn read_difficulty(&mut self) -> Option<String> {
        read_difficulty(&mut self.reader)
    }

    fn display_state(&mut self, view: &GameView) {
        display_state(view);
    }

    fn read_guess(&mut self, allow_words: bool) -> Option<UserAction> {
        read_guess(&mut self.reader, allow_words)
    }

    fn display_outcome(&mut self, guess: &Guess, outcome: Outcome, penalty: u32) {
        display_outcome(guess, outcome, penalty);
    }

    fn display_result(&mut self, result: &GameResult, view: &GameView) {
        display_result(result, view);
    }

    fn display_error(&mut self, error: &HangmanError) {
        display_error(error);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_parse_cli_defaults() {
        let cli = Cli::try_parse_from(["hangman"]).unwrap();
        assert_eq!(cli.words_dir, None);
        assert_eq!(cli.word_file, None);
        assert_eq!(cli.difficulty, None);
        assert_eq!(cli.game_config(), GameConfig::default());
        assert!(!cli.tui);
        assert_eq!(cli.verbose, 0);
    }

    #[test]
    fn test_parse_cli_variant_options() {
        let cli = Cli::try_parse_from([
            "hangman",
            "-m",
            "7",
            "--word-penalty",
            "1",
            "--reveal-letter",
            "--letters-only",
            "-d",
            "hard",
            "--seed",
            "99",
            "-vv",
        ])
        .unwrap();
        let config = cli.game_config();
        assert_eq!(config.max_attempts, 7);
        assert_eq!(config.word_penalty, 1);
        assert!(config.reveal_one_letter);
        assert!(!config.allow_word_guesses);
        assert_eq!(cli.difficulty, Some(Difficulty::Hard));
        assert_eq!(cli.seed, Some(99));
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn test_parse_cli_rejects_bad_difficulty() {
        assert!(Cli::try_parse_from(["hangman", "-d", "4"]).is_err());
    }

    #[test]
    fn test_parse_cli_rejects_zero_attempts() {
        assert!(Cli::try_parse_from(["hangman", "-m", "0"]).is_err());
    }

    #[test]
    fn test_words_dir_conflicts_with_word_file() {
        let result = Cli::try_parse_from(["hangman", "-w", "lists", "-f", "words.txt"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_word_source_from_flags() {
        let cli = Cli::try_parse_from(["hangman", "-w", "lists"]).unwrap();
        assert_eq!(cli.word_source(), WordSource::Directory(PathBuf::from("lists")));

        let cli = Cli::try_parse_from(["hangman", "-f", "words.txt"]).unwrap();
        assert_eq!(
            cli.word_source(),
            WordSource::SingleFile(PathBuf::from("words.txt"))
        );
    }

    #[test]
    fn test_read_difficulty_trims_input() {
        let mut reader = Cursor::new("  2 \n");
        assert_eq!(read_difficulty(&mut reader), Some("2".to_string()));
    }

    #[test]
    fn test_read_difficulty_end_of_input() {
        let mut reader = Cursor::new("");
        assert_eq!(read_difficulty(&mut reader), None);
    }

    #[test]
    fn test_read_guess_letter_lowercased() {
        let mut reader = Cursor::new("E\n");
        assert_eq!(
            read_guess(&mut reader, true),
            Some(UserAction::Guess(Guess::Letter('e')))
        );
    }

    #[test]
    fn test_read_guess_whole_word() {
        let mut reader = Cursor::new("Chien\n");
        assert_eq!(
            read_guess(&mut reader, true),
            Some(UserAction::Guess(Guess::Word("chien".to_string())))
        );
    }

    #[test]
    fn test_read_guess_word_refused_when_letters_only() {
        let mut reader = Cursor::new("chien\n");
        assert_eq!(read_guess(&mut reader, false), None);
    }

    #[test]
    fn test_read_guess_invalid_input() {
        for input in ["\n", "7\n", "a b\n", "?\n"] {
            let mut reader = Cursor::new(input);
            assert_eq!(read_guess(&mut reader, true), None, "input {input:?}");
        }
    }

    #[test]
    fn test_read_guess_quit_and_eof() {
        let mut reader = Cursor::new("QUIT\n");
        assert_eq!(read_guess(&mut reader, true), Some(UserAction::Exit));
        let mut reader = Cursor::new("exit\n");
        assert_eq!(read_guess(&mut reader, true), Some(UserAction::Exit));
        let mut reader = Cursor::new("");
        assert_eq!(read_guess(&mut reader, true), Some(UserAction::Exit));
    }

    #[test]
    fn test_outcome_message_tells_hit_from_miss() {
        let miss = outcome_message(&Guess::Letter('z'), Outcome::Continue, 1);
        let hit = outcome_message(&Guess::Letter('c'), Outcome::Continue, 0);
        assert_eq!(miss, "'z' is not in the word.");
        assert_eq!(hit, "'c' is in the word!");
        assert_ne!(miss, hit);
    }

    #[test]
    fn test_outcome_message_final_miss_and_repeat() {
        assert_eq!(
            outcome_message(&Guess::Letter('u'), Outcome::Lost, 1),
            "'u' is not in the word."
        );
        assert_eq!(
            outcome_message(&Guess::Letter('c'), Outcome::Rejected, 0),
            "You already used 'c'. Try another letter."
        );
    }

    #[test]
    fn test_outcome_message_whole_word() {
        let word = Guess::Word("chen".to_string());
        assert_eq!(
            outcome_message(&word, Outcome::Continue, 2),
            "'chen' is not the word (-2 attempts)."
        );
        let word = Guess::Word("chien".to_string());
        assert_eq!(outcome_message(&word, Outcome::Won, 0), "'chien' is the word!");
    }

    #[test]
    fn test_cli_interface_reads_in_sequence() {
        let mut ui = CliInterface::new(Cursor::new("1\na\nquit\n"));
        assert_eq!(ui.read_difficulty(), Some("1".to_string()));
        assert_eq!(
            ui.read_guess(true),
            Some(UserAction::Guess(Guess::Letter('a')))
        );
        assert_eq!(ui.read_guess(true), Some(UserAction::Exit));
    }
}
