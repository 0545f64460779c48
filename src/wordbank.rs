use crate::error::HangmanError;
use rand::Rng;
use std::fmt;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

pub const EMBEDDED_EASY: &str = include_str!("resources/words_easy.txt");
pub const EMBEDDED_MEDIUM: &str = include_str!("resources/words_medium.txt");
pub const EMBEDDED_HARD: &str = include_str!("resources/words_hard.txt");

const DATA_DIR_NAME: &str = "hangman";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    /// Maps a menu token (`1`-`3` or the tier name) to a difficulty.
    pub fn from_choice(choice: &str) -> Result<Self, HangmanError> {
        match choice.trim().to_lowercase().as_str() {
            "1" | "easy" => Ok(Self::Easy),
            "2" | "medium" => Ok(Self::Medium),
            "3" | "hard" => Ok(Self::Hard),
            _ => Err(HangmanError::InvalidDifficultyChoice(
                choice.trim().to_string(),
            )),
        }
    }

    pub fn file_name(self) -> &'static str {
        match self {
            Self::Easy => "words_easy.txt",
            Self::Medium => "words_medium.txt",
            Self::Hard => "words_hard.txt",
        }
    }

    fn embedded(self) -> &'static str {
        match self {
            Self::Easy => EMBEDDED_EASY,
            Self::Medium => EMBEDDED_MEDIUM,
            Self::Hard => EMBEDDED_HARD,
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Easy => "easy",
            Self::Medium => "medium",
            Self::Hard => "hard",
        };
        f.write_str(name)
    }
}

fn is_valid_word(word: &str) -> bool {
    !word.is_empty() && word.chars().all(char::is_alphabetic)
}

fn warn_dropped(dropped: usize) {
    if dropped > 0 {
        log::warn!("Skipped {dropped} word list line(s) containing non-letter characters");
    }
}

/// Trims each line, drops blank lines and lowercases. Lines with anything other
/// than letters are skipped, since no guess could ever reveal those positions.
pub fn load_words_from_str(data: &str) -> Vec<String> {
    let mut dropped = 0;
    let mut words = Vec::new();
    for line in data.lines().map(str::trim).filter(|line| !line.is_empty()) {
        let word = line.to_lowercase();
        if is_valid_word(&word) {
            words.push(word);
        } else {
            dropped += 1;
        }
    }
    warn_dropped(dropped);
    words
}

pub fn load_words_from_file<P: AsRef<Path>>(path: P) -> Result<Vec<String>, HangmanError> {
    let path = path.as_ref();
    let unavailable = |source| HangmanError::WordSourceUnavailable {
        path: path.to_path_buf(),
        source,
    };
    let file = File::open(path).map_err(unavailable)?;
    let reader = BufReader::new(file);
    let mut dropped = 0;
    let mut words = Vec::new();
    for line in reader.lines() {
        let line = line.map_err(unavailable)?;
        let word = line.trim();
        if word.is_empty() {
            continue;
        }
        let word = word.to_lowercase();
        if is_valid_word(&word) {
            words.push(word);
        } else {
            dropped += 1;
        }
    }
    warn_dropped(dropped);
    Ok(words)
}

/// Supplies the secret word for a new game.
pub trait WordProvider {
    /// Picks one word uniformly at random from the list for `difficulty`.
    fn select_word<R: Rng + ?Sized>(
        &self,
        difficulty: Difficulty,
        rng: &mut R,
    ) -> Result<String, HangmanError>;
}

/// Where the word lists live.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WordSource {
    /// Lists compiled into the binary.
    Embedded,
    /// One file per difficulty tier inside a directory.
    Directory(PathBuf),
    /// A single list shared by every tier.
    SingleFile(PathBuf),
}

impl WordSource {
    /// Prefers user-supplied lists in the platform data directory, falling back
    /// to the embedded ones.
    pub fn discover() -> Self {
        match get_user_words_dir() {
            Some(dir) if has_all_tiers(&dir) => {
                log::debug!("Using word lists from {}", dir.display());
                Self::Directory(dir)
            }
            _ => Self::Embedded,
        }
    }

    pub fn load(&self, difficulty: Difficulty) -> Result<Vec<String>, HangmanError> {
        match self {
            Self::Embedded => Ok(load_words_from_str(difficulty.embedded())),
            Self::Directory(dir) => load_words_from_file(dir.join(difficulty.file_name())),
            Self::SingleFile(path) => load_words_from_file(path),
        }
    }
}

impl fmt::Display for WordSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Embedded => write!(f, "embedded word lists"),
            Self::Directory(dir) => write!(f, "word lists in {}", dir.display()),
            Self::SingleFile(path) => write!(f, "word list {}", path.display()),
        }
    }
}

impl WordProvider for WordSource {
    fn select_word<R: Rng + ?Sized>(
        &self,
        difficulty: Difficulty,
        rng: &mut R,
    ) -> Result<String, HangmanError> {
        let words = self.load(difficulty)?;
        pick_word(&words, difficulty, rng)
    }
}

/// In-memory list used for every difficulty.
#[derive(Debug, Clone, Default)]
pub struct FixedWords {
    words: Vec<String>,
}

impl FixedWords {
    pub fn new<S: AsRef<str>>(words: &[S]) -> Self {
        let joined = words
            .iter()
            .map(AsRef::as_ref)
            .collect::<Vec<_>>()
            .join("\n");
        Self {
            words: load_words_from_str(&joined),
        }
    }
}

impl WordProvider for FixedWords {
    fn select_word<R: Rng + ?Sized>(
        &self,
        difficulty: Difficulty,
        rng: &mut R,
    ) -> Result<String, HangmanError> {
        pick_word(&self.words, difficulty, rng)
    }
}

fn pick_word<R: Rng + ?Sized>(
    words: &[String],
    difficulty: Difficulty,
    rng: &mut R,
) -> Result<String, HangmanError> {
    if words.is_empty() {
        return Err(HangmanError::EmptyWordSource { difficulty });
    }
    let index = rng.random_range(0..words.len());
    Ok(words[index].clone())
}

#[must_use]
pub fn get_user_words_dir() -> Option<PathBuf> {
    dirs::data_dir().map(|dir| dir.join(DATA_DIR_NAME))
}

fn has_all_tiers(dir: &Path) -> bool {
    Difficulty::ALL
        .iter()
        .all(|difficulty| dir.join(difficulty.file_name()).is_file())
}
