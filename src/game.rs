//! Guess evaluation for a single hangman game.
//!
//! A [`Game`] owns the secret word, the reveal mask, the set of used letters and
//! the attempt counter. [`Game::apply_guess`] is the only mutation: it moves the
//! game from `Playing` to `Won` or `Lost`, both of which are absorbing.

use crate::debug_log;
use rand::Rng;
use std::collections::BTreeSet;

pub const DEFAULT_MAX_ATTEMPTS: u32 = 6;
pub const DEFAULT_WORD_PENALTY: u32 = 2;
pub const PLACEHOLDER: char = '_';

/// Rules that vary between hangman variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameConfig {
    /// Attempt count at which the game is lost.
    pub max_attempts: u32,
    /// Attempts charged for a wrong whole-word guess.
    pub word_penalty: u32,
    /// Reveal one random letter before the first turn.
    pub reveal_one_letter: bool,
    /// Accept whole-word guesses at the prompt.
    pub allow_word_guesses: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            word_penalty: DEFAULT_WORD_PENALTY,
            reveal_one_letter: false,
            allow_word_guesses: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Guess {
    Letter(char),
    Word(String),
}

impl Guess {
    /// Classifies raw user input. Returns `None` for anything that is neither a
    /// single letter nor (when allowed) a run of letters.
    pub fn parse(input: &str, allow_words: bool) -> Option<Self> {
        let input = input.trim().to_lowercase();
        let mut chars = input.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) if c.is_alphabetic() => Some(Self::Letter(c)),
            (Some(_), Some(_)) if allow_words && input.chars().all(char::is_alphabetic) => {
                Some(Self::Word(input))
            }
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Continue,
    /// Letter was already used; nothing changed.
    Rejected,
    Won,
    Lost,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Playing,
    Won,
    Lost,
}

#[derive(Debug, Clone)]
pub struct Game {
    secret: Vec<char>,
    mask: Vec<Option<char>>,
    used: BTreeSet<char>,
    attempts: u32,
    status: Status,
    config: GameConfig,
}

impl Game {
    pub fn new(secret: &str, config: GameConfig) -> Self {
        let secret: Vec<char> = secret.chars().collect();
        debug_assert!(!secret.is_empty(), "secret word must not be empty");
        Self {
            mask: vec![None; secret.len()],
            secret,
            used: BTreeSet::new(),
            attempts: 0,
            status: Status::Playing,
            config,
        }
    }

    /// Creates a game and applies the pre-reveal if the config asks for it.
    ///
    /// The revealed letter is shown at every position it occupies and counts as
    /// used. Secrets made of a single distinct letter are left hidden, since
    /// revealing them would end the game before it starts.
    pub fn start<R: Rng + ?Sized>(secret: &str, config: GameConfig, rng: &mut R) -> Self {
        let mut game = Self::new(secret, config);
        if config.reveal_one_letter && game.distinct_letters() > 1 {
            let index = rng.random_range(0..game.secret.len());
            let letter = game.secret[index];
            game.used.insert(letter);
            game.reveal(letter);
            debug_log!("Pre-revealed '{}' at position {}", letter, index);
        }
        game
    }

    pub fn apply_guess(&mut self, guess: &Guess) -> Outcome {
        match self.status {
            Status::Won => return Outcome::Won,
            Status::Lost => return Outcome::Lost,
            Status::Playing => {}
        }

        match guess {
            Guess::Word(word) => {
                if word.chars().eq(self.secret.iter().copied()) {
                    self.reveal_all();
                    self.finish(Status::Won)
                } else {
                    self.penalize(self.config.word_penalty)
                }
            }
            Guess::Letter(letter) => {
                if !self.used.insert(*letter) {
                    return Outcome::Rejected;
                }
                if self.reveal(*letter) {
                    if self.is_solved() {
                        self.finish(Status::Won)
                    } else {
                        Outcome::Continue
                    }
                } else {
                    self.penalize(1)
                }
            }
        }
    }

    pub fn secret(&self) -> String {
        self.secret.iter().collect()
    }

    pub fn mask(&self) -> &[Option<char>] {
        &self.mask
    }

    /// Reveal mask with placeholders, one space between positions.
    pub fn masked_word(&self) -> String {
        self.mask
            .iter()
            .map(|slot| slot.unwrap_or(PLACEHOLDER).to_string())
            .collect::<Vec<_>>()
            .join(" ")
    }

    pub fn used_letters(&self) -> &BTreeSet<char> {
        &self.used
    }

    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    pub fn remaining_attempts(&self) -> u32 {
        self.config.max_attempts.saturating_sub(self.attempts)
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn is_over(&self) -> bool {
        self.status != Status::Playing
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    fn distinct_letters(&self) -> usize {
        self.secret.iter().collect::<BTreeSet<_>>().len()
    }

    /// Reveals every position holding `letter`. Returns whether any matched.
    fn reveal(&mut self, letter: char) -> bool {
        let mut found = false;
        for (slot, &c) in self.mask.iter_mut().zip(&self.secret) {
            if c == letter {
                *slot = Some(c);
                found = true;
            }
        }
        found
    }

    fn reveal_all(&mut self) {
        for (slot, &c) in self.mask.iter_mut().zip(&self.secret) {
            *slot = Some(c);
        }
    }

    fn is_solved(&self) -> bool {
        self.mask.iter().all(Option::is_some)
    }

    fn penalize(&mut self, cost: u32) -> Outcome {
        self.attempts = self.attempts.saturating_add(cost);
        if self.attempts >= self.config.max_attempts {
            self.finish(Status::Lost)
        } else {
            Outcome::Continue
        }
    }

    fn finish(&mut self, status: Status) -> Outcome {
        self.status = status;
        match status {
            Status::Won => Outcome::Won,
            Status::Lost => Outcome::Lost,
            Status::Playing => Outcome::Continue,
        }
    }
}
