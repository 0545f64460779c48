use crate::art;
use crate::error::HangmanError;
use crate::game::{Game, GameConfig, Guess, Outcome, Status};
use crate::wordbank::{Difficulty, WordProvider};
use crate::{debug_log, info_log};
use rand::Rng;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserAction {
    Guess(Guess),
    Exit,
}

/// How a game ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameResult {
    Won { secret: String, attempts: u32 },
    Lost { secret: String, attempts: u32 },
    /// The player quit before the game finished.
    Abandoned,
}

/// Snapshot of a game handed to the interface for rendering.
#[derive(Debug, Clone)]
pub struct GameView {
    pub masked_word: String,
    pub used_letters: Vec<char>,
    pub attempts: u32,
    pub remaining_attempts: u32,
    pub max_attempts: u32,
    pub frame: &'static str,
}

impl GameView {
    pub fn from_game(game: &Game) -> Self {
        Self {
            masked_word: game.masked_word(),
            used_letters: game.used_letters().iter().copied().collect(),
            attempts: game.attempts(),
            remaining_attempts: game.remaining_attempts(),
            max_attempts: game.config().max_attempts,
            frame: art::frame(game.attempts()),
        }
    }

    pub fn used_letters_line(&self) -> String {
        self.used_letters
            .iter()
            .map(char::to_string)
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Presentation layer driven by [`game_loop`].
///
/// Implementations render state and collect raw input; they never evaluate
/// guesses themselves.
pub trait GameInterface {
    fn display_welcome(&mut self);

    /// Raw difficulty token, or `None` if the player quit.
    fn read_difficulty(&mut self) -> Option<String>;

    fn display_state(&mut self, view: &GameView);

    /// `None` means the input was malformed and the prompt should repeat.
    fn read_guess(&mut self, allow_words: bool) -> Option<UserAction>;

    /// `penalty` is the number of attempts this guess cost (0 for a hit).
    fn display_outcome(&mut self, guess: &Guess, outcome: Outcome, penalty: u32);

    fn display_result(&mut self, result: &GameResult, view: &GameView);

    fn display_error(&mut self, error: &HangmanError);
}

/// Plays one game from difficulty selection to the final result.
///
/// Errors (bad difficulty, missing or empty word list) are shown through the
/// interface once and returned; no game state is created in that case.
pub fn game_loop<I, P, R>(
    interface: &mut I,
    provider: &P,
    config: GameConfig,
    preset: Option<Difficulty>,
    rng: &mut R,
) -> Result<GameResult, HangmanError>
where
    I: GameInterface + ?Sized,
    P: WordProvider,
    R: Rng + ?Sized,
{
    interface.display_welcome();

    let difficulty = match preset {
        Some(difficulty) => difficulty,
        None => {
            let Some(choice) = interface.read_difficulty() else {
                return Ok(GameResult::Abandoned);
            };
            match Difficulty::from_choice(&choice) {
                Ok(difficulty) => difficulty,
                Err(e) => return Err(report(interface, e)),
            }
        }
    };

    let secret = match provider.select_word(difficulty, rng) {
        Ok(secret) => secret,
        Err(e) => return Err(report(interface, e)),
    };
    log::info!(
        "Starting {} game with a {}-letter word",
        difficulty,
        secret.chars().count()
    );

    let mut game = Game::start(&secret, config, rng);

    while !game.is_over() {
        interface.display_state(&GameView::from_game(&game));

        let guess = loop {
            match interface.read_guess(config.allow_word_guesses) {
                Some(UserAction::Guess(guess)) => break guess,
                Some(UserAction::Exit) => {
                    info_log!("game_loop() - Player quit with {} attempts used", game.attempts());
                    return Ok(GameResult::Abandoned);
                }
                None => {
                    debug_log!("game_loop() - Malformed guess, prompting again");
                }
            }
        };

        let before = game.attempts();
        let outcome = game.apply_guess(&guess);
        let penalty = game.attempts() - before;
        debug_log!("game_loop() - {:?} -> {:?} (cost {})", guess, outcome, penalty);
        interface.display_outcome(&guess, outcome, penalty);
    }

    let result = match game.status() {
        Status::Won => GameResult::Won {
            secret: game.secret(),
            attempts: game.attempts(),
        },
        _ => GameResult::Lost {
            secret: game.secret(),
            attempts: game.attempts(),
        },
    };
    log::info!("Game finished: {:?}", result);
    interface.display_result(&result, &GameView::from_game(&game));
    Ok(result)
}

fn report<I: GameInterface + ?Sized>(interface: &mut I, error: HangmanError) -> HangmanError {
    log::error!("{error}");
    interface.display_error(&error);
    error
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wordbank::FixedWords;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::collections::VecDeque;

    /// Scripted interface that records what the loop asked it to show.
    #[derive(Default)]
    struct ScriptedInterface {
        difficulty: Option<String>,
        inputs: VecDeque<&'static str>,
        states: Vec<String>,
        outcomes: Vec<Outcome>,
        penalties: Vec<u32>,
        result: Option<GameResult>,
        errors: Vec<String>,
    }

    impl ScriptedInterface {
        fn new(difficulty: &str, inputs: &[&'static str]) -> Self {
            Self {
                difficulty: Some(difficulty.to_string()),
                inputs: inputs.iter().copied().collect(),
                ..Self::default()
            }
        }
    }

    impl GameInterface for ScriptedInterface {
        fn display_welcome(&mut self) {}

        fn read_difficulty(&mut self) -> Option<String> {
            self.difficulty.take()
        }

        fn display_state(&mut self, view: &GameView) {
            self.states.push(view.masked_word.clone());
        }

        fn read_guess(&mut self, allow_words: bool) -> Option<UserAction> {
            match self.inputs.pop_front() {
                None | Some("quit") => Some(UserAction::Exit),
                Some(input) => Guess::parse(input, allow_words).map(UserAction::Guess),
            }
        }

        fn display_outcome(&mut self, _guess: &Guess, outcome: Outcome, penalty: u32) {
            self.outcomes.push(outcome);
            self.penalties.push(penalty);
        }

        fn display_result(&mut self, result: &GameResult, _view: &GameView) {
            self.result = Some(result.clone());
        }

        fn display_error(&mut self, error: &HangmanError) {
            self.errors.push(error.to_string());
        }
    }

    fn play(
        interface: &mut ScriptedInterface,
        words: &[&str],
        config: GameConfig,
    ) -> Result<GameResult, HangmanError> {
        let provider = FixedWords::new(words);
        let mut rng = StdRng::seed_from_u64(11);
        game_loop(interface, &provider, config, None, &mut rng)
    }

    #[test]
    fn test_game_loop_win_by_letters() {
        let mut ui = ScriptedInterface::new("1", &["c", "h", "a", "t"]);
        let result = play(&mut ui, &["chat"], GameConfig::default()).unwrap();

        assert_eq!(
            result,
            GameResult::Won {
                secret: "chat".to_string(),
                attempts: 0
            }
        );
        assert_eq!(ui.states, vec!["_ _ _ _", "c _ _ _", "c h _ _", "c h a _"]);
        assert_eq!(
            ui.outcomes,
            vec![Outcome::Continue, Outcome::Continue, Outcome::Continue, Outcome::Won]
        );
        assert_eq!(ui.result, Some(result));
    }

    #[test]
    fn test_game_loop_malformed_input_is_reprompted() {
        let mut ui = ScriptedInterface::new("2", &["", "42", "c!", "chat"]);
        let result = play(&mut ui, &["chat"], GameConfig::default()).unwrap();

        assert!(matches!(result, GameResult::Won { .. }));
        // Only one turn was rendered: malformed input never reached the engine.
        assert_eq!(ui.states.len(), 1);
        assert_eq!(ui.outcomes, vec![Outcome::Won]);
    }

    #[test]
    fn test_game_loop_rejected_letter_does_not_cost() {
        let mut ui = ScriptedInterface::new("1", &["c", "c", "h", "a", "t"]);
        let result = play(&mut ui, &["chat"], GameConfig::default()).unwrap();

        assert_eq!(ui.outcomes[1], Outcome::Rejected);
        assert_eq!(
            result,
            GameResult::Won {
                secret: "chat".to_string(),
                attempts: 0
            }
        );
    }

    #[test]
    fn test_game_loop_loss() {
        let mut ui = ScriptedInterface::new("3", &["x", "y", "z", "w", "v", "u"]);
        let result = play(&mut ui, &["chien"], GameConfig::default()).unwrap();

        assert_eq!(
            result,
            GameResult::Lost {
                secret: "chien".to_string(),
                attempts: 6
            }
        );
        assert_eq!(ui.outcomes.last(), Some(&Outcome::Lost));
    }

    #[test]
    fn test_game_loop_reports_cost_of_each_guess() {
        let mut ui = ScriptedInterface::new("1", &["z", "c", "c", "chien", "chat"]);
        let result = play(&mut ui, &["chat"], GameConfig::default()).unwrap();

        assert_eq!(
            ui.outcomes,
            vec![
                Outcome::Continue,
                Outcome::Continue,
                Outcome::Rejected,
                Outcome::Continue,
                Outcome::Won
            ]
        );
        assert_eq!(ui.penalties, vec![1, 0, 0, 2, 0]);
        assert!(matches!(result, GameResult::Won { attempts: 3, .. }));
    }

    #[test]
    fn test_game_loop_quit_mid_game() {
        let mut ui = ScriptedInterface::new("1", &["c", "quit"]);
        let result = play(&mut ui, &["chat"], GameConfig::default()).unwrap();
        assert_eq!(result, GameResult::Abandoned);
        assert!(ui.result.is_none());
    }

    #[test]
    fn test_game_loop_quit_at_difficulty_prompt() {
        let mut ui = ScriptedInterface::default();
        let result = play(&mut ui, &["chat"], GameConfig::default()).unwrap();
        assert_eq!(result, GameResult::Abandoned);
        assert!(ui.states.is_empty());
    }

    #[test]
    fn test_game_loop_invalid_difficulty_aborts() {
        let mut ui = ScriptedInterface::new("7", &["c"]);
        let err = play(&mut ui, &["chat"], GameConfig::default()).unwrap_err();

        assert!(matches!(err, HangmanError::InvalidDifficultyChoice(ref c) if c == "7"));
        assert_eq!(ui.errors.len(), 1);
        assert!(ui.states.is_empty());
    }

    #[test]
    fn test_game_loop_empty_list_aborts() {
        let mut ui = ScriptedInterface::new("1", &["c"]);
        let err = play(&mut ui, &[], GameConfig::default()).unwrap_err();

        assert!(matches!(err, HangmanError::EmptyWordSource { .. }));
        assert_eq!(ui.errors.len(), 1);
        assert!(ui.states.is_empty());
    }

    #[test]
    fn test_game_loop_preset_skips_prompt() {
        let mut ui = ScriptedInterface::new("not a choice", &["chat"]);
        let provider = FixedWords::new(&["chat"]);
        let mut rng = StdRng::seed_from_u64(0);
        let result = game_loop(
            &mut ui,
            &provider,
            GameConfig::default(),
            Some(Difficulty::Hard),
            &mut rng,
        )
        .unwrap();
        assert!(matches!(result, GameResult::Won { .. }));
        assert!(ui.errors.is_empty());
    }

    #[test]
    fn test_game_loop_letters_only_rejects_words() {
        let config = GameConfig {
            allow_word_guesses: false,
            ..GameConfig::default()
        };
        let mut ui = ScriptedInterface::new("1", &["chat", "c", "h", "a", "t"]);
        let result = play(&mut ui, &["chat"], config).unwrap();
        assert!(matches!(result, GameResult::Won { .. }));
        assert_eq!(ui.outcomes.len(), 4);
    }

    #[test]
    fn test_game_view_lists_used_letters_in_order() {
        let mut game = Game::new("chat", GameConfig::default());
        game.apply_guess(&Guess::Letter('t'));
        game.apply_guess(&Guess::Letter('b'));
        game.apply_guess(&Guess::Letter('a'));
        let view = GameView::from_game(&game);
        assert_eq!(view.used_letters_line(), "a b t");
        assert_eq!(view.remaining_attempts, 5);
        assert_eq!(view.frame, art::frame(1));
    }
}
