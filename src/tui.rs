//! TUI (Terminal User Interface) module for Hangman
//!
//! This module provides an interactive terminal interface using Ratatui.
//!
//! # State Machine
//! The UI follows these state transitions:
//! - `ChoosingDifficulty` → `EnteringGuess` (repeated once per turn) → `GameOver`
//! - `GameOver` waits for one key press so the final screen stays visible.

use crate::cli::outcome_message;
use crate::error::HangmanError;
use crate::game::{Guess, Outcome};
use crate::game_state::{GameInterface, GameResult, GameView, UserAction};
use crate::{debug_log, info_log};
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};
use std::io;
use std::time::Duration;

const EVENT_POLL_TIMEOUT_MS: u64 = 100;
const GALLOWS_WIDTH: u16 = 16;

// Style constants for consistent UI
const HEADER_STYLE: Style = Style::new().fg(Color::Cyan).add_modifier(Modifier::BOLD);
const ERROR_STYLE: Style = Style::new().fg(Color::Red);
const SUCCESS_STYLE: Style = Style::new().fg(Color::Green).add_modifier(Modifier::BOLD);
const WORD_STYLE: Style = Style::new().fg(Color::Yellow).add_modifier(Modifier::BOLD);
const MESSAGE_STYLE: Style = Style::new().fg(Color::Cyan);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TuiState {
    ChoosingDifficulty,
    EnteringGuess,
    GameOver,
}

/// Context for rendering the UI - groups related parameters to avoid too many function arguments.
struct RenderContext<'a> {
    view: Option<&'a GameView>,
    current_input: &'a str,
    state: TuiState,
    allow_words: bool,
    message: &'a str,
    message_style: Style,
    error_message: &'a str,
    status: &'a str,
}

/// Main TUI interface component.
///
/// Manages terminal rendering, input handling, and game state display.
pub struct TuiInterface {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
    view: Option<GameView>,
    current_input: String,
    state: TuiState,
    allow_words: bool,
    message: String,
    message_style: Style,
    error_message: String,
    status: String,
}

impl TuiInterface {
    pub fn new() -> Result<Self, io::Error> {
        info_log!("TuiInterface::new() - Initializing TUI");
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, cursor::Hide)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;
        info_log!("Terminal backend created");

        Ok(Self {
            terminal,
            view: None,
            current_input: String::new(),
            state: TuiState::ChoosingDifficulty,
            allow_words: true,
            message: String::new(),
            message_style: MESSAGE_STYLE,
            error_message: String::new(),
            status: "Ready to start".to_string(),
        })
    }

    pub fn cleanup(&mut self) -> Result<(), io::Error> {
        disable_raw_mode()?;
        execute!(
            self.terminal.backend_mut(),
            LeaveAlternateScreen,
            cursor::Show
        )?;
        Ok(())
    }

    /// Draw the current UI state to the terminal.
    fn draw(&mut self) -> Result<(), io::Error> {
        let ctx = RenderContext {
            view: self.view.as_ref(),
            current_input: &self.current_input,
            state: self.state,
            allow_words: self.allow_words,
            message: &self.message,
            message_style: self.message_style,
            error_message: &self.error_message,
            status: &self.status,
        };

        self.terminal.draw(|f| {
            Self::render_static(f, &ctx);
        })?;
        Ok(())
    }

    fn draw_or_log(&mut self) {
        if let Err(e) = self.draw() {
            debug_log!("Draw error: {}", e);
        }
    }

    fn set_message(&mut self, message: String, style: Style) {
        self.message = message;
        self.message_style = style;
    }

    fn render_static(f: &mut Frame, ctx: &RenderContext) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),  // Title
                Constraint::Min(10),    // Gallows and word
                Constraint::Length(3),  // Status line
                Constraint::Length(3),  // Instructions
            ])
            .split(f.area());

        Self::render_title(f, chunks[0]);

        let body = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(GALLOWS_WIDTH), Constraint::Min(20)])
            .split(chunks[1]);
        Self::render_gallows(f, body[0], ctx.view);
        Self::render_info(f, body[1], ctx);

        Self::render_status(f, chunks[2], ctx.status);
        Self::render_instructions(f, chunks[3], ctx.state, ctx.allow_words);
    }

    fn render_title(f: &mut Frame, area: Rect) {
        let title = Paragraph::new("HANGMAN")
            .style(HEADER_STYLE)
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(title, area);
    }

    fn render_gallows(f: &mut Frame, area: Rect, view: Option<&GameView>) {
        let frame = view.map_or(crate::art::FRAMES[0], |v| v.frame);
        let lines: Vec<Line> = frame
            .lines()
            .skip_while(|line| line.is_empty())
            .map(Line::from)
            .collect();
        let paragraph =
            Paragraph::new(lines).block(Block::default().title("Gallows").borders(Borders::ALL));
        f.render_widget(paragraph, area);
    }

    fn render_info(f: &mut Frame, area: Rect, ctx: &RenderContext) {
        let mut lines = Vec::new();

        match ctx.state {
            TuiState::ChoosingDifficulty => {
                lines.push(Line::from(vec![Span::styled(
                    "Choose a difficulty:",
                    HEADER_STYLE,
                )]));
                lines.push(Line::from("  1. Easy"));
                lines.push(Line::from("  2. Medium"));
                lines.push(Line::from("  3. Hard"));
                lines.push(Line::from(""));
            }
            TuiState::EnteringGuess | TuiState::GameOver => {
                if let Some(view) = ctx.view {
                    lines.push(Line::from(vec![
                        Span::raw("Word: "),
                        Span::styled(view.masked_word.clone(), WORD_STYLE),
                    ]));
                    lines.push(Line::from(""));
                    lines.push(Line::from(format!(
                        "Used letters: {}",
                        view.used_letters_line()
                    )));
                    lines.push(Line::from(format!(
                        "Attempts left: {} / {}",
                        view.remaining_attempts, view.max_attempts
                    )));
                    lines.push(Line::from(""));
                }
            }
        }

        if ctx.state == TuiState::EnteringGuess {
            lines.push(Line::from(format!("> {}_", ctx.current_input)));
            lines.push(Line::from(""));
        }

        if !ctx.message.is_empty() {
            lines.push(Line::from(vec![Span::styled(ctx.message, ctx.message_style)]));
        }

        if !ctx.error_message.is_empty() {
            lines.push(Line::from(vec![Span::styled(ctx.error_message, ERROR_STYLE)]));
        }

        let paragraph = Paragraph::new(lines)
            .block(Block::default().title("Game").borders(Borders::ALL))
            .wrap(Wrap { trim: true });
        f.render_widget(paragraph, area);
    }

    fn render_instructions(f: &mut Frame, area: Rect, state: TuiState, allow_words: bool) {
        let paragraph = Paragraph::new(instructions(state, allow_words))
            .style(Style::default().fg(Color::Gray))
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(paragraph, area);
    }

    fn render_status(f: &mut Frame, area: Rect, status: &str) {
        let status_text = if status.is_empty() { "Ready" } else { status };
        let paragraph = Paragraph::new(status_text)
            .style(HEADER_STYLE)
            .block(Block::default().borders(Borders::ALL).title("Status"));
        f.render_widget(paragraph, area);
    }

    /// Waits up to one poll interval for a key press, skipping everything else.
    fn next_key() -> Result<Option<KeyEvent>, io::Error> {
        if !event::poll(Duration::from_millis(EVENT_POLL_TIMEOUT_MS))? {
            return Ok(None);
        }

        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                if key.modifiers.contains(KeyModifiers::ALT)
                    || key.modifiers.contains(KeyModifiers::CONTROL)
                {
                    debug_log!("next_key() - Ignoring key with modifier: {:?}", key.modifiers);
                    return Ok(None);
                }
                if let KeyCode::Char(c) = key.code
                    && (c == '\u{FFFD}' || c.is_control())
                {
                    debug_log!("next_key() - Ignoring invalid character: {:?}", c);
                    return Ok(None);
                }
                Ok(Some(key))
            }
            other => {
                debug_log!("next_key() - Ignoring event: {:?}", other);
                Ok(None)
            }
        }
    }

    /// Blocks until the next key press, redrawing while idle.
    fn wait_for_key(&mut self) -> Result<KeyEvent, io::Error> {
        loop {
            self.draw()?;
            if let Some(key) = Self::next_key()? {
                return Ok(key);
            }
        }
    }

    fn handle_guess_key(&mut self, key: KeyEvent, allow_words: bool) -> Option<Option<UserAction>> {
        edit_guess(&mut self.current_input, &mut self.error_message, key, allow_words)
    }
}

impl GameInterface for TuiInterface {
    fn display_welcome(&mut self) {
        self.set_message(
            "Guess the word before the man is hanged!".to_string(),
            MESSAGE_STYLE,
        );
        self.draw_or_log();
    }

    fn read_difficulty(&mut self) -> Option<String> {
        self.state = TuiState::ChoosingDifficulty;
        self.status = "Choose a difficulty".to_string();
        loop {
            let key = match self.wait_for_key() {
                Ok(key) => key,
                Err(e) => {
                    debug_log!("read_difficulty() - Input error: {}", e);
                    return None;
                }
            };
            match key.code {
                KeyCode::Esc => return None,
                KeyCode::Char(c) => return Some(c.to_string()),
                KeyCode::Enter => return Some(String::new()),
                _ => {}
            }
        }
    }

    fn display_state(&mut self, view: &GameView) {
        self.view = Some(view.clone());
        self.state = TuiState::EnteringGuess;
        self.status = format!("{} attempts used", view.attempts);
        self.draw_or_log();
    }

    fn read_guess(&mut self, allow_words: bool) -> Option<UserAction> {
        self.state = TuiState::EnteringGuess;
        self.allow_words = allow_words;
        loop {
            let key = match self.wait_for_key() {
                Ok(key) => key,
                Err(e) => {
                    info_log!("read_guess() - Error handling input, returning Exit: {}", e);
                    return Some(UserAction::Exit);
                }
            };
            if let Some(action) = self.handle_guess_key(key, allow_words) {
                return action;
            }
        }
    }

    fn display_outcome(&mut self, guess: &Guess, outcome: Outcome, penalty: u32) {
        self.error_message.clear();
        let style = match outcome {
            Outcome::Won => SUCCESS_STYLE,
            Outcome::Rejected | Outcome::Lost => ERROR_STYLE,
            Outcome::Continue if penalty > 0 => ERROR_STYLE,
            Outcome::Continue => MESSAGE_STYLE,
        };
        self.set_message(outcome_message(guess, outcome, penalty), style);
    }

    fn display_result(&mut self, result: &GameResult, view: &GameView) {
        self.view = Some(view.clone());
        self.state = TuiState::GameOver;
        match result {
            GameResult::Won { secret, .. } => {
                self.status = "You won!".to_string();
                self.set_message(format!("Congratulations, the word was '{secret}'."), SUCCESS_STYLE);
            }
            GameResult::Lost { secret, .. } => {
                self.status = "You lost!".to_string();
                self.set_message(format!("The word was '{secret}'."), ERROR_STYLE);
            }
            GameResult::Abandoned => return,
        }
        if let Err(e) = self.wait_for_key() {
            debug_log!("display_result() - Input error: {}", e);
        }
    }

    fn display_error(&mut self, error: &HangmanError) {
        self.state = TuiState::GameOver;
        self.status = "Error".to_string();
        self.error_message = error.to_string();
        if let Err(e) = self.wait_for_key() {
            debug_log!("display_error() - Input error: {}", e);
        }
    }
}

fn instructions(state: TuiState, allow_words: bool) -> &'static str {
    match state {
        TuiState::ChoosingDifficulty => "1-3: Choose difficulty | ESC: Quit",
        TuiState::EnteringGuess if allow_words => {
            "Type a letter or word | ENTER: Submit | BACKSPACE: Erase | ESC: Quit"
        }
        TuiState::EnteringGuess => "Type a letter | ENTER: Submit | BACKSPACE: Erase | ESC: Quit",
        TuiState::GameOver => "Press any key to exit",
    }
}

/// Applies one key press to the guess being typed.
///
/// Returns `None` while the guess is still being edited, `Some(None)` when
/// ENTER submitted something unusable and `Some(Some(action))` otherwise.
fn edit_guess(
    input: &mut String,
    error_message: &mut String,
    key: KeyEvent,
    allow_words: bool,
) -> Option<Option<UserAction>> {
    match key.code {
        KeyCode::Esc => {
            info_log!("edit_guess() - ESC pressed, returning Exit");
            Some(Some(UserAction::Exit))
        }
        KeyCode::Char(c) if c.is_alphabetic() => {
            input.extend(c.to_lowercase());
            error_message.clear();
            None
        }
        KeyCode::Char(c) => {
            *error_message = format!("Only letters are allowed! ('{c}' is not a letter)");
            None
        }
        KeyCode::Backspace => {
            input.pop();
            None
        }
        KeyCode::Enter => {
            let typed = std::mem::take(input);
            match Guess::parse(&typed, allow_words) {
                Some(guess) => Some(Some(UserAction::Guess(guess))),
                None => {
                    *error_message = if allow_words {
                        "Enter a single letter or the whole word.".to_string()
                    } else {
                        "Enter a single letter.".to_string()
                    };
                    Some(None)
                }
            }
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_and_submit(text: &str, allow_words: bool) -> (Option<Option<UserAction>>, String) {
        let mut input = String::new();
        let mut error = String::new();
        for c in text.chars() {
            assert_eq!(edit_guess(&mut input, &mut error, key(KeyCode::Char(c)), allow_words), None);
        }
        let result = edit_guess(&mut input, &mut error, key(KeyCode::Enter), allow_words);
        assert!(input.is_empty());
        (result, error)
    }

    #[test]
    fn test_long_word_guess_is_not_truncated() {
        let secret = "anticonstitutionnellementdesinstitutionnalisation";
        assert!(secret.chars().count() > 40);
        let (result, error) = type_and_submit(secret, true);
        assert_eq!(
            result,
            Some(Some(UserAction::Guess(Guess::Word(secret.to_string()))))
        );
        assert!(error.is_empty());
    }

    #[test]
    fn test_typed_letters_are_lowercased() {
        let (result, _) = type_and_submit("E", true);
        assert_eq!(result, Some(Some(UserAction::Guess(Guess::Letter('e')))));
    }

    #[test]
    fn test_word_rejected_in_letters_only_mode() {
        let (result, error) = type_and_submit("chat", false);
        assert_eq!(result, Some(None));
        assert_eq!(error, "Enter a single letter.");
    }

    #[test]
    fn test_non_letter_key_sets_error_and_backspace_erases() {
        let mut input = String::new();
        let mut error = String::new();
        edit_guess(&mut input, &mut error, key(KeyCode::Char('a')), true);
        edit_guess(&mut input, &mut error, key(KeyCode::Char('7')), true);
        assert_eq!(input, "a");
        assert!(error.contains("'7'"));

        edit_guess(&mut input, &mut error, key(KeyCode::Backspace), true);
        assert!(input.is_empty());
        assert_eq!(
            edit_guess(&mut input, &mut error, key(KeyCode::Esc), true),
            Some(Some(UserAction::Exit))
        );
    }

    #[test]
    fn test_instructions_follow_guess_mode() {
        assert!(instructions(TuiState::EnteringGuess, true).starts_with("Type a letter or word"));
        let letters_only = instructions(TuiState::EnteringGuess, false);
        assert!(letters_only.starts_with("Type a letter |"));
        assert!(!letters_only.contains("word"));
    }
}
