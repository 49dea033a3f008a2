//! TUI (Terminal User Interface) module for Hangman
//!
//! This module provides an interactive terminal interface using Ratatui.
//!
//! Title, word track, attempts track (`HANGMAN`), on-screen keyboard,
//! message panel, status line and key help, top to bottom.

use crate::game::{GameView, GuessOutcome, InvalidGuess, KeyState};
use crate::game_state::{GameInterface, UserAction};
use crate::provider::ProviderError;
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
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};
use std::io;
use std::time::Duration;

const KEYS_PER_ROW: usize = 9;
const EVENT_POLL_TIMEOUT_MS: u64 = 100;
const LOSS_FRAME_MS: u64 = 150;
const LOSS_FRAMES: u8 = 4;

const HEADER_STYLE: Style = Style::new().fg(Color::Cyan).add_modifier(Modifier::BOLD);
const ERROR_STYLE: Style = Style::new().fg(Color::Red);
const SUCCESS_STYLE: Style = Style::new().fg(Color::Green).add_modifier(Modifier::BOLD);
const LOSS_STYLE: Style = Style::new().fg(Color::Red).add_modifier(Modifier::BOLD);
const MESSAGE_STYLE: Style = Style::new().fg(Color::Cyan);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TuiState {
    Loading,
    Playing,
    GameOver,
}

fn key_colors(state: KeyState) -> (Color, Color) {
    match state {
        KeyState::Unused => (Color::DarkGray, Color::White),
        KeyState::Hit => (Color::Green, Color::Black),
        KeyState::Miss => (Color::Red, Color::White),
    }
}

/// Context for rendering the UI - groups related parameters to avoid too many function arguments.
struct RenderContext<'a> {
    view: Option<&'a GameView>,
    state: TuiState,
    message: &'a str,
    message_style: Style,
    error_message: &'a str,
    status: &'a str,
    /// How far the loss presentation has progressed, 0 when not losing.
    loss_frame: u8,
}

/// Main TUI interface component.
pub struct TuiInterface {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
    view: Option<GameView>,
    state: TuiState,
    message: String,
    message_style: Style,
    error_message: String,
    status: String,
    loss_frame: u8,
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
            state: TuiState::Loading,
            message: String::new(),
            message_style: MESSAGE_STYLE,
            error_message: String::new(),
            status: "Starting".to_string(),
            loss_frame: 0,
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

    fn draw(&mut self) -> Result<(), io::Error> {
        let ctx = RenderContext {
            view: self.view.as_ref(),
            state: self.state,
            message: &self.message,
            message_style: self.message_style,
            error_message: &self.error_message,
            status: &self.status,
            loss_frame: self.loss_frame,
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

    fn render_static(f: &mut Frame, ctx: &RenderContext) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Title
                Constraint::Length(3), // Word
                Constraint::Length(3), // Attempts
                Constraint::Length(5), // Keyboard
                Constraint::Min(3),    // Messages
                Constraint::Length(3), // Status line
                Constraint::Length(3), // Instructions
            ])
            .split(f.area());

        Self::render_title(f, chunks[0]);
        if let Some(view) = ctx.view {
            // The word and keyboard fade out first, then the attempts track
            // takes over the word's place.
            if ctx.loss_frame < LOSS_FRAMES {
                Self::render_word(f, chunks[1], view, ctx.loss_frame);
                Self::render_attempts(f, chunks[2], view);
            } else {
                Self::render_attempts(f, chunks[1], view);
            }
            if ctx.loss_frame < LOSS_FRAMES / 2 {
                Self::render_keyboard(f, chunks[3], view, ctx.loss_frame > 0);
            }
        }
        Self::render_info(f, chunks[4], ctx);
        Self::render_status(f, chunks[5], ctx.status);
        Self::render_instructions(f, chunks[6], ctx.state);
    }

    fn render_title(f: &mut Frame, area: Rect) {
        let title = Paragraph::new("HANGMAN")
            .style(HEADER_STYLE)
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(title, area);
    }

    fn cell(text: char, fg: Color, bg: Color) -> Span<'static> {
        Span::styled(format!(" {text} "), Style::default().fg(fg).bg(bg))
    }

    fn render_word(f: &mut Frame, area: Rect, view: &GameView, loss_frame: u8) {
        let dimmed = loss_frame > 0;
        let mut spans = Vec::new();
        for cell in &view.word {
            let span = match cell.letter {
                Some(letter) if dimmed => Self::cell(letter.to_upper(), Color::Gray, Color::Black),
                Some(letter) => Self::cell(letter.to_upper(), Color::Black, Color::Green),
                None => Self::cell(' ', Color::White, Color::DarkGray),
            };
            spans.push(span);
            spans.push(Span::raw(" "));
        }

        let paragraph = Paragraph::new(Line::from(spans))
            .alignment(Alignment::Center)
            .block(Block::default().title("Word").borders(Borders::ALL));
        f.render_widget(paragraph, area);
    }

    fn render_attempts(f: &mut Frame, area: Rect, view: &GameView) {
        let mut spans = Vec::new();
        for slot in &view.attempts {
            let span = if slot.consumed {
                Self::cell(slot.letter, Color::White, Color::Red)
            } else {
                Self::cell(' ', Color::White, Color::DarkGray)
            };
            spans.push(span);
            spans.push(Span::raw(" "));
        }

        let title = format!("Attempts ({}/{})", view.wrong_count(), view.attempts.len());
        let paragraph = Paragraph::new(Line::from(spans))
            .alignment(Alignment::Center)
            .block(Block::default().title(title).borders(Borders::ALL));
        f.render_widget(paragraph, area);
    }

    fn render_keyboard(f: &mut Frame, area: Rect, view: &GameView, faded: bool) {
        let lines: Vec<Line> = view
            .keyboard
            .chunks(KEYS_PER_ROW)
            .map(|row| {
                let mut spans = Vec::new();
                for &(letter, state) in row {
                    let (bg, fg) = if faded {
                        (Color::Black, Color::DarkGray)
                    } else {
                        key_colors(state)
                    };
                    spans.push(Self::cell(letter.to_upper(), fg, bg));
                    spans.push(Span::raw(" "));
                }
                Line::from(spans)
            })
            .collect();

        let paragraph = Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(Block::default().title("Letters").borders(Borders::ALL));
        f.render_widget(paragraph, area);
    }

    fn render_info(f: &mut Frame, area: Rect, ctx: &RenderContext) {
        let mut lines = Vec::new();

        if !ctx.message.is_empty() {
            lines.push(Line::from(vec![Span::styled(ctx.message, ctx.message_style)]));
        }

        if !ctx.error_message.is_empty() {
            lines.push(Line::from(vec![Span::styled(ctx.error_message, ERROR_STYLE)]));
        }

        let paragraph = Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL))
            .wrap(Wrap { trim: true });
        f.render_widget(paragraph, area);
    }

    fn render_instructions(f: &mut Frame, area: Rect, state: TuiState) {
        let text = match state {
            TuiState::Loading => "Fetching a word... | ESC: Quit",
            TuiState::Playing => "Type a letter to guess | ESC: Quit",
            TuiState::GameOver => "Press any key to exit",
        };

        let paragraph = Paragraph::new(text)
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

    /// Next key press, or `None` when nothing arrived within the poll window.
    fn poll_key(timeout: Duration) -> Result<Option<KeyEvent>, io::Error> {
        if !event::poll(timeout)? {
            return Ok(None);
        }

        match event::read()? {
            // Only Press events; Release and Repeat would double the input.
            Event::Key(key) if key.kind == KeyEventKind::Press => Ok(Some(key)),
            other => {
                debug_log!("poll_key() - Ignoring event: {:?}", other);
                Ok(None)
            }
        }
    }

    fn handle_key(key: KeyEvent) -> Option<UserAction> {
        if key.code == KeyCode::Esc {
            return Some(UserAction::Exit);
        }
        if key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) {
            if key.code == KeyCode::Char('c') {
                return Some(UserAction::Exit);
            }
            debug_log!("handle_key() - Ignoring key with modifier: {:?}", key.modifiers);
            return None;
        }
        match key.code {
            KeyCode::Char(c) if !c.is_control() => Some(UserAction::Guess(c)),
            _ => None,
        }
    }

    /// Block until the player presses a key so the final screen stays up.
    fn wait_for_dismiss(&mut self) {
        self.state = TuiState::GameOver;
        loop {
            self.draw_or_log();
            match Self::poll_key(Duration::from_millis(EVENT_POLL_TIMEOUT_MS)) {
                Ok(Some(_)) | Err(_) => return,
                Ok(None) => {}
            }
        }
    }

    fn play_loss_animation(&mut self) {
        for frame in 1..=LOSS_FRAMES {
            self.loss_frame = frame;
            self.draw_or_log();
            // Keys pressed during the animation are dropped.
            let _ = Self::poll_key(Duration::from_millis(LOSS_FRAME_MS));
        }
    }
}

impl GameInterface for TuiInterface {
    fn display_loading(&mut self) {
        self.state = TuiState::Loading;
        self.status = "Fetching a word...".to_string();
        self.draw_or_log();
    }

    fn display_provider_error(&mut self, error: &ProviderError) {
        self.error_message = format!("Could not get a word: {error}");
        self.status = "No word available".to_string();
        self.wait_for_dismiss();
    }

    fn display_board(&mut self, view: &GameView) {
        self.view = Some(view.clone());
        self.state = TuiState::Playing;
        self.message = format!("Guess the {}-letter word", view.word.len());
        self.status = "Ready".to_string();
        self.draw_or_log();
    }

    fn display_outcome(&mut self, outcome: &GuessOutcome, view: &GameView) {
        self.view = Some(view.clone());
        self.error_message.clear();
        self.status = match outcome {
            GuessOutcome::AlreadyGuessed => "Already guessed".to_string(),
            GuessOutcome::Correct { positions } => match positions.len() {
                1 => "Correct!".to_string(),
                n => format!("Correct! {n} letters revealed"),
            },
            GuessOutcome::Incorrect { attempt_index } => {
                let left = view.attempts.len() - attempt_index - 1;
                format!("Wrong! {left} attempts left")
            }
        };
        self.draw_or_log();
    }

    fn display_invalid_guess(&mut self, error: &InvalidGuess) {
        self.error_message = error.to_string();
        self.draw_or_log();
    }

    fn display_won(&mut self, view: &GameView) {
        self.view = Some(view.clone());
        self.message = format!("You win! The word was {}", view.mask_string());
        self.message_style = SUCCESS_STYLE;
        self.status = "Game over".to_string();
        self.wait_for_dismiss();
    }

    fn display_lost(&mut self, view: &GameView) {
        self.view = Some(view.clone());
        self.error_message.clear();
        self.message.clear();
        self.play_loss_animation();
        let word = view.solution.as_deref().unwrap_or_default().to_uppercase();
        self.message = format!("You lose! The word was {word}. Restart to play again!");
        self.message_style = LOSS_STYLE;
        self.status = "Game over".to_string();
        self.wait_for_dismiss();
    }

    fn display_exit_message(&mut self) {
        self.status = "Exiting...".to_string();
        self.draw_or_log();
    }

    fn read_action(&mut self) -> Option<UserAction> {
        if self.draw().is_err() {
            info_log!("read_action() - Draw failed, returning Exit");
            return Some(UserAction::Exit);
        }

        match Self::poll_key(Duration::from_millis(EVENT_POLL_TIMEOUT_MS)) {
            Ok(Some(key)) => {
                let action = Self::handle_key(key);
                debug_log!("read_action() - {:?} -> {:?}", key.code, action);
                action
            }
            Ok(None) => None,
            Err(e) => {
                info_log!("read_action() - Input error: {}", e);
                Some(UserAction::Exit)
            }
        }
    }
}

impl Drop for TuiInterface {
    fn drop(&mut self) {
        let _ = self.cleanup();
    }
}
