use crate::game::{GameView, GuessOutcome, InvalidGuess, KeyState};
use crate::game_state::{GameInterface, UserAction};
use crate::provider::{DEFAULT_ENDPOINT, DEFAULT_LANG, ProviderError};
use clap::Parser;
use std::io::BufRead;
use std::time::Duration;

/// Hangman in the terminal
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to a newline-delimited word list to play offline from
    #[arg(short = 'i', long = "input")]
    pub wordbank_path: Option<String>,

    /// Play offline from the built-in word list
    #[arg(long)]
    pub offline: bool,

    /// Random-word service returning a JSON array of words
    #[arg(long, default_value = DEFAULT_ENDPOINT)]
    pub endpoint: String,

    /// Language requested from the word service
    #[arg(long, default_value = DEFAULT_LANG)]
    pub lang: String,

    /// Give up on the word request after this many seconds
    #[arg(long = "timeout", value_name = "SECS")]
    pub timeout_secs: Option<u64>,

    /// Line-based interface instead of the full-screen one
    #[arg(long)]
    pub plain: bool,
}

impl Cli {
    #[must_use]
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }

    #[must_use]
    pub fn is_offline(&self) -> bool {
        self.offline || self.wordbank_path.is_some()
    }
}

#[must_use]
pub fn parse_cli() -> Cli {
    Cli::parse()
}

// UI Input/Output functions

pub enum GuessInput {
    Letter(char),
    Invalid,
    Exit,
}

fn parse_guess(input: &str) -> GuessInput {
    let input = input.trim().to_uppercase();
    let mut chars = input.chars();
    match (chars.next(), chars.next()) {
        _ if input == "EXIT" => GuessInput::Exit,
        (Some(c), None) => GuessInput::Letter(c),
        _ => GuessInput::Invalid,
    }
}

pub fn read_guess<R: BufRead>(reader: &mut R) -> GuessInput {
    println!("\nGuess a letter (or 'exit' to quit):");
    let mut input = String::new();
    match reader.read_line(&mut input) {
        Ok(0) | Err(_) => return GuessInput::Exit,
        Ok(_) => {}
    }

    match parse_guess(&input) {
        GuessInput::Invalid => {
            println!("Invalid guess. Please enter a single letter.");
            GuessInput::Invalid
        }
        other => other,
    }
}

fn spaced(chars: impl Iterator<Item = char>) -> String {
    chars.map(String::from).collect::<Vec<_>>().join(" ")
}

#[must_use]
pub fn format_word(view: &GameView) -> String {
    spaced(view.mask_string().chars())
}

#[must_use]
pub fn format_attempts(view: &GameView) -> String {
    spaced(
        view.attempts
            .iter()
            .map(|slot| if slot.consumed { slot.letter } else { '_' }),
    )
}

#[must_use]
pub fn format_keyboard(view: &GameView) -> String {
    spaced(view.keyboard.iter().map(|(letter, state)| match state {
        KeyState::Unused => letter.to_upper(),
        KeyState::Hit | KeyState::Miss => '.',
    }))
}

pub fn display_board(view: &GameView) {
    println!("Word:     {}", format_word(view));
    println!("Attempts: {}", format_attempts(view));
    println!("Letters:  {}", format_keyboard(view));
}

pub fn display_outcome(outcome: &GuessOutcome) {
    match outcome {
        GuessOutcome::AlreadyGuessed => println!("You already tried that letter."),
        GuessOutcome::Correct { positions } => {
            println!("Correct! ({} revealed)", positions.len());
        }
        GuessOutcome::Incorrect { attempt_index } => println!("Wrong! ({} used)", attempt_index + 1),
    }
}

/// Line-based implementation of the GameInterface trait
pub struct CliInterface<R: BufRead> {
    reader: R,
}

impl<R: BufRead> CliInterface<R> {
    pub fn new(reader: R) -> Self {
        Self { reader }
    }
}

impl<R: BufRead> GameInterface for CliInterface<R> {
    fn display_loading(&mut self) {
        println!("Fetching a word...");
    }

    fn display_provider_error(&mut self, error: &ProviderError) {
        println!("Could not get a word: {error}");
    }

    fn display_board(&mut self, view: &GameView) {
        display_board(view);
    }

    fn display_outcome(&mut self, outcome: &GuessOutcome, view: &GameView) {
        display_outcome(outcome);
        display_board(view);
    }

    fn display_invalid_guess(&mut self, error: &InvalidGuess) {
        println!("Invalid guess: {error}");
    }

    fn display_won(&mut self, view: &GameView) {
        println!("You win! The word was {}.", view.mask_string());
    }

    fn display_lost(&mut self, view: &GameView) {
        let word = view.solution.as_deref().unwrap_or_default().to_uppercase();
        println!("You lose! The word was {word}. Run again to play another round.");
    }

    fn display_exit_message(&mut self) {
        println!("Exiting.");
    }

    fn read_action(&mut self) -> Option<UserAction> {
        match read_guess(&mut self.reader) {
            GuessInput::Letter(c) => Some(UserAction::Guess(c)),
            GuessInput::Exit => Some(UserAction::Exit),
            GuessInput::Invalid => None,
        }
    }
}
