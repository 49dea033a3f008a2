// Library interface for hangman
// This allows integration tests to access internal modules

pub mod cli;
pub mod game;
pub mod game_state;
pub mod logging;
pub mod provider;
pub mod tui;
pub mod word;
pub mod wordbank;

// Re-export commonly used items for easier testing
pub use game::{ATTEMPT_BUDGET, GameView, GuessOutcome, Hangman, InvalidGuess, Phase};
pub use game_state::{GameInterface, SessionError, UserAction, game_loop, run, start_session};
pub use provider::{HttpWordProvider, ProviderError, WordProvider, WordbankProvider};
pub use word::{Letter, Word};
pub use wordbank::{load_wordbank_from_file, load_wordbank_from_str};
