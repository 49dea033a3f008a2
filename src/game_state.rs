use crate::game::{GameView, GuessOutcome, Hangman, InitError, InvalidGuess, Phase};
use crate::provider::{ProviderError, WordProvider};
use crate::{debug_log, info_log};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Provider(#[from] ProviderError),
    #[error(transparent)]
    Init(#[from] InitError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserAction {
    Guess(char),
    Exit,
}

/// Rendering and input collaborator for one session.
///
/// Implementations only draw what they are handed; game state is owned by
/// the loop and never mutated from here.
pub trait GameInterface {
    fn display_loading(&mut self);
    fn display_provider_error(&mut self, error: &ProviderError);
    fn display_board(&mut self, view: &GameView);
    fn display_outcome(&mut self, outcome: &GuessOutcome, view: &GameView);
    fn display_invalid_guess(&mut self, error: &InvalidGuess);
    fn display_won(&mut self, view: &GameView);
    fn display_lost(&mut self, view: &GameView);
    fn display_exit_message(&mut self);
    /// Next player action, or `None` if the input was ignored.
    fn read_action(&mut self) -> Option<UserAction>;
}

/// Fetch the word and move the game out of `Loading`.
///
/// On failure the game is left in `Loading`.
pub async fn start_session(
    provider: &dyn WordProvider,
    game: &mut Hangman,
) -> Result<(), SessionError> {
    let word = provider.fetch_word().await?;
    info_log!("Session word has {} letters", word.len());
    game.initialize(word)?;
    Ok(())
}

/// Feed player actions into `game` until it ends or the player leaves.
pub fn game_loop<I: GameInterface + ?Sized>(game: &mut Hangman, interface: &mut I) -> Phase {
    interface.display_board(&game.view());

    while game.phase() == Phase::Playing {
        let letter = match interface.read_action() {
            Some(UserAction::Guess(c)) => c,
            Some(UserAction::Exit) => {
                interface.display_exit_message();
                break;
            }
            None => continue,
        };

        match game.guess(letter) {
            Ok(outcome) => {
                debug_log!("game_loop() - {:?} -> {:?}", letter, outcome);
                interface.display_outcome(&outcome, &game.view());
            }
            Err(e) => interface.display_invalid_guess(&e),
        }
    }

    let view = game.view();
    match game.phase() {
        Phase::Won => interface.display_won(&view),
        Phase::Lost => interface.display_lost(&view),
        Phase::Loading | Phase::Playing => {}
    }
    game.phase()
}

/// Load a word from `provider`, then play one game through `interface`.
pub async fn run<I: GameInterface + ?Sized>(
    provider: &dyn WordProvider,
    interface: &mut I,
) -> Result<Phase, SessionError> {
    let mut game = Hangman::new();
    interface.display_loading();

    if let Err(e) = start_session(provider, &mut game).await {
        if let SessionError::Provider(ref provider_error) = e {
            interface.display_provider_error(provider_error);
        }
        return Err(e);
    }

    Ok(game_loop(&mut game, interface))
}
