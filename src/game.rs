//! Hangman state machine.
//!
//! A game moves `Loading → Playing → {Won, Lost}`. All transitions are plain
//! synchronous functions of the current state and one letter; nothing here
//! knows how the game is drawn. Renderers read a [`GameView`] snapshot.

use crate::debug_log;
use crate::word::{Letter, Word};
use std::collections::BTreeSet;
use std::fmt;
use thiserror::Error;

/// Wrong guesses allowed, one slot per letter.
pub const ATTEMPT_BUDGET: [char; 7] = ['H', 'A', 'N', 'G', 'M', 'A', 'N'];

/// Character shown for an unrevealed word position.
pub const PLACEHOLDER: char = '#';

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Loading,
    Playing,
    Won,
    Lost,
}

impl Phase {
    #[must_use]
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Loading => "loading",
            Self::Playing => "in progress",
            Self::Won => "won",
            Self::Lost => "lost",
        };
        f.write_str(label)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GuessOutcome {
    /// Letter was guessed before; nothing changed.
    AlreadyGuessed,
    /// Letter occurs in the word at these positions (ascending).
    Correct { positions: Vec<usize> },
    /// Letter is not in the word; `attempt_index` is the budget slot just used.
    Incorrect { attempt_index: usize },
}

#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum InvalidGuess {
    #[error("no guesses accepted while the game is {phase}")]
    NotPlaying { phase: Phase },
    #[error("{0:?} is not a letter on the keyboard")]
    NotALetter(char),
}

#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum InitError {
    #[error("game already has a word")]
    AlreadyInitialized,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MaskCell {
    pub revealed: bool,
    pub letter: Option<Letter>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AttemptSlot {
    pub consumed: bool,
    pub letter: char,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyState {
    Unused,
    Hit,
    Miss,
}

/// Everything a renderer needs to draw one frame.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameView {
    pub phase: Phase,
    pub word: Vec<MaskCell>,
    pub attempts: Vec<AttemptSlot>,
    pub keyboard: Vec<(Letter, KeyState)>,
    /// The hidden word, only once the game is over.
    pub solution: Option<String>,
}

impl GameView {
    #[must_use]
    pub fn mask_string(&self) -> String {
        self.word
            .iter()
            .map(|cell| cell.letter.map_or(PLACEHOLDER, Letter::to_upper))
            .collect()
    }

    #[must_use]
    pub fn wrong_count(&self) -> usize {
        self.attempts.iter().filter(|slot| slot.consumed).count()
    }
}

#[derive(Clone, Debug)]
pub struct Hangman {
    phase: Phase,
    word: Option<Word>,
    mask: Vec<Option<Letter>>,
    wrong_count: usize,
    guessed: BTreeSet<Letter>,
}

impl Default for Hangman {
    fn default() -> Self {
        Self::new()
    }
}

impl Hangman {
    /// A game still waiting for its word.
    #[must_use]
    pub fn new() -> Self {
        Self {
            phase: Phase::Loading,
            word: None,
            mask: Vec::new(),
            wrong_count: 0,
            guessed: BTreeSet::new(),
        }
    }

    /// Shorthand for `new` followed by `initialize`.
    #[must_use]
    pub fn with_word(word: Word) -> Self {
        let mut game = Self::new();
        game.mask = vec![None; word.len()];
        game.word = Some(word);
        game.phase = Phase::Playing;
        game
    }

    pub fn initialize(&mut self, word: Word) -> Result<(), InitError> {
        if self.phase != Phase::Loading {
            return Err(InitError::AlreadyInitialized);
        }
        debug_log!("initialize() - {} letter word", word.len());
        *self = Self::with_word(word);
        Ok(())
    }

    pub fn guess(&mut self, input: char) -> Result<GuessOutcome, InvalidGuess> {
        if self.phase != Phase::Playing {
            return Err(InvalidGuess::NotPlaying { phase: self.phase });
        }
        let letter = Letter::try_from(input).map_err(InvalidGuess::NotALetter)?;
        if !self.guessed.insert(letter) {
            return Ok(GuessOutcome::AlreadyGuessed);
        }

        let positions = match &self.word {
            Some(word) => word.positions_of(letter),
            None => Vec::new(),
        };

        if positions.is_empty() {
            self.wrong_count += 1;
            if self.wrong_count == ATTEMPT_BUDGET.len() {
                self.phase = Phase::Lost;
            }
            debug_log!("guess({}) - miss {}/{}", letter, self.wrong_count, ATTEMPT_BUDGET.len());
            return Ok(GuessOutcome::Incorrect {
                attempt_index: self.wrong_count - 1,
            });
        }

        for &i in &positions {
            self.mask[i] = Some(letter);
        }
        if self.mask.iter().all(Option::is_some) {
            self.phase = Phase::Won;
        }
        debug_log!("guess({}) - hit at {:?}", letter, positions);
        Ok(GuessOutcome::Correct { positions })
    }

    /// `(state, letter) → (new state, outcome)` without touching `self`.
    pub fn after_guess(&self, input: char) -> Result<(Self, GuessOutcome), InvalidGuess> {
        let mut next = self.clone();
        let outcome = next.guess(input)?;
        Ok((next, outcome))
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[must_use]
    pub fn word(&self) -> Option<&Word> {
        self.word.as_ref()
    }

    #[must_use]
    pub fn wrong_count(&self) -> usize {
        self.wrong_count
    }

    #[must_use]
    pub fn remaining_attempts(&self) -> usize {
        ATTEMPT_BUDGET.len() - self.wrong_count
    }

    #[must_use]
    pub fn is_guessed(&self, letter: Letter) -> bool {
        self.guessed.contains(&letter)
    }

    #[must_use]
    pub fn is_revealed(&self, index: usize) -> bool {
        self.revealed_letter(index).is_some()
    }

    #[must_use]
    pub fn revealed_letter(&self, index: usize) -> Option<Letter> {
        self.mask.get(index).copied().flatten()
    }

    #[must_use]
    pub fn mask_string(&self) -> String {
        self.mask
            .iter()
            .map(|cell| cell.map_or(PLACEHOLDER, Letter::as_char))
            .collect()
    }

    #[must_use]
    pub fn view(&self) -> GameView {
        let word = self
            .mask
            .iter()
            .map(|cell| MaskCell {
                revealed: cell.is_some(),
                letter: *cell,
            })
            .collect();

        let attempts = ATTEMPT_BUDGET
            .iter()
            .enumerate()
            .map(|(i, &letter)| AttemptSlot {
                consumed: i < self.wrong_count,
                letter,
            })
            .collect();

        let keyboard = Letter::keyboard()
            .map(|letter| {
                let state = if !self.guessed.contains(&letter) {
                    KeyState::Unused
                } else if self.word.as_ref().is_some_and(|w| w.letters().contains(&letter)) {
                    KeyState::Hit
                } else {
                    KeyState::Miss
                };
                (letter, state)
            })
            .collect();

        let solution = if self.phase.is_terminal() {
            self.word.as_ref().map(ToString::to_string)
        } else {
            None
        };

        GameView {
            phase: self.phase,
            word,
            attempts,
            keyboard,
            solution,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn game(word: &str) -> Hangman {
        Hangman::with_word(Word::new(word).unwrap())
    }

    #[test]
    fn test_new_game_is_loading() {
        let game = Hangman::new();
        assert_eq!(game.phase(), Phase::Loading);
        assert!(game.word().is_none());
        assert_eq!(game.mask_string(), "");
    }

    #[test]
    fn test_initialize_builds_placeholder_mask() {
        let mut game = Hangman::new();
        game.initialize(Word::new("planet").unwrap()).unwrap();
        assert_eq!(game.phase(), Phase::Playing);
        assert_eq!(game.mask_string(), "######");
        assert_eq!(game.wrong_count(), 0);
        assert_eq!(game.remaining_attempts(), 7);
        assert!((0..6).all(|i| !game.is_revealed(i)));
    }

    #[test]
    fn test_initialize_twice_rejected() {
        let mut game = game("cat");
        game.guess('c').unwrap();
        assert_eq!(
            game.initialize(Word::new("dog").unwrap()),
            Err(InitError::AlreadyInitialized)
        );
        assert_eq!(game.mask_string(), "c##");
    }

    #[test]
    fn test_guess_while_loading_is_invalid() {
        let mut game = Hangman::new();
        assert_eq!(
            game.guess('a'),
            Err(InvalidGuess::NotPlaying { phase: Phase::Loading })
        );
    }

    #[test]
    fn test_cat_all_correct_wins() {
        let mut game = game("cat");
        assert_eq!(game.guess('a'), Ok(GuessOutcome::Correct { positions: vec![1] }));
        assert_eq!(game.guess('c'), Ok(GuessOutcome::Correct { positions: vec![0] }));
        assert_eq!(game.phase(), Phase::Playing);
        assert_eq!(game.guess('t'), Ok(GuessOutcome::Correct { positions: vec![2] }));
        assert_eq!(game.phase(), Phase::Won);
        assert_eq!(game.wrong_count(), 0);
    }

    #[test]
    fn test_cat_seven_misses_loses() {
        let mut game = game("cat");
        for (i, c) in ['x', 'y', 'z', 'q', 'w', 'e', 'r'].into_iter().enumerate() {
            assert_eq!(game.phase(), Phase::Playing);
            assert_eq!(game.guess(c), Ok(GuessOutcome::Incorrect { attempt_index: i }));
            assert_eq!(game.wrong_count(), i + 1);
        }
        assert_eq!(game.wrong_count(), 7);
        assert_eq!(game.phase(), Phase::Lost);
    }

    #[test]
    fn test_repeat_guess_is_noop() {
        let mut game = game("cat");
        assert_eq!(game.guess('c'), Ok(GuessOutcome::Correct { positions: vec![0] }));
        assert_eq!(game.guess('c'), Ok(GuessOutcome::AlreadyGuessed));
        assert_eq!(game.wrong_count(), 0);
        assert_eq!(game.mask_string(), "c##");

        assert_eq!(game.guess('z'), Ok(GuessOutcome::Incorrect { attempt_index: 0 }));
        assert_eq!(game.guess('Z'), Ok(GuessOutcome::AlreadyGuessed));
        assert_eq!(game.guess('z'), Ok(GuessOutcome::AlreadyGuessed));
        assert_eq!(game.wrong_count(), 1);
    }

    #[test]
    fn test_repeated_letters_revealed_together() {
        let mut game = game("banana");
        assert_eq!(
            game.guess('A'),
            Ok(GuessOutcome::Correct { positions: vec![1, 3, 5] })
        );
        assert_eq!(game.mask_string(), "#a#a#a");
        assert_eq!(game.revealed_letter(3), Letter::try_from('a').ok());
        assert_eq!(game.revealed_letter(0), None);
        assert_eq!(game.revealed_letter(99), None);
        game.guess('n').unwrap();
        game.guess('b').unwrap();
        assert_eq!(game.phase(), Phase::Won);
    }

    #[test]
    fn test_non_letter_rejected_without_state_change() {
        let mut game = game("cat");
        assert_eq!(game.guess('1'), Err(InvalidGuess::NotALetter('1')));
        assert_eq!(game.guess('-'), Err(InvalidGuess::NotALetter('-')));
        assert_eq!(game.wrong_count(), 0);
        assert_eq!(game.mask_string(), "###");
    }

    #[test]
    fn test_not_playing_takes_precedence_over_already_guessed() {
        let mut game = game("cat");
        for c in ['c', 'a', 't'] {
            game.guess(c).unwrap();
        }
        assert_eq!(game.guess('c'), Err(InvalidGuess::NotPlaying { phase: Phase::Won }));
        assert_eq!(game.guess('!'), Err(InvalidGuess::NotPlaying { phase: Phase::Won }));
    }

    #[test]
    fn test_no_guesses_after_loss() {
        let mut game = game("cat");
        for c in "bdefghi".chars() {
            game.guess(c).unwrap();
        }
        assert_eq!(game.phase(), Phase::Lost);
        assert_eq!(game.guess('j'), Err(InvalidGuess::NotPlaying { phase: Phase::Lost }));
        assert_eq!(game.guess('c'), Err(InvalidGuess::NotPlaying { phase: Phase::Lost }));
        assert_eq!(game.wrong_count(), 7);
    }

    #[test]
    fn test_after_guess_leaves_original_untouched() {
        let game = game("cat");
        let (next, outcome) = game.after_guess('a').unwrap();
        assert_eq!(outcome, GuessOutcome::Correct { positions: vec![1] });
        assert_eq!(next.mask_string(), "#a#");
        assert_eq!(game.mask_string(), "###");
        assert!(!game.is_guessed(Letter::try_from('a').unwrap()));
    }

    #[test]
    fn test_wrong_count_never_exceeds_budget() {
        let mut game = game("jazz");
        for c in ('a'..='z').chain('a'..='z') {
            let _ = game.guess(c);
            assert!(game.wrong_count() <= ATTEMPT_BUDGET.len());
        }
        assert_eq!(game.phase(), Phase::Lost);
    }

    #[test]
    fn test_won_exactly_when_mask_full() {
        let mut game = game("level");
        for c in ['l', 'e'] {
            game.guess(c).unwrap();
            assert_eq!(game.phase(), Phase::Playing);
            assert!(game.mask_string().contains(PLACEHOLDER));
        }
        game.guess('v').unwrap();
        assert_eq!(game.phase(), Phase::Won);
        assert!(!game.mask_string().contains(PLACEHOLDER));
    }

    #[test]
    fn test_view_reports_tracks_and_keyboard() {
        let mut game = game("cat");
        game.guess('c').unwrap();
        game.guess('x').unwrap();
        game.guess('y').unwrap();

        let view = game.view();
        assert_eq!(view.phase, Phase::Playing);
        assert_eq!(view.mask_string(), "C##");
        assert!(view.word[0].revealed);
        assert!(!view.word[1].revealed);
        assert_eq!(view.word[1].letter, None);

        assert_eq!(view.attempts.len(), 7);
        assert_eq!(view.wrong_count(), 2);
        assert!(view.attempts[0].consumed && view.attempts[1].consumed);
        assert!(!view.attempts[2].consumed);
        assert_eq!(view.attempts[1].letter, 'A');

        assert_eq!(view.keyboard.len(), 26);
        assert_eq!(view.keyboard[2].1, KeyState::Hit);
        assert_eq!(view.keyboard[23].1, KeyState::Miss);
        assert_eq!(view.keyboard[0].1, KeyState::Unused);
        assert_eq!(view.solution, None);
    }

    #[test]
    fn test_view_exposes_solution_once_over() {
        let mut game = game("cat");
        for c in "bdefghi".chars() {
            game.guess(c).unwrap();
        }
        let view = game.view();
        assert_eq!(view.phase, Phase::Lost);
        assert_eq!(view.solution.as_deref(), Some("cat"));
        assert!(view.attempts.iter().all(|slot| slot.consumed));
    }
}
