//! Puzzle words and keyboard letters.

use std::fmt;
use thiserror::Error;

/// Shortest word a provider will hand out.
pub const MIN_WORD_LEN: usize = 4;
/// Longest word a provider will hand out.
pub const MAX_WORD_LEN: usize = 9;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum WordError {
    #[error("word is empty")]
    Empty,
    #[error("word '{word}' contains non-letter character {ch:?}")]
    NotALetter { word: String, ch: char },
}

/// A single keyboard letter, stored lowercase and displayed uppercase.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Letter(char);

impl Letter {
    /// The 26 keyboard letters in order.
    pub fn keyboard() -> impl Iterator<Item = Letter> {
        ('a'..='z').map(Letter)
    }

    #[must_use]
    pub fn as_char(self) -> char {
        self.0
    }

    #[must_use]
    pub fn to_upper(self) -> char {
        self.0.to_ascii_uppercase()
    }

    /// Position on the keyboard, 0 for A through 25 for Z.
    #[must_use]
    pub fn index(self) -> usize {
        (self.0 as u8 - b'a') as usize
    }
}

impl TryFrom<char> for Letter {
    type Error = char;

    fn try_from(c: char) -> Result<Self, Self::Error> {
        if c.is_ascii_alphabetic() {
            Ok(Letter(c.to_ascii_lowercase()))
        } else {
            Err(c)
        }
    }
}

impl fmt::Display for Letter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_upper())
    }
}

/// The hidden word of one game. Always lowercase ASCII letters.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Word {
    letters: Vec<Letter>,
}

impl Word {
    pub fn new(raw: &str) -> Result<Self, WordError> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Err(WordError::Empty);
        }
        let letters = raw
            .chars()
            .map(|ch| {
                Letter::try_from(ch).map_err(|ch| WordError::NotALetter {
                    word: raw.to_string(),
                    ch,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { letters })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.letters.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.letters.is_empty()
    }

    #[must_use]
    pub fn letters(&self) -> &[Letter] {
        &self.letters
    }

    /// Every index holding `letter`, ascending.
    #[must_use]
    pub fn positions_of(&self, letter: Letter) -> Vec<usize> {
        self.letters
            .iter()
            .enumerate()
            .filter(|(_, l)| **l == letter)
            .map(|(i, _)| i)
            .collect()
    }
}

impl fmt::Display for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for letter in &self.letters {
            write!(f, "{}", letter.as_char())?;
        }
        Ok(())
    }
}
