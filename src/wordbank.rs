use crate::word::{MAX_WORD_LEN, MIN_WORD_LEN, Word};
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

pub const EMBEDDED_WORDBANK: &str = include_str!("resources/wordbank.txt");

fn parse_line(line: &str) -> Option<Word> {
    let line = line.trim();
    if (MIN_WORD_LEN..=MAX_WORD_LEN).contains(&line.len()) {
        Word::new(line).ok()
    } else {
        None
    }
}

pub fn load_wordbank_from_str(data: &str) -> Vec<Word> {
    data.lines().filter_map(parse_line).collect()
}

pub fn load_wordbank_from_file<P: AsRef<Path>>(path: P) -> io::Result<Vec<Word>> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    let mut words = Vec::new();
    for line in reader.lines() {
        if let Some(word) = parse_line(&line?) {
            words.push(word);
        }
    }
    Ok(words)
}
