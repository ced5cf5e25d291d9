//! Display form of a recognized utterance: airline names become codes, digit
//! words become numerals and a side word right after a numeral becomes its
//! letter. Field extraction never reads this output.

use std::sync::Arc;

use aviation_helper_rs::clearance::airlines::Airlines;
use regex::Regex;

use crate::{
    errors::Error,
    lexicon::{Lexicon, Script},
};

#[derive(Debug, Clone)]
pub struct Normalizer {
    lexicon: Arc<Lexicon>,
    airlines: Airlines,
    token_regex: Regex,
}

impl Normalizer {
    pub fn new(lexicon: Arc<Lexicon>, airlines: &Airlines) -> Result<Self, Error> {
        let mut words: Vec<&str> = airlines
            .names()
            .chain(lexicon.digits.iter().map(|digit| digit.word.as_str()))
            .chain(lexicon.directions.iter().map(|direction| direction.spoken.as_str()))
            .filter(|word| !word.trim().is_empty())
            .collect();
        words.sort_by_key(|word| std::cmp::Reverse(word.chars().count()));
        let known = words
            .into_iter()
            .map(regex::escape)
            .collect::<Vec<_>>()
            .join("|");
        let pattern = match (lexicon.script, known.is_empty()) {
            (Script::Spaced, false) => format!(r"(?i)\b(?:{known})\b|\S+"),
            (Script::Ideographic, false) => format!(r"(?i)(?:{known})|[A-Za-z0-9]+|\S"),
            (Script::Spaced, true) => r"\S+".to_owned(),
            (Script::Ideographic, true) => r"[A-Za-z0-9]+|\S".to_owned(),
        };
        Ok(Self {
            token_regex: Regex::new(&pattern)?,
            airlines: airlines.clone(),
            lexicon,
        })
    }

    pub fn normalize(&self, text: &str) -> String {
        let mut pieces: Vec<String> = Vec::new();
        let mut numeral = String::new();
        for token in self.token_regex.find_iter(text).map(|m| m.as_str()) {
            if let Some(value) = self.lexicon.digit_value(token) {
                numeral.push(char::from(b'0' + value));
                continue;
            }
            if !numeral.is_empty() {
                let mut finished = std::mem::take(&mut numeral);
                if let Some(code) = self.lexicon.direction_code(token) {
                    finished.push_str(code);
                    pieces.push(finished);
                    continue;
                }
                pieces.push(finished);
            }
            match self.airlines.code_for(token) {
                Some(code) => pieces.push(code.to_owned()),
                None => pieces.push(token.to_owned()),
            }
        }
        if !numeral.is_empty() {
            pieces.push(numeral);
        }

        match self.lexicon.script {
            Script::Spaced => pieces.join(" "),
            Script::Ideographic => {
                let mut joined = String::new();
                for piece in pieces {
                    let touching = joined.chars().last().is_some_and(|c| c.is_ascii_alphanumeric())
                        && piece.chars().next().is_some_and(|c| c.is_ascii_alphanumeric());
                    if touching {
                        joined.push(' ');
                    }
                    joined.push_str(&piece);
                }
                joined
            }
        }
    }
}
