//! Generic "word, digit-word run, optional word" extractor.
//!
//! Aircraft callsigns, procedural runways, headings and spelled waypoints all
//! come out of recognized text the same way: an optional leading word (an
//! airline, the runway keyword, a phonetic letter) followed by a run of digit
//! words, optionally followed by one more word (a runway side). The extractor
//! returns every non-overlapping match in text order; choosing the first or
//! the last match is left to the caller.

use std::ops::RangeInclusive;

use regex::Regex;

use crate::{
    errors::Error,
    lexicon::{Lexicon, Script, Spelling},
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternMatch {
    /// Replacement of the leading word, if a leading set was configured.
    pub leading: Option<String>,
    /// The digit run as arabic numerals without separators.
    pub digits: String,
    /// Replacement of the trailing word. Trailing words outside the
    /// configured set are dropped.
    pub trailing: Option<String>,
    pub start: usize,
    pub end: usize,
}

#[derive(Debug, Clone)]
pub struct PatternExtractor {
    /// `None` when a leading set was given but is empty: nothing can match.
    regex: Option<Regex>,
    digit_regex: Regex,
    digit_values: Vec<(String, u8)>,
    leading: Option<Vec<Spelling>>,
    trailing: Option<Vec<Spelling>>,
}

impl PatternExtractor {
    pub fn new(
        lexicon: &Lexicon,
        leading: Option<Vec<Spelling>>,
        digits: RangeInclusive<usize>,
        trailing: Option<Vec<Spelling>>,
    ) -> Result<Self, Error> {
        let digit_words: Vec<&str> = lexicon.digits.iter().map(|d| d.word.as_str()).collect();
        let digit_alternation = alternation(&digit_words);
        let digit_regex = Regex::new(&format!("(?i){digit_alternation}"))?;
        let digit_values = lexicon
            .digits
            .iter()
            .map(|digit| (digit.word.to_lowercase(), digit.value))
            .collect();

        let lead_words: Option<Vec<&str>> = leading
            .as_ref()
            .map(|spellings| spellings.iter().map(|s| s.spoken.as_str()).collect());
        let regex = match lead_words {
            Some(words) if words.is_empty() => None,
            lead_words => {
                let trail_words: Option<Vec<&str>> = trailing
                    .as_ref()
                    .map(|spellings| spellings.iter().map(|s| s.spoken.as_str()).collect());
                let pattern = build_pattern(
                    lexicon.script,
                    lead_words.as_deref(),
                    &digit_alternation,
                    &digits,
                    trail_words.as_deref(),
                );
                log::trace!("Pattern extractor regex: {pattern}");
                Some(Regex::new(&pattern)?)
            }
        };

        Ok(Self {
            regex,
            digit_regex,
            digit_values,
            leading,
            trailing,
        })
    }

    pub fn extract(&self, text: &str) -> Vec<PatternMatch> {
        let Some(regex) = &self.regex else {
            return Vec::new();
        };
        regex
            .captures_iter(text)
            .filter_map(|captures| {
                let whole = captures.get(0)?;
                let digits = self.digits_of(captures.name("digits")?.as_str());
                let leading = match (&self.leading, captures.name("lead")) {
                    (Some(spellings), Some(word)) => {
                        Some(replacement(spellings, word.as_str())?.to_owned())
                    }
                    _ => None,
                };
                let trailing = match (&self.trailing, captures.name("trail")) {
                    (Some(spellings), Some(word)) => {
                        replacement(spellings, word.as_str()).map(str::to_owned)
                    }
                    _ => None,
                };
                Some(PatternMatch {
                    leading,
                    digits,
                    trailing,
                    start: whole.start(),
                    end: whole.end(),
                })
            })
            .collect()
    }

    pub fn first(&self, text: &str) -> Option<PatternMatch> {
        self.extract(text).into_iter().next()
    }

    pub fn last(&self, text: &str) -> Option<PatternMatch> {
        self.extract(text).into_iter().last()
    }

    fn digits_of(&self, run: &str) -> String {
        self.digit_regex
            .find_iter(run)
            .filter_map(|word| {
                let word = word.as_str().to_lowercase();
                self.digit_values
                    .iter()
                    .find(|(candidate, _)| *candidate == word)
                    .map(|(_, value)| char::from(b'0' + value))
            })
            .collect()
    }
}

fn replacement<'a>(spellings: &'a [Spelling], word: &str) -> Option<&'a str> {
    let word = word.to_lowercase();
    spellings
        .iter()
        .find(|spelling| spelling.spoken.to_lowercase() == word)
        .map(|spelling| spelling.code.as_str())
}

/// Escaped alternation, longest alternative first so that e.g. `niner` wins
/// over `nine`.
fn alternation(words: &[&str]) -> String {
    let mut words: Vec<&str> = words.to_vec();
    words.sort_by_key(|word| std::cmp::Reverse(word.chars().count()));
    words
        .into_iter()
        .map(regex::escape)
        .collect::<Vec<_>>()
        .join("|")
}

fn build_pattern(
    script: Script,
    leading: Option<&[&str]>,
    digit_alternation: &str,
    digits: &RangeInclusive<usize>,
    trailing: Option<&[&str]>,
) -> String {
    let (min, max) = (*digits.start(), *digits.end());
    let mut pattern = String::from("(?i)");
    match script {
        Script::Spaced => {
            if let Some(words) = leading {
                pattern.push_str(&format!(r"\b(?P<lead>{})\b\s*", alternation(words)));
            }
            pattern.push_str(&format!(
                r"(?P<digits>(?:\b(?:{digit_alternation})\b\s*){{{min},{max}}})"
            ));
            if trailing.is_some() {
                pattern.push_str(r"(?:\s*\b(?P<trail>\w+)\b)?");
            }
        }
        Script::Ideographic => {
            if let Some(words) = leading {
                pattern.push_str(&format!(r"(?P<lead>{})\s*", alternation(words)));
            }
            pattern.push_str(&format!(
                r"(?P<digits>(?:(?:{digit_alternation})\s*){{{min},{max}}})"
            ));
            if let Some(words) = trailing {
                pattern.push_str(&format!(r"(?:\s*(?P<trail>{}|\w))?", alternation(words)));
            }
        }
    }
    pattern
}
