//! Locale vocabulary: digit words, phonetic spellings, runway direction words.
//!
//! A [`Lexicon`] is plain data. Adding a locale means adding a table, either
//! through [`LexiconCatalogue::register`] or the `lexicons` list of the RON
//! configuration file.

use std::{collections::HashMap, sync::Arc};

use serde::{Deserialize, Serialize};

use crate::errors::Error;

pub const EN_US: &str = "en-US";
pub const ZH_CN: &str = "zh-CN";

/// How words are separated in recognized text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub enum Script {
    /// Words separated by whitespace, matched on word boundaries.
    Spaced,
    /// Words written back to back, matched character-wise.
    Ideographic,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct DigitWord {
    pub word: String,
    pub value: u8,
}

/// A spoken form and the code it stands for (`alpha` → `A`, `left` → `L`).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Spelling {
    pub spoken: String,
    pub code: String,
}

impl Spelling {
    pub fn new(spoken: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            spoken: spoken.into(),
            code: code.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Lexicon {
    pub locale: String,
    pub script: Script,
    /// Ordered digit vocabulary. The first word listed for a value is the
    /// canonical one used when spelling; later words are accepted aliases.
    pub digits: Vec<DigitWord>,
    pub phonetic: Vec<Spelling>,
    pub directions: Vec<Spelling>,
    pub runway_keyword: String,
    pub waypoint_marker: String,
}

impl Lexicon {
    pub fn english() -> Self {
        let digits = [
            "zero", "one", "two", "three", "four", "five", "six", "seven", "eight", "nine",
        ]
        .into_iter()
        .enumerate()
        .map(|(value, word)| DigitWord {
            word: word.to_owned(),
            value: value as u8,
        })
        .chain(std::iter::once(DigitWord {
            word: "niner".to_owned(),
            value: 9,
        }))
        .collect();

        Self {
            locale: EN_US.to_owned(),
            script: Script::Spaced,
            digits,
            phonetic: vec![
                Spelling::new("alpha", "A"),
                Spelling::new("hotel", "H"),
                Spelling::new("lima", "L"),
                Spelling::new("tango", "T"),
            ],
            directions: vec![
                Spelling::new("left", "L"),
                Spelling::new("center", "C"),
                Spelling::new("right", "R"),
            ],
            runway_keyword: "Runway".to_owned(),
            waypoint_marker: "waypoint".to_owned(),
        }
    }

    /// Mandarin radiotelephony numerals (洞 幺 两 ... 拐 ...), with the
    /// everyday readings accepted as aliases.
    pub fn mandarin() -> Self {
        let canonical = ["洞", "幺", "两", "三", "四", "五", "六", "拐", "八", "九"];
        let aliases = [("零", 0), ("一", 1), ("二", 2), ("七", 7)];
        let digits = canonical
            .into_iter()
            .enumerate()
            .map(|(value, word)| (word, value as u8))
            .chain(aliases)
            .map(|(word, value)| DigitWord {
                word: word.to_owned(),
                value,
            })
            .collect();

        Self {
            locale: ZH_CN.to_owned(),
            script: Script::Ideographic,
            digits,
            phonetic: vec![
                Spelling::new("阿尔法", "A"),
                Spelling::new("霍特尔", "H"),
                Spelling::new("利马", "L"),
                Spelling::new("探戈", "T"),
            ],
            directions: vec![
                Spelling::new("左", "L"),
                Spelling::new("中", "C"),
                Spelling::new("右", "R"),
            ],
            runway_keyword: "跑道".to_owned(),
            waypoint_marker: "航路点".to_owned(),
        }
    }

    pub fn validate(&self) -> Result<(), Error> {
        let invalid = |reason: String| Error::InvalidLexicon {
            locale: self.locale.clone(),
            reason,
        };
        if self.locale.trim().is_empty() {
            return Err(invalid("empty locale tag".to_owned()));
        }
        if let Some(digit) = self.digits.iter().find(|digit| digit.value > 9) {
            return Err(invalid(format!("digit word {} has value {}", digit.word, digit.value)));
        }
        if let Some(missing) = (0..=9).find(|value| self.canonical_digit(*value).is_none()) {
            return Err(invalid(format!("no word for digit {missing}")));
        }
        let words = self
            .digits
            .iter()
            .map(|digit| digit.word.as_str())
            .chain(self.phonetic.iter().map(|spelling| spelling.spoken.as_str()))
            .chain(self.directions.iter().map(|spelling| spelling.spoken.as_str()));
        for word in words {
            if word.trim().is_empty() {
                return Err(invalid("empty vocabulary word".to_owned()));
            }
        }
        if self.phonetic.is_empty() {
            return Err(invalid("empty phonetic alphabet".to_owned()));
        }
        Ok(())
    }

    pub fn canonical_digit(&self, value: u8) -> Option<&str> {
        self.digits
            .iter()
            .find(|digit| digit.value == value)
            .map(|digit| digit.word.as_str())
    }

    /// Case-insensitive lookup of a single digit word.
    pub fn digit_value(&self, word: &str) -> Option<u8> {
        let word = word.to_lowercase();
        self.digits
            .iter()
            .find(|digit| digit.word.to_lowercase() == word)
            .map(|digit| digit.value)
    }

    pub fn direction_word(&self, code: char) -> Option<&str> {
        self.directions
            .iter()
            .find(|direction| {
                let mut chars = direction.code.chars();
                chars.next().is_some_and(|c| c.eq_ignore_ascii_case(&code))
                    && chars.next().is_none()
            })
            .map(|direction| direction.spoken.as_str())
    }

    pub fn direction_code(&self, word: &str) -> Option<&str> {
        find_code(&self.directions, word)
    }

    /// Joins words the way this locale writes them.
    pub fn join<I, S>(&self, words: I) -> String
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let separator = match self.script {
            Script::Spaced => " ",
            Script::Ideographic => "",
        };
        words
            .into_iter()
            .map(|word| word.as_ref().trim().to_owned())
            .filter(|word| !word.is_empty())
            .collect::<Vec<_>>()
            .join(separator)
    }

    /// Recognizers for ideographic locales sometimes insert spaces; matching
    /// for those locales runs on text with all whitespace removed.
    pub fn compact(&self, text: &str) -> String {
        match self.script {
            Script::Spaced => text.trim().to_owned(),
            Script::Ideographic => text.chars().filter(|c| !c.is_whitespace()).collect(),
        }
    }
}

fn find_code<'a>(spellings: &'a [Spelling], word: &str) -> Option<&'a str> {
    let word = word.to_lowercase();
    spellings
        .iter()
        .find(|spelling| spelling.spoken.to_lowercase() == word)
        .map(|spelling| spelling.code.as_str())
}

/// Supported locales, keyed by lowercased locale tag.
#[derive(Debug, Clone)]
pub struct LexiconCatalogue {
    lexicons: HashMap<String, Arc<Lexicon>>,
}

impl Default for LexiconCatalogue {
    fn default() -> Self {
        let mut catalogue = Self {
            lexicons: HashMap::new(),
        };
        for lexicon in [Lexicon::english(), Lexicon::mandarin()] {
            catalogue
                .lexicons
                .insert(lexicon.locale.to_lowercase(), Arc::new(lexicon));
        }
        catalogue
    }
}

impl LexiconCatalogue {
    /// Adds or replaces the lexicon for its locale tag.
    pub fn register(&mut self, lexicon: Lexicon) -> Result<(), Error> {
        lexicon.validate()?;
        log::debug!("Registering lexicon for {}", lexicon.locale);
        self.lexicons
            .insert(lexicon.locale.to_lowercase(), Arc::new(lexicon));
        Ok(())
    }

    pub fn get(&self, locale: &str) -> Result<Arc<Lexicon>, Error> {
        self.lexicons
            .get(&locale.trim().to_lowercase())
            .cloned()
            .ok_or_else(|| Error::UnsupportedLocale(locale.to_owned()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_lexicons_are_valid() {
        Lexicon::english().validate().unwrap();
        Lexicon::mandarin().validate().unwrap();
    }

    #[test]
    fn test_canonical_digit_prefers_first_word() {
        let english = Lexicon::english();
        assert_eq!(english.canonical_digit(9), Some("nine"));
        assert_eq!(english.digit_value("Niner"), Some(9));

        let mandarin = Lexicon::mandarin();
        assert_eq!(mandarin.canonical_digit(7), Some("拐"));
        assert_eq!(mandarin.digit_value("七"), Some(7));
        assert_eq!(mandarin.digit_value("洞"), Some(0));
    }

    #[test]
    fn test_direction_lookups() {
        let english = Lexicon::english();
        assert_eq!(english.direction_word('l'), Some("left"));
        assert_eq!(english.direction_code("RIGHT"), Some("R"));
        assert_eq!(english.direction_word('X'), None);
    }

    #[test]
    fn test_join_and_compact_follow_script() {
        let english = Lexicon::english();
        assert_eq!(english.join(["Runway", "two", "seven"]), "Runway two seven");
        let mandarin = Lexicon::mandarin();
        assert_eq!(mandarin.join(["跑道", "两", "拐"]), "跑道两拐");
        assert_eq!(mandarin.compact(" 国航 幺两三 "), "国航幺两三");
    }

    #[test]
    fn test_catalogue_lookup_is_case_insensitive() {
        let catalogue = LexiconCatalogue::default();
        assert_eq!(catalogue.get("EN-us").unwrap().locale, EN_US);
        assert_eq!(catalogue.get("zh-CN").unwrap().script, Script::Ideographic);
    }

    #[test]
    fn test_catalogue_rejects_unknown_locale() {
        let catalogue = LexiconCatalogue::default();
        assert!(matches!(
            catalogue.get("fr-FR"),
            Err(Error::UnsupportedLocale(locale)) if locale == "fr-FR"
        ));
    }

    #[test]
    fn test_register_validates_digits() {
        let mut catalogue = LexiconCatalogue::default();
        let mut broken = Lexicon::english();
        broken.locale = "en-GB".to_owned();
        broken.digits.retain(|digit| digit.value != 4);
        assert!(matches!(
            catalogue.register(broken),
            Err(Error::InvalidLexicon { .. })
        ));
        assert!(catalogue.get("en-GB").is_err());

        let mut british = Lexicon::english();
        british.locale = "en-GB".to_owned();
        catalogue.register(british).unwrap();
        assert_eq!(catalogue.get("en-gb").unwrap().locale, "en-GB");
    }
}
