//! Phrase decoder
//!
//! The recognizer only reports which grammar matched and the flat text it
//! heard. The decoder recovers the category from the grammar name and pulls
//! every field out of the text independently; a field that cannot be found
//! is left empty and never affects the others.

use std::sync::Arc;

use aviation_helper_rs::clearance::{
    airlines::Airlines,
    aviation_command::{Callsign, VoiceCommand, Waypoint},
};
use serde::{Deserialize, Serialize};
use strum::Display;

use crate::{
    config::VoiceControlConfig,
    elements::{ElementGrammars, RunwaySpelling},
    errors::Error,
    lexicon::{Lexicon, Script, Spelling},
    normalizer::Normalizer,
    pattern::PatternExtractor,
    rules::Category,
    source::GrammarSource,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
pub enum ResultKind {
    Hypothesized,
    Rejected,
    Recognized,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DecodedResult {
    #[serde(rename = "Type")]
    pub kind: ResultKind,
    pub grammar: Category,
    pub message: String,
    pub normalized_message: String,
    pub aircraft: String,
    pub waypoint: String,
    pub heading: String,
    pub runway: String,
}

impl DecodedResult {
    /// Result carrying nothing but its kind.
    pub fn empty(kind: ResultKind) -> Self {
        Self {
            kind,
            grammar: Category::Invalid,
            message: String::new(),
            normalized_message: String::new(),
            aircraft: String::new(),
            waypoint: String::new(),
            heading: String::new(),
            runway: String::new(),
        }
    }

    /// Typed command, if every field the category needs was decoded.
    pub fn to_command(&self) -> Option<VoiceCommand> {
        if self.kind == ResultKind::Rejected {
            return None;
        }
        let callsign: Callsign = self.aircraft.parse().ok()?;
        let command = match self.grammar {
            Category::Status => VoiceCommand::Status { callsign },
            Category::Takeoff => VoiceCommand::Takeoff {
                callsign,
                runway: self.runway.parse().ok()?,
            },
            Category::Landing => VoiceCommand::Landing {
                callsign,
                runway: self.runway.parse().ok()?,
            },
            Category::FlyHeading => VoiceCommand::FlyHeading {
                callsign,
                heading: self.heading.parse().ok()?,
            },
            Category::VectorToNamedWaypoint if !self.waypoint.is_empty() => {
                VoiceCommand::VectorToWaypoint {
                    callsign,
                    waypoint: Waypoint::Named(self.waypoint.clone()),
                }
            }
            Category::VectorToSpelledWaypoint if !self.waypoint.is_empty() => {
                VoiceCommand::VectorToWaypoint {
                    callsign,
                    waypoint: Waypoint::Spelled(self.waypoint.clone()),
                }
            }
            _ => return None,
        };
        Some(command)
    }
}

/// Decoder bound to one locale and one grammar source.
#[derive(Debug, Clone)]
pub struct PhraseDecoder {
    lexicon: Arc<Lexicon>,
    airlines: Airlines,
    named_waypoints: Vec<String>,
    /// Longest spelling first so `27L` wins over `27` when both are configured.
    runway_spellings: Vec<RunwaySpelling>,
    flight_number_max_digits: usize,
    aircraft: PatternExtractor,
    runway: PatternExtractor,
    heading: PatternExtractor,
    spelled_waypoint: PatternExtractor,
    normalizer: Normalizer,
}

impl PhraseDecoder {
    pub fn new(
        lexicon: Arc<Lexicon>,
        source: &GrammarSource,
        elements: &ElementGrammars,
        config: &VoiceControlConfig,
    ) -> Result<Self, Error> {
        let airline_codes = source
            .airlines()
            .iter()
            .map(|airline| Spelling::new(airline.name.as_str(), airline.code.as_str()))
            .collect();
        let aircraft = PatternExtractor::new(
            &lexicon,
            Some(airline_codes),
            config.flight_number_range(),
            None,
        )?;
        let runway = PatternExtractor::new(
            &lexicon,
            Some(vec![Spelling::new(lexicon.runway_keyword.as_str(), "")]),
            1..=2,
            Some(lexicon.directions.clone()),
        )?;
        let heading = PatternExtractor::new(&lexicon, None, 3..=3, None)?;
        let spelled_waypoint =
            PatternExtractor::new(&lexicon, Some(lexicon.phonetic.clone()), 2..=2, None)?;

        let mut runway_spellings = elements.runway_spellings().to_vec();
        runway_spellings.sort_by_key(|spelling| std::cmp::Reverse(spelling.spoken.chars().count()));

        Ok(Self {
            normalizer: Normalizer::new(lexicon.clone(), source.airlines())?,
            airlines: source.airlines().clone(),
            named_waypoints: source.named_waypoints().to_vec(),
            runway_spellings,
            flight_number_max_digits: config.flight_number_max_digits,
            aircraft,
            runway,
            heading,
            spelled_waypoint,
            lexicon,
        })
    }

    pub fn locale(&self) -> &str {
        &self.lexicon.locale
    }

    pub fn decode(&self, kind: ResultKind, grammar_name: &str, text: &str) -> DecodedResult {
        if kind == ResultKind::Rejected || text.trim().is_empty() {
            return DecodedResult::empty(kind);
        }

        let grammar = Category::from_grammar_name(grammar_name);
        let waypoint = match grammar {
            Category::VectorToNamedWaypoint => self.named_waypoint(text),
            Category::VectorToSpelledWaypoint => self.spelled_waypoint(text),
            _ => None,
        };
        let result = DecodedResult {
            kind,
            grammar,
            message: text.to_owned(),
            normalized_message: self.normalizer.normalize(text),
            aircraft: self.aircraft(text).unwrap_or_default(),
            waypoint: waypoint.unwrap_or_default(),
            heading: self.heading(text).unwrap_or_default(),
            runway: self.runway(text).unwrap_or_default(),
        };
        log::debug!(
            "Decoded {grammar_name} as {}: aircraft={:?} runway={:?} heading={:?} waypoint={:?}",
            result.grammar,
            result.aircraft,
            result.runway,
            result.heading,
            result.waypoint
        );
        result
    }

    fn aircraft(&self, text: &str) -> Option<String> {
        match self.lexicon.script {
            Script::Spaced => {
                let matched = self.aircraft.first(text)?;
                Some(format!("{} {}", matched.leading?, matched.digits))
            }
            Script::Ideographic => {
                let compact = self.lexicon.compact(text).to_lowercase();
                self.airlines.iter().find_map(|airline| {
                    let rest = compact.strip_prefix(&airline.name.to_lowercase())?;
                    let (digits, _) = self.leading_numerals(rest, self.flight_number_max_digits);
                    (!digits.is_empty()).then(|| format!("{} {}", airline.code, digits))
                })
            }
        }
    }

    fn runway(&self, text: &str) -> Option<String> {
        if self.runway_spellings.is_empty() {
            let matched = self.runway.first(text)?;
            return Some(format!(
                "{}{}",
                matched.digits,
                matched.trailing.unwrap_or_default()
            ));
        }
        let haystack = self.lexicon.compact(text).to_lowercase();
        self.runway_spellings
            .iter()
            .find(|spelling| {
                haystack.contains(&self.lexicon.compact(&spelling.spoken).to_lowercase())
            })
            .map(|spelling| spelling.runway.to_string())
    }

    fn heading(&self, text: &str) -> Option<String> {
        self.heading.last(text).map(|matched| matched.digits)
    }

    fn named_waypoint(&self, text: &str) -> Option<String> {
        let haystack = self.lexicon.compact(text).to_lowercase();
        self.named_waypoints
            .iter()
            .find(|waypoint| haystack.contains(&self.lexicon.compact(waypoint).to_lowercase()))
            .cloned()
    }

    fn spelled_waypoint(&self, text: &str) -> Option<String> {
        match self.lexicon.script {
            Script::Spaced => {
                let matched = self.spelled_waypoint.first(text)?;
                Some(format!("{}{}", matched.leading?, matched.digits))
            }
            Script::Ideographic => {
                let compact = self.lexicon.compact(text).to_lowercase();
                let marker = self.lexicon.waypoint_marker.to_lowercase();
                let (_, after) = compact.split_once(&marker)?;
                self.lexicon.phonetic.iter().find_map(|spelling| {
                    let rest = after.strip_prefix(&spelling.spoken.to_lowercase())?;
                    let (digits, _) = self.leading_numerals(rest, 2);
                    (digits.len() == 2).then(|| format!("{}{}", spelling.code, digits))
                })
            }
        }
    }

    /// Consumes up to `max` digit words from the start of compact text.
    fn leading_numerals<'a>(&self, mut text: &'a str, max: usize) -> (String, &'a str) {
        let mut digits = String::new();
        while digits.len() < max {
            let next = self.lexicon.digits.iter().find_map(|digit| {
                text.strip_prefix(&digit.word.to_lowercase())
                    .map(|rest| (digit.value, rest))
            });
            match next {
                Some((value, rest)) => {
                    digits.push(char::from(b'0' + value));
                    text = rest;
                }
                None => break,
            }
        }
        (digits, text)
    }
}
