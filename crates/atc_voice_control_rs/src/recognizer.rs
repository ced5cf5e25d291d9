//! Text-driven stand-in for the speech engine.
//!
//! The real engine receives the compiled grammars and reports
//! `(grammar name, text, confidence, kind)`. [`GrammarMatcher`] does the
//! same for typed transcripts: the first compiled grammar whose anchored
//! pattern accepts the text wins.

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::{decoder::ResultKind, errors::Error, grammar::CompiledGrammarSet};

/// One event as reported by a recognizer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RecognitionEvent {
    pub grammar_name: String,
    pub text: String,
    pub confidence: f32,
    #[serde(rename = "Type")]
    pub kind: ResultKind,
}

#[derive(Debug, Clone)]
pub struct GrammarMatcher {
    grammars: Vec<(String, Regex)>,
}

impl GrammarMatcher {
    pub fn new(compiled: &CompiledGrammarSet) -> Result<Self, Error> {
        let mut grammars = Vec::with_capacity(compiled.len());
        for grammar in compiled.iter() {
            match grammar.to_regex_pattern() {
                Some(pattern) => grammars.push((grammar.name.clone(), Regex::new(&pattern)?)),
                None => log::debug!("Grammar {} can never match, skipping it", grammar.name),
            }
        }
        Ok(Self { grammars })
    }

    /// Name of the first grammar accepting `text`.
    pub fn find(&self, text: &str) -> Option<&str> {
        self.grammars
            .iter()
            .find(|(_, regex)| regex.is_match(text))
            .map(|(name, _)| name.as_str())
    }

    pub fn recognize(&self, text: &str) -> RecognitionEvent {
        match self.find(text) {
            Some(name) => RecognitionEvent {
                grammar_name: name.to_owned(),
                text: text.trim().to_owned(),
                confidence: 1.0,
                kind: ResultKind::Recognized,
            },
            None => RecognitionEvent {
                grammar_name: String::new(),
                text: text.trim().to_owned(),
                confidence: 0.0,
                kind: ResultKind::Rejected,
            },
        }
    }
}
