//! ATC Voice Control Library
//!
//! Compiles author-written command templates into recognizer grammars over a
//! live vocabulary (airlines, waypoints, runways) and decodes recognized
//! utterances back into callsign, runway, heading and waypoint fields.

pub mod config;
pub mod decoder;
pub mod elements;
pub mod errors;
pub mod grammar;
pub mod lexicon;
pub mod normalizer;
pub mod pattern;
pub mod protocol;
pub mod recognizer;
pub mod rules;
pub mod session;
pub mod source;
pub mod template;
pub mod transport;
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use config::VoiceControlConfig;
pub use decoder::{DecodedResult, PhraseDecoder, ResultKind};
pub use elements::{ElementGrammars, RunwayMode};
pub use errors::Error;
pub use grammar::{CompiledGrammar, CompiledGrammarSet, ElementKind, GrammarRule};
pub use lexicon::{Lexicon, LexiconCatalogue, Script};
pub use protocol::{ClientMessage, HostMessage};
pub use recognizer::{GrammarMatcher, RecognitionEvent};
pub use rules::{Category, RuleSet};
pub use session::{SessionSnapshot, VoiceControlSession};
pub use source::GrammarSource;
pub use transport::{MessageReader, MessageWriter};

// Re-export the typed command for convenience
pub use aviation_helper_rs::clearance::aviation_command::VoiceCommand;
