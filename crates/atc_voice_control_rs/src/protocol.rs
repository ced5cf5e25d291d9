//! Messages exchanged with the game, one JSON object per line:
//! `{"type": "GrammarSource", "content": {...}}`.

use serde::{Deserialize, Serialize};

use crate::{
    decoder::DecodedResult,
    errors::Error,
    grammar::CompiledGrammar,
    recognizer::RecognitionEvent,
    rules::{Category, RuleSet},
    source::GrammarSource,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "content")]
pub enum HostMessage {
    GrammarSource(GrammarSource),
    #[serde(rename = "GrammarStruct")]
    Rules(RuleSet),
    #[serde(rename = "SREngineLanguage")]
    EngineLanguage(EngineLanguage),
    #[serde(rename = "SREngineRunningState")]
    RunningState(RunningState),
    /// Event reported by the external speech engine.
    RecognitionResult(RecognitionEvent),
    /// Typed text, matched against the compiled grammars instead of audio.
    Transcript(Transcript),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "content")]
pub enum ClientMessage {
    #[serde(rename = "SRResult")]
    Result(DecodedResult),
    LanguageInitResult(LanguageInitResult),
    CompiledGrammars(Vec<GrammarSummary>),
    ConfigurationError(ConfigurationError),
    #[serde(rename = "SREngineRunningState")]
    RunningState(RunningState),
}

impl ClientMessage {
    pub fn configuration_error(err: &Error) -> Self {
        ClientMessage::ConfigurationError(ConfigurationError {
            message: err.to_string(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct EngineLanguage {
    pub language: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RunningState {
    pub is_running: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Transcript {
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct LanguageInitResult {
    pub language: String,
    pub is_success: bool,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub error_message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ConfigurationError {
    pub message: String,
}

/// What the host needs to know about a compiled grammar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct GrammarSummary {
    pub name: String,
    pub category: Category,
    pub definition: String,
}

impl From<&CompiledGrammar> for GrammarSummary {
    fn from(grammar: &CompiledGrammar) -> Self {
        Self {
            name: grammar.name.clone(),
            category: grammar.category,
            definition: grammar.rule.to_string(),
        }
    }
}
