//! Voice control session
//!
//! Holds the latest grammar source, rule set and locale. Whenever a change
//! arrives and all three are known, everything derived from them is rebuilt
//! into a fresh [`SessionSnapshot`] and swapped in as a whole, so a decode
//! never sees half of an old configuration and half of a new one.

use std::sync::Arc;

use crate::{
    config::VoiceControlConfig,
    decoder::{DecodedResult, PhraseDecoder},
    elements::ElementGrammars,
    errors::Error,
    grammar::CompiledGrammarSet,
    lexicon::{EN_US, Lexicon, LexiconCatalogue},
    protocol::{
        ClientMessage, EngineLanguage, GrammarSummary, HostMessage, LanguageInitResult,
        RunningState, Transcript,
    },
    recognizer::{GrammarMatcher, RecognitionEvent},
    rules::RuleSet,
    source::GrammarSource,
    template::compile_rule_set,
};

/// Everything derived from one (source, rules, locale) triple.
#[derive(Debug)]
pub struct SessionSnapshot {
    pub lexicon: Arc<Lexicon>,
    pub source: GrammarSource,
    pub rules: RuleSet,
    pub elements: ElementGrammars,
    pub compiled: CompiledGrammarSet,
    pub decoder: PhraseDecoder,
    pub matcher: GrammarMatcher,
}

impl SessionSnapshot {
    pub fn build(
        catalogue: &LexiconCatalogue,
        config: &VoiceControlConfig,
        source: GrammarSource,
        rules: RuleSet,
        locale: &str,
    ) -> Result<Self, Error> {
        let lexicon = catalogue.get(locale)?;
        let elements = ElementGrammars::build(&lexicon, &source, config)?;
        let compiled = compile_rule_set(&rules, &elements, &lexicon.locale);
        let decoder = PhraseDecoder::new(lexicon.clone(), &source, &elements, config)?;
        let matcher = GrammarMatcher::new(&compiled)?;
        Ok(Self {
            lexicon,
            source,
            rules,
            elements,
            compiled,
            decoder,
            matcher,
        })
    }
}

#[derive(Debug)]
pub struct VoiceControlSession {
    config: VoiceControlConfig,
    catalogue: LexiconCatalogue,
    locale: String,
    source: Option<GrammarSource>,
    rules: Option<RuleSet>,
    snapshot: Option<Arc<SessionSnapshot>>,
    running: bool,
}

impl VoiceControlSession {
    pub fn new(config: VoiceControlConfig) -> Result<Self, Error> {
        config.validate()?;
        let catalogue = config.catalogue()?;
        Ok(Self {
            config,
            catalogue,
            locale: EN_US.to_owned(),
            source: None,
            rules: None,
            snapshot: None,
            running: true,
        })
    }

    /// Sets the starting locale. Unsupported locales are rejected.
    pub fn with_locale(mut self, locale: &str) -> Result<Self, Error> {
        self.locale = self.catalogue.get(locale)?.locale.clone();
        Ok(self)
    }

    pub fn locale(&self) -> &str {
        &self.locale
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn snapshot(&self) -> Option<Arc<SessionSnapshot>> {
        self.snapshot.clone()
    }

    /// Rebuilds every grammar from scratch. On error the previous snapshot
    /// stays active.
    pub fn reconfigure(
        &mut self,
        source: GrammarSource,
        rules: RuleSet,
        locale: &str,
    ) -> Result<CompiledGrammarSet, Error> {
        let snapshot = SessionSnapshot::build(
            &self.catalogue,
            &self.config,
            source.clone(),
            rules.clone(),
            locale,
        )?;
        log::info!(
            "Reconfigured for {}: {} airlines, {} named waypoints, {} grammars",
            snapshot.lexicon.locale,
            snapshot.source.airlines().len(),
            snapshot.source.named_waypoints().len(),
            snapshot.compiled.len()
        );
        let compiled = snapshot.compiled.clone();
        self.locale = snapshot.lexicon.locale.clone();
        self.source = Some(source);
        self.rules = Some(rules);
        self.snapshot = Some(Arc::new(snapshot));
        Ok(compiled)
    }

    pub fn decode(&self, event: &RecognitionEvent) -> Result<DecodedResult, Error> {
        let snapshot = self.snapshot.as_ref().ok_or(Error::NotConfigured)?;
        Ok(snapshot
            .decoder
            .decode(event.kind, &event.grammar_name, &event.text))
    }

    /// Matches typed text against the compiled grammars and decodes it.
    pub fn decode_transcript(&self, text: &str) -> Result<DecodedResult, Error> {
        let snapshot = self.snapshot.as_ref().ok_or(Error::NotConfigured)?;
        let event = snapshot.matcher.recognize(text);
        Ok(snapshot
            .decoder
            .decode(event.kind, &event.grammar_name, &event.text))
    }

    /// Applies one host message and returns the replies.
    pub fn handle(&mut self, message: HostMessage) -> Vec<ClientMessage> {
        match message {
            HostMessage::GrammarSource(source) => {
                let applied = self.apply(Some(source), self.rules.clone(), self.locale.clone());
                compiled_replies(applied)
            }
            HostMessage::Rules(rules) => {
                let applied = self.apply(self.source.clone(), Some(rules), self.locale.clone());
                compiled_replies(applied)
            }
            HostMessage::EngineLanguage(EngineLanguage { language }) => {
                self.change_language(language)
            }
            HostMessage::RunningState(state) => {
                self.running = state.is_running;
                log::info!("Voice engine running: {}", state.is_running);
                vec![ClientMessage::RunningState(RunningState {
                    is_running: self.running,
                })]
            }
            HostMessage::RecognitionResult(event) => {
                if !self.running {
                    log::debug!("Engine stopped, ignoring result for {}", event.grammar_name);
                    return Vec::new();
                }
                self.reply(self.decode(&event))
            }
            HostMessage::Transcript(Transcript { text }) => {
                if !self.running {
                    log::debug!("Engine stopped, ignoring transcript");
                    return Vec::new();
                }
                self.reply(self.decode_transcript(&text))
            }
        }
    }

    fn change_language(&mut self, language: String) -> Vec<ClientMessage> {
        let applied = self.catalogue.get(&language).and_then(|lexicon| {
            self.apply(self.source.clone(), self.rules.clone(), lexicon.locale.clone())
        });
        match applied {
            Ok(compiled) => {
                let mut replies = vec![ClientMessage::LanguageInitResult(LanguageInitResult {
                    language,
                    is_success: true,
                    error_message: String::new(),
                })];
                replies.extend(compiled_replies(Ok(compiled)));
                replies
            }
            Err(err) => {
                log::warn!("Keeping {}: {err}", self.locale);
                vec![ClientMessage::LanguageInitResult(LanguageInitResult {
                    language,
                    is_success: false,
                    error_message: err.to_string(),
                })]
            }
        }
    }

    /// Rebuilds from the candidate values once source and rules are both
    /// known. Nothing is committed when the rebuild fails.
    fn apply(
        &mut self,
        source: Option<GrammarSource>,
        rules: Option<RuleSet>,
        locale: String,
    ) -> Result<Option<CompiledGrammarSet>, Error> {
        match (source, rules) {
            (Some(source), Some(rules)) => self.reconfigure(source, rules, &locale).map(Some),
            (source, rules) => {
                log::debug!("Waiting for both grammar source and rules before compiling");
                self.source = source;
                self.rules = rules;
                self.locale = locale;
                Ok(None)
            }
        }
    }

    fn reply(&self, decoded: Result<DecodedResult, Error>) -> Vec<ClientMessage> {
        match decoded {
            Ok(result) => vec![ClientMessage::Result(result)],
            Err(err) => vec![ClientMessage::configuration_error(&err)],
        }
    }
}

fn compiled_replies(applied: Result<Option<CompiledGrammarSet>, Error>) -> Vec<ClientMessage> {
    match applied {
        Ok(Some(compiled)) => vec![ClientMessage::CompiledGrammars(
            compiled.iter().map(GrammarSummary::from).collect(),
        )],
        Ok(None) => Vec::new(),
        Err(err) => {
            log::warn!("Reconfiguration failed: {err}");
            vec![ClientMessage::configuration_error(&err)]
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{decoder::ResultKind, rules::Category, test_utils};

    fn session() -> VoiceControlSession {
        VoiceControlSession::new(VoiceControlConfig::default()).unwrap()
    }

    fn configured(locale: &str) -> VoiceControlSession {
        let mut session = session();
        let (source, rules) = match locale {
            "zh-CN" => (test_utils::mandarin_source(&[]), test_utils::mandarin_rules()),
            _ => (test_utils::grammar_source(&[]), test_utils::sample_rules()),
        };
        session.reconfigure(source.unwrap(), rules, locale).unwrap();
        session
    }

    #[test]
    fn test_waits_for_source_and_rules() {
        let mut session = session();
        let replies = session.handle(HostMessage::Rules(test_utils::sample_rules()));
        assert!(replies.is_empty());
        assert!(session.snapshot().is_none());

        let replies = session.handle(HostMessage::GrammarSource(
            test_utils::grammar_source(&[]).unwrap(),
        ));
        let [ClientMessage::CompiledGrammars(summaries)] = replies.as_slice() else {
            panic!("expected compiled grammars, got {replies:?}");
        };
        let names: Vec<_> = summaries.iter().map(|summary| summary.name.as_str()).collect();
        assert_eq!(names, ["AGS0", "ATO0", "ALD0", "AVD0", "AVW0", "AFH0"]);
    }

    #[test]
    fn test_decode_before_configuration() {
        let session = session();
        let event = RecognitionEvent {
            grammar_name: "AGS0".to_owned(),
            text: "Delta one two three status".to_owned(),
            confidence: 0.9,
            kind: ResultKind::Recognized,
        };
        assert!(matches!(session.decode(&event), Err(Error::NotConfigured)));
    }

    #[test]
    fn test_transcript_round_trip() {
        let mut session = configured("en-US");
        let replies = session.handle(HostMessage::Transcript(Transcript {
            text: "Delta one two three fly heading zero niner zero".to_owned(),
        }));
        let [ClientMessage::Result(result)] = replies.as_slice() else {
            panic!("expected a decoded result, got {replies:?}");
        };
        assert_eq!(result.kind, ResultKind::Recognized);
        assert_eq!(result.grammar, Category::FlyHeading);
        assert_eq!(result.aircraft, "DLT 123");
        assert_eq!(result.heading, "090");
    }

    #[test]
    fn test_stopped_engine_ignores_events() {
        let mut session = configured("en-US");
        let replies = session.handle(HostMessage::RunningState(RunningState { is_running: false }));
        assert_eq!(
            replies,
            [ClientMessage::RunningState(RunningState { is_running: false })]
        );
        assert!(!session.is_running());
        let replies = session.handle(HostMessage::Transcript(Transcript {
            text: "Delta one two three status".to_owned(),
        }));
        assert!(replies.is_empty());
    }

    #[test]
    fn test_unsupported_language_keeps_locale() {
        let mut session = configured("en-US");
        let before = session.snapshot().unwrap();
        let replies = session.handle(HostMessage::EngineLanguage(EngineLanguage {
            language: "fr-FR".to_owned(),
        }));
        let [ClientMessage::LanguageInitResult(result)] = replies.as_slice() else {
            panic!("expected a language result, got {replies:?}");
        };
        assert!(!result.is_success);
        assert_eq!(session.locale(), "en-US");
        assert!(Arc::ptr_eq(&before, &session.snapshot().unwrap()));
    }

    #[test]
    fn test_language_change_recompiles() {
        let mut session = configured("en-US");
        session.handle(HostMessage::GrammarSource(
            test_utils::mandarin_source(&[]).unwrap(),
        ));
        session.handle(HostMessage::Rules(test_utils::mandarin_rules()));
        let replies = session.handle(HostMessage::EngineLanguage(EngineLanguage {
            language: "zh-cn".to_owned(),
        }));
        assert_eq!(replies.len(), 2);
        assert!(matches!(replies[1], ClientMessage::CompiledGrammars(_)));
        assert_eq!(session.locale(), "zh-CN");

        let result = session.decode_transcript("国航幺两三 航向洞九洞").unwrap();
        assert_eq!(result.grammar, Category::FlyHeading);
        assert_eq!(result.aircraft, "CCA 123");
        assert_eq!(result.heading, "090");
    }

    #[test]
    fn test_failed_reconfiguration_keeps_previous_snapshot() {
        let mut session = configured("en-US");
        let before = session.snapshot().unwrap();
        let mut english = Lexicon::english();
        english.directions.clear();
        let mut catalogue = LexiconCatalogue::default();
        english.locale = "en-XX".to_owned();
        catalogue.register(english).unwrap();
        session.catalogue = catalogue;

        let source = test_utils::grammar_source(&["27L"]).unwrap();
        let result = session.reconfigure(source, test_utils::sample_rules(), "en-XX");
        assert!(matches!(result, Err(Error::UnspellableRunway { .. })));
        assert!(Arc::ptr_eq(&before, &session.snapshot().unwrap()));
        assert_eq!(session.locale(), "en-US");
    }

    fn without_sides() -> VoiceControlSession {
        let mut english = Lexicon::english();
        english.locale = "en-XX".to_owned();
        english.directions.clear();
        let config = VoiceControlConfig {
            lexicons: vec![english],
            ..Default::default()
        };
        VoiceControlSession::new(config).unwrap()
    }

    #[test]
    fn test_failed_language_change_keeps_locale() {
        let mut session = without_sides();
        session
            .reconfigure(
                test_utils::grammar_source(&["27L"]).unwrap(),
                test_utils::sample_rules(),
                "en-US",
            )
            .unwrap();
        let before = session.snapshot().unwrap();

        let replies = session.handle(HostMessage::EngineLanguage(EngineLanguage {
            language: "en-XX".to_owned(),
        }));
        let [ClientMessage::LanguageInitResult(result)] = replies.as_slice() else {
            panic!("expected a single language result, got {replies:?}");
        };
        assert!(!result.is_success);
        assert!(result.error_message.contains("27L"), "{}", result.error_message);
        assert_eq!(session.locale(), "en-US");
        assert_eq!(session.snapshot().unwrap().lexicon.locale, "en-US");
        assert!(Arc::ptr_eq(&before, &session.snapshot().unwrap()));

        let result = session
            .decode_transcript("Delta one two three runway two seven left cleared for takeoff")
            .unwrap();
        assert_eq!(result.runway, "27L");
    }

    #[test]
    fn test_rejected_source_is_not_kept() {
        let mut session = without_sides();
        session
            .reconfigure(
                test_utils::grammar_source(&[]).unwrap(),
                test_utils::sample_rules(),
                "en-XX",
            )
            .unwrap();

        let replies = session.handle(HostMessage::GrammarSource(
            test_utils::grammar_source(&["27L"]).unwrap(),
        ));
        assert!(matches!(replies.as_slice(), [ClientMessage::ConfigurationError(_)]));
        assert!(session.snapshot().unwrap().source.runways().is_empty());

        let replies = session.handle(HostMessage::Rules(test_utils::sample_rules()));
        assert!(
            matches!(replies.as_slice(), [ClientMessage::CompiledGrammars(_)]),
            "rules after a rejected source must rebuild from the last good one: {replies:?}"
        );
    }

    #[test]
    fn test_language_change_before_configuration() {
        let mut session = session();
        let replies = session.handle(HostMessage::EngineLanguage(EngineLanguage {
            language: "ZH-cn".to_owned(),
        }));
        assert_eq!(replies.len(), 1);
        assert_eq!(session.locale(), "zh-CN");
        assert!(session.snapshot().is_none());
    }

    #[test]
    fn test_reconfigure_rejects_unknown_locale() {
        let mut session = session();
        let result = session.reconfigure(
            test_utils::grammar_source(&[]).unwrap(),
            test_utils::sample_rules(),
            "fr-FR",
        );
        assert!(matches!(result, Err(Error::UnsupportedLocale(_))));
        assert!(session.snapshot().is_none());
    }
}
