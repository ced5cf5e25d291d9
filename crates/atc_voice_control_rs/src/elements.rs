//! The five reusable sub-grammars templates refer to as `{Aircraft}`,
//! `{Runway}`, `{Heading}`, `{WaypointNamed}` and `{WaypointSpelled}`.

use std::sync::Arc;

use aviation_helper_rs::types::runway::RunwayId;

use crate::{
    config::VoiceControlConfig,
    errors::Error,
    grammar::{ElementGrammar, ElementKind, GrammarRule},
    lexicon::Lexicon,
    source::GrammarSource,
};

/// A configured runway and its canonical spoken form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunwaySpelling {
    pub runway: RunwayId,
    pub spoken: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunwayMode {
    /// Keyword, one or two digits and an optional side.
    Procedural,
    /// Closed choice over the configured runways.
    Explicit(Vec<RunwaySpelling>),
}

/// Element grammars for one (lexicon, source) pair. Built once per
/// configuration and shared by every compiled grammar of that pass.
#[derive(Debug, Clone)]
pub struct ElementGrammars {
    pub aircraft: Arc<ElementGrammar>,
    pub runway: Arc<ElementGrammar>,
    pub heading: Arc<ElementGrammar>,
    pub waypoint_named: Arc<ElementGrammar>,
    pub waypoint_spelled: Arc<ElementGrammar>,
    pub runway_mode: RunwayMode,
}

impl ElementGrammars {
    pub fn build(
        lexicon: &Lexicon,
        source: &GrammarSource,
        config: &VoiceControlConfig,
    ) -> Result<Self, Error> {
        let digit = digit_choice(lexicon);

        if source.airlines().is_empty() {
            log::warn!("No airlines configured, the aircraft grammar cannot match");
        }
        let aircraft = GrammarRule::Sequence(vec![
            GrammarRule::choice_of(source.airlines().names()),
            GrammarRule::repeat(
                digit.clone(),
                config.flight_number_digits,
                config.flight_number_digits,
            ),
        ]);

        let runway_mode = if source.runways().is_empty() {
            RunwayMode::Procedural
        } else {
            let spellings = source
                .runways()
                .iter()
                .map(|runway| {
                    Ok(RunwaySpelling {
                        runway: runway.clone(),
                        spoken: spell_runway(lexicon, runway)?,
                    })
                })
                .collect::<Result<Vec<_>, Error>>()?;
            RunwayMode::Explicit(spellings)
        };
        let runway = match &runway_mode {
            RunwayMode::Procedural => GrammarRule::Sequence(vec![
                GrammarRule::text(lexicon.runway_keyword.as_str()),
                GrammarRule::repeat(digit.clone(), 1, 2),
                GrammarRule::optional(GrammarRule::choice_of(
                    lexicon.directions.iter().map(|d| d.spoken.as_str()),
                )),
            ]),
            RunwayMode::Explicit(spellings) => {
                GrammarRule::choice_of(spellings.iter().map(|s| s.spoken.as_str()))
            }
        };

        let heading = GrammarRule::repeat(digit.clone(), 3, 3);

        if source.named_waypoints().is_empty() {
            log::warn!("No named waypoints configured, the named waypoint grammar cannot match");
        }
        let waypoint_named =
            GrammarRule::choice_of(source.named_waypoints().iter().map(String::as_str));

        let waypoint_spelled = GrammarRule::Sequence(vec![
            GrammarRule::choice_of(lexicon.phonetic.iter().map(|p| p.spoken.as_str())),
            GrammarRule::repeat(digit, 2, 2),
        ]);

        let element = |kind, rule| Arc::new(ElementGrammar { kind, rule });
        Ok(Self {
            aircraft: element(ElementKind::Aircraft, aircraft),
            runway: element(ElementKind::Runway, runway),
            heading: element(ElementKind::Heading, heading),
            waypoint_named: element(ElementKind::WaypointNamed, waypoint_named),
            waypoint_spelled: element(ElementKind::WaypointSpelled, waypoint_spelled),
            runway_mode,
        })
    }

    pub fn get(&self, kind: ElementKind) -> &Arc<ElementGrammar> {
        match kind {
            ElementKind::Aircraft => &self.aircraft,
            ElementKind::Runway => &self.runway,
            ElementKind::Heading => &self.heading,
            ElementKind::WaypointNamed => &self.waypoint_named,
            ElementKind::WaypointSpelled => &self.waypoint_spelled,
        }
    }

    pub fn runway_spellings(&self) -> &[RunwaySpelling] {
        match &self.runway_mode {
            RunwayMode::Procedural => &[],
            RunwayMode::Explicit(spellings) => spellings,
        }
    }
}

/// Every digit word of the locale, aliases included.
fn digit_choice(lexicon: &Lexicon) -> GrammarRule {
    GrammarRule::choice_of(lexicon.digits.iter().map(|digit| digit.word.as_str()))
}

/// Spells a runway with the canonical words of the lexicon:
/// `27L` → `Runway two seven left`.
pub fn spell_runway(lexicon: &Lexicon, runway: &RunwayId) -> Result<String, Error> {
    let unspellable = |character| Error::UnspellableRunway {
        runway: runway.to_string(),
        locale: lexicon.locale.clone(),
        character,
    };
    let mut words = vec![lexicon.runway_keyword.clone()];
    for character in runway.chars() {
        let word = match character.to_digit(10) {
            Some(value) => lexicon.canonical_digit(value as u8),
            None => lexicon.direction_word(character),
        };
        words.push(word.ok_or_else(|| unspellable(character))?.to_owned());
    }
    Ok(lexicon.join(words))
}
