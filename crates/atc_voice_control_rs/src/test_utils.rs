//! Test fixtures for grammar sources, rule sets and decoders
//! Available only when testing feature is enabled
use std::path::Path;

use aviation_helper_rs::{
    clearance::airlines::{AirlineEntry, Airlines},
    types::runway::RunwayId,
};

use crate::{
    config::VoiceControlConfig,
    decoder::PhraseDecoder,
    elements::ElementGrammars,
    errors::Error,
    lexicon::LexiconCatalogue,
    rules::{Category, RuleSet},
    source::GrammarSource,
};

fn airline(name: &str, code: &str) -> AirlineEntry {
    AirlineEntry {
        name: name.to_owned(),
        code: code.to_owned(),
    }
}

pub fn airlines() -> Airlines {
    Airlines(vec![
        airline("Delta", "DLT"),
        airline("United", "UAL"),
        airline("Speedbird", "BAW"),
    ])
}

pub fn mandarin_airlines() -> Airlines {
    Airlines(vec![
        airline("国航", "CCA"),
        airline("东航", "CES"),
        airline("南航", "CSN"),
    ])
}

/// English source with three airlines and three named waypoints.
pub fn grammar_source(runways: &[&str]) -> Result<GrammarSource, Error> {
    source(airlines(), &["Tokyo", "Osaka", "New York"], runways)
}

pub fn mandarin_source(runways: &[&str]) -> Result<GrammarSource, Error> {
    source(mandarin_airlines(), &["北京", "上海"], runways)
}

fn source(
    airlines: Airlines,
    waypoints: &[&str],
    runways: &[&str],
) -> Result<GrammarSource, Error> {
    let runways = runways
        .iter()
        .map(|runway| runway.parse::<RunwayId>())
        .collect::<Result<Vec<_>, _>>()?;
    GrammarSource::new(
        airlines,
        waypoints.iter().map(|waypoint| waypoint.to_string()).collect(),
        runways,
    )
}

/// One or two templates per category, plus a few the filter drops.
pub fn sample_rules() -> RuleSet {
    let mut rules = RuleSet::default();
    rules.push(Category::Status, "{Aircraft} <status|say intentions>");
    rules.push(Category::Status, "{Aircraft} {Aircraft} requests taxi");
    rules.push(Category::Takeoff, "{Aircraft} [runway] {Runway} cleared for takeoff");
    rules.push(Category::Takeoff, "{Aircraft} cleared for takeoff");
    rules.push(Category::Landing, "{Aircraft} {Runway} cleared to land");
    rules.push(Category::FlyHeading, "{Aircraft} <fly|turn> heading {Heading}");
    rules.push(Category::VectorToNamedWaypoint, "{Aircraft} proceed direct {WaypointNamed}");
    rules.push(
        Category::VectorToSpelledWaypoint,
        "{Aircraft} proceed to waypoint {WaypointSpelled}",
    );
    rules
}

pub fn mandarin_rules() -> RuleSet {
    let mut rules = RuleSet::default();
    rules.push(Category::Status, "{Aircraft}报告位置");
    rules.push(Category::Takeoff, "{Aircraft}{Runway}可以起飞");
    rules.push(Category::Landing, "{Aircraft}{Runway}可以落地");
    rules.push(Category::FlyHeading, "{Aircraft}[左转]航向{Heading}");
    rules.push(Category::VectorToNamedWaypoint, "{Aircraft}直飞{WaypointNamed}");
    rules.push(Category::VectorToSpelledWaypoint, "{Aircraft}直飞航路点{WaypointSpelled}");
    rules
}

/// Decoder over the built-in lexicon for `locale` and the default config.
pub fn decoder(locale: &str, source: &GrammarSource) -> Result<PhraseDecoder, Error> {
    let config = VoiceControlConfig::default();
    let lexicon = LexiconCatalogue::default().get(locale)?;
    let elements = ElementGrammars::build(&lexicon, source, &config)?;
    PhraseDecoder::new(lexicon, source, &elements, &config)
}

/// Reads a RON fixture relative to the crate's `resources/` directory
pub fn load_fixture<T: serde::de::DeserializeOwned>(
    relative: impl AsRef<Path>,
) -> Result<T, Error> {
    let path = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("resources")
        .join(relative);
    let contents = std::fs::read_to_string(path)?;
    Ok(ron::from_str(&contents)?)
}
