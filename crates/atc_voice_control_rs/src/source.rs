use std::collections::HashSet;

use aviation_helper_rs::{clearance::airlines::Airlines, types::runway::RunwayId};
use serde::{Deserialize, Serialize};

use crate::errors::Error;

/// The live vocabulary grammars are built from. The host always sends the
/// whole source; it is replaced, never patched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "WireGrammarSource", into = "WireGrammarSource")]
pub struct GrammarSource {
    airlines: Airlines,
    named_waypoints: Vec<String>,
    runways: Vec<RunwayId>,
}

impl GrammarSource {
    pub fn new(
        airlines: Airlines,
        named_waypoints: Vec<String>,
        runways: Vec<RunwayId>,
    ) -> Result<Self, Error> {
        ensure_unique("waypoint", named_waypoints.iter().map(String::as_str))?;
        let runway_names: Vec<String> = runways.iter().map(ToString::to_string).collect();
        ensure_unique("runway", runway_names.iter().map(String::as_str))?;
        Ok(Self {
            airlines,
            named_waypoints,
            runways,
        })
    }

    pub fn airlines(&self) -> &Airlines {
        &self.airlines
    }

    pub fn named_waypoints(&self) -> &[String] {
        &self.named_waypoints
    }

    /// Explicit runway identifiers. Empty means runways are spoken freely.
    pub fn runways(&self) -> &[RunwayId] {
        &self.runways
    }
}

fn ensure_unique<'a>(what: &str, values: impl Iterator<Item = &'a str>) -> Result<(), Error> {
    let mut seen = HashSet::new();
    for value in values {
        if !seen.insert(value) {
            return Err(Error::DuplicateEntry(format!("{what} {value}")));
        }
    }
    Ok(())
}

/// Index-aligned lists as they travel over the wire.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct WireGrammarSource {
    pub airlines: Vec<String>,
    pub airline_codes: Vec<String>,
    pub named_waypoints: Vec<String>,
    pub runways: Vec<String>,
}

impl TryFrom<WireGrammarSource> for GrammarSource {
    type Error = Error;

    fn try_from(wire: WireGrammarSource) -> Result<Self, Self::Error> {
        let airlines = Airlines::from_parallel(wire.airlines, wire.airline_codes)?;
        let runways = wire
            .runways
            .iter()
            .map(|runway| runway.parse())
            .collect::<Result<Vec<RunwayId>, _>>()?;
        GrammarSource::new(airlines, wire.named_waypoints, runways)
    }
}

impl From<GrammarSource> for WireGrammarSource {
    fn from(source: GrammarSource) -> Self {
        Self {
            airlines: source.airlines.names().map(str::to_owned).collect(),
            airline_codes: source.airlines.codes().map(str::to_owned).collect(),
            named_waypoints: source.named_waypoints,
            runways: source.runways.iter().map(ToString::to_string).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_host_source() {
        let source: GrammarSource = serde_json::from_str(
            r#"{
                "Airlines": ["Delta", "United"],
                "AirlineCodes": ["DLT", "UAL"],
                "NamedWaypoints": ["Tokyo", "Osaka"],
                "Runways": ["09", "27L"]
            }"#,
        )
        .unwrap();
        assert_eq!(source.airlines().code_for("united"), Some("UAL"));
        assert_eq!(source.named_waypoints(), ["Tokyo", "Osaka"]);
        assert_eq!(source.runways()[1].to_string(), "27L");
    }

    #[test]
    fn test_runways_are_optional() {
        let source: GrammarSource = serde_json::from_str(
            r#"{"Airlines": ["Delta"], "AirlineCodes": ["DLT"], "NamedWaypoints": []}"#,
        )
        .unwrap();
        assert!(source.runways().is_empty());
    }

    #[test]
    fn test_mismatched_airline_codes_rejected() {
        let result: Result<GrammarSource, _> = serde_json::from_str(
            r#"{"Airlines": ["Delta", "United"], "AirlineCodes": ["DLT"]}"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_duplicates_rejected() {
        let duplicate_waypoint = GrammarSource::new(
            Airlines::default(),
            vec!["Tokyo".to_owned(), "Tokyo".to_owned()],
            Vec::new(),
        );
        assert!(matches!(duplicate_waypoint, Err(Error::DuplicateEntry(_))));

        let duplicate_runway = GrammarSource::new(
            Airlines::default(),
            Vec::new(),
            vec!["27L".parse().unwrap(), "27l".parse().unwrap()],
        );
        assert!(matches!(duplicate_runway, Err(Error::DuplicateEntry(_))));
    }

    #[test]
    fn test_serialize_back_to_wire_format() {
        let source = GrammarSource::new(
            Airlines::from_parallel(vec!["Delta".to_owned()], vec!["DLT".to_owned()]).unwrap(),
            vec!["Tokyo".to_owned()],
            vec!["09".parse().unwrap()],
        )
        .unwrap();
        let json = serde_json::to_value(&source).unwrap();
        assert_eq!(json["AirlineCodes"][0], "DLT");
        assert_eq!(json["Runways"][0], "09");
    }
}
