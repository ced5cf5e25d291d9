use serde::{Deserialize, Serialize};

use crate::errors::Error;

/// One airline the player can address: the spoken callsign and the code shown
/// on the radar scope.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct AirlineEntry {
    pub name: String,
    pub code: String,
}

/// Ordered airline list. Order matters: decoders that pick "the first airline
/// that matches" walk it front to back.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Airlines(pub Vec<AirlineEntry>);

impl Airlines {
    /// Zips the two index-aligned lists the game sends.
    pub fn from_parallel<N, C>(names: N, codes: C) -> Result<Self, Error>
    where
        N: IntoIterator<Item = String>,
        C: IntoIterator<Item = String>,
    {
        let names: Vec<String> = names.into_iter().collect();
        let codes: Vec<String> = codes.into_iter().collect();
        if names.len() != codes.len() {
            return Err(Error::MismatchedAirlineCodes {
                names: names.len(),
                codes: codes.len(),
            });
        }
        let entries = names
            .into_iter()
            .zip(codes)
            .map(|(name, code)| AirlineEntry { name, code })
            .collect();
        Ok(Self(entries))
    }

    pub fn iter(&self) -> impl Iterator<Item = &AirlineEntry> {
        self.0.iter()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|airline| airline.name.as_str())
    }

    pub fn codes(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|airline| airline.code.as_str())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Case-insensitive lookup of the code for a spoken airline name.
    pub fn code_for(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|airline| airline.name.eq_ignore_ascii_case(name))
            .map(|airline| airline.code.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_from_parallel_keeps_order() {
        let airlines = Airlines::from_parallel(
            strings(&["Delta", "United", "Speedbird"]),
            strings(&["DLT", "UAL", "BAW"]),
        )
        .unwrap();
        assert_eq!(airlines.len(), 3);
        assert_eq!(airlines.names().collect::<Vec<_>>(), ["Delta", "United", "Speedbird"]);
        assert_eq!(airlines.codes().collect::<Vec<_>>(), ["DLT", "UAL", "BAW"]);
        assert_eq!(airlines.code_for("speedbird"), Some("BAW"));
        assert_eq!(airlines.code_for("Lufthansa"), None);
    }

    #[test]
    fn test_from_parallel_rejects_mismatch() {
        let err = Airlines::from_parallel(strings(&["Delta", "United"]), strings(&["DLT"]))
            .unwrap_err();
        assert_eq!(err, Error::MismatchedAirlineCodes { names: 2, codes: 1 });
    }

    #[test]
    fn test_deserialize_entries() {
        let airlines: Airlines =
            serde_json::from_str(r#"[{"name": "国航", "code": "CCA"}]"#).unwrap();
        assert_eq!(airlines.code_for("国航"), Some("CCA"));
    }
}
