use serde::Deserialize;

use crate::{
    errors::Error,
    lexicon::{Lexicon, LexiconCatalogue},
};

const DEFAULT_CONFIG_PATH: &str = concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/resources/config/voice_control.ron"
);

/// Tunables shared by the grammar builder and the phrase decoder.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct VoiceControlConfig {
    /// Digit words after the airline name in the aircraft grammar.
    pub flight_number_digits: usize,
    /// Longest flight number the decoder accepts.
    pub flight_number_max_digits: usize,
    /// Extra locales registered on top of the built-in ones.
    pub lexicons: Vec<Lexicon>,
}

impl Default for VoiceControlConfig {
    fn default() -> Self {
        Self {
            flight_number_digits: 3,
            flight_number_max_digits: 4,
            lexicons: Vec::new(),
        }
    }
}

impl VoiceControlConfig {
    /// Load the configuration from a RON file
    pub fn load_from_file<P: AsRef<std::path::Path>>(path: P) -> Result<Self, Error> {
        let contents = std::fs::read_to_string(path)?;
        let config: VoiceControlConfig = ron::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Load the configuration shipped with the crate
    pub fn load_default() -> Result<Self, Error> {
        Self::load_from_file(DEFAULT_CONFIG_PATH)
    }

    pub fn validate(&self) -> Result<(), Error> {
        if self.flight_number_digits == 0 {
            return Err(Error::InvalidConfig(
                "flight_number_digits must be at least 1".to_owned(),
            ));
        }
        if self.flight_number_max_digits < self.flight_number_digits {
            return Err(Error::InvalidConfig(format!(
                "flight_number_max_digits ({}) is below flight_number_digits ({})",
                self.flight_number_max_digits, self.flight_number_digits
            )));
        }
        Ok(())
    }

    /// Digit-run bounds the decoder uses for flight numbers.
    pub fn flight_number_range(&self) -> std::ops::RangeInclusive<usize> {
        self.flight_number_digits..=self.flight_number_max_digits
    }

    /// Built-in locales plus the configured ones.
    pub fn catalogue(&self) -> Result<LexiconCatalogue, Error> {
        let mut catalogue = LexiconCatalogue::default();
        for lexicon in &self.lexicons {
            catalogue.register(lexicon.clone())?;
        }
        Ok(catalogue)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_default_config() {
        let config = VoiceControlConfig::load_default().unwrap();
        assert_eq!(config.flight_number_digits, 3);
        assert_eq!(config.flight_number_range(), 3..=4);
        let catalogue = config.catalogue().unwrap();
        assert!(catalogue.get("en-US").is_ok());
        assert!(catalogue.get("zh-CN").is_ok());
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: VoiceControlConfig = ron::from_str("(flight_number_digits: 4)").unwrap();
        assert_eq!(config.flight_number_digits, 4);
        assert_eq!(config.flight_number_max_digits, 4);
        config.validate().unwrap();
    }

    #[test]
    fn test_reject_inverted_bounds() {
        let config = VoiceControlConfig {
            flight_number_digits: 4,
            flight_number_max_digits: 3,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(Error::InvalidConfig(_))));
    }

    #[test]
    fn test_configured_lexicon_is_registered() {
        let config: VoiceControlConfig = ron::from_str(
            r#"(
                lexicons: [(
                    locale: "en-GB",
                    script: Spaced,
                    digits: [
                        (word: "nought", value: 0), (word: "one", value: 1),
                        (word: "two", value: 2), (word: "three", value: 3),
                        (word: "four", value: 4), (word: "five", value: 5),
                        (word: "six", value: 6), (word: "seven", value: 7),
                        (word: "eight", value: 8), (word: "nine", value: 9),
                    ],
                    phonetic: [(spoken: "alpha", code: "A")],
                    directions: [(spoken: "left", code: "L"), (spoken: "right", code: "R")],
                    runway_keyword: "Runway",
                    waypoint_marker: "waypoint",
                )],
            )"#,
        )
        .unwrap();
        let catalogue = config.catalogue().unwrap();
        assert_eq!(catalogue.get("en-gb").unwrap().canonical_digit(0), Some("nought"));
    }
}
