use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, EnumIter};

use crate::errors::Error;

/// Parallel runway designator letter.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, EnumIter, AsRefStr, Deserialize, Serialize)]
pub enum RunwaySide {
    #[strum(serialize = "L")]
    Left,
    #[strum(serialize = "C")]
    Center,
    #[strum(serialize = "R")]
    Right,
}

impl RunwaySide {
    pub fn letter(&self) -> char {
        match self {
            RunwaySide::Left => 'L',
            RunwaySide::Center => 'C',
            RunwaySide::Right => 'R',
        }
    }

    pub fn from_letter(letter: char) -> Option<Self> {
        match letter.to_ascii_uppercase() {
            'L' => Some(RunwaySide::Left),
            'C' => Some(RunwaySide::Center),
            'R' => Some(RunwaySide::Right),
            _ => None,
        }
    }
}

/// A runway identifier such as `09`, `27L` or `4R`.
///
/// The number keeps the digits exactly as configured, so `09` and `9` are two
/// different identifiers: the game spells whatever it was given.
#[derive(Debug, Clone, Hash, PartialEq, Eq, Deserialize, Serialize)]
#[serde(try_from = "String", into = "String")]
pub struct RunwayId {
    number: String,
    side: Option<RunwaySide>,
}

impl RunwayId {
    pub fn number(&self) -> &str {
        &self.number
    }

    pub fn side(&self) -> Option<RunwaySide> {
        self.side
    }

    /// Digits first, then the designator letter if any.
    pub fn chars(&self) -> impl Iterator<Item = char> + '_ {
        self.number.chars().chain(self.side.map(|side| side.letter()))
    }
}

impl FromStr for RunwayId {
    type Err = Error;

    fn from_str(val: &str) -> Result<Self, Self::Err> {
        let trimmed = val.trim();
        let digit_count = trimmed.chars().take_while(|c| c.is_ascii_digit()).count();
        if !(1..=2).contains(&digit_count) {
            return Err(Error::InvalidRunway(val.to_owned()));
        }
        let (number, rest) = trimmed.split_at(digit_count);
        let mut rest = rest.chars();
        let side = match (rest.next(), rest.next()) {
            (None, _) => None,
            (Some(letter), None) => Some(
                RunwaySide::from_letter(letter)
                    .ok_or_else(|| Error::InvalidRunway(val.to_owned()))?,
            ),
            _ => return Err(Error::InvalidRunway(val.to_owned())),
        };
        Ok(Self {
            number: number.to_owned(),
            side,
        })
    }
}

impl TryFrom<String> for RunwayId {
    type Error = Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<RunwayId> for String {
    fn from(value: RunwayId) -> Self {
        value.to_string()
    }
}

impl Display for RunwayId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.number)?;
        if let Some(side) = self.side {
            write!(f, "{}", side.letter())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_runway_identifiers() {
        let runway: RunwayId = "09".parse().unwrap();
        assert_eq!(runway.number(), "09");
        assert_eq!(runway.side(), None);

        let runway: RunwayId = "27l".parse().unwrap();
        assert_eq!(runway.number(), "27");
        assert_eq!(runway.side(), Some(RunwaySide::Left));
        assert_eq!(runway.to_string(), "27L");

        let runway: RunwayId = "4R".parse().unwrap();
        assert_eq!(runway.chars().collect::<String>(), "4R");
    }

    #[test]
    fn test_reject_malformed_runways() {
        for raw in ["", "L", "123", "27X", "27LR", "two seven"] {
            assert!(raw.parse::<RunwayId>().is_err(), "{raw} should be rejected");
        }
    }

    #[test]
    fn test_side_letters_round_trip() {
        use strum::IntoEnumIterator;
        for side in RunwaySide::iter() {
            assert_eq!(RunwaySide::from_letter(side.letter()), Some(side));
            assert_eq!(side.as_ref().chars().next(), Some(side.letter()));
        }
    }
}
