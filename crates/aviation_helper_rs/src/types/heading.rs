use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::errors::Error;

/// A cleared magnetic heading as read back digit by digit ("zero niner zero").
///
/// North is spoken as "three six zero"; "zero zero zero" is accepted and
/// normalized to 360 as well.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize, Serialize)]
#[serde(try_from = "String", into = "String")]
pub struct Heading(u16);

impl Heading {
    pub fn new(degrees: u16) -> Result<Self, Error> {
        match degrees {
            0 => Ok(Heading(360)),
            1..=360 => Ok(Heading(degrees)),
            _ => Err(Error::InvalidHeading(degrees.to_string())),
        }
    }

    pub fn degrees(&self) -> u16 {
        self.0
    }
}

impl FromStr for Heading {
    type Err = Error;

    /// Parses exactly three ascii digits, the form the phrase decoder produces.
    fn from_str(val: &str) -> Result<Self, Self::Err> {
        if val.len() != 3 || !val.bytes().all(|b| b.is_ascii_digit()) {
            return Err(Error::InvalidHeading(val.to_owned()));
        }
        let degrees: u16 = val
            .parse()
            .map_err(|_| Error::InvalidHeading(val.to_owned()))?;
        Heading::new(degrees).map_err(|_| Error::InvalidHeading(val.to_owned()))
    }
}

impl TryFrom<String> for Heading {
    type Error = Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Heading> for String {
    fn from(value: Heading) -> Self {
        value.to_string()
    }
}

impl Display for Heading {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:03}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_three_digit_heading() {
        let heading: Heading = "090".parse().unwrap();
        assert_eq!(heading.degrees(), 90);
        assert_eq!(heading.to_string(), "090");
    }

    #[test]
    fn test_zero_heading_is_north() {
        let heading: Heading = "000".parse().unwrap();
        assert_eq!(heading.degrees(), 360);
        assert_eq!(heading.to_string(), "360");
    }

    #[test]
    fn test_reject_malformed_heading() {
        assert!("90".parse::<Heading>().is_err());
        assert!("370".parse::<Heading>().is_err());
        assert!("0a0".parse::<Heading>().is_err());
        assert!("".parse::<Heading>().is_err());
    }
}
