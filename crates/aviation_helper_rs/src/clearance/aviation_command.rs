use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{
    errors::Error,
    types::{heading::Heading, runway::RunwayId},
};

/// Aircraft callsign in scope notation, e.g. `DLT 123`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub struct Callsign {
    pub airline_code: String,
    pub flight_number: String,
}

impl FromStr for Callsign {
    type Err = Error;

    fn from_str(val: &str) -> Result<Self, Self::Err> {
        let mut split = val.split_whitespace();
        match (split.next(), split.next(), split.next()) {
            (Some(airline_code), Some(flight_number), None)
                if flight_number.bytes().all(|b| b.is_ascii_digit()) =>
            {
                Ok(Self {
                    airline_code: airline_code.to_owned(),
                    flight_number: flight_number.to_owned(),
                })
            }
            _ => Err(Error::InvalidCallsign(val.to_owned())),
        }
    }
}

impl Display for Callsign {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.airline_code, self.flight_number)
    }
}

/// Target of a vector clearance. Spelled waypoints read like `A12`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub enum Waypoint {
    Named(String),
    Spelled(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub enum VoiceCommand {
    /// Show the aircraft's route, no clearance issued.
    Status {
        callsign: Callsign,
    },
    Takeoff {
        callsign: Callsign,
        runway: RunwayId,
    },
    Landing {
        callsign: Callsign,
        runway: RunwayId,
    },
    FlyHeading {
        callsign: Callsign,
        heading: Heading,
    },
    VectorToWaypoint {
        callsign: Callsign,
        waypoint: Waypoint,
    },
}

impl VoiceCommand {
    pub fn callsign(&self) -> &Callsign {
        match self {
            VoiceCommand::Status { callsign }
            | VoiceCommand::Takeoff { callsign, .. }
            | VoiceCommand::Landing { callsign, .. }
            | VoiceCommand::FlyHeading { callsign, .. }
            | VoiceCommand::VectorToWaypoint { callsign, .. } => callsign,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_callsign() {
        let callsign: Callsign = "DLT 123".parse().unwrap();
        assert_eq!(callsign.airline_code, "DLT");
        assert_eq!(callsign.flight_number, "123");
        assert_eq!(callsign.to_string(), "DLT 123");
    }

    #[test]
    fn test_reject_malformed_callsign() {
        assert!("DLT".parse::<Callsign>().is_err());
        assert!("DLT 12a".parse::<Callsign>().is_err());
        assert!("DLT 123 456".parse::<Callsign>().is_err());
    }

    #[test]
    fn test_command_exposes_callsign() {
        let command = VoiceCommand::Takeoff {
            callsign: "UAL 4512".parse().unwrap(),
            runway: "27L".parse().unwrap(),
        };
        assert_eq!(command.callsign().flight_number, "4512");
    }
}
