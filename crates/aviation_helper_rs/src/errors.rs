use thiserror::Error;
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("Invalid heading: {}",.0)]
    InvalidHeading(String),
    #[error("Invalid runway identifier: {}",.0)]
    InvalidRunway(String),
    #[error("Invalid callsign: {}",.0)]
    InvalidCallsign(String),
    #[error("Airline names and codes differ in length ({names} names, {codes} codes)")]
    MismatchedAirlineCodes { names: usize, codes: usize },
}
