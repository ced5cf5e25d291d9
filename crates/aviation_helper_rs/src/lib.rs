//! Aviation value types shared by the voice control crates.

pub mod errors;

pub mod clearance {
    pub mod airlines;
    pub mod aviation_command;
}

pub mod types {
    pub mod heading;
    pub mod runway;
}
