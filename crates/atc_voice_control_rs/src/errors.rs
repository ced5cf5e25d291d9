use thiserror::Error;
#[derive(Error, Debug)]
pub enum Error {
    #[error("Std Io Error!")]
    StdIo(#[from] std::io::Error),
    #[error("Serde Json (de)serialization failed: {0}")]
    SerdeJson(#[from] serde_json::Error),
    #[error("Ron config could not be parsed: {0}")]
    RonSpanned(#[from] ron::error::SpannedError),
    #[error("Aviation Helper: {0}")]
    AviationHelper(#[from] aviation_helper_rs::errors::Error),
    #[error("Regex could not be built: {0}")]
    Regex(#[from] regex::Error),
    #[error("Unsupported locale: {0}")]
    UnsupportedLocale(String),
    #[error("Invalid lexicon for {locale}: {reason}")]
    InvalidLexicon { locale: String, reason: String },
    #[error("Duplicate entry in grammar source: {0}")]
    DuplicateEntry(String),
    #[error("Runway {runway} cannot be spelled in {locale}: no word for '{character}'")]
    UnspellableRunway {
        runway: String,
        locale: String,
        character: char,
    },
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("Voice control is not configured yet")]
    NotConfigured,
}
