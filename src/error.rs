use thiserror::Error;

#[derive(Error, Debug)]
pub enum HopperError {
    #[error("Player name is blank")]
    BlankName,
    #[error("No finished run to submit")]
    NoFinishedRun,
    #[error("This run is already on the ranking")]
    AlreadySubmitted,
    #[error("Invalid tuning: {0}")]
    InvalidTuning(String),
    #[error("Storage unavailable: {0}")]
    StorageUnavailable(String),
    #[error("Storage I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
    #[error("Malformed record: {source}")]
    Json {
        #[from]
        source: serde_json::Error,
    },
}

pub type Result<T> = std::result::Result<T, HopperError>;
