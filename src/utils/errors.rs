use thiserror::Error;

#[derive(Error, Debug)]
pub enum BotError {
    #[error("Unknown attraction field: {0}")]
    UnknownField(String),

    #[error("CSV header does not match the attraction template")]
    MalformedHeader,

    #[error("Malformed JSON: {0}")]
    MalformedJson(#[from] serde_json::Error),

    #[error("Document contains no attraction list")]
    EmptyDocument,

    #[error("File is not valid UTF-8: {0}")]
    InvalidEncoding(#[from] std::str::Utf8Error),

    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Unrecognized command: {0}")]
    UnrecognizedCommand(String),

    #[error("Transport failure: {0}")]
    TransportFailure(String),

    #[error("Channel closed unexpectedly")]
    ChannelClosed,

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl BotError {
    /// Decode outcomes that mean "the file had no usable data" rather than
    /// "the file could not be read". The session keeps its upload format so the
    /// user can send another file of the same kind.
    pub fn keeps_upload_format(&self) -> bool {
        matches!(self, BotError::MalformedHeader | BotError::EmptyDocument)
    }
}

pub type Result<T> = std::result::Result<T, BotError>;
