use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClientError {
    /// The request never produced a response.
    #[error("transport error: {0}")]
    Transport(String),
    /// A response arrived but its body could not be decoded.
    #[error("malformed response: {0}")]
    Decode(String),
    #[error("invalid board: {0}")]
    InvalidBoard(String),
    #[error("position ({row}, {col}) is off the board")]
    OffBoard { row: usize, col: usize },
    #[error("invalid configuration: {0}")]
    Config(String),
}
