//! Error types, one enum per failure domain. All of them are recoverable:
//! nothing here ever tears down the event feed or the terminal.

use thiserror::Error;

/// Failure while decoding a frame from the event stream. The frame is
/// discarded and the stream keeps running.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("payload is not valid JSON: {0}")]
    NotJson(#[from] serde_json::Error),

    #[error("payload is missing required field `{0}`")]
    MissingField(&'static str),

    #[error("payload has unexpected shape at `{0}`")]
    BadShape(&'static str),
}

/// A trade summary that does not match the `suit,price,buyer,seller` wire
/// format. The trade is dropped without touching any mirror.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TradeParseError {
    #[error("expected 4 comma-separated fields, got {0}")]
    FieldCount(usize),

    #[error("unknown suit `{0}`")]
    UnknownSuit(String),

    #[error("price `{0}` is not an integer")]
    BadPrice(String),
}

/// Failure of a request/response call to the exchange.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("response is not valid JSON: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("{0}")]
    Rejected(String),
}

/// A trading command refused before or while contacting the exchange.
/// `NoActiveRound`, `BadPrice` and `Unrecognized` are raised locally and
/// never reach the network.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("no active round")]
    NoActiveRound,

    #[error("price `{0}` is not a non-negative whole number")]
    BadPrice(String),

    #[error("unknown suit `{0}`")]
    UnknownSuit(String),

    #[error("unrecognized command `{0}`, try `help`")]
    Unrecognized(String),

    #[error(transparent)]
    Api(#[from] ApiError),
}
