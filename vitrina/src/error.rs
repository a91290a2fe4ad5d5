use thiserror::Error;

/// Errors raised by typed parsing of wire tokens. The query codec never
/// surfaces these to callers; a token that fails to parse degrades to an
/// absent constraint.
#[derive(Debug, Error, PartialEq)]
pub enum ParseError {
    #[error("empty range token")]
    EmptyRange,
    #[error("range token {0:?} has no parsable bound")]
    NoBounds(String),
}
