use thiserror::Error;

/// Represents errors that can occur during parsing.
#[derive(Debug, PartialEq, Eq, Error)]
pub enum ParseError {
    /// A statement started with a token that does not begin any supported statement.
    #[error("unsupported token: expected {expected}, found '{found}'")]
    UnsupportedToken { expected: String, found: String },
    #[error("no tokens to parse")]
    NoTokens,
    #[error("unexpected token: expected {expected}, found '{found}'")]
    UnexpectedToken { expected: String, found: String },
    #[error("limit requires a value")]
    NoLimitValue,
    #[error("limit value out of range: {0}")]
    LimitOutOfRange(String),
    #[error("limit must be greater than zero")]
    ZeroLimit,
    #[error("unexpected end of input")]
    UnexpectedEndOfInput,
    /// The literal does not fit into a 64-bit integer.
    #[error("numeric literal out of range: {0}")]
    NumericLiteralOutOfRange(String),
}
