use thiserror::Error;

/// Represents errors that can occur during lexical analysis.
#[derive(Debug, PartialEq, Error)]
pub enum LexError {
    /// Indicates an unexpected character was encountered in the input.
    #[error("unexpected character: '{0}'")]
    UnexpectedCharacter(char),
    /// Indicates a string literal was opened but never closed.
    #[error("unterminated string literal")]
    UnterminatedStringLiteral,
    /// Indicates an operator that is not supported, like a lone `!`.
    #[error("unsupported operator: '{0}'")]
    UnsupportedOperator(char),
}
