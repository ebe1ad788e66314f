use thiserror::Error;

use super::claims::TokenKind;

/// Error type for JWT operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum JwtError {
    #[error("Failed to encode token: {0}")]
    EncodingFailed(String),

    #[error("Failed to decode token: {0}")]
    DecodingFailed(String),

    #[error("Token is expired")]
    TokenExpired,

    #[error("Token is not yet valid")]
    TokenNotYetValid,

    #[error("Wrong token kind: expected {expected}")]
    WrongKind { expected: TokenKind },

    #[error("Missing required claim: {0}")]
    MissingClaim(String),
}
