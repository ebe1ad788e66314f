use std::fmt;

use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

/// Which secret a token was signed with and what it may be used for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    /// Short-lived bearer token sent on every API request.
    Access,
    /// Long-lived token kept in an httpOnly cookie, exchanged for new access tokens.
    Refresh,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Access => f.write_str("access"),
            TokenKind::Refresh => f.write_str("refresh"),
        }
    }
}

/// JWT claims carried by session tokens.
///
/// Standard RFC 7519 fields plus a `typ` discriminator so that a refresh
/// token can never be replayed as an access token.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Claims {
    /// Subject (user identifier)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sub: Option<String>,

    /// Expiration time (Unix timestamp)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exp: Option<i64>,

    /// Issued at (Unix timestamp)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub iat: Option<i64>,

    /// Issuer
    #[serde(skip_serializing_if = "Option::is_none")]
    pub iss: Option<String>,

    /// Token kind
    #[serde(skip_serializing_if = "Option::is_none")]
    pub typ: Option<TokenKind>,
}

impl Claims {
    /// Create new empty claims.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create claims for a session token that expires after `ttl`.
    ///
    /// # Arguments
    /// * `subject` - Unique user identifier
    /// * `kind` - Access or refresh
    /// * `ttl` - Lifetime of the token
    ///
    /// # Returns
    /// Claims with sub, exp, iat and typ set
    pub fn for_subject(subject: impl ToString, kind: TokenKind, ttl: Duration) -> Self {
        let now = Utc::now();

        Self {
            sub: Some(subject.to_string()),
            exp: Some((now + ttl).timestamp()),
            iat: Some(now.timestamp()),
            iss: None,
            typ: Some(kind),
        }
    }

    /// Set subject.
    pub fn with_subject(mut self, sub: impl ToString) -> Self {
        self.sub = Some(sub.to_string());
        self
    }

    /// Set expiration (Unix timestamp).
    pub fn with_expiration(mut self, exp: i64) -> Self {
        self.exp = Some(exp);
        self
    }

    /// Set issuer.
    pub fn with_issuer(mut self, iss: impl ToString) -> Self {
        self.iss = Some(iss.to_string());
        self
    }

    /// Set token kind.
    pub fn with_kind(mut self, kind: TokenKind) -> Self {
        self.typ = Some(kind);
        self
    }

    /// Check if token is expired.
    pub fn is_expired(&self, current_timestamp: i64) -> bool {
        self.exp.map_or(false, |exp| exp < current_timestamp)
    }
}
