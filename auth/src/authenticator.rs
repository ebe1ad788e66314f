use chrono::Duration;

use crate::jwt::Claims;
use crate::jwt::JwtError;
use crate::jwt::JwtHandler;
use crate::jwt::TokenKind;
use crate::password::PasswordError;
use crate::password::PasswordHasher;

/// Authentication coordinator combining password verification and session tokens.
///
/// Access and refresh tokens are signed with separate secrets, so leaking one
/// key does not let an attacker forge the other kind of token.
pub struct Authenticator {
    password_hasher: PasswordHasher,
    access_tokens: JwtHandler,
    refresh_tokens: JwtHandler,
    access_ttl: Duration,
    refresh_ttl: Duration,
}

/// Access and refresh token issued together at signup or login.
#[derive(Debug, Clone)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

/// Authentication operation errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthenticationError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Password error: {0}")]
    PasswordError(#[from] PasswordError),

    #[error("JWT error: {0}")]
    JwtError(#[from] JwtError),
}

impl Authenticator {
    const DEFAULT_ACCESS_TTL_MINUTES: i64 = 30;
    const DEFAULT_REFRESH_TTL_DAYS: i64 = 7;

    /// Create a new authenticator with default token lifetimes (30 minutes / 7 days).
    ///
    /// # Arguments
    /// * `access_secret` - Secret key for access tokens
    /// * `refresh_secret` - Secret key for refresh tokens
    pub fn new(access_secret: &[u8], refresh_secret: &[u8]) -> Self {
        Self {
            password_hasher: PasswordHasher::new(),
            access_tokens: JwtHandler::new(access_secret),
            refresh_tokens: JwtHandler::new(refresh_secret),
            access_ttl: Duration::minutes(Self::DEFAULT_ACCESS_TTL_MINUTES),
            refresh_ttl: Duration::days(Self::DEFAULT_REFRESH_TTL_DAYS),
        }
    }

    /// Override token lifetimes.
    pub fn with_lifetimes(mut self, access_ttl: Duration, refresh_ttl: Duration) -> Self {
        self.access_ttl = access_ttl;
        self.refresh_ttl = refresh_ttl;
        self
    }

    /// Hash a password for storage.
    ///
    /// # Errors
    /// * `PasswordError` - Hashing operation failed
    pub fn hash_password(&self, password: &str) -> Result<String, PasswordError> {
        self.password_hasher.hash(password)
    }

    /// Check a password against a stored hash without issuing tokens.
    ///
    /// # Errors
    /// * `PasswordError` - Stored hash is malformed or Argon2 failed
    pub fn verify_password(&self, password: &str, stored_hash: &str) -> Result<bool, PasswordError> {
        self.password_hasher.verify(password, stored_hash)
    }

    /// Verify credentials and issue a token pair for `subject`.
    ///
    /// # Errors
    /// * `InvalidCredentials` - Password does not match
    /// * `PasswordError` - Password verification failed
    /// * `JwtError` - Token generation failed
    pub fn authenticate(
        &self,
        password: &str,
        stored_hash: &str,
        subject: impl ToString,
    ) -> Result<TokenPair, AuthenticationError> {
        if !self.password_hasher.verify(password, stored_hash)? {
            return Err(AuthenticationError::InvalidCredentials);
        }

        Ok(self.issue_tokens(subject)?)
    }

    /// Issue a token pair without password verification (e.g. right after signup).
    ///
    /// # Errors
    /// * `JwtError` - Token generation failed
    pub fn issue_tokens(&self, subject: impl ToString) -> Result<TokenPair, JwtError> {
        let subject = subject.to_string();

        Ok(TokenPair {
            access_token: self.issue_access_token(&subject)?,
            refresh_token: self.refresh_tokens.encode(&Claims::for_subject(
                &subject,
                TokenKind::Refresh,
                self.refresh_ttl,
            ))?,
        })
    }

    /// Issue a new access token for `subject`.
    ///
    /// # Errors
    /// * `JwtError` - Token generation failed
    pub fn issue_access_token(&self, subject: impl ToString) -> Result<String, JwtError> {
        self.access_tokens.encode(&Claims::for_subject(
            subject,
            TokenKind::Access,
            self.access_ttl,
        ))
    }

    /// Validate an access token and return its claims.
    ///
    /// # Errors
    /// * `JwtError` - Signature, expiry or token kind check failed
    pub fn validate_access_token(&self, token: &str) -> Result<Claims, JwtError> {
        Self::expect_kind(self.access_tokens.decode(token)?, TokenKind::Access)
    }

    /// Validate a refresh token and return its claims.
    ///
    /// # Errors
    /// * `JwtError` - Signature, expiry or token kind check failed
    pub fn validate_refresh_token(&self, token: &str) -> Result<Claims, JwtError> {
        Self::expect_kind(self.refresh_tokens.decode(token)?, TokenKind::Refresh)
    }

    fn expect_kind(claims: Claims, expected: TokenKind) -> Result<Claims, JwtError> {
        if claims.typ == Some(expected) {
            Ok(claims)
        } else {
            Err(JwtError::WrongKind { expected })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn authenticator() -> Authenticator {
        Authenticator::new(
            b"access_secret_key_at_least_32_bytes!",
            b"refresh_secret_key_at_least_32_bytes",
        )
    }

    #[test]
    fn test_authenticate_success() {
        let authenticator = authenticator();
        let hash = authenticator
            .hash_password("my_password")
            .expect("Failed to hash password");

        let tokens = authenticator
            .authenticate("my_password", &hash, "user123")
            .expect("Authentication failed");

        let access = authenticator
            .validate_access_token(&tokens.access_token)
            .expect("Access token validation failed");
        assert_eq!(access.sub, Some("user123".to_string()));

        let refresh = authenticator
            .validate_refresh_token(&tokens.refresh_token)
            .expect("Refresh token validation failed");
        assert_eq!(refresh.sub, Some("user123".to_string()));
    }

    #[test]
    fn test_authenticate_invalid_password() {
        let authenticator = authenticator();
        let hash = authenticator.hash_password("my_password").unwrap();

        let result = authenticator.authenticate("wrong_password", &hash, "user123");
        assert!(matches!(
            result,
            Err(AuthenticationError::InvalidCredentials)
        ));
    }

    #[test]
    fn test_refresh_token_rejected_as_access_token() {
        let authenticator = authenticator();
        let tokens = authenticator.issue_tokens("user123").unwrap();

        assert!(authenticator
            .validate_access_token(&tokens.refresh_token)
            .is_err());
        assert!(authenticator
            .validate_refresh_token(&tokens.access_token)
            .is_err());
    }

    #[test]
    fn test_wrong_kind_with_shared_secret() {
        let authenticator = Authenticator::new(
            b"shared_secret_key_at_least_32_bytes!",
            b"shared_secret_key_at_least_32_bytes!",
        );
        let tokens = authenticator.issue_tokens("user123").unwrap();

        assert!(matches!(
            authenticator.validate_access_token(&tokens.refresh_token),
            Err(JwtError::WrongKind {
                expected: TokenKind::Access
            })
        ));
    }

    #[test]
    fn test_expired_access_token() {
        let authenticator = authenticator()
            .with_lifetimes(Duration::minutes(-120), Duration::days(7));
        let token = authenticator.issue_access_token("user123").unwrap();

        assert!(matches!(
            authenticator.validate_access_token(&token),
            Err(JwtError::TokenExpired)
        ));
    }

    #[test]
    fn test_validate_invalid_token() {
        let result = authenticator().validate_access_token("invalid.token.here");
        assert!(result.is_err());
    }
}
