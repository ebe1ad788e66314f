//! Authentication utilities library
//!
//! Provides the session infrastructure used by the list service:
//! - Password hashing (Argon2id)
//! - JWT access and refresh tokens signed with separate secrets
//! - Authentication coordination
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! assert!(hasher.verify("my_password", &hash).unwrap());
//! ```
//!
//! ## Complete Authentication Flow
//! ```
//! use auth::Authenticator;
//!
//! let auth = Authenticator::new(
//!     b"access_secret_at_least_32_bytes_long!",
//!     b"refresh_secret_at_least_32_bytes_long",
//! );
//!
//! // Signup: hash password
//! let hash = auth.hash_password("password123").unwrap();
//!
//! // Login: verify and issue tokens
//! let tokens = auth.authenticate("password123", &hash, "user123").unwrap();
//!
//! // Later requests: validate the bearer token
//! let claims = auth.validate_access_token(&tokens.access_token).unwrap();
//! assert_eq!(claims.sub.as_deref(), Some("user123"));
//!
//! // Session renewal: trade the refresh token for a new access token
//! let refresh = auth.validate_refresh_token(&tokens.refresh_token).unwrap();
//! let renewed = auth.issue_access_token(refresh.sub.unwrap()).unwrap();
//! assert!(!renewed.is_empty());
//! ```

pub mod authenticator;
pub mod jwt;
pub mod password;

pub use authenticator::AuthenticationError;
pub use authenticator::Authenticator;
pub use authenticator::TokenPair;
pub use jwt::Claims;
pub use jwt::JwtError;
pub use jwt::JwtHandler;
pub use jwt::TokenKind;
pub use password::PasswordError;
pub use password::PasswordHasher;
