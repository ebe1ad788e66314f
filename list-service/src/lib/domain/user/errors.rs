use thiserror::Error;

/// Error for UserId parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum UserIdError {
    #[error("Invalid UUID format: {0}")]
    InvalidFormat(String),
}

/// Error for EmailAddress validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EmailError {
    #[error("Please provide a valid email")]
    InvalidFormat(String),
}

/// Error for DisplayName validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DisplayNameError {
    #[error("Name cannot be empty")]
    Empty,

    #[error("Name cannot exceed {max} characters")]
    TooLong { max: usize, actual: usize },
}

/// Error for plaintext password policy failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PasswordPolicyError {
    #[error("Password must be at least {min} characters")]
    TooShort { min: usize, actual: usize },
}

/// Error for stored enum values that do not parse
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum UserRoleError {
    #[error("Unknown user role: {0}")]
    Unknown(String),
}

/// Top-level error for all user-related operations
#[derive(Debug, Clone, Error)]
pub enum UserError {
    #[error("Invalid user ID: {0}")]
    InvalidUserId(#[from] UserIdError),

    #[error("{0}")]
    InvalidEmail(#[from] EmailError),

    #[error("{0}")]
    InvalidDisplayName(#[from] DisplayNameError),

    #[error("{0}")]
    InvalidPassword(#[from] PasswordPolicyError),

    #[error("{0}")]
    InvalidRole(#[from] UserRoleError),

    #[error("User not found: {0}")]
    NotFound(String),

    #[error("User already exists with this email")]
    EmailAlreadyExists(String),

    #[error("Email already in use")]
    EmailInUse(String),

    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Current password is incorrect")]
    IncorrectPassword,

    #[error("Password hashing failed: {0}")]
    PasswordHashing(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Unknown error: {0}")]
    Unknown(String),
}
