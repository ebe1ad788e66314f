use thiserror::Error;

use crate::domain::access::errors::AccessError;
use crate::domain::access::models::ResourceRef;
use crate::domain::list::models::ListId;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ListIdError {
    #[error("Invalid UUID format: {0}")]
    InvalidFormat(String),
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ListNameError {
    #[error("List name is required")]
    Empty,

    #[error("List name cannot exceed {max} characters")]
    TooLong { max: usize, actual: usize },
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum HexColorError {
    #[error("Please provide a valid hex color")]
    InvalidFormat(String),
}

#[derive(Debug, Clone, Error, PartialEq)]
pub enum BudgetError {
    #[error("Budget must be a positive number")]
    Negative(f64),

    #[error("Budget must be a positive number")]
    NotFinite,
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CurrencyError {
    #[error("Unsupported currency: {0}")]
    Unsupported(String),
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ShareRoleError {
    #[error("Unknown share role: {0}")]
    Unknown(String),
}

/// Top-level error for all list operations
#[derive(Debug, Clone, Error)]
pub enum ListError {
    #[error("Invalid list ID: {0}")]
    InvalidListId(#[from] ListIdError),

    #[error("{0}")]
    InvalidName(#[from] ListNameError),

    #[error("{0}")]
    InvalidColor(#[from] HexColorError),

    #[error("{0}")]
    InvalidBudget(#[from] BudgetError),

    #[error("{0}")]
    InvalidCurrency(#[from] CurrencyError),

    #[error("{0}")]
    InvalidShareRole(#[from] ShareRoleError),

    #[error("List not found")]
    NotFound(ListId),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl From<AccessError> for ListError {
    fn from(err: AccessError) -> Self {
        match err {
            AccessError::NotFound(ResourceRef::List(id)) => ListError::NotFound(id),
            AccessError::NotFound(other) => {
                ListError::Unknown(format!("Unexpected resource in list scope: {}", other))
            }
            AccessError::Incomplete { requested, found } => ListError::Unknown(format!(
                "Bulk check in list scope resolved {} of {}",
                found, requested
            )),
            AccessError::Storage(msg) => ListError::DatabaseError(msg),
        }
    }
}
