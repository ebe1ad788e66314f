use thiserror::Error;

use crate::domain::access::errors::AccessError;
use crate::domain::access::models::ResourceRef;
use crate::domain::item::models::ItemId;
use crate::domain::list::models::ListId;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ItemIdError {
    #[error("Invalid UUID format: {0}")]
    InvalidFormat(String),
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ItemNameError {
    #[error("Item name is required")]
    Empty,

    #[error("Item name cannot exceed {max} characters")]
    TooLong { max: usize, actual: usize },
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ItemNotesError {
    #[error("Notes cannot exceed {max} characters")]
    TooLong { max: usize, actual: usize },
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ReorderError {
    #[error("Items array is required")]
    Empty,

    #[error("Item {0} appears more than once")]
    DuplicateItem(ItemId),
}

/// Top-level error for all item operations
#[derive(Debug, Clone, Error)]
pub enum ItemError {
    #[error("Invalid item ID: {0}")]
    InvalidItemId(#[from] ItemIdError),

    #[error("{0}")]
    InvalidName(#[from] ItemNameError),

    #[error("{0}")]
    InvalidNotes(#[from] ItemNotesError),

    #[error("{0}")]
    InvalidReorder(#[from] ReorderError),

    #[error("Item not found")]
    NotFound(ItemId),

    #[error("List not found")]
    ListNotFound(ListId),

    #[error("One or more items not found")]
    ItemsNotFound,

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl From<AccessError> for ItemError {
    fn from(err: AccessError) -> Self {
        match err {
            AccessError::NotFound(ResourceRef::Item(id)) => ItemError::NotFound(id),
            AccessError::NotFound(ResourceRef::List(id)) => ItemError::ListNotFound(id),
            AccessError::Incomplete { .. } => ItemError::ItemsNotFound,
            AccessError::Storage(msg) => ItemError::DatabaseError(msg),
        }
    }
}
