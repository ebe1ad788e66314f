use thiserror::Error;

use crate::domain::access::models::ResourceRef;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AccessError {
    /// Missing and foreign resources both end up here.
    #[error("{0} not found")]
    NotFound(ResourceRef),

    /// Bulk check where only `found` of `requested` resources resolved.
    #[error("{found} of {requested} resources found")]
    Incomplete { requested: usize, found: usize },

    #[error("Storage error: {0}")]
    Storage(String),
}
