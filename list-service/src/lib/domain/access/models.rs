use std::fmt;

use crate::domain::item::models::Item;
use crate::domain::item::models::ItemId;
use crate::domain::list::models::List;
use crate::domain::list::models::ListId;
use crate::domain::user::models::UserId;

/// Authenticated identity bound to a single request.
///
/// Produced by the authentication middleware and passed explicitly into every
/// service call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Principal {
    pub user_id: UserId,
}

impl Principal {
    pub fn new(user_id: UserId) -> Self {
        Self { user_id }
    }
}

/// Reference to a resource the principal wants to touch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceRef {
    List(ListId),
    Item(ItemId),
}

impl fmt::Display for ResourceRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResourceRef::List(id) => write!(f, "list {}", id),
            ResourceRef::Item(id) => write!(f, "item {}", id),
        }
    }
}

/// A resource resolved by the gate, already known to belong to the principal.
#[derive(Debug, Clone)]
pub enum Resource {
    List(List),
    Item(Item),
}
