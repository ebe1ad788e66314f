use async_trait::async_trait;

use crate::domain::access::errors::AccessError;
use crate::domain::access::models::Principal;
use crate::domain::access::models::Resource;
use crate::domain::access::models::ResourceRef;
use crate::domain::item::models::Item;
use crate::domain::item::models::ItemId;
use crate::domain::list::models::List;
use crate::domain::list::models::ListId;

/// Single entry point for owner checks on lists and items.
#[async_trait]
pub trait AuthorizationGate: Send + Sync + 'static {
    /// Resolve `resource` on behalf of `principal`.
    ///
    /// # Errors
    /// * `NotFound` - Resource does not exist or belongs to someone else
    /// * `Storage` - Lookup failed
    async fn authorize(
        &self,
        principal: &Principal,
        resource: ResourceRef,
    ) -> Result<Resource, AccessError>;

    /// Confirm every item in `ids` belongs to `principal` without loading
    /// them.
    ///
    /// # Errors
    /// * `Incomplete` - At least one id is missing or foreign
    /// * `Storage` - Lookup failed
    async fn authorize_items(&self, principal: &Principal, ids: &[ItemId])
        -> Result<(), AccessError>;
}

/// Typed shortcuts over [`AuthorizationGate::authorize`].
#[async_trait]
pub trait AuthorizationGateExt: AuthorizationGate {
    async fn authorize_list(&self, principal: &Principal, id: ListId) -> Result<List, AccessError> {
        match self.authorize(principal, ResourceRef::List(id)).await? {
            Resource::List(list) => Ok(list),
            Resource::Item(_) => Err(AccessError::NotFound(ResourceRef::List(id))),
        }
    }

    async fn authorize_item(&self, principal: &Principal, id: ItemId) -> Result<Item, AccessError> {
        match self.authorize(principal, ResourceRef::Item(id)).await? {
            Resource::Item(item) => Ok(item),
            Resource::List(_) => Err(AccessError::NotFound(ResourceRef::Item(id))),
        }
    }
}

impl<G: AuthorizationGate + ?Sized> AuthorizationGateExt for G {}
