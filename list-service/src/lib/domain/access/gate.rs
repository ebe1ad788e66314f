use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::access::errors::AccessError;
use crate::domain::access::models::Principal;
use crate::domain::access::models::Resource;
use crate::domain::access::models::ResourceRef;
use crate::domain::access::ports::AuthorizationGate;
use crate::domain::item::models::ItemId;
use crate::domain::item::ports::ItemRepository;
use crate::domain::list::ports::ListRepository;

/// Gate that admits the owner only.
///
/// Shares recorded on a list are not consulted.
pub struct OwnershipGate<LR, IR>
where
    LR: ListRepository,
    IR: ItemRepository,
{
    lists: Arc<LR>,
    items: Arc<IR>,
}

impl<LR, IR> OwnershipGate<LR, IR>
where
    LR: ListRepository,
    IR: ItemRepository,
{
    pub fn new(lists: Arc<LR>, items: Arc<IR>) -> Self {
        Self { lists, items }
    }
}

#[async_trait]
impl<LR, IR> AuthorizationGate for OwnershipGate<LR, IR>
where
    LR: ListRepository,
    IR: ItemRepository,
{
    async fn authorize(
        &self,
        principal: &Principal,
        resource: ResourceRef,
    ) -> Result<Resource, AccessError> {
        let found = match resource {
            ResourceRef::List(id) => self
                .lists
                .find_owned(&id, &principal.user_id)
                .await
                .map_err(|e| AccessError::Storage(e.to_string()))?
                .map(Resource::List),
            ResourceRef::Item(id) => self
                .items
                .find_owned(&id, &principal.user_id)
                .await
                .map_err(|e| AccessError::Storage(e.to_string()))?
                .map(Resource::Item),
        };

        found.ok_or_else(|| {
            tracing::debug!(user_id = %principal.user_id, resource = %resource, "Access denied");
            AccessError::NotFound(resource)
        })
    }

    async fn authorize_items(
        &self,
        principal: &Principal,
        ids: &[ItemId],
    ) -> Result<(), AccessError> {
        let owned = self
            .items
            .find_owned_ids(ids, &principal.user_id)
            .await
            .map_err(|e| AccessError::Storage(e.to_string()))?;

        if owned.len() == ids.len() {
            Ok(())
        } else {
            tracing::debug!(
                user_id = %principal.user_id,
                requested = ids.len(),
                found = owned.len(),
                "Bulk access denied"
            );
            Err(AccessError::Incomplete {
                requested: ids.len(),
                found: owned.len(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::access::ports::AuthorizationGateExt;
    use crate::domain::item::errors::ItemError;
    use crate::domain::item::models::fixtures;
    use crate::domain::list::models::ListId;
    use crate::domain::mocks::list_owned_by;
    use crate::domain::mocks::MockItemRepo;
    use crate::domain::mocks::MockListRepo;
    use crate::domain::user::models::UserId;

    #[tokio::test]
    async fn test_authorize_list_queries_by_id_and_owner() {
        let owner = UserId::new();
        let list = list_owned_by(owner);
        let list_id = list.id;

        let mut lists = MockListRepo::new();
        lists
            .expect_find_owned()
            .withf(move |id, o| *id == list_id && *o == owner)
            .times(1)
            .returning(move |_, _| Ok(Some(list.clone())));

        let gate = OwnershipGate::new(Arc::new(lists), Arc::new(MockItemRepo::new()));

        let resolved = gate
            .authorize_list(&Principal::new(owner), list_id)
            .await
            .unwrap();
        assert_eq!(resolved.id, list_id);
    }

    #[tokio::test]
    async fn test_foreign_and_missing_resources_are_indistinguishable() {
        let mut lists = MockListRepo::new();
        lists.expect_find_owned().returning(|_, _| Ok(None));

        let gate = OwnershipGate::new(Arc::new(lists), Arc::new(MockItemRepo::new()));

        let list_id = ListId::new();
        let stranger = gate
            .authorize(&Principal::new(UserId::new()), ResourceRef::List(list_id))
            .await
            .unwrap_err();
        let other_stranger = gate
            .authorize(&Principal::new(UserId::new()), ResourceRef::List(list_id))
            .await
            .unwrap_err();

        assert_eq!(stranger, AccessError::NotFound(ResourceRef::List(list_id)));
        assert_eq!(stranger, other_stranger);
    }

    #[tokio::test]
    async fn test_authorize_item() {
        let owner = UserId::new();
        let mut item = fixtures::item("Milk", 0, 0);
        item.owner_id = owner;
        let item_id = item.id;

        let mut items = MockItemRepo::new();
        items
            .expect_find_owned()
            .withf(move |id, o| *id == item_id && *o == owner)
            .times(1)
            .returning(move |_, _| Ok(Some(item.clone())));

        let gate = OwnershipGate::new(Arc::new(MockListRepo::new()), Arc::new(items));

        let resolved = gate
            .authorize_item(&Principal::new(owner), item_id)
            .await
            .unwrap();
        assert_eq!(resolved.name.as_str(), "Milk");
    }

    #[tokio::test]
    async fn test_storage_failure_is_not_reported_as_not_found() {
        let mut items = MockItemRepo::new();
        items
            .expect_find_owned()
            .returning(|_, _| Err(ItemError::DatabaseError("connection reset".to_string())));

        let gate = OwnershipGate::new(Arc::new(MockListRepo::new()), Arc::new(items));

        let err = gate
            .authorize(&Principal::new(UserId::new()), ResourceRef::Item(ItemId::new()))
            .await
            .unwrap_err();
        assert!(matches!(err, AccessError::Storage(_)));
    }

    #[tokio::test]
    async fn test_authorize_items_requires_every_id() {
        let owner = UserId::new();
        let ids = vec![ItemId::new(), ItemId::new(), ItemId::new()];
        let known = ids[..2].to_vec();

        let mut items = MockItemRepo::new();
        items
            .expect_find_owned_ids()
            .times(1)
            .returning(move |_, _| Ok(known.clone()));

        let gate = OwnershipGate::new(Arc::new(MockListRepo::new()), Arc::new(items));

        let err = gate
            .authorize_items(&Principal::new(owner), &ids)
            .await
            .unwrap_err();
        assert_eq!(
            err,
            AccessError::Incomplete {
                requested: 3,
                found: 2
            }
        );
    }
}
