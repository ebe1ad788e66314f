use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::access::models::Principal;
use crate::domain::access::ports::AuthorizationGate;
use crate::domain::access::ports::AuthorizationGateExt;
use crate::domain::item::ports::ItemRepository;
use crate::domain::list::errors::ListError;
use crate::domain::list::models::CreateListCommand;
use crate::domain::list::models::List;
use crate::domain::list::models::ListId;
use crate::domain::list::models::ListWithCounts;
use crate::domain::list::models::UpdateListCommand;
use crate::domain::list::ports::ListRepository;
use crate::domain::list::ports::ListServicePort;

/// Domain service implementation for shopping lists.
pub struct ListService<LR, IR, G>
where
    LR: ListRepository,
    IR: ItemRepository,
    G: AuthorizationGate,
{
    repository: Arc<LR>,
    items: Arc<IR>,
    gate: Arc<G>,
}

impl<LR, IR, G> ListService<LR, IR, G>
where
    LR: ListRepository,
    IR: ItemRepository,
    G: AuthorizationGate,
{
    pub fn new(repository: Arc<LR>, items: Arc<IR>, gate: Arc<G>) -> Self {
        Self {
            repository,
            items,
            gate,
        }
    }

    async fn with_counts(&self, lists: Vec<List>) -> Result<Vec<ListWithCounts>, ListError> {
        let ids: Vec<ListId> = lists.iter().map(|l| l.id).collect();
        let counts = self
            .items
            .count_by_lists(&ids)
            .await
            .map_err(|e| ListError::DatabaseError(e.to_string()))?;

        Ok(lists
            .into_iter()
            .map(|list| ListWithCounts {
                counts: counts.get(&list.id).copied().unwrap_or_default(),
                list,
            })
            .collect())
    }
}

#[async_trait]
impl<LR, IR, G> ListServicePort for ListService<LR, IR, G>
where
    LR: ListRepository,
    IR: ItemRepository,
    G: AuthorizationGate,
{
    async fn list_lists(
        &self,
        principal: &Principal,
        archived: bool,
    ) -> Result<Vec<ListWithCounts>, ListError> {
        let lists = self
            .repository
            .find_by_owner(&principal.user_id, archived)
            .await?;
        self.with_counts(lists).await
    }

    async fn create_list(
        &self,
        principal: &Principal,
        command: CreateListCommand,
    ) -> Result<List, ListError> {
        let now = Utc::now();
        let list = List {
            id: ListId::new(),
            owner_id: principal.user_id,
            name: command.name,
            store: command.store,
            color: command.color,
            budget: command.budget,
            currency: command.currency,
            is_archived: false,
            shared_with: vec![],
            created_at: now,
            updated_at: now,
        };

        let list = self.repository.create(list).await?;
        tracing::info!(list_id = %list.id, user_id = %principal.user_id, "List created");

        Ok(list)
    }

    async fn get_list(
        &self,
        principal: &Principal,
        id: ListId,
    ) -> Result<ListWithCounts, ListError> {
        let list = self.gate.authorize_list(principal, id).await?;
        let mut with_counts = self.with_counts(vec![list]).await?;
        with_counts
            .pop()
            .ok_or_else(|| ListError::Unknown("List vanished while counting items".to_string()))
    }

    async fn update_list(
        &self,
        principal: &Principal,
        id: ListId,
        command: UpdateListCommand,
    ) -> Result<List, ListError> {
        let mut list = self.gate.authorize_list(principal, id).await?;
        command.apply_to(&mut list);
        list.updated_at = Utc::now();

        self.repository.update(list).await
    }

    async fn delete_list(&self, principal: &Principal, id: ListId) -> Result<(), ListError> {
        let list = self.gate.authorize_list(principal, id).await?;
        self.repository.delete_with_items(&list.id).await?;

        tracing::info!(list_id = %list.id, "List and its items deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use crate::domain::access::errors::AccessError;
    use crate::domain::access::models::Resource;
    use crate::domain::access::models::ResourceRef;
    use crate::domain::item::models::ItemCounts;
    use crate::domain::list::models::Currency;
    use crate::domain::list::models::HexColor;
    use crate::domain::list::models::ListName;
    use crate::domain::mocks::list_owned_by;
    use crate::domain::mocks::MockGate;
    use crate::domain::mocks::MockItemRepo;
    use crate::domain::mocks::MockListRepo;
    use crate::domain::user::models::UserId;

    fn service(
        lists: MockListRepo,
        items: MockItemRepo,
        gate: MockGate,
    ) -> ListService<MockListRepo, MockItemRepo, MockGate> {
        ListService::new(Arc::new(lists), Arc::new(items), Arc::new(gate))
    }

    fn gate_resolving(list: List) -> MockGate {
        let mut gate = MockGate::new();
        gate.expect_authorize()
            .returning(move |_, _| Ok(Resource::List(list.clone())));
        gate
    }

    fn gate_denying() -> MockGate {
        let mut gate = MockGate::new();
        gate.expect_authorize()
            .returning(|_, resource| Err(AccessError::NotFound(resource)));
        gate
    }

    #[tokio::test]
    async fn test_create_list_binds_owner() {
        let owner = UserId::new();
        let mut lists = MockListRepo::new();
        lists
            .expect_create()
            .withf(move |list| list.owner_id == owner && !list.is_archived)
            .times(1)
            .returning(|list| Ok(list));

        let service = service(lists, MockItemRepo::new(), MockGate::new());

        let list = service
            .create_list(
                &Principal::new(owner),
                CreateListCommand {
                    name: ListName::new("Party".to_string()).unwrap(),
                    store: "Costco".to_string(),
                    color: HexColor::default(),
                    budget: None,
                    currency: Currency::Eur,
                },
            )
            .await
            .unwrap();

        assert_eq!(list.name.as_str(), "Party");
        assert_eq!(list.currency, Currency::Eur);
    }

    #[tokio::test]
    async fn test_list_lists_attaches_derived_counts() {
        let owner = UserId::new();
        let busy = list_owned_by(owner);
        let empty = list_owned_by(owner);
        let busy_id = busy.id;

        let mut lists = MockListRepo::new();
        lists
            .expect_find_by_owner()
            .withf(move |o, archived| *o == owner && !*archived)
            .times(1)
            .returning(move |_, _| Ok(vec![busy.clone(), empty.clone()]));

        let mut items = MockItemRepo::new();
        items
            .expect_count_by_lists()
            .withf(|ids| ids.len() == 2)
            .times(1)
            .returning(move |_| {
                Ok(HashMap::from([(busy_id, ItemCounts { total: 3, done: 1 })]))
            });

        let service = service(lists, items, MockGate::new());

        let result = service
            .list_lists(&Principal::new(owner), false)
            .await
            .unwrap();

        assert_eq!(result.len(), 2);
        assert_eq!(result[0].counts, ItemCounts { total: 3, done: 1 });
        assert_eq!(result[1].counts, ItemCounts::default());
    }

    #[tokio::test]
    async fn test_get_list_goes_through_gate() {
        let owner = UserId::new();
        let list = list_owned_by(owner);
        let list_id = list.id;

        let mut gate = MockGate::new();
        gate.expect_authorize()
            .withf(move |p, r| p.user_id == owner && *r == ResourceRef::List(list_id))
            .times(1)
            .returning(move |_, _| Ok(Resource::List(list.clone())));

        let mut items = MockItemRepo::new();
        items
            .expect_count_by_lists()
            .returning(|_| Ok(HashMap::new()));

        let service = service(MockListRepo::new(), items, gate);

        let found = service
            .get_list(&Principal::new(owner), list_id)
            .await
            .unwrap();
        assert_eq!(found.list.id, list_id);
        assert_eq!(found.counts.total, 0);
    }

    #[tokio::test]
    async fn test_get_foreign_list_is_not_found() {
        let service = service(MockListRepo::new(), MockItemRepo::new(), gate_denying());

        let result = service
            .get_list(&Principal::new(UserId::new()), ListId::new())
            .await;

        assert!(matches!(result, Err(ListError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_update_list_applies_partial_command() {
        let owner = UserId::new();
        let list = list_owned_by(owner);
        let before = list.updated_at;

        let mut lists = MockListRepo::new();
        lists
            .expect_update()
            .withf(move |l| l.is_archived && l.name.as_str() == "Weekly" && l.updated_at >= before)
            .times(1)
            .returning(|l| Ok(l));

        let service = service(lists, MockItemRepo::new(), gate_resolving(list.clone()));

        let updated = service
            .update_list(
                &Principal::new(owner),
                list.id,
                UpdateListCommand {
                    is_archived: Some(true),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert!(updated.is_archived);
    }

    #[tokio::test]
    async fn test_delete_foreign_list_writes_nothing() {
        let mut lists = MockListRepo::new();
        lists.expect_delete_with_items().times(0);

        let service = service(lists, MockItemRepo::new(), gate_denying());

        let result = service
            .delete_list(&Principal::new(UserId::new()), ListId::new())
            .await;
        assert!(matches!(result, Err(ListError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_delete_list_cascades_through_repository() {
        let owner = UserId::new();
        let list = list_owned_by(owner);
        let list_id = list.id;

        let mut lists = MockListRepo::new();
        lists
            .expect_delete_with_items()
            .withf(move |id| *id == list_id)
            .times(1)
            .returning(|_| Ok(()));

        let service = service(lists, MockItemRepo::new(), gate_resolving(list));

        assert!(service
            .delete_list(&Principal::new(owner), list_id)
            .await
            .is_ok());
    }
}
