use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::access::models::Principal;
use crate::domain::access::ports::AuthorizationGate;
use crate::domain::access::ports::AuthorizationGateExt;
use crate::domain::item::errors::ItemError;
use crate::domain::item::models::CreateItemCommand;
use crate::domain::item::models::Item;
use crate::domain::item::models::ItemId;
use crate::domain::item::models::ItemListing;
use crate::domain::item::models::ItemQuery;
use crate::domain::item::models::ReorderCommand;
use crate::domain::item::models::UpdateItemCommand;
use crate::domain::item::ordering;
use crate::domain::item::ports::ItemRepository;
use crate::domain::item::ports::ItemServicePort;
use crate::domain::list::models::ListId;

const DEFAULT_QUANTITY: &str = "1";

/// Domain service implementation for list items.
pub struct ItemService<IR, G>
where
    IR: ItemRepository,
    G: AuthorizationGate,
{
    repository: Arc<IR>,
    gate: Arc<G>,
}

impl<IR, G> ItemService<IR, G>
where
    IR: ItemRepository,
    G: AuthorizationGate,
{
    pub fn new(repository: Arc<IR>, gate: Arc<G>) -> Self {
        Self { repository, gate }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

#[async_trait]
impl<IR, G> ItemServicePort for ItemService<IR, G>
where
    IR: ItemRepository,
    G: AuthorizationGate,
{
    async fn list_items(
        &self,
        principal: &Principal,
        list_id: ListId,
        query: ItemQuery,
    ) -> Result<ItemListing, ItemError> {
        let list = self.gate.authorize_list(principal, list_id).await?;

        let mut items = self.repository.find_by_list(&list.id, query.is_done).await?;
        ordering::sort_items(&mut items, query.sort);

        let grouped = query
            .group
            .map(|key| ordering::group_items(&items, key, &list.store));

        Ok(ItemListing { items, grouped })
    }

    async fn create_item(
        &self,
        principal: &Principal,
        list_id: ListId,
        command: CreateItemCommand,
    ) -> Result<Item, ItemError> {
        let list = self.gate.authorize_list(principal, list_id).await?;

        let priority = match command.priority {
            Some(priority) => priority,
            None => ordering::next_priority(self.repository.max_priority(&list.id).await?),
        };

        let now = Utc::now();
        let item = Item {
            id: ItemId::new(),
            list_id: list.id,
            owner_id: list.owner_id,
            name: command.name,
            quantity: non_empty(command.quantity).unwrap_or_else(|| DEFAULT_QUANTITY.to_string()),
            store: non_empty(command.store).unwrap_or(list.store),
            section: command.section,
            notes: command.notes,
            priority,
            is_done: false,
            completed_at: None,
            created_at: now,
            updated_at: now,
        };

        let item = self.repository.create(item).await?;
        tracing::debug!(item_id = %item.id, list_id = %list.id, priority, "Item created");

        Ok(item)
    }

    async fn update_item(
        &self,
        principal: &Principal,
        item_id: ItemId,
        command: UpdateItemCommand,
    ) -> Result<Item, ItemError> {
        let mut item = self.gate.authorize_item(principal, item_id).await?;
        command.apply_to(&mut item, Utc::now());

        self.repository.update(item).await
    }

    async fn toggle_item(
        &self,
        principal: &Principal,
        item_id: ItemId,
    ) -> Result<Item, ItemError> {
        let mut item = self.gate.authorize_item(principal, item_id).await?;
        let now = Utc::now();
        item.toggle(now);
        item.updated_at = now;

        self.repository.update(item).await
    }

    async fn reorder_items(
        &self,
        principal: &Principal,
        command: ReorderCommand,
    ) -> Result<usize, ItemError> {
        self.gate
            .authorize_items(principal, &command.item_ids())
            .await?;

        let mut updated = 0;
        for assignment in command.assignments() {
            let written = self
                .repository
                .update_priority(&assignment.item_id, &principal.user_id, assignment.priority)
                .await?;
            if written {
                updated += 1;
            } else {
                tracing::warn!(item_id = %assignment.item_id, "Item disappeared during reorder");
            }
        }

        tracing::debug!(
            user_id = %principal.user_id,
            requested = command.assignments().len(),
            updated,
            "Items reordered"
        );
        Ok(updated)
    }

    async fn delete_item(&self, principal: &Principal, item_id: ItemId) -> Result<(), ItemError> {
        let item = self.gate.authorize_item(principal, item_id).await?;
        self.repository.delete(&item.id).await
    }
}
