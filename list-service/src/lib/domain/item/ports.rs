use std::collections::HashMap;

use async_trait::async_trait;

use crate::domain::access::models::Principal;
use crate::domain::item::errors::ItemError;
use crate::domain::item::models::CreateItemCommand;
use crate::domain::item::models::Item;
use crate::domain::item::models::ItemCounts;
use crate::domain::item::models::ItemId;
use crate::domain::item::models::ItemListing;
use crate::domain::item::models::ItemQuery;
use crate::domain::item::models::ReorderCommand;
use crate::domain::item::models::UpdateItemCommand;
use crate::domain::list::models::ListId;
use crate::domain::user::models::UserId;

/// Port for item operations. Every call is scoped to `principal`.
#[async_trait]
pub trait ItemServicePort: Send + Sync + 'static {
    /// Items of an owned list, sorted and optionally grouped.
    ///
    /// # Errors
    /// * `ListNotFound` - List missing or owned by someone else
    /// * `DatabaseError` - Database operation failed
    async fn list_items(
        &self,
        principal: &Principal,
        list_id: ListId,
        query: ItemQuery,
    ) -> Result<ItemListing, ItemError>;

    /// Add an item, appending it to the end when no priority is given.
    ///
    /// # Errors
    /// * `ListNotFound` - List missing or owned by someone else
    /// * `DatabaseError` - Database operation failed
    async fn create_item(
        &self,
        principal: &Principal,
        list_id: ListId,
        command: CreateItemCommand,
    ) -> Result<Item, ItemError>;

    /// # Errors
    /// * `NotFound` - Item missing or owned by someone else
    /// * `DatabaseError` - Database operation failed
    async fn update_item(
        &self,
        principal: &Principal,
        item_id: ItemId,
        command: UpdateItemCommand,
    ) -> Result<Item, ItemError>;

    /// Flip `is_done` and re-derive `completed_at`.
    ///
    /// # Errors
    /// * `NotFound` - Item missing or owned by someone else
    /// * `DatabaseError` - Database operation failed
    async fn toggle_item(&self, principal: &Principal, item_id: ItemId)
        -> Result<Item, ItemError>;

    /// Rewrite priorities in bulk.
    ///
    /// Ownership of every id is checked before any write. Writes are then
    /// applied one item at a time.
    ///
    /// # Returns
    /// Number of assignments applied
    ///
    /// # Errors
    /// * `ItemsNotFound` - At least one id is missing or foreign; nothing written
    /// * `DatabaseError` - Database operation failed
    async fn reorder_items(
        &self,
        principal: &Principal,
        command: ReorderCommand,
    ) -> Result<usize, ItemError>;

    /// # Errors
    /// * `NotFound` - Item missing or owned by someone else
    /// * `DatabaseError` - Database operation failed
    async fn delete_item(&self, principal: &Principal, item_id: ItemId) -> Result<(), ItemError>;
}

/// Persistence operations for items.
#[async_trait]
pub trait ItemRepository: Send + Sync + 'static {
    async fn create(&self, item: Item) -> Result<Item, ItemError>;

    /// Look an item up by id and owner in a single query.
    async fn find_owned(&self, id: &ItemId, owner: &UserId) -> Result<Option<Item>, ItemError>;

    /// All items of a list, optionally filtered by completion. Unordered.
    async fn find_by_list(
        &self,
        list_id: &ListId,
        is_done: Option<bool>,
    ) -> Result<Vec<Item>, ItemError>;

    /// Highest priority in the list, `None` for an empty list.
    async fn max_priority(&self, list_id: &ListId) -> Result<Option<i32>, ItemError>;

    /// # Errors
    /// * `NotFound` - Item does not exist
    async fn update(&self, item: Item) -> Result<Item, ItemError>;

    /// Subset of `ids` that exist and belong to `owner`.
    async fn find_owned_ids(&self, ids: &[ItemId], owner: &UserId)
        -> Result<Vec<ItemId>, ItemError>;

    /// Single-row priority write scoped to `owner`.
    ///
    /// # Returns
    /// `true` if a row was updated
    async fn update_priority(
        &self,
        id: &ItemId,
        owner: &UserId,
        priority: i32,
    ) -> Result<bool, ItemError>;

    /// # Errors
    /// * `NotFound` - Item does not exist
    async fn delete(&self, id: &ItemId) -> Result<(), ItemError>;

    /// Item and done counts per list. Lists without items are absent.
    async fn count_by_lists(
        &self,
        list_ids: &[ListId],
    ) -> Result<HashMap<ListId, ItemCounts>, ItemError>;
}
