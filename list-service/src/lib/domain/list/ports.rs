use async_trait::async_trait;

use crate::domain::access::models::Principal;
use crate::domain::list::errors::ListError;
use crate::domain::list::models::CreateListCommand;
use crate::domain::list::models::List;
use crate::domain::list::models::ListId;
use crate::domain::list::models::ListWithCounts;
use crate::domain::list::models::UpdateListCommand;
use crate::domain::user::models::UserId;

/// Port for list operations. Every call is scoped to `principal`.
#[async_trait]
pub trait ListServicePort: Send + Sync + 'static {
    /// Owned lists with derived counts, most recently updated first.
    ///
    /// # Arguments
    /// * `archived` - Return archived lists instead of active ones
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn list_lists(
        &self,
        principal: &Principal,
        archived: bool,
    ) -> Result<Vec<ListWithCounts>, ListError>;

    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn create_list(
        &self,
        principal: &Principal,
        command: CreateListCommand,
    ) -> Result<List, ListError>;

    /// # Errors
    /// * `NotFound` - List missing or owned by someone else
    /// * `DatabaseError` - Database operation failed
    async fn get_list(
        &self,
        principal: &Principal,
        id: ListId,
    ) -> Result<ListWithCounts, ListError>;

    /// # Errors
    /// * `NotFound` - List missing or owned by someone else
    /// * `DatabaseError` - Database operation failed
    async fn update_list(
        &self,
        principal: &Principal,
        id: ListId,
        command: UpdateListCommand,
    ) -> Result<List, ListError>;

    /// Delete the list together with its items.
    ///
    /// # Errors
    /// * `NotFound` - List missing or owned by someone else
    /// * `DatabaseError` - Database operation failed
    async fn delete_list(&self, principal: &Principal, id: ListId) -> Result<(), ListError>;
}

/// Persistence operations for lists.
#[async_trait]
pub trait ListRepository: Send + Sync + 'static {
    async fn create(&self, list: List) -> Result<List, ListError>;

    /// Look a list up by id and owner in a single query.
    async fn find_owned(&self, id: &ListId, owner: &UserId) -> Result<Option<List>, ListError>;

    /// Lists of `owner` with the given archive flag, newest update first.
    async fn find_by_owner(&self, owner: &UserId, archived: bool) -> Result<Vec<List>, ListError>;

    /// # Errors
    /// * `NotFound` - List does not exist
    async fn update(&self, list: List) -> Result<List, ListError>;

    /// Remove the list and every item under it atomically.
    ///
    /// # Errors
    /// * `NotFound` - List does not exist
    async fn delete_with_items(&self, id: &ListId) -> Result<(), ListError>;
}
