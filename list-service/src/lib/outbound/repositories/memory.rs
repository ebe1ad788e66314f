use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::item::errors::ItemError;
use crate::domain::item::models::Item;
use crate::domain::item::models::ItemCounts;
use crate::domain::item::models::ItemId;
use crate::domain::item::ports::ItemRepository;
use crate::domain::list::errors::ListError;
use crate::domain::list::models::List;
use crate::domain::list::models::ListId;
use crate::domain::list::models::ListShare;
use crate::domain::list::ports::ListRepository;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::ports::UserRepository;
use crate::user::errors::UserError;

#[derive(Debug, Default)]
struct Tables {
    users: HashMap<UserId, User>,
    lists: HashMap<ListId, List>,
    items: HashMap<ItemId, Item>,
}

/// Process-local storage implementing every repository port.
///
/// All tables sit behind one lock, so cascading deletes are atomic.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRepository {
    tables: Arc<RwLock<Tables>>,
}

impl InMemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a share on an existing list, replacing any previous role for
    /// the same user.
    ///
    /// # Errors
    /// * `NotFound` - List does not exist
    pub async fn share_list(&self, list_id: &ListId, share: ListShare) -> Result<(), ListError> {
        let mut tables = self.tables.write().await;
        let list = tables
            .lists
            .get_mut(list_id)
            .ok_or(ListError::NotFound(*list_id))?;

        list.shared_with.retain(|s| s.user_id != share.user_id);
        list.shared_with.push(share);
        Ok(())
    }

    /// Number of items stored under `list_id`, whatever their owner.
    pub async fn count_items_in(&self, list_id: &ListId) -> usize {
        self.tables
            .read()
            .await
            .items
            .values()
            .filter(|item| item.list_id == *list_id)
            .count()
    }
}

fn email_taken(tables: &Tables, email: &EmailAddress, except: &UserId) -> bool {
    tables
        .users
        .values()
        .any(|u| u.email == *email && u.id != *except)
}

#[async_trait]
impl UserRepository for InMemoryRepository {
    async fn create(&self, user: User) -> Result<User, UserError> {
        let mut tables = self.tables.write().await;
        if email_taken(&tables, &user.email, &user.id) {
            return Err(UserError::EmailAlreadyExists(user.email.to_string()));
        }
        tables.users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError> {
        Ok(self.tables.read().await.users.get(id).cloned())
    }

    async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<User>, UserError> {
        Ok(self
            .tables
            .read()
            .await
            .users
            .values()
            .find(|u| u.email == *email)
            .cloned())
    }

    async fn update(&self, user: User) -> Result<User, UserError> {
        let mut tables = self.tables.write().await;
        if !tables.users.contains_key(&user.id) {
            return Err(UserError::NotFound(user.id.to_string()));
        }
        if email_taken(&tables, &user.email, &user.id) {
            return Err(UserError::EmailInUse(user.email.to_string()));
        }
        tables.users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn delete_with_data(&self, id: &UserId) -> Result<(), UserError> {
        let mut tables = self.tables.write().await;
        if tables.users.remove(id).is_none() {
            return Err(UserError::NotFound(id.to_string()));
        }
        tables.items.retain(|_, item| item.owner_id != *id);
        tables.lists.retain(|_, list| list.owner_id != *id);
        for list in tables.lists.values_mut() {
            list.shared_with.retain(|s| s.user_id != *id);
        }
        Ok(())
    }
}

#[async_trait]
impl ListRepository for InMemoryRepository {
    async fn create(&self, list: List) -> Result<List, ListError> {
        self.tables.write().await.lists.insert(list.id, list.clone());
        Ok(list)
    }

    async fn find_owned(&self, id: &ListId, owner: &UserId) -> Result<Option<List>, ListError> {
        Ok(self
            .tables
            .read()
            .await
            .lists
            .get(id)
            .filter(|list| list.owner_id == *owner)
            .cloned())
    }

    async fn find_by_owner(&self, owner: &UserId, archived: bool) -> Result<Vec<List>, ListError> {
        let tables = self.tables.read().await;
        let mut lists: Vec<List> = tables
            .lists
            .values()
            .filter(|list| list.owner_id == *owner && list.is_archived == archived)
            .cloned()
            .collect();
        lists.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        Ok(lists)
    }

    async fn update(&self, list: List) -> Result<List, ListError> {
        let mut tables = self.tables.write().await;
        match tables.lists.get_mut(&list.id) {
            Some(stored) => {
                *stored = list.clone();
                Ok(list)
            }
            None => Err(ListError::NotFound(list.id)),
        }
    }

    async fn delete_with_items(&self, id: &ListId) -> Result<(), ListError> {
        let mut tables = self.tables.write().await;
        if tables.lists.remove(id).is_none() {
            return Err(ListError::NotFound(*id));
        }
        tables.items.retain(|_, item| item.list_id != *id);
        Ok(())
    }
}

#[async_trait]
impl ItemRepository for InMemoryRepository {
    async fn create(&self, item: Item) -> Result<Item, ItemError> {
        self.tables.write().await.items.insert(item.id, item.clone());
        Ok(item)
    }

    async fn find_owned(&self, id: &ItemId, owner: &UserId) -> Result<Option<Item>, ItemError> {
        Ok(self
            .tables
            .read()
            .await
            .items
            .get(id)
            .filter(|item| item.owner_id == *owner)
            .cloned())
    }

    async fn find_by_list(
        &self,
        list_id: &ListId,
        is_done: Option<bool>,
    ) -> Result<Vec<Item>, ItemError> {
        Ok(self
            .tables
            .read()
            .await
            .items
            .values()
            .filter(|item| item.list_id == *list_id)
            .filter(|item| is_done.map_or(true, |done| item.is_done == done))
            .cloned()
            .collect())
    }

    async fn max_priority(&self, list_id: &ListId) -> Result<Option<i32>, ItemError> {
        Ok(self
            .tables
            .read()
            .await
            .items
            .values()
            .filter(|item| item.list_id == *list_id)
            .map(|item| item.priority)
            .max())
    }

    async fn update(&self, item: Item) -> Result<Item, ItemError> {
        let mut tables = self.tables.write().await;
        match tables.items.get_mut(&item.id) {
            Some(stored) => {
                *stored = item.clone();
                Ok(item)
            }
            None => Err(ItemError::NotFound(item.id)),
        }
    }

    async fn find_owned_ids(
        &self,
        ids: &[ItemId],
        owner: &UserId,
    ) -> Result<Vec<ItemId>, ItemError> {
        let tables = self.tables.read().await;
        Ok(ids
            .iter()
            .filter(|id| {
                tables
                    .items
                    .get(*id)
                    .is_some_and(|item| item.owner_id == *owner)
            })
            .copied()
            .collect())
    }

    async fn update_priority(
        &self,
        id: &ItemId,
        owner: &UserId,
        priority: i32,
    ) -> Result<bool, ItemError> {
        let mut tables = self.tables.write().await;
        match tables.items.get_mut(id) {
            Some(item) if item.owner_id == *owner => {
                item.priority = priority;
                item.updated_at = chrono::Utc::now();
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn delete(&self, id: &ItemId) -> Result<(), ItemError> {
        match self.tables.write().await.items.remove(id) {
            Some(_) => Ok(()),
            None => Err(ItemError::NotFound(*id)),
        }
    }

    async fn count_by_lists(
        &self,
        list_ids: &[ListId],
    ) -> Result<HashMap<ListId, ItemCounts>, ItemError> {
        let tables = self.tables.read().await;
        let mut counts: HashMap<ListId, ItemCounts> = HashMap::new();
        for item in tables.items.values() {
            if list_ids.contains(&item.list_id) {
                let entry = counts.entry(item.list_id).or_default();
                entry.total += 1;
                if item.is_done {
                    entry.done += 1;
                }
            }
        }
        Ok(counts)
    }
}
