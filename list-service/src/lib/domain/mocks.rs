use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use mockall::mock;

use crate::domain::access::errors::AccessError;
use crate::domain::access::models::Principal;
use crate::domain::access::models::Resource;
use crate::domain::access::models::ResourceRef;
use crate::domain::access::ports::AuthorizationGate;
use crate::domain::item::errors::ItemError;
use crate::domain::item::models::Item;
use crate::domain::item::models::ItemCounts;
use crate::domain::item::models::ItemId;
use crate::domain::item::ports::ItemRepository;
use crate::domain::list::errors::ListError;
use crate::domain::list::models::Currency;
use crate::domain::list::models::HexColor;
use crate::domain::list::models::List;
use crate::domain::list::models::ListId;
use crate::domain::list::models::ListName;
use crate::domain::list::ports::ListRepository;
use crate::domain::user::models::UserId;

mock! {
    pub ListRepo {}

    #[async_trait]
    impl ListRepository for ListRepo {
        async fn create(&self, list: List) -> Result<List, ListError>;
        async fn find_owned(&self, id: &ListId, owner: &UserId) -> Result<Option<List>, ListError>;
        async fn find_by_owner(&self, owner: &UserId, archived: bool) -> Result<Vec<List>, ListError>;
        async fn update(&self, list: List) -> Result<List, ListError>;
        async fn delete_with_items(&self, id: &ListId) -> Result<(), ListError>;
    }
}

mock! {
    pub ItemRepo {}

    #[async_trait]
    impl ItemRepository for ItemRepo {
        async fn create(&self, item: Item) -> Result<Item, ItemError>;
        async fn find_owned(&self, id: &ItemId, owner: &UserId) -> Result<Option<Item>, ItemError>;
        async fn find_by_list(&self, list_id: &ListId, is_done: Option<bool>) -> Result<Vec<Item>, ItemError>;
        async fn max_priority(&self, list_id: &ListId) -> Result<Option<i32>, ItemError>;
        async fn update(&self, item: Item) -> Result<Item, ItemError>;
        async fn find_owned_ids(&self, ids: &[ItemId], owner: &UserId) -> Result<Vec<ItemId>, ItemError>;
        async fn update_priority(&self, id: &ItemId, owner: &UserId, priority: i32) -> Result<bool, ItemError>;
        async fn delete(&self, id: &ItemId) -> Result<(), ItemError>;
        async fn count_by_lists(&self, list_ids: &[ListId]) -> Result<HashMap<ListId, ItemCounts>, ItemError>;
    }
}

mock! {
    pub Gate {}

    #[async_trait]
    impl AuthorizationGate for Gate {
        async fn authorize(&self, principal: &Principal, resource: ResourceRef) -> Result<Resource, AccessError>;
        async fn authorize_items(&self, principal: &Principal, ids: &[ItemId]) -> Result<(), AccessError>;
    }
}

pub fn list_owned_by(owner: UserId) -> List {
    let now = Utc::now();
    List {
        id: ListId::new(),
        owner_id: owner,
        name: ListName::new("Weekly".to_string()).unwrap(),
        store: String::new(),
        color: HexColor::default(),
        budget: None,
        currency: Currency::Usd,
        is_archived: false,
        shared_with: vec![],
        created_at: now,
        updated_at: now,
    }
}
