pub mod create_list;
pub mod delete_list;
pub mod get_list;
pub mod list_lists;
pub mod update_list;

use chrono::DateTime;
use chrono::Utc;
use serde::Serialize;

pub use create_list::create_list;
pub use delete_list::delete_list;
pub use get_list::get_list;
pub use list_lists::list_lists;
pub use update_list::update_list;

use crate::domain::item::models::ItemCounts;
use crate::domain::list::models::Currency;
use crate::domain::list::models::List;
use crate::domain::list::models::ListShare;
use crate::domain::list::models::ListWithCounts;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShareData {
    pub user_id: String,
    pub role: &'static str,
}

impl From<&ListShare> for ShareData {
    fn from(share: &ListShare) -> Self {
        Self {
            user_id: share.user_id.to_string(),
            role: share.role.as_str(),
        }
    }
}

/// List as returned to the frontend. Counts are present only where the
/// endpoint derives them.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListData {
    pub id: String,
    pub name: String,
    pub store: String,
    pub color: String,
    pub budget: Option<f64>,
    pub currency: Currency,
    pub is_archived: bool,
    pub shared_with: Vec<ShareData>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item_count: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub done_count: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ListData {
    fn with_counts(mut self, counts: ItemCounts) -> Self {
        self.item_count = Some(counts.total);
        self.done_count = Some(counts.done);
        self
    }
}

impl From<&List> for ListData {
    fn from(list: &List) -> Self {
        Self {
            id: list.id.to_string(),
            name: list.name.as_str().to_string(),
            store: list.store.clone(),
            color: list.color.as_str().to_string(),
            budget: list.budget.map(|b| b.amount()),
            currency: list.currency,
            is_archived: list.is_archived,
            shared_with: list.shared_with.iter().map(ShareData::from).collect(),
            item_count: None,
            done_count: None,
            created_at: list.created_at,
            updated_at: list.updated_at,
        }
    }
}

impl From<&ListWithCounts> for ListData {
    fn from(entry: &ListWithCounts) -> Self {
        ListData::from(&entry.list).with_counts(entry.counts)
    }
}

/// `{list}`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListResponseData {
    pub list: ListData,
}

/// `{count, lists}`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListsResponseData {
    pub count: usize,
    pub lists: Vec<ListData>,
}
