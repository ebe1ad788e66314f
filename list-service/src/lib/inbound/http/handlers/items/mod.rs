pub mod create_item;
pub mod delete_item;
pub mod list_items;
pub mod reorder_items;
pub mod toggle_item;
pub mod update_item;

use chrono::DateTime;
use chrono::Utc;
use serde::Serialize;
use serde::Serializer;

pub use create_item::create_item;
pub use delete_item::delete_item;
pub use list_items::list_items;
pub use reorder_items::reorder_items;
pub use toggle_item::toggle_item;
pub use update_item::update_item;

use crate::domain::item::models::Item;
use crate::domain::item::ordering::Group;
use crate::domain::item::ordering::Grouping;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemData {
    pub id: String,
    pub list_id: String,
    pub name: String,
    pub quantity: String,
    pub store: String,
    pub section: String,
    pub notes: String,
    pub priority: i32,
    pub is_done: bool,
    pub completed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&Item> for ItemData {
    fn from(item: &Item) -> Self {
        Self {
            id: item.id.to_string(),
            list_id: item.list_id.to_string(),
            name: item.name.as_str().to_string(),
            quantity: item.quantity.clone(),
            store: item.store.clone(),
            section: item.section.clone(),
            notes: item.notes.as_str().to_string(),
            priority: item.priority,
            is_done: item.is_done,
            completed_at: item.completed_at,
            created_at: item.created_at,
            updated_at: item.updated_at,
        }
    }
}

/// Grouped view of a listing.
///
/// Serialized as `{section: [item]}` or `{store: {section: [item]}}` with
/// keys in first-encounter order.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupedData(pub Grouping);

struct ItemSeq<'a>(&'a [Item]);

impl Serialize for ItemSeq<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.0.iter().map(ItemData::from))
    }
}

struct SectionMap<'a>(&'a [Group]);

impl Serialize for SectionMap<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(
            self.0
                .iter()
                .map(|group| (group.label.as_str(), ItemSeq(&group.items))),
        )
    }
}

impl Serialize for GroupedData {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match &self.0 {
            Grouping::BySection(groups) => SectionMap(groups).serialize(serializer),
            Grouping::ByStore(stores) => serializer.collect_map(
                stores
                    .iter()
                    .map(|store| (store.label.as_str(), SectionMap(&store.sections))),
            ),
        }
    }
}

/// `{item}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ItemResponseData {
    pub item: ItemData,
}

/// `{count, items, grouped?}`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ItemsResponseData {
    pub count: usize,
    pub items: Vec<ItemData>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grouped: Option<GroupedData>,
}
