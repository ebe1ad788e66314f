use std::collections::HashSet;
use std::fmt;

use chrono::DateTime;
use chrono::Utc;
use uuid::Uuid;

use crate::domain::item::errors::ItemIdError;
use crate::domain::item::errors::ItemNameError;
use crate::domain::item::errors::ItemNotesError;
use crate::domain::item::errors::ReorderError;
use crate::domain::item::ordering::GroupKey;
use crate::domain::item::ordering::Grouping;
use crate::domain::item::ordering::SortMode;
use crate::domain::list::models::ListId;
use crate::domain::user::models::UserId;

/// A single entry on a shopping list.
///
/// `owner_id` is copied from the list owner when the item is created and is
/// never re-derived afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct Item {
    pub id: ItemId,
    pub list_id: ListId,
    pub owner_id: UserId,
    pub name: ItemName,
    pub quantity: String,
    pub store: String,
    pub section: String,
    pub notes: ItemNotes,
    pub priority: i32,
    pub is_done: bool,
    pub completed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Item {
    /// Set the completion flag, re-deriving `completed_at` only when the flag
    /// actually changes.
    ///
    /// # Returns
    /// `true` if the flag changed
    pub fn set_done(&mut self, done: bool, now: DateTime<Utc>) -> bool {
        if self.is_done == done {
            return false;
        }
        self.is_done = done;
        self.completed_at = done.then_some(now);
        true
    }

    /// Flip the completion flag. Priority is left untouched.
    pub fn toggle(&mut self, now: DateTime<Utc>) {
        self.set_done(!self.is_done, now);
    }
}

/// Item unique identifier value object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ItemId(pub Uuid);

impl ItemId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse an item ID from string.
    ///
    /// # Errors
    /// * `InvalidFormat` - String is not a valid UUID
    pub fn from_string(s: &str) -> Result<Self, ItemIdError> {
        Uuid::parse_str(s)
            .map(ItemId)
            .map_err(|e| ItemIdError::InvalidFormat(e.to_string()))
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemName(String);

impl ItemName {
    const MAX_LENGTH: usize = 200;

    /// # Errors
    /// * `Empty` - Name is blank after trimming
    /// * `TooLong` - Name exceeds 200 characters
    pub fn new(name: String) -> Result<Self, ItemNameError> {
        let name = name.trim().to_string();
        let length = name.chars().count();
        if length == 0 {
            Err(ItemNameError::Empty)
        } else if length > Self::MAX_LENGTH {
            Err(ItemNameError::TooLong {
                max: Self::MAX_LENGTH,
                actual: length,
            })
        } else {
            Ok(Self(name))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Free-text notes, possibly empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemNotes(String);

impl ItemNotes {
    const MAX_LENGTH: usize = 500;

    /// # Errors
    /// * `TooLong` - Notes exceed 500 characters
    pub fn new(notes: String) -> Result<Self, ItemNotesError> {
        let notes = notes.trim().to_string();
        let length = notes.chars().count();
        if length > Self::MAX_LENGTH {
            Err(ItemNotesError::TooLong {
                max: Self::MAX_LENGTH,
                actual: length,
            })
        } else {
            Ok(Self(notes))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Derived per-list counters. Never stored on the list itself.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ItemCounts {
    pub total: i64,
    pub done: i64,
}

/// Command to add an item to a list.
///
/// `quantity` and `store` are resolved against defaults by the service.
#[derive(Debug)]
pub struct CreateItemCommand {
    pub name: ItemName,
    pub quantity: Option<String>,
    pub store: Option<String>,
    pub section: String,
    pub notes: ItemNotes,
    pub priority: Option<i32>,
}

/// Partial update of an item's mutable fields.
#[derive(Debug, Default)]
pub struct UpdateItemCommand {
    pub name: Option<ItemName>,
    pub quantity: Option<String>,
    pub store: Option<String>,
    pub section: Option<String>,
    pub notes: Option<ItemNotes>,
    pub priority: Option<i32>,
    pub is_done: Option<bool>,
}

impl UpdateItemCommand {
    pub fn apply_to(self, item: &mut Item, now: DateTime<Utc>) {
        if let Some(name) = self.name {
            item.name = name;
        }
        if let Some(quantity) = self.quantity {
            item.quantity = quantity;
        }
        if let Some(store) = self.store {
            item.store = store;
        }
        if let Some(section) = self.section {
            item.section = section;
        }
        if let Some(notes) = self.notes {
            item.notes = notes;
        }
        if let Some(priority) = self.priority {
            item.priority = priority;
        }
        if let Some(is_done) = self.is_done {
            item.set_done(is_done, now);
        }
        item.updated_at = now;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PriorityAssignment {
    pub item_id: ItemId,
    pub priority: i32,
}

/// Bulk priority rewrite, usually a contiguous re-index from drag and drop.
#[derive(Debug, Clone)]
pub struct ReorderCommand {
    assignments: Vec<PriorityAssignment>,
}

impl ReorderCommand {
    /// # Errors
    /// * `Empty` - No assignments
    /// * `DuplicateItem` - The same item id is assigned twice
    pub fn new(assignments: Vec<PriorityAssignment>) -> Result<Self, ReorderError> {
        if assignments.is_empty() {
            return Err(ReorderError::Empty);
        }

        let mut seen = HashSet::with_capacity(assignments.len());
        for assignment in &assignments {
            if !seen.insert(assignment.item_id) {
                return Err(ReorderError::DuplicateItem(assignment.item_id));
            }
        }

        Ok(Self { assignments })
    }

    pub fn assignments(&self) -> &[PriorityAssignment] {
        &self.assignments
    }

    pub fn item_ids(&self) -> Vec<ItemId> {
        self.assignments.iter().map(|a| a.item_id).collect()
    }
}

/// Read-side options for listing a list's items.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ItemQuery {
    pub sort: SortMode,
    pub group: Option<GroupKey>,
    pub is_done: Option<bool>,
}

#[derive(Debug, Clone)]
pub struct ItemListing {
    pub items: Vec<Item>,
    pub grouped: Option<Grouping>,
}

#[cfg(test)]
pub(crate) mod fixtures {
    use chrono::Duration;

    use super::*;

    /// Item with `created_at` offset by `age_secs` from a fixed epoch.
    pub fn item(name: &str, priority: i32, age_secs: i64) -> Item {
        let base = DateTime::<Utc>::from_timestamp(1_700_000_000, 0).unwrap_or_default();
        let created_at = base + Duration::seconds(age_secs);
        Item {
            id: ItemId::new(),
            list_id: ListId(Uuid::nil()),
            owner_id: UserId(Uuid::nil()),
            name: ItemName::new(name.to_string()).unwrap(),
            quantity: "1".to_string(),
            store: String::new(),
            section: String::new(),
            notes: ItemNotes::default(),
            priority,
            is_done: false,
            completed_at: None,
            created_at,
            updated_at: created_at,
        }
    }
}
