//! Display ordering and grouping of list items.
//!
//! Priorities are sparse integers assigned by the caller. The stored value is
//! only a hint: duplicates and gaps are legal, and the creation time breaks
//! ties so that the default order is always total and stable.

use crate::domain::item::models::Item;

pub const UNCATEGORIZED: &str = "Uncategorized";
pub const NO_STORE: &str = "No Store";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortMode {
    /// Ascending priority, then ascending creation time.
    #[default]
    Priority,
    /// Newest first.
    CreatedAt,
    /// Ascending, case-sensitive.
    Name,
}

impl SortMode {
    /// Unknown or missing values fall back to [`SortMode::Priority`].
    pub fn from_query(value: Option<&str>) -> Self {
        match value {
            Some("createdAt") => SortMode::CreatedAt,
            Some("name") => SortMode::Name,
            _ => SortMode::Priority,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupKey {
    Section,
    Store,
}

impl GroupKey {
    /// Unknown or missing values mean no grouping.
    pub fn from_query(value: Option<&str>) -> Option<Self> {
        match value {
            Some("section") => Some(GroupKey::Section),
            Some("store") => Some(GroupKey::Store),
            _ => None,
        }
    }
}

/// Priority for an item appended without an explicit one.
pub fn next_priority(current_max: Option<i32>) -> i32 {
    current_max.map_or(0, |max| max.saturating_add(1))
}

/// Stable in-place sort. Never touches the stored priorities.
pub fn sort_items(items: &mut [Item], mode: SortMode) {
    match mode {
        SortMode::Priority => {
            items.sort_by(|a, b| (a.priority, a.created_at).cmp(&(b.priority, b.created_at)))
        }
        SortMode::CreatedAt => items.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
        SortMode::Name => items.sort_by(|a, b| a.name.as_str().cmp(b.name.as_str())),
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Group {
    pub label: String,
    pub items: Vec<Item>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StoreGroup {
    pub label: String,
    pub sections: Vec<Group>,
}

/// Items partitioned by key, groups in order of first encounter.
#[derive(Debug, Clone, PartialEq)]
pub enum Grouping {
    BySection(Vec<Group>),
    ByStore(Vec<StoreGroup>),
}

fn section_label(item: &Item) -> &str {
    if item.section.is_empty() {
        UNCATEGORIZED
    } else {
        &item.section
    }
}

fn store_label<'a>(item: &'a Item, list_store: &'a str) -> &'a str {
    if !item.store.is_empty() {
        &item.store
    } else if !list_store.is_empty() {
        list_store
    } else {
        NO_STORE
    }
}

fn push_into(groups: &mut Vec<Group>, label: &str, item: &Item) {
    match groups.iter_mut().find(|g| g.label == label) {
        Some(group) => group.items.push(item.clone()),
        None => groups.push(Group {
            label: label.to_string(),
            items: vec![item.clone()],
        }),
    }
}

/// Partition already sorted `items` by `key`.
///
/// Store groups are further split by section.
pub fn group_items(items: &[Item], key: GroupKey, list_store: &str) -> Grouping {
    match key {
        GroupKey::Section => {
            let mut groups = Vec::new();
            for item in items {
                push_into(&mut groups, section_label(item), item);
            }
            Grouping::BySection(groups)
        }
        GroupKey::Store => {
            let mut stores: Vec<StoreGroup> = Vec::new();
            for item in items {
                let label = store_label(item, list_store);
                let index = match stores.iter().position(|s| s.label == label) {
                    Some(index) => index,
                    None => {
                        stores.push(StoreGroup {
                            label: label.to_string(),
                            sections: Vec::new(),
                        });
                        stores.len() - 1
                    }
                };
                push_into(&mut stores[index].sections, section_label(item), item);
            }
            Grouping::ByStore(stores)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::item::models::fixtures::item;

    fn names(items: &[Item]) -> Vec<&str> {
        items.iter().map(|i| i.name.as_str()).collect()
    }

    #[test]
    fn test_next_priority() {
        assert_eq!(next_priority(None), 0);
        assert_eq!(next_priority(Some(0)), 1);
        assert_eq!(next_priority(Some(41)), 42);
        assert_eq!(next_priority(Some(-3)), -2);
        assert_eq!(next_priority(Some(i32::MAX)), i32::MAX);
    }

    #[test]
    fn test_priority_sort_breaks_ties_by_creation_time() {
        let mut items = vec![
            item("c", 1, 30),
            item("a", 0, 20),
            item("d", 1, 10),
            item("b", 0, 40),
        ];

        sort_items(&mut items, SortMode::Priority);

        assert_eq!(names(&items), vec!["a", "b", "d", "c"]);
        for pair in items.windows(2) {
            assert!(pair[0].priority <= pair[1].priority);
            if pair[0].priority == pair[1].priority {
                assert!(pair[0].created_at <= pair[1].created_at);
            }
        }
    }

    #[test]
    fn test_priority_sort_over_many_shuffled_items() {
        let mut items: Vec<Item> = (0..50)
            .map(|i| item(&format!("item-{}", i), (i * 7) % 5, ((i * 13) % 17) as i64))
            .collect();

        sort_items(&mut items, SortMode::Priority);

        for pair in items.windows(2) {
            let left = (pair[0].priority, pair[0].created_at);
            let right = (pair[1].priority, pair[1].created_at);
            assert!(left <= right);
        }
    }

    #[test]
    fn test_created_at_sort_is_newest_first() {
        let mut items = vec![item("old", 0, 0), item("new", 0, 100), item("mid", 0, 50)];
        sort_items(&mut items, SortMode::CreatedAt);
        assert_eq!(names(&items), vec!["new", "mid", "old"]);
    }

    #[test]
    fn test_name_sort_is_case_sensitive() {
        let mut items = vec![item("banana", 0, 0), item("Apple", 0, 0), item("apple", 0, 0)];
        sort_items(&mut items, SortMode::Name);
        assert_eq!(names(&items), vec!["Apple", "apple", "banana"]);
    }

    #[test]
    fn test_sort_does_not_mutate_priority() {
        let mut items = vec![item("b", 5, 0), item("a", 2, 0)];
        sort_items(&mut items, SortMode::Name);
        assert_eq!(items[0].priority, 2);
        assert_eq!(items[1].priority, 5);
    }

    #[test]
    fn test_query_parsing_falls_back() {
        assert_eq!(SortMode::from_query(None), SortMode::Priority);
        assert_eq!(SortMode::from_query(Some("bogus")), SortMode::Priority);
        assert_eq!(SortMode::from_query(Some("createdAt")), SortMode::CreatedAt);
        assert_eq!(GroupKey::from_query(Some("aisle")), None);
        assert_eq!(GroupKey::from_query(Some("store")), Some(GroupKey::Store));
    }

    #[test]
    fn test_group_by_section_keeps_first_encounter_order() {
        let mut dairy = item("Milk", 0, 0);
        dairy.section = "Dairy".to_string();
        let loose = item("Tape", 1, 0);
        let mut cheese = item("Cheese", 2, 0);
        cheese.section = "Dairy".to_string();

        let grouping = group_items(&[dairy, loose, cheese], GroupKey::Section, "");

        let Grouping::BySection(groups) = grouping else {
            panic!("expected section grouping");
        };
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].label, "Dairy");
        assert_eq!(names(&groups[0].items), vec!["Milk", "Cheese"]);
        assert_eq!(groups[1].label, UNCATEGORIZED);
    }

    #[test]
    fn test_group_by_store_falls_back_to_list_store_then_sentinel() {
        let mut own = item("Bread", 0, 0);
        own.store = "Bakery".to_string();
        own.section = "Fresh".to_string();
        let inherits = item("Eggs", 1, 0);

        let Grouping::ByStore(stores) =
            group_items(&[own.clone(), inherits.clone()], GroupKey::Store, "Aldi")
        else {
            panic!("expected store grouping");
        };
        assert_eq!(stores[0].label, "Bakery");
        assert_eq!(stores[0].sections[0].label, "Fresh");
        assert_eq!(stores[1].label, "Aldi");
        assert_eq!(stores[1].sections[0].label, UNCATEGORIZED);

        let Grouping::ByStore(stores) = group_items(&[inherits], GroupKey::Store, "") else {
            panic!("expected store grouping");
        };
        assert_eq!(stores[0].label, NO_STORE);
    }
}
