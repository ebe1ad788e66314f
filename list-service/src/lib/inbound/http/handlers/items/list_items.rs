use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use serde::Deserialize;

use super::GroupedData;
use super::ItemData;
use super::ItemsResponseData;
use crate::domain::access::models::Principal;
use crate::domain::item::models::ItemQuery;
use crate::domain::item::ordering::GroupKey;
use crate::domain::item::ordering::SortMode;
use crate::domain::item::ports::ItemServicePort;
use crate::inbound::http::handlers::parse_list_id;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiQuery;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::router::AppState;

/// `?sortBy=&groupBy=&isDone=`. Unknown values fall back to the defaults.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListItemsQuery {
    pub sort_by: Option<String>,
    pub group_by: Option<String>,
    pub is_done: Option<String>,
}

impl From<ListItemsQuery> for ItemQuery {
    fn from(query: ListItemsQuery) -> Self {
        ItemQuery {
            sort: SortMode::from_query(query.sort_by.as_deref()),
            group: GroupKey::from_query(query.group_by.as_deref()),
            is_done: query.is_done.map(|v| v == "true"),
        }
    }
}

pub async fn list_items(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(list_id): Path<String>,
    ApiQuery(query): ApiQuery<ListItemsQuery>,
) -> Result<ApiSuccess<ItemsResponseData>, ApiError> {
    let list_id = parse_list_id(&list_id)?;

    let listing = state
        .item_service
        .list_items(&principal, list_id, query.into())
        .await?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        ItemsResponseData {
            count: listing.items.len(),
            items: listing.items.iter().map(ItemData::from).collect(),
            grouped: listing.grouped.map(GroupedData),
        },
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_maps_to_item_query() {
        let query = ListItemsQuery {
            sort_by: Some("name".to_string()),
            group_by: Some("store".to_string()),
            is_done: Some("false".to_string()),
        };

        assert_eq!(
            ItemQuery::from(query),
            ItemQuery {
                sort: SortMode::Name,
                group: Some(GroupKey::Store),
                is_done: Some(false),
            }
        );
        assert_eq!(ItemQuery::from(ListItemsQuery::default()), ItemQuery::default());
    }
}
