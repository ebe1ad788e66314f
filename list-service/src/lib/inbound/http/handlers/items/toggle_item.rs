use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use chrono::DateTime;
use chrono::Utc;
use serde::Serialize;

use crate::domain::access::models::Principal;
use crate::domain::item::models::Item;
use crate::domain::item::ports::ItemServicePort;
use crate::inbound::http::handlers::parse_item_id;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::router::AppState;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToggledItemData {
    pub id: String,
    pub is_done: bool,
    pub completed_at: Option<DateTime<Utc>>,
}

impl From<&Item> for ToggledItemData {
    fn from(item: &Item) -> Self {
        Self {
            id: item.id.to_string(),
            is_done: item.is_done,
            completed_at: item.completed_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ToggleResponseData {
    pub item: ToggledItemData,
}

pub async fn toggle_item(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<String>,
) -> Result<ApiSuccess<ToggleResponseData>, ApiError> {
    let item_id = parse_item_id(&id)?;

    state
        .item_service
        .toggle_item(&principal, item_id)
        .await
        .map_err(ApiError::from)
        .map(|ref item| {
            ApiSuccess::with_message(
                StatusCode::OK,
                "Item toggled successfully",
                ToggleResponseData { item: item.into() },
            )
        })
}
