use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use serde::Deserialize;

use super::ItemResponseData;
use crate::domain::access::models::Principal;
use crate::domain::item::models::ItemName;
use crate::domain::item::models::ItemNotes;
use crate::domain::item::models::UpdateItemCommand;
use crate::domain::item::ports::ItemServicePort;
use crate::inbound::http::handlers::parse_item_id;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiJson;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::handlers::FieldErrors;
use crate::inbound::http::router::AppState;

/// HTTP request body for updating an item. Absent fields are left untouched.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateItemRequest {
    pub name: Option<String>,
    pub quantity: Option<String>,
    pub store: Option<String>,
    pub section: Option<String>,
    pub notes: Option<String>,
    pub priority: Option<i32>,
    pub is_done: Option<bool>,
}

impl UpdateItemRequest {
    fn try_into_command(self) -> Result<UpdateItemCommand, ApiError> {
        let mut errors = FieldErrors::default();

        let command = UpdateItemCommand {
            name: self
                .name
                .and_then(|name| errors.take("name", ItemName::new(name))),
            quantity: self.quantity.map(|q| q.trim().to_string()),
            store: self.store.map(|s| s.trim().to_string()),
            section: self.section.map(|s| s.trim().to_string()),
            notes: self
                .notes
                .and_then(|notes| errors.take("notes", ItemNotes::new(notes))),
            priority: self.priority,
            is_done: self.is_done,
        };

        if errors.is_empty() {
            Ok(command)
        } else {
            Err(errors.into_error())
        }
    }
}

pub async fn update_item(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<String>,
    ApiJson(req): ApiJson<UpdateItemRequest>,
) -> Result<ApiSuccess<ItemResponseData>, ApiError> {
    let item_id = parse_item_id(&id)?;
    let command = req.try_into_command()?;

    state
        .item_service
        .update_item(&principal, item_id, command)
        .await
        .map_err(ApiError::from)
        .map(|ref item| {
            ApiSuccess::with_message(
                StatusCode::OK,
                "Item updated successfully",
                ItemResponseData { item: item.into() },
            )
        })
}
