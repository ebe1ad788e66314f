use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use serde::Deserialize;

use super::ItemResponseData;
use crate::domain::access::models::Principal;
use crate::domain::item::models::CreateItemCommand;
use crate::domain::item::models::ItemName;
use crate::domain::item::models::ItemNotes;
use crate::domain::item::ports::ItemServicePort;
use crate::inbound::http::handlers::parse_list_id;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiJson;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::handlers::FieldErrors;
use crate::inbound::http::router::AppState;

/// HTTP request body for adding an item (raw JSON)
#[derive(Debug, Deserialize)]
pub struct CreateItemRequest {
    #[serde(default)]
    pub name: String,
    pub quantity: Option<String>,
    pub store: Option<String>,
    pub section: Option<String>,
    pub notes: Option<String>,
    pub priority: Option<i32>,
}

impl CreateItemRequest {
    fn try_into_command(self) -> Result<CreateItemCommand, ApiError> {
        let mut errors = FieldErrors::default();

        let name = errors.take("name", ItemName::new(self.name));
        let notes = match self.notes {
            Some(notes) => errors.take("notes", ItemNotes::new(notes)),
            None => Some(ItemNotes::default()),
        };

        let (Some(name), Some(notes)) = (name, notes) else {
            return Err(errors.into_error());
        };

        Ok(CreateItemCommand {
            name,
            quantity: self.quantity.map(|q| q.trim().to_string()),
            store: self.store.map(|s| s.trim().to_string()),
            section: self
                .section
                .map(|s| s.trim().to_string())
                .unwrap_or_default(),
            notes,
            priority: self.priority,
        })
    }
}

pub async fn create_item(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(list_id): Path<String>,
    ApiJson(req): ApiJson<CreateItemRequest>,
) -> Result<ApiSuccess<ItemResponseData>, ApiError> {
    let list_id = parse_list_id(&list_id)?;
    let command = req.try_into_command()?;

    state
        .item_service
        .create_item(&principal, list_id, command)
        .await
        .map_err(ApiError::from)
        .map(|ref item| {
            ApiSuccess::with_message(
                StatusCode::CREATED,
                "Item created successfully",
                ItemResponseData { item: item.into() },
            )
        })
}
