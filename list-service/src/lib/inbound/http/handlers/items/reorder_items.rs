use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use serde::Deserialize;
use serde::Serialize;

use crate::domain::access::models::Principal;
use crate::domain::item::errors::ItemError;
use crate::domain::item::models::ItemId;
use crate::domain::item::models::PriorityAssignment;
use crate::domain::item::models::ReorderCommand;
use crate::domain::item::ports::ItemServicePort;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiJson;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::handlers::FieldErrors;
use crate::inbound::http::router::AppState;

#[derive(Debug, Deserialize)]
pub struct ReorderRequest {
    #[serde(default)]
    pub items: Vec<ReorderEntry>,
}

#[derive(Debug, Deserialize)]
pub struct ReorderEntry {
    pub id: String,
    pub priority: i32,
}

impl ReorderRequest {
    fn try_into_command(self) -> Result<ReorderCommand, ApiError> {
        // An id that cannot exist is reported like one that is not owned.
        let assignments = self
            .items
            .into_iter()
            .map(|entry| {
                ItemId::from_string(&entry.id)
                    .map(|item_id| PriorityAssignment {
                        item_id,
                        priority: entry.priority,
                    })
                    .map_err(|_| ApiError::from(ItemError::ItemsNotFound))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let mut errors = FieldErrors::default();
        errors
            .take("items", ReorderCommand::new(assignments))
            .ok_or_else(|| errors.into_error())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReorderResponseData {
    pub updated: usize,
}

/// Rewrite priorities in bulk. Either every id is owned and all rows are
/// written, or nothing is.
pub async fn reorder_items(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    ApiJson(req): ApiJson<ReorderRequest>,
) -> Result<ApiSuccess<ReorderResponseData>, ApiError> {
    let command = req.try_into_command()?;

    state
        .item_service
        .reorder_items(&principal, command)
        .await
        .map_err(ApiError::from)
        .map(|updated| {
            ApiSuccess::with_message(
                StatusCode::OK,
                "Items reordered successfully",
                ReorderResponseData { updated },
            )
        })
}
