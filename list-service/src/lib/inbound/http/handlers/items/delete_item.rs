use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;

use crate::domain::access::models::Principal;
use crate::domain::item::ports::ItemServicePort;
use crate::inbound::http::handlers::parse_item_id;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::handlers::Empty;
use crate::inbound::http::router::AppState;

pub async fn delete_item(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<String>,
) -> Result<ApiSuccess<Empty>, ApiError> {
    let item_id = parse_item_id(&id)?;

    state.item_service.delete_item(&principal, item_id).await?;

    Ok(ApiSuccess::with_message(
        StatusCode::OK,
        "Item deleted successfully",
        Empty {},
    ))
}
