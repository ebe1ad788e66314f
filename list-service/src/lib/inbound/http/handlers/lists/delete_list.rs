use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;

use crate::domain::access::models::Principal;
use crate::domain::list::ports::ListServicePort;
use crate::inbound::http::handlers::parse_list_id;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::handlers::Empty;
use crate::inbound::http::router::AppState;

pub async fn delete_list(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<String>,
) -> Result<ApiSuccess<Empty>, ApiError> {
    let list_id = parse_list_id(&id)?;

    state.list_service.delete_list(&principal, list_id).await?;

    Ok(ApiSuccess::with_message(
        StatusCode::OK,
        "List and associated items deleted successfully",
        Empty {},
    ))
}
