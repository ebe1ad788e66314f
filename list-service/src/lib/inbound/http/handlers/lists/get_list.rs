use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;

use super::ListResponseData;
use crate::domain::access::models::Principal;
use crate::domain::list::ports::ListServicePort;
use crate::inbound::http::handlers::parse_list_id;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::router::AppState;

pub async fn get_list(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<String>,
) -> Result<ApiSuccess<ListResponseData>, ApiError> {
    let list_id = parse_list_id(&id)?;

    state
        .list_service
        .get_list(&principal, list_id)
        .await
        .map_err(ApiError::from)
        .map(|ref list| ApiSuccess::new(StatusCode::OK, ListResponseData { list: list.into() }))
}
