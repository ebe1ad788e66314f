use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use serde::Deserialize;

use super::ListData;
use super::ListsResponseData;
use crate::domain::access::models::Principal;
use crate::domain::list::ports::ListServicePort;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiQuery;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::router::AppState;

/// Only the literal `archived=true` selects archived lists.
#[derive(Debug, Default, Deserialize)]
pub struct ListListsQuery {
    pub archived: Option<String>,
}

pub async fn list_lists(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    ApiQuery(query): ApiQuery<ListListsQuery>,
) -> Result<ApiSuccess<ListsResponseData>, ApiError> {
    let lists = state
        .list_service
        .list_lists(&principal, query.archived.as_deref() == Some("true"))
        .await?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        ListsResponseData {
            count: lists.len(),
            lists: lists.iter().map(ListData::from).collect(),
        },
    ))
}
