use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;

use super::UserResponseData;
use crate::domain::access::models::Principal;
use crate::domain::user::ports::UserServicePort;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::router::AppState;

pub async fn me(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
) -> Result<ApiSuccess<UserResponseData>, ApiError> {
    state
        .user_service
        .get_user(&principal.user_id)
        .await
        .map_err(ApiError::from)
        .map(|ref user| {
            ApiSuccess::new(
                StatusCode::OK,
                UserResponseData {
                    user: user.into(),
                },
            )
        })
}
