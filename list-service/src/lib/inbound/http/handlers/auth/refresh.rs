use axum::extract::State;
use axum::http::StatusCode;
use axum_extra::extract::CookieJar;
use serde::Serialize;

use super::REFRESH_COOKIE;
use crate::domain::user::models::UserId;
use crate::domain::user::ports::UserServicePort;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::router::AppState;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RefreshResponseData {
    pub token: String,
}

/// Trade the refresh cookie for a new access token.
///
/// The refresh token itself is not rotated.
pub async fn refresh(
    State(state): State<AppState>,
    jar: CookieJar,
) -> Result<ApiSuccess<RefreshResponseData>, ApiError> {
    let Some(cookie) = jar.get(REFRESH_COOKIE) else {
        tracing::warn!("Token refresh attempted without refresh cookie");
        return Err(ApiError::Unauthorized(
            "No refresh token provided".to_string(),
        ));
    };

    let invalid = || ApiError::Unauthorized("Invalid refresh token".to_string());

    let claims = state
        .authenticator
        .validate_refresh_token(cookie.value())
        .map_err(|e| {
            tracing::warn!(error = %e, "Refresh token rejected");
            invalid()
        })?;

    let user_id = claims
        .sub
        .as_deref()
        .and_then(|sub| UserId::from_string(sub).ok())
        .ok_or_else(invalid)?;

    let user = state.user_service.get_user(&user_id).await.map_err(|e| {
        tracing::warn!(user_id = %user_id, error = %e, "Refresh for unknown user");
        ApiError::Unauthorized("User not found".to_string())
    })?;

    let token = state
        .authenticator
        .issue_access_token(user.id)
        .map_err(|e| ApiError::InternalServerError(format!("Token generation failed: {}", e)))?;

    tracing::debug!(user_id = %user.id, "Access token refreshed");

    Ok(ApiSuccess::new(StatusCode::OK, RefreshResponseData { token }))
}
