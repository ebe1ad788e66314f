use axum::http::StatusCode;
use axum::Extension;
use axum_extra::extract::CookieJar;

use super::expired_refresh_cookie;
use crate::domain::access::models::Principal;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::handlers::Empty;

pub async fn logout(
    Extension(principal): Extension<Principal>,
    jar: CookieJar,
) -> Result<(CookieJar, ApiSuccess<Empty>), ApiError> {
    tracing::info!(user_id = %principal.user_id, "User logged out");

    Ok((
        jar.remove(expired_refresh_cookie()),
        ApiSuccess::with_message(StatusCode::OK, "Logged out successfully", Empty {}),
    ))
}
