use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use axum_extra::extract::CookieJar;

use super::expired_refresh_cookie;
use crate::domain::access::models::Principal;
use crate::domain::user::ports::UserServicePort;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::handlers::Empty;
use crate::inbound::http::router::AppState;

/// Delete the account with all of its lists and items, then clear the session.
pub async fn delete_account(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    jar: CookieJar,
) -> Result<(CookieJar, ApiSuccess<Empty>), ApiError> {
    state.user_service.delete_account(&principal.user_id).await?;

    Ok((
        jar.remove(expired_refresh_cookie()),
        ApiSuccess::with_message(
            StatusCode::OK,
            "Account and all data deleted successfully",
            Empty {},
        ),
    ))
}
