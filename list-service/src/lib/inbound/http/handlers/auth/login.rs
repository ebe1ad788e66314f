use axum::extract::State;
use axum::http::StatusCode;
use axum_extra::extract::CookieJar;
use serde::Deserialize;

use super::refresh_cookie;
use super::SessionResponseData;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::LoginCommand;
use crate::domain::user::ports::UserServicePort;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiJson;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::handlers::FieldErrors;
use crate::inbound::http::router::AppState;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

impl LoginRequest {
    fn try_into_command(self) -> Result<LoginCommand, ApiError> {
        let mut errors = FieldErrors::default();

        let email = errors.take("email", EmailAddress::new(self.email));
        if self.password.is_empty() {
            errors.push("password", "Password is required");
        }

        match email {
            Some(email) if errors.is_empty() => Ok(LoginCommand {
                email,
                password: self.password,
            }),
            _ => Err(errors.into_error()),
        }
    }
}

pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    ApiJson(req): ApiJson<LoginRequest>,
) -> Result<(CookieJar, ApiSuccess<SessionResponseData>), ApiError> {
    let command = req.try_into_command()?;

    // Unknown email and wrong password surface as the same 401.
    let user = state.user_service.verify_credentials(command).await?;

    let tokens = state
        .authenticator
        .issue_tokens(user.id)
        .map_err(|e| ApiError::InternalServerError(format!("Token generation failed: {}", e)))?;

    tracing::info!(user_id = %user.id, "User logged in");

    Ok((
        jar.add(refresh_cookie(
            tokens.refresh_token,
            state.secure_cookies,
            state.refresh_cookie_max_age,
        )),
        ApiSuccess::with_message(
            StatusCode::OK,
            "Login successful",
            SessionResponseData {
                user: (&user).into(),
                token: tokens.access_token,
            },
        ),
    ))
}
