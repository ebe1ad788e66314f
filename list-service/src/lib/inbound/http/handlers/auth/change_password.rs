use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use serde::Deserialize;

use crate::domain::access::models::Principal;
use crate::domain::user::models::ChangePasswordCommand;
use crate::domain::user::models::Password;
use crate::domain::user::ports::UserServicePort;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiJson;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::handlers::Empty;
use crate::inbound::http::handlers::FieldErrors;
use crate::inbound::http::router::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    #[serde(default)]
    pub current_password: String,
    #[serde(default)]
    pub new_password: String,
}

impl ChangePasswordRequest {
    fn try_into_command(self) -> Result<ChangePasswordCommand, ApiError> {
        let mut errors = FieldErrors::default();

        if self.current_password.is_empty() {
            errors.push("currentPassword", "Current password is required");
        }
        let new_password = errors.take("newPassword", Password::new(self.new_password));

        match new_password {
            Some(new_password) if errors.is_empty() => Ok(ChangePasswordCommand {
                current_password: self.current_password,
                new_password,
            }),
            _ => Err(errors.into_error()),
        }
    }
}

pub async fn change_password(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    ApiJson(req): ApiJson<ChangePasswordRequest>,
) -> Result<ApiSuccess<Empty>, ApiError> {
    let command = req.try_into_command()?;

    state
        .user_service
        .change_password(&principal.user_id, command)
        .await
        .map_err(ApiError::from)
        .map(|_| {
            ApiSuccess::with_message(StatusCode::OK, "Password changed successfully", Empty {})
        })
}
