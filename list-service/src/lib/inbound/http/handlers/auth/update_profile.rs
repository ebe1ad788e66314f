use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use serde::Deserialize;

use super::UserResponseData;
use crate::domain::access::models::Principal;
use crate::domain::list::models::Currency;
use crate::domain::user::models::DisplayName;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::Theme;
use crate::domain::user::models::UpdateProfileCommand;
use crate::domain::user::models::UserPreferences;
use crate::domain::user::ports::UserServicePort;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiJson;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::handlers::FieldErrors;
use crate::inbound::http::router::AppState;

#[derive(Debug, Deserialize)]
pub struct UpdateProfileRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub preferences: Option<PreferencesRequest>,
}

/// Missing keys keep the stored preference.
#[derive(Debug, Deserialize)]
pub struct PreferencesRequest {
    pub theme: Option<String>,
    pub currency: Option<String>,
}

impl UpdateProfileRequest {
    fn try_into_command(self, current: UserPreferences) -> Result<UpdateProfileCommand, ApiError> {
        let mut errors = FieldErrors::default();

        let name = match self.name {
            Some(name) => errors.take("name", DisplayName::new(name)).map(Some),
            None => Some(None),
        };
        let email = match self.email {
            Some(email) => errors.take("email", EmailAddress::new(email)).map(Some),
            None => Some(None),
        };

        let preferences = match self.preferences {
            Some(prefs) => {
                let mut merged = current;
                if let Some(theme) = prefs.theme {
                    match theme.as_str() {
                        "light" => merged.theme = Theme::Light,
                        "dark" => merged.theme = Theme::Dark,
                        _ => errors.push("preferences.theme", "Theme must be light or dark"),
                    }
                }
                if let Some(currency) = prefs.currency {
                    if let Some(currency) =
                        errors.take("preferences.currency", currency.parse::<Currency>())
                    {
                        merged.currency = currency;
                    }
                }
                Some(merged)
            }
            None => None,
        };

        let (Some(name), Some(email)) = (name, email) else {
            return Err(errors.into_error());
        };
        if !errors.is_empty() {
            return Err(errors.into_error());
        }

        Ok(UpdateProfileCommand {
            name,
            email,
            preferences,
        })
    }
}

pub async fn update_profile(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    ApiJson(req): ApiJson<UpdateProfileRequest>,
) -> Result<ApiSuccess<UserResponseData>, ApiError> {
    let current = state.user_service.get_user(&principal.user_id).await?;
    let command = req.try_into_command(current.preferences)?;

    state
        .user_service
        .update_profile(&principal.user_id, command)
        .await
        .map_err(ApiError::from)
        .map(|ref user| {
            ApiSuccess::with_message(
                StatusCode::OK,
                "Profile updated successfully",
                UserResponseData { user: user.into() },
            )
        })
}
