use axum::extract::State;
use axum::http::StatusCode;
use axum_extra::extract::CookieJar;
use serde::Deserialize;

use super::refresh_cookie;
use super::SessionResponseData;
use crate::domain::user::models::DisplayName;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::Password;
use crate::domain::user::models::SignupCommand;
use crate::domain::user::ports::UserServicePort;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiJson;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::handlers::FieldErrors;
use crate::inbound::http::router::AppState;

/// HTTP request body for registering an account (raw JSON)
#[derive(Debug, Deserialize)]
pub struct SignupRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    pub name: Option<String>,
}

impl SignupRequest {
    fn try_into_command(self) -> Result<SignupCommand, ApiError> {
        let mut errors = FieldErrors::default();

        let email = errors.take("email", EmailAddress::new(self.email));
        let password = errors.take("password", Password::new(self.password));
        // A blank name is the same as no name.
        let name = match self.name.filter(|n| !n.trim().is_empty()) {
            Some(name) => errors.take("name", DisplayName::new(name)).map(Some),
            None => Some(None),
        };

        let (Some(email), Some(password), Some(name)) = (email, password, name) else {
            return Err(errors.into_error());
        };

        Ok(SignupCommand {
            email,
            password,
            name,
        })
    }
}

pub async fn signup(
    State(state): State<AppState>,
    jar: CookieJar,
    ApiJson(req): ApiJson<SignupRequest>,
) -> Result<(CookieJar, ApiSuccess<SessionResponseData>), ApiError> {
    let command = req.try_into_command()?;

    let user = state.user_service.register(command).await?;

    let tokens = state
        .authenticator
        .issue_tokens(user.id)
        .map_err(|e| ApiError::InternalServerError(format!("Token generation failed: {}", e)))?;

    Ok((
        jar.add(refresh_cookie(
            tokens.refresh_token,
            state.secure_cookies,
            state.refresh_cookie_max_age,
        )),
        ApiSuccess::with_message(
            StatusCode::CREATED,
            "User registered successfully",
            SessionResponseData {
                user: (&user).into(),
                token: tokens.access_token,
            },
        ),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signup_request_reports_every_invalid_field() {
        let req = SignupRequest {
            email: "nope".to_string(),
            password: "123".to_string(),
            name: Some("   ".to_string()),
        };

        let Err(ApiError::Validation(errors)) = req.try_into_command() else {
            panic!("expected validation error");
        };
        let fields: Vec<&str> = errors.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(fields, vec!["email", "password"]);
    }

    #[test]
    fn test_signup_request_accepts_missing_name() {
        let req = SignupRequest {
            email: "Sam@Example.com".to_string(),
            password: "secret1".to_string(),
            name: None,
        };

        let command = req.try_into_command().unwrap();
        assert_eq!(command.email.as_str(), "sam@example.com");
        assert!(command.name.is_none());
    }
}
