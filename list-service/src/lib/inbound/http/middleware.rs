use auth::JwtError;
use axum::extract::Request;
use axum::extract::State;
use axum::http::header;
use axum::middleware::Next;
use axum::response::IntoResponse;
use axum::response::Response;
use tracing::Span;

use crate::domain::access::models::Principal;
use crate::domain::user::errors::UserError;
use crate::domain::user::models::UserId;
use crate::domain::user::ports::UserServicePort;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::router::AppState;

/// Middleware that validates the bearer access token, confirms the user still
/// exists and stores the [`Principal`] in the request extensions.
pub async fn authenticate(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, Response> {
    let token = extract_bearer_token(&req)
        .ok_or_else(|| unauthorized("Not authorized, no token"))?;

    let claims = state
        .authenticator
        .validate_access_token(token)
        .map_err(|e| {
            tracing::warn!(error = %e, "JWT validation failed");
            match e {
                JwtError::TokenExpired => unauthorized("Token expired"),
                JwtError::TokenNotYetValid => unauthorized("Token not active yet"),
                _ => unauthorized("Invalid token"),
            }
        })?;

    let user_id = claims
        .sub
        .as_deref()
        .and_then(|sub| UserId::from_string(sub).ok())
        .ok_or_else(|| {
            tracing::warn!("Token subject missing or malformed");
            unauthorized("Invalid token")
        })?;

    let user = state
        .user_service
        .get_user(&user_id)
        .await
        .map_err(|e| match e {
            UserError::NotFound(_) => {
                tracing::warn!(user_id = %user_id, "Token for deleted user");
                unauthorized("User not found")
            }
            other => ApiError::from(other).into_response(),
        })?;

    Span::current().record("user_id", tracing::field::display(user.id));
    req.extensions_mut().insert(Principal::new(user.id));

    Ok(next.run(req).await)
}

fn extract_bearer_token(req: &Request) -> Option<&str> {
    req.headers()
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

fn unauthorized(message: &str) -> Response {
    ApiError::Unauthorized(message.to_string()).into_response()
}
