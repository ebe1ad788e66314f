use std::fmt::Display;

use axum::extract::rejection::JsonRejection;
use axum::extract::rejection::QueryRejection;
use axum::extract::FromRequest;
use axum::extract::FromRequestParts;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use serde::Serialize;
use uuid::Uuid;

use crate::domain::item::errors::ItemError;
use crate::domain::item::models::ItemId;
use crate::domain::list::errors::ListError;
use crate::domain::list::models::ListId;
use crate::domain::user::errors::UserError;

pub mod auth;
pub mod health;
pub mod items;
pub mod lists;

#[derive(Debug, Clone)]
pub struct ApiSuccess<T: Serialize + PartialEq>(StatusCode, Json<ApiResponseBody<T>>);

impl<T> PartialEq for ApiSuccess<T>
where
    T: Serialize + PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0 && self.1 .0 == other.1 .0
    }
}

impl<T: Serialize + PartialEq> ApiSuccess<T> {
    pub fn new(status: StatusCode, data: T) -> Self {
        ApiSuccess(status, Json(ApiResponseBody::new(None, data)))
    }

    pub fn with_message(status: StatusCode, message: &str, data: T) -> Self {
        ApiSuccess(
            status,
            Json(ApiResponseBody::new(Some(message.to_string()), data)),
        )
    }
}

impl<T: Serialize + PartialEq> IntoResponse for ApiSuccess<T> {
    fn into_response(self) -> Response {
        (self.0, self.1).into_response()
    }
}

/// `{success: true, message?, ...data}`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ApiResponseBody<T: Serialize + PartialEq> {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
    #[serde(flatten)]
    data: T,
}

impl<T: Serialize + PartialEq> ApiResponseBody<T> {
    pub fn new(message: Option<String>, data: T) -> Self {
        Self {
            success: true,
            message,
            data,
        }
    }
}

/// Payload for responses that carry only a message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Empty {}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    InternalServerError(String),
    BadRequest(String),
    Validation(Vec<FieldError>),
    NotFound(String),
    Unauthorized(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiErrorBody {
    success: bool,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    errors: Option<Vec<FieldError>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl ApiErrorBody {
    fn new(message: String) -> Self {
        Self {
            success: false,
            message,
            errors: None,
            error: None,
        }
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(e: anyhow::Error) -> Self {
        Self::InternalServerError(e.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ApiError::InternalServerError(detail) => {
                tracing::error!(error = %detail, "Request failed");
                let mut body = ApiErrorBody::new("Internal server error".to_string());
                if cfg!(debug_assertions) {
                    body.error = Some(detail);
                }
                (StatusCode::INTERNAL_SERVER_ERROR, body)
            }
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, ApiErrorBody::new(msg)),
            ApiError::Validation(errors) => {
                let mut body = ApiErrorBody::new("Validation failed".to_string());
                body.errors = Some(errors);
                (StatusCode::BAD_REQUEST, body)
            }
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, ApiErrorBody::new(msg)),
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, ApiErrorBody::new(msg)),
        };

        (status, Json(body)).into_response()
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<UserError> for ApiError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::NotFound(_) => ApiError::NotFound("User not found".to_string()),
            UserError::EmailAlreadyExists(_) | UserError::EmailInUse(_) => {
                ApiError::BadRequest(err.to_string())
            }
            UserError::InvalidCredentials | UserError::IncorrectPassword => {
                ApiError::Unauthorized(err.to_string())
            }
            UserError::InvalidUserId(_)
            | UserError::InvalidEmail(_)
            | UserError::InvalidDisplayName(_)
            | UserError::InvalidPassword(_)
            | UserError::InvalidRole(_) => ApiError::BadRequest(err.to_string()),
            UserError::PasswordHashing(_) | UserError::DatabaseError(_) | UserError::Unknown(_) => {
                ApiError::InternalServerError(err.to_string())
            }
        }
    }
}

impl From<ListError> for ApiError {
    fn from(err: ListError) -> Self {
        match err {
            ListError::NotFound(_) => ApiError::NotFound(err.to_string()),
            ListError::InvalidListId(_)
            | ListError::InvalidName(_)
            | ListError::InvalidColor(_)
            | ListError::InvalidBudget(_)
            | ListError::InvalidCurrency(_)
            | ListError::InvalidShareRole(_) => ApiError::BadRequest(err.to_string()),
            ListError::DatabaseError(_) | ListError::Unknown(_) => {
                ApiError::InternalServerError(err.to_string())
            }
        }
    }
}

impl From<ItemError> for ApiError {
    fn from(err: ItemError) -> Self {
        match err {
            ItemError::NotFound(_) | ItemError::ListNotFound(_) | ItemError::ItemsNotFound => {
                ApiError::NotFound(err.to_string())
            }
            ItemError::InvalidItemId(_)
            | ItemError::InvalidName(_)
            | ItemError::InvalidNotes(_)
            | ItemError::InvalidReorder(_) => ApiError::BadRequest(err.to_string()),
            ItemError::DatabaseError(_) | ItemError::Unknown(_) => {
                ApiError::InternalServerError(err.to_string())
            }
        }
    }
}

/// JSON body extractor whose rejections use the API error shape.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);

/// Query string extractor whose rejections use the API error shape.
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(ApiError))]
pub struct ApiQuery<T>(pub T);

/// Collects per-field validation failures while a request body is turned
/// into a command.
#[derive(Debug, Default)]
pub struct FieldErrors(Vec<FieldError>);

impl FieldErrors {
    /// Record the error of `result` under `field`, if any.
    pub fn take<T, E: Display>(&mut self, field: &str, result: Result<T, E>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(e) => {
                self.0.push(FieldError {
                    field: field.to_string(),
                    message: e.to_string(),
                });
                None
            }
        }
    }

    pub fn push(&mut self, field: &str, message: &str) {
        self.0.push(FieldError {
            field: field.to_string(),
            message: message.to_string(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_error(self) -> ApiError {
        ApiError::Validation(self.0)
    }
}

/// Malformed ids answer exactly like unknown ones.
pub fn parse_list_id(raw: &str) -> Result<ListId, ApiError> {
    ListId::from_string(raw).map_err(|_| ApiError::from(ListError::NotFound(ListId(Uuid::nil()))))
}

pub fn parse_item_id(raw: &str) -> Result<ItemId, ApiError> {
    ItemId::from_string(raw).map_err(|_| ApiError::from(ItemError::NotFound(ItemId(Uuid::nil()))))
}
