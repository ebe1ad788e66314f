use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use serde::Deserialize;

use super::ListResponseData;
use crate::domain::access::models::Principal;
use crate::domain::list::models::Budget;
use crate::domain::list::models::Currency;
use crate::domain::list::models::HexColor;
use crate::domain::list::models::ListName;
use crate::domain::list::models::UpdateListCommand;
use crate::domain::list::ports::ListServicePort;
use crate::inbound::http::handlers::parse_list_id;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiJson;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::handlers::FieldErrors;
use crate::inbound::http::router::AppState;

/// HTTP request body for updating a list. Absent fields are left untouched.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateListRequest {
    pub name: Option<String>,
    pub store: Option<String>,
    pub color: Option<String>,
    pub is_archived: Option<bool>,
    pub budget: Option<f64>,
    pub currency: Option<String>,
}

impl UpdateListRequest {
    fn try_into_command(self) -> Result<UpdateListCommand, ApiError> {
        let mut errors = FieldErrors::default();

        let command = UpdateListCommand {
            name: self
                .name
                .and_then(|name| errors.take("name", ListName::new(name))),
            store: self.store.map(|s| s.trim().to_string()),
            color: self
                .color
                .and_then(|color| errors.take("color", HexColor::new(color))),
            is_archived: self.is_archived,
            budget: self
                .budget
                .and_then(|amount| errors.take("budget", Budget::new(amount))),
            currency: self
                .currency
                .and_then(|currency| errors.take("currency", currency.parse::<Currency>())),
        };

        if errors.is_empty() {
            Ok(command)
        } else {
            Err(errors.into_error())
        }
    }
}

pub async fn update_list(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<String>,
    ApiJson(req): ApiJson<UpdateListRequest>,
) -> Result<ApiSuccess<ListResponseData>, ApiError> {
    let list_id = parse_list_id(&id)?;
    let command = req.try_into_command()?;

    state
        .list_service
        .update_list(&principal, list_id, command)
        .await
        .map_err(ApiError::from)
        .map(|ref list| {
            ApiSuccess::with_message(
                StatusCode::OK,
                "List updated successfully",
                ListResponseData { list: list.into() },
            )
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_body_is_a_no_op_command() {
        let command = UpdateListRequest::default().try_into_command().unwrap();
        assert!(command.name.is_none());
        assert!(command.is_archived.is_none());
    }

    #[test]
    fn test_invalid_color_is_rejected() {
        let req = UpdateListRequest {
            color: Some("#12345G".to_string()),
            ..Default::default()
        };

        let Err(ApiError::Validation(errors)) = req.try_into_command() else {
            panic!("expected validation error");
        };
        assert_eq!(errors[0].field, "color");
        assert_eq!(errors[0].message, "Please provide a valid hex color");
    }
}
