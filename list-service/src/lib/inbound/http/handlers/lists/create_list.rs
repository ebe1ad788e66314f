use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use serde::Deserialize;

use super::ListResponseData;
use crate::domain::access::models::Principal;
use crate::domain::list::models::Budget;
use crate::domain::list::models::CreateListCommand;
use crate::domain::list::models::Currency;
use crate::domain::list::models::HexColor;
use crate::domain::list::models::ListName;
use crate::domain::list::ports::ListServicePort;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiJson;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::handlers::FieldErrors;
use crate::inbound::http::router::AppState;

/// HTTP request body for creating a list (raw JSON)
#[derive(Debug, Deserialize)]
pub struct CreateListRequest {
    #[serde(default)]
    pub name: String,
    pub store: Option<String>,
    pub color: Option<String>,
    pub budget: Option<f64>,
    pub currency: Option<String>,
}

impl CreateListRequest {
    fn try_into_command(self) -> Result<CreateListCommand, ApiError> {
        let mut errors = FieldErrors::default();

        let name = errors.take("name", ListName::new(self.name));
        let color = match self.color {
            Some(color) => errors.take("color", HexColor::new(color)),
            None => Some(HexColor::default()),
        };
        let budget = match self.budget {
            Some(amount) => errors.take("budget", Budget::new(amount)).map(Some),
            None => Some(None),
        };
        let currency = match self.currency {
            Some(currency) => errors.take("currency", currency.parse::<Currency>()),
            None => Some(Currency::default()),
        };

        let (Some(name), Some(color), Some(budget), Some(currency)) =
            (name, color, budget, currency)
        else {
            return Err(errors.into_error());
        };

        Ok(CreateListCommand {
            name,
            store: self.store.map(|s| s.trim().to_string()).unwrap_or_default(),
            color,
            budget,
            currency,
        })
    }
}

pub async fn create_list(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    ApiJson(req): ApiJson<CreateListRequest>,
) -> Result<ApiSuccess<ListResponseData>, ApiError> {
    let command = req.try_into_command()?;

    state
        .list_service
        .create_list(&principal, command)
        .await
        .map_err(ApiError::from)
        .map(|ref list| {
            ApiSuccess::with_message(
                StatusCode::CREATED,
                "List created successfully",
                ListResponseData { list: list.into() },
            )
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(name: &str) -> CreateListRequest {
        CreateListRequest {
            name: name.to_string(),
            store: None,
            color: None,
            budget: None,
            currency: None,
        }
    }

    #[test]
    fn test_defaults_are_applied() {
        let command = request("Groceries").try_into_command().unwrap();

        assert_eq!(command.name.as_str(), "Groceries");
        assert_eq!(command.store, "");
        assert_eq!(command.color, HexColor::default());
        assert_eq!(command.budget, None);
        assert_eq!(command.currency, Currency::Usd);
    }

    #[test]
    fn test_every_bad_field_is_reported() {
        let req = CreateListRequest {
            color: Some("blue".to_string()),
            budget: Some(-1.0),
            currency: Some("XYZ".to_string()),
            ..request("  ")
        };

        let Err(ApiError::Validation(errors)) = req.try_into_command() else {
            panic!("expected validation error");
        };
        let fields: Vec<&str> = errors.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(fields, vec!["name", "color", "budget", "currency"]);
        assert_eq!(errors[0].message, "List name is required");
    }
}
