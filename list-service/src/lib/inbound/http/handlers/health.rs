use axum::http::StatusCode;
use chrono::DateTime;
use chrono::Utc;
use serde::Serialize;

use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HealthData {
    pub timestamp: DateTime<Utc>,
}

pub async fn health() -> Result<ApiSuccess<HealthData>, ApiError> {
    Ok(ApiSuccess::with_message(
        StatusCode::OK,
        "Server is running",
        HealthData {
            timestamp: Utc::now(),
        },
    ))
}
