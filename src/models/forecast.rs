//! Cost forecasting models

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

/// Uploaded historical cost point
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct HistoricalCost {
    pub id: i32,
    pub period_date: NaiveDate,
    pub cost: Decimal,
    pub category: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HistoricalCostInput {
    pub date: NaiveDate,
    pub cost: Decimal,
    pub category: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UploadRequest {
    #[validate(length(min = 1, message = "At least one record is required"))]
    pub records: Vec<HistoricalCostInput>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UploadResponse {
    pub inserted: u64,
}

/// Stored "trained" model (parameters are opaque to the server)
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct ForecastModel {
    pub id: i32,
    pub name: String,
    #[schema(value_type = Object)]
    pub parameters: serde_json::Value,
    pub data_points: i64,
    pub mean_cost: Option<Decimal>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct TrainRequest {
    #[validate(length(min = 1, message = "Model name is required"))]
    pub name: String,
    #[serde(default)]
    #[schema(value_type = Object)]
    pub parameters: serde_json::Value,
}

/// Summary of the uploaded history
#[derive(Debug, Clone, Default, FromRow)]
pub struct HistorySummary {
    pub data_points: i64,
    pub mean_cost: Option<Decimal>,
}

/// Forecast header row
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct ForecastResult {
    pub id: i32,
    pub name: String,
    /// Horizon in months
    pub duration: i32,
    #[schema(value_type = Object)]
    pub model_parameters: serde_json::Value,
    pub created_at: DateTime<Utc>,
}

/// One (date, cost) point of a forecast
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct ForecastItem {
    pub id: i32,
    pub forecast_id: i32,
    pub date: NaiveDate,
    pub cost: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ForecastWithItems {
    #[serde(flatten)]
    pub forecast: ForecastResult,
    pub items: Vec<ForecastItem>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct ForecastRequest {
    #[validate(length(min = 1, message = "Forecast name is required"))]
    pub name: String,
    /// Number of months to forecast
    #[validate(range(min = 1, message = "Horizon must be at least one month"))]
    pub horizon: u32,
    /// Opaque model parameters stored with the result
    #[schema(value_type = Option<Object>)]
    pub parameters: Option<serde_json::Value>,
    /// Use the parameters of a trained model
    pub model_id: Option<i32>,
    /// Series starts the month after this date (defaults to today)
    pub start_date: Option<NaiveDate>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct ReportRequest {
    pub forecast_id: i32,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct EmailReportRequest {
    pub forecast_id: i32,
    #[validate(email(message = "Invalid recipient address"))]
    pub recipient: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct EmailReportResponse {
    pub forecast_id: i32,
    pub recipient: String,
    pub sent: bool,
}
