//! Material and labor records kept per project

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

/// Material purchase booked against a project
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct MaterialRecord {
    pub id: i32,
    pub project_id: i32,
    pub name: String,
    pub quantity: Decimal,
    /// Unit of measure (m, kg, bag, ...)
    pub unit: Option<String>,
    pub unit_cost: Decimal,
    pub supplier: Option<String>,
    pub purchase_date: NaiveDate,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateMaterialRecord {
    pub project_id: i32,
    #[validate(length(min = 1, message = "Material name is required"))]
    pub name: String,
    pub quantity: Decimal,
    pub unit: Option<String>,
    pub unit_cost: Decimal,
    pub supplier: Option<String>,
    /// Defaults to today
    pub purchase_date: Option<NaiveDate>,
    pub notes: Option<String>,
}

/// Hours worked on a project
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct LaborRecord {
    pub id: i32,
    pub project_id: i32,
    pub worker_name: String,
    pub role: Option<String>,
    pub hours: Decimal,
    pub hourly_rate: Decimal,
    pub work_date: NaiveDate,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateLaborRecord {
    pub project_id: i32,
    #[validate(length(min = 1, message = "Worker name is required"))]
    pub worker_name: String,
    pub role: Option<String>,
    pub hours: Decimal,
    pub hourly_rate: Decimal,
    /// Defaults to today
    pub work_date: Option<NaiveDate>,
    pub notes: Option<String>,
}

/// Filters shared by material and labor listings
#[derive(Debug, Default, Deserialize, IntoParams, ToSchema)]
#[into_params(parameter_in = Query)]
pub struct RecordQuery {
    pub project_id: Option<i32>,
    /// On or after (YYYY-MM-DD)
    pub from: Option<NaiveDate>,
    /// On or before (YYYY-MM-DD)
    pub to: Option<NaiveDate>,
}
