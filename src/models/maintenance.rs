//! Maintenance schedule model

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use super::enums::{MaintenanceStatus, MaintenanceType, ToolStatus};

/// Planned or in-progress service event for one serial number
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct MaintenanceSchedule {
    pub id: i32,
    pub tool_id: i32,
    pub serial_number_id: i32,
    pub scheduled_date: NaiveDate,
    pub maintenance_type: MaintenanceType,
    pub status: MaintenanceStatus,
    pub notes: Option<String>,
    pub completed_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
}

/// Create maintenance schedule request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateMaintenance {
    pub tool_id: i32,
    pub serial_number_id: i32,
    pub scheduled_date: NaiveDate,
    pub maintenance_type: MaintenanceType,
    pub notes: Option<String>,
}

/// Update maintenance schedule request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateMaintenance {
    pub status: Option<MaintenanceStatus>,
    pub scheduled_date: Option<NaiveDate>,
    pub notes: Option<String>,
}

/// Maintenance list filters
#[derive(Debug, Default, Deserialize, IntoParams, ToSchema)]
#[into_params(parameter_in = Query)]
pub struct MaintenanceQuery {
    pub tool_id: Option<i32>,
    pub serial_number_id: Option<i32>,
    pub status: Option<MaintenanceStatus>,
    /// Scheduled on or after (YYYY-MM-DD)
    pub from: Option<NaiveDate>,
    /// Scheduled on or before (YYYY-MM-DD)
    pub to: Option<NaiveDate>,
}

/// Schedule change together with the resulting tool status
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MaintenanceOutcome {
    pub schedule: MaintenanceSchedule,
    pub tool_status: ToolStatus,
}
