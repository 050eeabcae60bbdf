//! Tool assignment model

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use super::enums::{AssignmentStatus, ToolStatus};

/// Assignment of one serial number to a project
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct ToolAssignment {
    pub id: i32,
    pub project_id: i32,
    pub serial_number_id: i32,
    pub assigned_date: NaiveDate,
    /// Planned return date while assigned, actual return date once returned
    pub return_date: Option<NaiveDate>,
    pub status: AssignmentStatus,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    // Joined columns (None when not selected)
    #[sqlx(default)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub serial_number: Option<String>,
    #[sqlx(default)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_id: Option<i32>,
    #[sqlx(default)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_name: Option<String>,
}

/// Create assignment request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateAssignment {
    pub project_id: i32,
    /// Serial string of the unit to assign
    #[validate(length(min = 1, message = "Serial number is required"))]
    pub serial_number: String,
    /// Disambiguates serial strings shared by several tools
    pub tool_id: Option<i32>,
    /// Defaults to today
    pub assigned_date: Option<NaiveDate>,
    pub return_date: Option<NaiveDate>,
    pub notes: Option<String>,
}

/// Update assignment request; `status = Returned` closes the assignment
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateAssignment {
    pub status: Option<AssignmentStatus>,
    pub return_date: Option<NaiveDate>,
    pub notes: Option<String>,
}

/// Assignment list filters
#[derive(Debug, Default, Deserialize, IntoParams, ToSchema)]
#[into_params(parameter_in = Query)]
pub struct AssignmentQuery {
    pub project_id: Option<i32>,
    pub serial_number_id: Option<i32>,
    pub status: Option<AssignmentStatus>,
    /// Assigned on or after (YYYY-MM-DD)
    pub from: Option<NaiveDate>,
    /// Assigned on or before (YYYY-MM-DD)
    pub to: Option<NaiveDate>,
}

/// Assignment change together with the resulting tool status
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AssignmentOutcome {
    pub assignment: ToolAssignment,
    pub tool_id: i32,
    pub tool_status: ToolStatus,
}
