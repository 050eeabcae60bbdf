//! Tool and serial number models

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use super::enums::{SerialStatus, ToolStatus};

/// Tool type as stored in `tools`
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Tool {
    pub id: i32,
    pub name: String,
    pub quantity: i32,
    /// Aggregate status rolled up from the serial numbers
    pub status: ToolStatus,
    /// Free-form condition notes
    pub condition: Option<String>,
    pub last_maintenance_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// One physical unit of a tool
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct SerialNumber {
    pub id: i32,
    pub tool_id: i32,
    /// Unique within its tool
    pub serial_number: String,
    pub status: SerialStatus,
    pub created_at: DateTime<Utc>,
}

/// Tool with its serial numbers nested
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ToolDetails {
    #[serde(flatten)]
    pub tool: Tool,
    pub serial_numbers: Vec<SerialNumber>,
}

/// Create tool request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateTool {
    #[validate(length(min = 1, message = "Tool name is required"))]
    pub name: String,
    /// Defaults to the number of serial numbers
    #[validate(range(min = 0, message = "Quantity cannot be negative"))]
    pub quantity: Option<i32>,
    pub condition: Option<String>,
    pub last_maintenance_date: Option<NaiveDate>,
    #[serde(default)]
    pub serial_numbers: Vec<String>,
}

/// Update tool request
///
/// When `serial_numbers` is present it is the complete new list; rows are
/// added and removed by serial string.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateTool {
    #[validate(length(min = 1, message = "Tool name cannot be empty"))]
    pub name: Option<String>,
    #[validate(range(min = 0, message = "Quantity cannot be negative"))]
    pub quantity: Option<i32>,
    pub condition: Option<String>,
    pub last_maintenance_date: Option<NaiveDate>,
    pub serial_numbers: Option<Vec<String>>,
}

/// Tool list filters
#[derive(Debug, Default, Deserialize, IntoParams, ToSchema)]
#[into_params(parameter_in = Query)]
pub struct ToolQuery {
    pub status: Option<ToolStatus>,
    /// Case-insensitive substring of the tool name
    pub name: Option<String>,
}
