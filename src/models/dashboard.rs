//! Dashboard summary model

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::{enums::ToolStatus, forecast::ForecastResult};

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ToolStatusCount {
    pub status: ToolStatus,
    pub count: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DashboardSummary {
    pub total_tools: i64,
    pub tools_by_status: Vec<ToolStatusCount>,
    /// Assignments not yet returned
    pub open_assignments: i64,
    /// Schedules scheduled or in progress
    pub open_maintenance: i64,
    pub project_count: i64,
    pub total_budget: Decimal,
    pub material_cost: Decimal,
    pub labor_cost: Decimal,
    pub latest_forecast: Option<ForecastResult>,
}
