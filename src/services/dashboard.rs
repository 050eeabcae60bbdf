//! Dashboard summary

use crate::{
    error::AppResult,
    models::dashboard::{DashboardSummary, ToolStatusCount},
};

use super::Services;

impl Services {
    /// Gather the dashboard figures from the other services
    pub async fn dashboard(&self) -> AppResult<DashboardSummary> {
        let tools_by_status: Vec<ToolStatusCount> = self
            .tools
            .count_by_status()
            .await?
            .into_iter()
            .map(|(status, count)| ToolStatusCount { status, count })
            .collect();
        let total_tools = tools_by_status.iter().map(|c| c.count).sum();

        let (project_count, total_budget) = self.projects.totals().await?;
        let (material_cost, labor_cost) = self.records.cost_totals().await?;

        Ok(DashboardSummary {
            total_tools,
            tools_by_status,
            open_assignments: self.assignments.count_open().await?,
            open_maintenance: self.maintenance.count_open().await?,
            project_count,
            total_budget,
            material_cost,
            labor_cost,
            latest_forecast: self.forecasting.latest_result().await?,
        })
    }
}
