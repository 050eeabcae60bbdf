//! OpenAPI documentation

use axum::Router;
use utoipa::{
    openapi::security::{Http, HttpAuthScheme, SecurityScheme},
    Modify, OpenApi,
};
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{assignments, dashboard, forecasting, health, maintenance, projects, records, tools};

/// Registers the bearer token scheme referenced by the secured paths
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
            );
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    info(
        title = "BuildTrack API",
        version = "0.4.0",
        description = "Construction back office: tools, assignments, maintenance, projects, costs and forecasts.\n\n\
Malformed input and failed validation return 400 Bad Request. A well-formed request that \
clashes with the current state of a record, such as assigning a unit that is already out \
or editing a closed maintenance schedule, returns 409 Conflict instead of 400. Every \
error body has the shape `{code, error, message}`.",
        license(name = "AGPL-3.0", url = "https://www.gnu.org/licenses/agpl-3.0.html")
    ),
    servers(
        (url = "/api", description = "API")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Tools
        tools::list_tools,
        tools::get_tool,
        tools::create_tool,
        tools::update_tool,
        tools::delete_tool,
        // Assignments
        assignments::list_assignments,
        assignments::get_assignment,
        assignments::create_assignment,
        assignments::update_assignment,
        // Maintenance
        maintenance::list_maintenance,
        maintenance::get_maintenance,
        maintenance::create_maintenance,
        maintenance::update_maintenance,
        // Projects
        projects::list_projects,
        projects::get_project,
        // Records
        records::list_materials,
        records::create_material,
        records::list_labor,
        records::create_labor,
        // Forecasting
        forecasting::upload,
        forecasting::train,
        forecasting::forecast,
        forecasting::list_results,
        forecasting::get_result,
        forecasting::report,
        forecasting::email_report,
        // Dashboard
        dashboard::get_dashboard,
    ),
    components(
        schemas(
            crate::models::enums::ToolStatus,
            crate::models::enums::SerialStatus,
            crate::models::enums::AssignmentStatus,
            crate::models::enums::MaintenanceType,
            crate::models::enums::MaintenanceStatus,
            // Tools
            crate::models::tool::Tool,
            crate::models::tool::SerialNumber,
            crate::models::tool::ToolDetails,
            crate::models::tool::CreateTool,
            crate::models::tool::UpdateTool,
            // Assignments
            crate::models::assignment::ToolAssignment,
            crate::models::assignment::CreateAssignment,
            crate::models::assignment::UpdateAssignment,
            crate::models::assignment::AssignmentOutcome,
            // Maintenance
            crate::models::maintenance::MaintenanceSchedule,
            crate::models::maintenance::CreateMaintenance,
            crate::models::maintenance::UpdateMaintenance,
            crate::models::maintenance::MaintenanceOutcome,
            // Projects and records
            crate::models::project::Project,
            crate::models::record::MaterialRecord,
            crate::models::record::CreateMaterialRecord,
            crate::models::record::LaborRecord,
            crate::models::record::CreateLaborRecord,
            // Forecasting
            crate::models::forecast::HistoricalCostInput,
            crate::models::forecast::UploadRequest,
            crate::models::forecast::UploadResponse,
            crate::models::forecast::TrainRequest,
            crate::models::forecast::ForecastModel,
            crate::models::forecast::ForecastRequest,
            crate::models::forecast::ForecastResult,
            crate::models::forecast::ForecastItem,
            crate::models::forecast::ForecastWithItems,
            crate::models::forecast::ReportRequest,
            crate::models::forecast::EmailReportRequest,
            crate::models::forecast::EmailReportResponse,
            crate::forecast::report::ForecastReport,
            crate::forecast::report::ReportPoint,
            // Dashboard
            crate::models::dashboard::DashboardSummary,
            crate::models::dashboard::ToolStatusCount,
            // Health
            health::HealthResponse,
            // Errors
            crate::error::ErrorResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "tools", description = "Tool inventory and serial numbers"),
        (name = "assignments", description = "Tool assignments to projects"),
        (name = "maintenance", description = "Maintenance schedules"),
        (name = "projects", description = "Project catalog"),
        (name = "records", description = "Material and labor records"),
        (name = "forecasting", description = "Cost forecasting"),
        (name = "dashboard", description = "Summary figures")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
