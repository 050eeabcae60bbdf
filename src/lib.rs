//! BuildTrack construction back office
//!
//! REST JSON API for tool inventory, tool assignments and maintenance,
//! project cost records and cost forecasting.

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

pub mod api;
pub mod config;
pub mod error;
pub mod forecast;
pub mod inventory;
pub mod models;
pub mod repository;
pub mod services;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub services: Arc<services::Services>,
}

/// Create the application router with all routes
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_routes = Router::new()
        // Health
        .route("/health", get(api::health::health_check))
        .route("/ready", get(api::health::readiness_check))
        // Tools
        .route("/tools", get(api::tools::list_tools).post(api::tools::create_tool))
        .route(
            "/tools/:id",
            get(api::tools::get_tool)
                .patch(api::tools::update_tool)
                .delete(api::tools::delete_tool),
        )
        // Assignments
        .route(
            "/tool-assignments",
            get(api::assignments::list_assignments).post(api::assignments::create_assignment),
        )
        .route(
            "/tool-assignments/:id",
            get(api::assignments::get_assignment).patch(api::assignments::update_assignment),
        )
        // Maintenance
        .route(
            "/maintenance",
            get(api::maintenance::list_maintenance).post(api::maintenance::create_maintenance),
        )
        .route(
            "/maintenance/:id",
            get(api::maintenance::get_maintenance).patch(api::maintenance::update_maintenance),
        )
        // Projects
        .route("/projects", get(api::projects::list_projects))
        .route("/projects/:id", get(api::projects::get_project))
        // Records
        .route(
            "/materials",
            get(api::records::list_materials).post(api::records::create_material),
        )
        .route("/labor", get(api::records::list_labor).post(api::records::create_labor))
        // Forecasting
        .route("/forecasting/upload", post(api::forecasting::upload))
        .route("/forecasting/train", post(api::forecasting::train))
        .route("/forecasting/forecast", post(api::forecasting::forecast))
        .route("/forecasting/results", get(api::forecasting::list_results))
        .route("/forecasting/results/:id", get(api::forecasting::get_result))
        .route("/forecasting/report", post(api::forecasting::report))
        .route("/forecasting/email-report", post(api::forecasting::email_report))
        // Dashboard
        .route("/dashboard", get(api::dashboard::get_dashboard))
        .with_state(state);

    Router::new()
        .nest("/api", api_routes)
        .merge(api::openapi::create_openapi_router())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
