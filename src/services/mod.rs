//! Business logic services

pub mod assignments;
pub mod dashboard;
pub mod email;
pub mod forecasting;
pub mod maintenance;
pub mod projects;
pub mod records;
pub mod tools;

use std::sync::Arc;

use crate::{
    config::AppConfig,
    error::{AppError, AppResult},
    repository::Repository,
};

use email::ReportMailer;

/// Reject a name that is empty once surrounding whitespace is removed
pub(crate) fn ensure_named(name: &str, message: &str) -> AppResult<()> {
    if name.trim().is_empty() {
        return Err(AppError::Validation(message.to_string()));
    }
    Ok(())
}

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub tools: tools::ToolsService,
    pub assignments: assignments::AssignmentsService,
    pub maintenance: maintenance::MaintenanceService,
    pub projects: projects::ProjectsService,
    pub records: records::RecordsService,
    pub forecasting: forecasting::ForecastingService,
    repository: Repository,
}

impl Services {
    /// Create all services with the given repository
    pub fn new(repository: Repository, config: &AppConfig, mailer: Arc<dyn ReportMailer>) -> Self {
        Self {
            tools: tools::ToolsService::new(repository.clone()),
            assignments: assignments::AssignmentsService::new(repository.clone()),
            maintenance: maintenance::MaintenanceService::new(repository.clone()),
            projects: projects::ProjectsService::new(repository.clone()),
            records: records::RecordsService::new(repository.clone()),
            forecasting: forecasting::ForecastingService::new(
                repository.clone(),
                config.forecast.clone(),
                mailer,
            ),
            repository,
        }
    }

    /// Check the database is reachable
    pub async fn ping(&self) -> AppResult<()> {
        self.repository.ping().await
    }
}
