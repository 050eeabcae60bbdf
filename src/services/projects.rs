//! Project catalog service

use rust_decimal::Decimal;

use crate::{
    error::AppResult,
    models::project::{Project, ProjectQuery},
    repository::Repository,
};

#[derive(Clone)]
pub struct ProjectsService {
    repository: Repository,
}

impl ProjectsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list(&self, query: &ProjectQuery) -> AppResult<Vec<Project>> {
        self.repository.projects.list(query).await
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<Project> {
        self.repository.projects.get_by_id(id).await
    }

    /// Project count and total budget (for the dashboard)
    pub async fn totals(&self) -> AppResult<(i64, Decimal)> {
        self.repository.projects.totals().await
    }
}
