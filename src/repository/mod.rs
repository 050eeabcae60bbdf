//! Repository layer for database operations
//!
//! Methods taking `&self` run on the pool. Methods that also take a
//! `&mut PgConnection` are steps of a larger unit of work and run on the
//! caller's transaction.

pub mod assignments;
pub mod forecasts;
pub mod maintenance;
pub mod projects;
pub mod records;
pub mod serial_numbers;
pub mod tools;

use sqlx::{Pool, Postgres};

/// Main repository struct holding database connection pool
#[derive(Clone)]
pub struct Repository {
    pub pool: Pool<Postgres>,
    pub tools: tools::ToolsRepository,
    pub serial_numbers: serial_numbers::SerialNumbersRepository,
    pub assignments: assignments::AssignmentsRepository,
    pub maintenance: maintenance::MaintenanceRepository,
    pub projects: projects::ProjectsRepository,
    pub records: records::RecordsRepository,
    pub forecasts: forecasts::ForecastsRepository,
}

impl Repository {
    /// Create a new repository with the given database pool
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self {
            tools: tools::ToolsRepository::new(pool.clone()),
            serial_numbers: serial_numbers::SerialNumbersRepository::new(pool.clone()),
            assignments: assignments::AssignmentsRepository::new(pool.clone()),
            maintenance: maintenance::MaintenanceRepository::new(pool.clone()),
            projects: projects::ProjectsRepository::new(pool.clone()),
            records: records::RecordsRepository::new(pool.clone()),
            forecasts: forecasts::ForecastsRepository::new(pool.clone()),
            pool,
        }
    }

    /// Round-trip to the database
    pub async fn ping(&self) -> crate::error::AppResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
