//! Projects repository (read-only)

use rust_decimal::Decimal;
use sqlx::{PgConnection, Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::project::{Project, ProjectQuery},
};

#[derive(Clone)]
pub struct ProjectsRepository {
    pool: Pool<Postgres>,
}

impl ProjectsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    pub async fn list(&self, query: &ProjectQuery) -> AppResult<Vec<Project>> {
        let mut conditions: Vec<String> = Vec::new();

        if query.status.is_some() {
            conditions.push(format!("status = ${}", conditions.len() + 1));
        }
        if query.project_type.is_some() {
            conditions.push(format!("project_type = ${}", conditions.len() + 1));
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };

        let sql = format!(
            "SELECT * FROM projects {} ORDER BY start_date DESC NULLS LAST, id",
            where_clause
        );

        let mut builder = sqlx::query_as::<_, Project>(&sql);
        if let Some(ref status) = query.status {
            builder = builder.bind(status);
        }
        if let Some(ref project_type) = query.project_type {
            builder = builder.bind(project_type);
        }

        Ok(builder.fetch_all(&self.pool).await?)
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<Project> {
        sqlx::query_as::<_, Project>("SELECT * FROM projects WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Project {} not found", id)))
    }

    /// Number of projects and their summed budget
    pub async fn totals(&self) -> AppResult<(i64, Decimal)> {
        let (count, budget): (i64, Option<Decimal>) =
            sqlx::query_as("SELECT COUNT(*), SUM(budget) FROM projects")
                .fetch_one(&self.pool)
                .await?;
        Ok((count, budget.unwrap_or_default()))
    }

    /// NotFound unless the project exists (inside a transaction)
    pub async fn ensure_exists(&self, conn: &mut PgConnection, id: i32) -> AppResult<()> {
        let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM projects WHERE id = $1)")
            .bind(id)
            .fetch_one(&mut *conn)
            .await?;
        if !exists {
            return Err(AppError::NotFound(format!("Project {} not found", id)));
        }
        Ok(())
    }
}
