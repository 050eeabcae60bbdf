//! Tool assignments repository

use chrono::NaiveDate;
use sqlx::{PgConnection, Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::{
        assignment::{AssignmentQuery, ToolAssignment},
        enums::AssignmentStatus,
    },
};

const SELECT_WITH_TOOL: &str = r#"
    SELECT a.*, sn.serial_number, sn.tool_id, t.name AS tool_name
    FROM tool_assignments a
    JOIN tool_serial_numbers sn ON sn.id = a.serial_number_id
    JOIN tools t ON t.id = sn.tool_id
"#;

/// Columns of a new assignment
pub struct NewAssignment<'a> {
    pub project_id: i32,
    pub serial_number_id: i32,
    pub assigned_date: NaiveDate,
    pub return_date: Option<NaiveDate>,
    pub notes: Option<&'a str>,
}

#[derive(Clone)]
pub struct AssignmentsRepository {
    pool: Pool<Postgres>,
}

impl AssignmentsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// List assignments with their serial number and tool
    pub async fn list(&self, query: &AssignmentQuery) -> AppResult<Vec<ToolAssignment>> {
        let mut conditions: Vec<String> = Vec::new();

        macro_rules! add_condition {
            ($field:expr, $clause:literal) => {
                if $field.is_some() {
                    conditions.push(format!($clause, conditions.len() + 1));
                }
            };
        }

        add_condition!(query.project_id, "a.project_id = ${}");
        add_condition!(query.serial_number_id, "a.serial_number_id = ${}");
        add_condition!(query.status, "a.status = ${}");
        add_condition!(query.from, "a.assigned_date >= ${}");
        add_condition!(query.to, "a.assigned_date <= ${}");

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };

        let sql = format!(
            "{} {} ORDER BY a.assigned_date DESC, a.id DESC",
            SELECT_WITH_TOOL, where_clause
        );

        let mut builder = sqlx::query_as::<_, ToolAssignment>(&sql);
        macro_rules! bind_field {
            ($field:expr) => {
                if let Some(val) = $field {
                    builder = builder.bind(val);
                }
            };
        }

        bind_field!(query.project_id);
        bind_field!(query.serial_number_id);
        bind_field!(query.status);
        bind_field!(query.from);
        bind_field!(query.to);

        Ok(builder.fetch_all(&self.pool).await?)
    }

    /// Get assignment by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<ToolAssignment> {
        sqlx::query_as::<_, ToolAssignment>(&format!("{} WHERE a.id = $1", SELECT_WITH_TOOL))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Tool assignment {} not found", id)))
    }

    /// Count assignments not yet returned
    pub async fn count_open(&self) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM tool_assignments WHERE status = $1")
            .bind(AssignmentStatus::Assigned)
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    // ---- Transaction steps ----

    pub async fn insert(
        &self,
        conn: &mut PgConnection,
        data: &NewAssignment<'_>,
    ) -> AppResult<ToolAssignment> {
        let row = sqlx::query_as::<_, ToolAssignment>(
            r#"
            INSERT INTO tool_assignments (project_id, serial_number_id, assigned_date, return_date, status, notes)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(data.project_id)
        .bind(data.serial_number_id)
        .bind(data.assigned_date)
        .bind(data.return_date)
        .bind(AssignmentStatus::Assigned)
        .bind(data.notes)
        .fetch_one(&mut *conn)
        .await?;
        Ok(row)
    }

    /// Lock an assignment row
    pub async fn lock(&self, conn: &mut PgConnection, id: i32) -> AppResult<ToolAssignment> {
        sqlx::query_as::<_, ToolAssignment>("SELECT * FROM tool_assignments WHERE id = $1 FOR UPDATE")
            .bind(id)
            .fetch_optional(&mut *conn)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Tool assignment {} not found", id)))
    }

    /// Close an assignment
    pub async fn mark_returned(
        &self,
        conn: &mut PgConnection,
        id: i32,
        return_date: NaiveDate,
        notes: Option<&str>,
    ) -> AppResult<ToolAssignment> {
        let row = sqlx::query_as::<_, ToolAssignment>(
            r#"
            UPDATE tool_assignments
            SET status = $1, return_date = $2, notes = COALESCE($3, notes)
            WHERE id = $4
            RETURNING *
            "#,
        )
        .bind(AssignmentStatus::Returned)
        .bind(return_date)
        .bind(notes)
        .bind(id)
        .fetch_one(&mut *conn)
        .await?;
        Ok(row)
    }

    /// Update planned return date and notes of an open assignment
    pub async fn update_details(
        &self,
        conn: &mut PgConnection,
        id: i32,
        return_date: Option<NaiveDate>,
        notes: Option<&str>,
    ) -> AppResult<ToolAssignment> {
        let row = sqlx::query_as::<_, ToolAssignment>(
            r#"
            UPDATE tool_assignments
            SET return_date = COALESCE($1, return_date), notes = COALESCE($2, notes)
            WHERE id = $3
            RETURNING *
            "#,
        )
        .bind(return_date)
        .bind(notes)
        .bind(id)
        .fetch_one(&mut *conn)
        .await?;
        Ok(row)
    }

    /// Whether any unit of the tool is out on an open assignment
    pub async fn has_open_for_tool(&self, conn: &mut PgConnection, tool_id: i32) -> AppResult<bool> {
        let open: bool = sqlx::query_scalar(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM tool_assignments a
                JOIN tool_serial_numbers sn ON sn.id = a.serial_number_id
                WHERE sn.tool_id = $1 AND a.status = $2
            )
            "#,
        )
        .bind(tool_id)
        .bind(AssignmentStatus::Assigned)
        .fetch_one(&mut *conn)
        .await?;
        Ok(open)
    }
}
