//! Maintenance schedules repository

use chrono::NaiveDate;
use sqlx::{PgConnection, Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::{
        enums::{MaintenanceStatus, MaintenanceType},
        maintenance::{CreateMaintenance, MaintenanceQuery, MaintenanceSchedule},
    },
};

#[derive(Clone)]
pub struct MaintenanceRepository {
    pool: Pool<Postgres>,
}

impl MaintenanceRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// List schedules, optionally filtered
    pub async fn list(&self, query: &MaintenanceQuery) -> AppResult<Vec<MaintenanceSchedule>> {
        let mut conditions: Vec<String> = Vec::new();

        macro_rules! add_condition {
            ($field:expr, $clause:literal) => {
                if $field.is_some() {
                    conditions.push(format!($clause, conditions.len() + 1));
                }
            };
        }

        add_condition!(query.tool_id, "tool_id = ${}");
        add_condition!(query.serial_number_id, "serial_number_id = ${}");
        add_condition!(query.status, "status = ${}");
        add_condition!(query.from, "scheduled_date >= ${}");
        add_condition!(query.to, "scheduled_date <= ${}");

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };

        let sql = format!(
            "SELECT * FROM maintenance_schedules {} ORDER BY scheduled_date, id",
            where_clause
        );

        let mut builder = sqlx::query_as::<_, MaintenanceSchedule>(&sql);
        macro_rules! bind_field {
            ($field:expr) => {
                if let Some(val) = $field {
                    builder = builder.bind(val);
                }
            };
        }

        bind_field!(query.tool_id);
        bind_field!(query.serial_number_id);
        bind_field!(query.status);
        bind_field!(query.from);
        bind_field!(query.to);

        Ok(builder.fetch_all(&self.pool).await?)
    }

    /// Get schedule by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<MaintenanceSchedule> {
        sqlx::query_as::<_, MaintenanceSchedule>("SELECT * FROM maintenance_schedules WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Maintenance schedule {} not found", id)))
    }

    /// Count schedules still open (scheduled or in progress)
    pub async fn count_open(&self) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM maintenance_schedules WHERE status IN ($1, $2)",
        )
        .bind(MaintenanceStatus::Scheduled)
        .bind(MaintenanceStatus::InProgress)
        .fetch_one(&self.pool)
        .await?;
        Ok(count)
    }

    // ---- Transaction steps ----

    pub async fn insert(
        &self,
        conn: &mut PgConnection,
        data: &CreateMaintenance,
    ) -> AppResult<MaintenanceSchedule> {
        let row = sqlx::query_as::<_, MaintenanceSchedule>(
            r#"
            INSERT INTO maintenance_schedules (tool_id, serial_number_id, scheduled_date, maintenance_type, status, notes)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(data.tool_id)
        .bind(data.serial_number_id)
        .bind(data.scheduled_date)
        .bind(data.maintenance_type)
        .bind(MaintenanceStatus::Scheduled)
        .bind(&data.notes)
        .fetch_one(&mut *conn)
        .await?;
        Ok(row)
    }

    pub async fn lock(&self, conn: &mut PgConnection, id: i32) -> AppResult<MaintenanceSchedule> {
        sqlx::query_as::<_, MaintenanceSchedule>(
            "SELECT * FROM maintenance_schedules WHERE id = $1 FOR UPDATE",
        )
        .bind(id)
        .fetch_optional(&mut *conn)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Maintenance schedule {} not found", id)))
    }

    /// Whether another open repair still holds this unit
    pub async fn has_other_open_repair(
        &self,
        conn: &mut PgConnection,
        serial_number_id: i32,
        exclude_id: i32,
    ) -> AppResult<bool> {
        let open: bool = sqlx::query_scalar(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM maintenance_schedules
                WHERE serial_number_id = $1 AND id <> $2
                  AND maintenance_type = $3 AND status IN ($4, $5)
            )
            "#,
        )
        .bind(serial_number_id)
        .bind(exclude_id)
        .bind(MaintenanceType::Repair)
        .bind(MaintenanceStatus::Scheduled)
        .bind(MaintenanceStatus::InProgress)
        .fetch_one(&mut *conn)
        .await?;
        Ok(open)
    }

    /// Write status, date, notes and completion date; `None` keeps the column
    pub async fn update(
        &self,
        conn: &mut PgConnection,
        id: i32,
        status: Option<MaintenanceStatus>,
        scheduled_date: Option<NaiveDate>,
        notes: Option<&str>,
        completed_date: Option<NaiveDate>,
    ) -> AppResult<MaintenanceSchedule> {
        let row = sqlx::query_as::<_, MaintenanceSchedule>(
            r#"
            UPDATE maintenance_schedules
            SET status = COALESCE($1, status),
                scheduled_date = COALESCE($2, scheduled_date),
                notes = COALESCE($3, notes),
                completed_date = COALESCE($4, completed_date)
            WHERE id = $5
            RETURNING *
            "#,
        )
        .bind(status)
        .bind(scheduled_date)
        .bind(notes)
        .bind(completed_date)
        .bind(id)
        .fetch_one(&mut *conn)
        .await?;
        Ok(row)
    }
}
