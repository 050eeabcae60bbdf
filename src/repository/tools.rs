//! Tools repository for database operations

use chrono::{NaiveDate, Utc};
use sqlx::{PgConnection, Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::{
        enums::ToolStatus,
        tool::{CreateTool, SerialNumber, Tool, ToolQuery, UpdateTool},
    },
};

#[derive(Clone)]
pub struct ToolsRepository {
    pool: Pool<Postgres>,
}

impl ToolsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// List tools, optionally filtered by status and name
    pub async fn list(&self, query: &ToolQuery) -> AppResult<Vec<Tool>> {
        let mut conditions = Vec::new();
        let mut idx = 1;

        if query.status.is_some() {
            conditions.push(format!("status = ${}", idx));
            idx += 1;
        }
        if query.name.is_some() {
            conditions.push(format!("name ILIKE ${}", idx));
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };

        let sql = format!("SELECT * FROM tools {} ORDER BY name, id", where_clause);

        let mut builder = sqlx::query_as::<_, Tool>(&sql);
        if let Some(status) = query.status {
            builder = builder.bind(status);
        }
        if let Some(ref name) = query.name {
            builder = builder.bind(format!("%{}%", name));
        }

        Ok(builder.fetch_all(&self.pool).await?)
    }

    /// Get tool by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<Tool> {
        sqlx::query_as::<_, Tool>("SELECT * FROM tools WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Tool {} not found", id)))
    }

    /// Serial numbers of several tools, grouped by tool
    pub async fn serials_for_tools(&self, tool_ids: &[i32]) -> AppResult<Vec<SerialNumber>> {
        let rows = sqlx::query_as::<_, SerialNumber>(
            "SELECT * FROM tool_serial_numbers WHERE tool_id = ANY($1) ORDER BY tool_id, serial_number",
        )
        .bind(tool_ids)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Count tools per aggregate status (for the dashboard)
    pub async fn count_by_status(&self) -> AppResult<Vec<(ToolStatus, i64)>> {
        let rows = sqlx::query_as::<_, (ToolStatus, i64)>(
            "SELECT status, COUNT(*) FROM tools GROUP BY status",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    // ---- Transaction steps ----

    pub async fn insert(
        &self,
        conn: &mut PgConnection,
        data: &CreateTool,
        quantity: i32,
        status: ToolStatus,
    ) -> AppResult<Tool> {
        let row = sqlx::query_as::<_, Tool>(
            r#"
            INSERT INTO tools (name, quantity, status, condition, last_maintenance_date)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(data.name.trim())
        .bind(quantity)
        .bind(status)
        .bind(&data.condition)
        .bind(data.last_maintenance_date)
        .fetch_one(&mut *conn)
        .await?;
        Ok(row)
    }

    /// Lock the tool row for the rest of the transaction
    pub async fn lock(&self, conn: &mut PgConnection, id: i32) -> AppResult<Tool> {
        sqlx::query_as::<_, Tool>("SELECT * FROM tools WHERE id = $1 FOR UPDATE")
            .bind(id)
            .fetch_optional(&mut *conn)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Tool {} not found", id)))
    }

    /// Update the editable columns; `quantity` overrides `data.quantity`
    pub async fn update_fields(
        &self,
        conn: &mut PgConnection,
        id: i32,
        data: &UpdateTool,
        quantity: Option<i32>,
    ) -> AppResult<Tool> {
        let now = Utc::now();
        let mut sets = vec!["updated_at = $1".to_string()];
        let mut idx = 2;

        macro_rules! add_field {
            ($field:expr, $name:expr) => {
                if $field.is_some() {
                    sets.push(format!("{} = ${}", $name, idx));
                    idx += 1;
                }
            };
        }

        add_field!(data.name, "name");
        add_field!(quantity, "quantity");
        add_field!(data.condition, "condition");
        add_field!(data.last_maintenance_date, "last_maintenance_date");

        let sql = format!(
            "UPDATE tools SET {} WHERE id = ${} RETURNING *",
            sets.join(", "),
            idx
        );

        let mut builder = sqlx::query_as::<_, Tool>(&sql).bind(now);

        macro_rules! bind_field {
            ($field:expr) => {
                if let Some(ref val) = $field {
                    builder = builder.bind(val);
                }
            };
        }

        let name = data.name.as_deref().map(str::trim);
        bind_field!(name);
        bind_field!(quantity);
        bind_field!(data.condition);
        bind_field!(data.last_maintenance_date);

        builder
            .bind(id)
            .fetch_optional(&mut *conn)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Tool {} not found", id)))
    }

    pub async fn set_status(
        &self,
        conn: &mut PgConnection,
        id: i32,
        status: ToolStatus,
    ) -> AppResult<()> {
        sqlx::query("UPDATE tools SET status = $1, updated_at = $2 WHERE id = $3")
            .bind(status)
            .bind(Utc::now())
            .bind(id)
            .execute(&mut *conn)
            .await?;
        Ok(())
    }

    pub async fn set_last_maintenance_date(
        &self,
        conn: &mut PgConnection,
        id: i32,
        date: NaiveDate,
    ) -> AppResult<()> {
        sqlx::query("UPDATE tools SET last_maintenance_date = $1, updated_at = $2 WHERE id = $3")
            .bind(date)
            .bind(Utc::now())
            .bind(id)
            .execute(&mut *conn)
            .await?;
        Ok(())
    }

    /// Delete a tool (serial numbers and their history cascade)
    pub async fn delete(&self, conn: &mut PgConnection, id: i32) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM tools WHERE id = $1")
            .bind(id)
            .execute(&mut *conn)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Tool {} not found", id)));
        }
        Ok(())
    }
}
