//! Serial numbers repository (units of a tool)

use sqlx::{PgConnection, Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::{enums::SerialStatus, tool::SerialNumber},
};

#[derive(Clone)]
pub struct SerialNumbersRepository {
    pool: Pool<Postgres>,
}

impl SerialNumbersRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Serial numbers of one tool
    pub async fn list_for_tool(&self, tool_id: i32) -> AppResult<Vec<SerialNumber>> {
        let rows = sqlx::query_as::<_, SerialNumber>(
            "SELECT * FROM tool_serial_numbers WHERE tool_id = $1 ORDER BY serial_number",
        )
        .bind(tool_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    // ---- Transaction steps ----

    /// Resolve a serial string, optionally scoped to one tool.
    ///
    /// Serial strings are only unique within a tool, so an unscoped lookup
    /// matching several units is rejected.
    pub async fn find_by_serial(
        &self,
        conn: &mut PgConnection,
        serial: &str,
        tool_id: Option<i32>,
    ) -> AppResult<SerialNumber> {
        let mut rows = match tool_id {
            Some(tool_id) => {
                sqlx::query_as::<_, SerialNumber>(
                    "SELECT * FROM tool_serial_numbers WHERE serial_number = $1 AND tool_id = $2",
                )
                .bind(serial)
                .bind(tool_id)
                .fetch_all(&mut *conn)
                .await?
            }
            None => {
                sqlx::query_as::<_, SerialNumber>(
                    "SELECT * FROM tool_serial_numbers WHERE serial_number = $1 LIMIT 2",
                )
                .bind(serial)
                .fetch_all(&mut *conn)
                .await?
            }
        };

        match rows.len() {
            0 => Err(AppError::NotFound(format!("Serial number {} not found", serial))),
            1 => Ok(rows.remove(0)),
            _ => Err(AppError::Validation(format!(
                "Serial number {} exists on several tools; specify tool_id",
                serial
            ))),
        }
    }

    /// Re-read and lock one unit
    pub async fn lock(&self, conn: &mut PgConnection, id: i32) -> AppResult<SerialNumber> {
        sqlx::query_as::<_, SerialNumber>(
            "SELECT * FROM tool_serial_numbers WHERE id = $1 FOR UPDATE",
        )
        .bind(id)
        .fetch_optional(&mut *conn)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Serial number {} not found", id)))
    }

    /// Units of a tool, locked for the rest of the transaction
    pub async fn lock_for_tool(
        &self,
        conn: &mut PgConnection,
        tool_id: i32,
    ) -> AppResult<Vec<SerialNumber>> {
        let rows = sqlx::query_as::<_, SerialNumber>(
            "SELECT * FROM tool_serial_numbers WHERE tool_id = $1 ORDER BY serial_number FOR UPDATE",
        )
        .bind(tool_id)
        .fetch_all(&mut *conn)
        .await?;
        Ok(rows)
    }

    /// Current statuses of every unit of a tool
    pub async fn statuses_for_tool(
        &self,
        conn: &mut PgConnection,
        tool_id: i32,
    ) -> AppResult<Vec<SerialStatus>> {
        let rows = sqlx::query_scalar::<_, SerialStatus>(
            "SELECT status FROM tool_serial_numbers WHERE tool_id = $1",
        )
        .bind(tool_id)
        .fetch_all(&mut *conn)
        .await?;
        Ok(rows)
    }

    pub async fn set_status(
        &self,
        conn: &mut PgConnection,
        id: i32,
        status: SerialStatus,
    ) -> AppResult<()> {
        let result = sqlx::query("UPDATE tool_serial_numbers SET status = $1 WHERE id = $2")
            .bind(status)
            .bind(id)
            .execute(&mut *conn)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Serial number {} not found", id)));
        }
        Ok(())
    }

    /// Insert new `Available` units for a tool
    pub async fn insert_many(
        &self,
        conn: &mut PgConnection,
        tool_id: i32,
        serials: &[String],
    ) -> AppResult<()> {
        for serial in serials {
            sqlx::query(
                "INSERT INTO tool_serial_numbers (tool_id, serial_number, status) VALUES ($1, $2, $3)",
            )
            .bind(tool_id)
            .bind(serial)
            .bind(SerialStatus::Available)
            .execute(&mut *conn)
            .await?;
        }
        Ok(())
    }

    pub async fn delete(&self, conn: &mut PgConnection, id: i32) -> AppResult<()> {
        sqlx::query("DELETE FROM tool_serial_numbers WHERE id = $1")
            .bind(id)
            .execute(&mut *conn)
            .await?;
        Ok(())
    }
}
