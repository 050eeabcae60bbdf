//! Material and labor records repository

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::{Pool, Postgres};

use crate::{
    error::AppResult,
    models::record::{
        CreateLaborRecord, CreateMaterialRecord, LaborRecord, MaterialRecord, RecordQuery,
    },
};

/// WHERE clause for project / date-range filters on `date_column`
fn record_filter(query: &RecordQuery, date_column: &str) -> String {
    let mut conditions: Vec<String> = Vec::new();
    if query.project_id.is_some() {
        conditions.push(format!("project_id = ${}", conditions.len() + 1));
    }
    if query.from.is_some() {
        conditions.push(format!("{} >= ${}", date_column, conditions.len() + 1));
    }
    if query.to.is_some() {
        conditions.push(format!("{} <= ${}", date_column, conditions.len() + 1));
    }
    if conditions.is_empty() {
        String::new()
    } else {
        format!("WHERE {}", conditions.join(" AND "))
    }
}

#[derive(Clone)]
pub struct RecordsRepository {
    pool: Pool<Postgres>,
}

impl RecordsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    // ---- Materials ----

    pub async fn list_materials(&self, query: &RecordQuery) -> AppResult<Vec<MaterialRecord>> {
        let sql = format!(
            "SELECT * FROM materials {} ORDER BY purchase_date DESC, id DESC",
            record_filter(query, "purchase_date")
        );
        let mut builder = sqlx::query_as::<_, MaterialRecord>(&sql);

        macro_rules! bind_field {
            ($field:expr) => {
                if let Some(val) = $field {
                    builder = builder.bind(val);
                }
            };
        }

        bind_field!(query.project_id);
        bind_field!(query.from);
        bind_field!(query.to);

        Ok(builder.fetch_all(&self.pool).await?)
    }

    pub async fn create_material(
        &self,
        data: &CreateMaterialRecord,
        purchase_date: NaiveDate,
    ) -> AppResult<MaterialRecord> {
        let row = sqlx::query_as::<_, MaterialRecord>(
            r#"
            INSERT INTO materials (project_id, name, quantity, unit, unit_cost, supplier, purchase_date, notes)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING *
            "#,
        )
        .bind(data.project_id)
        .bind(data.name.trim())
        .bind(data.quantity)
        .bind(&data.unit)
        .bind(data.unit_cost)
        .bind(&data.supplier)
        .bind(purchase_date)
        .bind(&data.notes)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    /// Sum of quantity × unit cost over all materials
    pub async fn material_cost_total(&self) -> AppResult<Decimal> {
        let total: Option<Decimal> =
            sqlx::query_scalar("SELECT SUM(quantity * unit_cost) FROM materials")
                .fetch_one(&self.pool)
                .await?;
        Ok(total.unwrap_or_default())
    }

    // ---- Labor ----

    pub async fn list_labor(&self, query: &RecordQuery) -> AppResult<Vec<LaborRecord>> {
        let sql = format!(
            "SELECT * FROM labor_records {} ORDER BY work_date DESC, id DESC",
            record_filter(query, "work_date")
        );
        let mut builder = sqlx::query_as::<_, LaborRecord>(&sql);

        macro_rules! bind_field {
            ($field:expr) => {
                if let Some(val) = $field {
                    builder = builder.bind(val);
                }
            };
        }

        bind_field!(query.project_id);
        bind_field!(query.from);
        bind_field!(query.to);

        Ok(builder.fetch_all(&self.pool).await?)
    }

    pub async fn create_labor(
        &self,
        data: &CreateLaborRecord,
        work_date: NaiveDate,
    ) -> AppResult<LaborRecord> {
        let row = sqlx::query_as::<_, LaborRecord>(
            r#"
            INSERT INTO labor_records (project_id, worker_name, role, hours, hourly_rate, work_date, notes)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(data.project_id)
        .bind(data.worker_name.trim())
        .bind(&data.role)
        .bind(data.hours)
        .bind(data.hourly_rate)
        .bind(work_date)
        .bind(&data.notes)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    /// Sum of hours × hourly rate over all labor records
    pub async fn labor_cost_total(&self) -> AppResult<Decimal> {
        let total: Option<Decimal> =
            sqlx::query_scalar("SELECT SUM(hours * hourly_rate) FROM labor_records")
                .fetch_one(&self.pool)
                .await?;
        Ok(total.unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_numbers_placeholders_in_bind_order() {
        let query = RecordQuery {
            project_id: Some(3),
            from: None,
            to: NaiveDate::from_ymd_opt(2025, 6, 30),
        };
        assert_eq!(
            record_filter(&query, "work_date"),
            "WHERE project_id = $1 AND work_date <= $2"
        );
        assert_eq!(record_filter(&RecordQuery::default(), "work_date"), "");
    }
}
