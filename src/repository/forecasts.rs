//! Cost history, trained models and forecast results

use rust_decimal::Decimal;
use sqlx::{PgConnection, Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    forecast::ForecastPoint,
    models::forecast::{
        ForecastItem, ForecastModel, ForecastResult, ForecastWithItems, HistoricalCostInput,
        HistorySummary,
    },
};

#[derive(Clone)]
pub struct ForecastsRepository {
    pool: Pool<Postgres>,
}

impl ForecastsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    // ---- History ----

    pub async fn insert_history(
        &self,
        conn: &mut PgConnection,
        records: &[HistoricalCostInput],
    ) -> AppResult<u64> {
        let mut inserted = 0;
        for record in records {
            let result = sqlx::query(
                "INSERT INTO historical_costs (period_date, cost, category) VALUES ($1, $2, $3)",
            )
            .bind(record.date)
            .bind(record.cost)
            .bind(&record.category)
            .execute(&mut *conn)
            .await?;
            inserted += result.rows_affected();
        }
        Ok(inserted)
    }

    /// Count and mean of the uploaded history
    pub async fn history_summary(&self) -> AppResult<HistorySummary> {
        let summary = sqlx::query_as::<_, HistorySummary>(
            "SELECT COUNT(*) AS data_points, ROUND(AVG(cost), 2) AS mean_cost FROM historical_costs",
        )
        .fetch_one(&self.pool)
        .await?;
        Ok(summary)
    }

    // ---- Models ----

    pub async fn insert_model(
        &self,
        name: &str,
        parameters: &serde_json::Value,
        data_points: i64,
        mean_cost: Option<Decimal>,
    ) -> AppResult<ForecastModel> {
        let row = sqlx::query_as::<_, ForecastModel>(
            r#"
            INSERT INTO forecast_models (name, parameters, data_points, mean_cost)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(name)
        .bind(parameters)
        .bind(data_points)
        .bind(mean_cost)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    pub async fn get_model(&self, id: i32) -> AppResult<ForecastModel> {
        sqlx::query_as::<_, ForecastModel>("SELECT * FROM forecast_models WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Forecast model {} not found", id)))
    }

    // ---- Results ----

    /// Store a forecast header and its points
    pub async fn create_result(
        &self,
        conn: &mut PgConnection,
        name: &str,
        model_parameters: &serde_json::Value,
        points: &[ForecastPoint],
    ) -> AppResult<ForecastWithItems> {
        let forecast = sqlx::query_as::<_, ForecastResult>(
            r#"
            INSERT INTO forecast_results (name, duration, model_parameters)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(name)
        .bind(points.len() as i32)
        .bind(model_parameters)
        .fetch_one(&mut *conn)
        .await?;

        let mut items = Vec::with_capacity(points.len());
        for point in points {
            let item = sqlx::query_as::<_, ForecastItem>(
                "INSERT INTO forecast_items (forecast_id, date, cost) VALUES ($1, $2, $3) RETURNING *",
            )
            .bind(forecast.id)
            .bind(point.date)
            .bind(point.cost)
            .fetch_one(&mut *conn)
            .await?;
            items.push(item);
        }

        Ok(ForecastWithItems { forecast, items })
    }

    /// Forecast headers, newest first
    pub async fn list_results(&self) -> AppResult<Vec<ForecastResult>> {
        let rows = sqlx::query_as::<_, ForecastResult>(
            "SELECT * FROM forecast_results ORDER BY created_at DESC, id DESC",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn get_result(&self, id: i32) -> AppResult<ForecastWithItems> {
        let forecast =
            sqlx::query_as::<_, ForecastResult>("SELECT * FROM forecast_results WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?
                .ok_or_else(|| AppError::NotFound(format!("Forecast {} not found", id)))?;

        let items = sqlx::query_as::<_, ForecastItem>(
            "SELECT * FROM forecast_items WHERE forecast_id = $1 ORDER BY date",
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await?;

        Ok(ForecastWithItems { forecast, items })
    }

    /// Most recent forecast header, if any
    pub async fn latest_result(&self) -> AppResult<Option<ForecastResult>> {
        let row = sqlx::query_as::<_, ForecastResult>(
            "SELECT * FROM forecast_results ORDER BY created_at DESC, id DESC LIMIT 1",
        )
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }
}
