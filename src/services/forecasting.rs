//! Cost forecasting service (stub model)

use std::sync::Arc;

use chrono::Utc;
use rand::{rngs::StdRng, SeedableRng};
use serde_json::{json, Value};

use crate::{
    config::ForecastConfig,
    error::{AppError, AppResult},
    forecast::{generate_series, ForecastReport},
    models::forecast::{
        EmailReportRequest, EmailReportResponse, ForecastModel, ForecastRequest, ForecastResult,
        ForecastWithItems, TrainRequest, UploadRequest, UploadResponse,
    },
    repository::Repository,
};

use super::{email::ReportMailer, ensure_named};

/// Render a report and hand it to the mailer
pub async fn deliver_report(
    mailer: &dyn ReportMailer,
    report: &ForecastReport,
    recipient: &str,
) -> AppResult<()> {
    mailer
        .send(recipient, &report.subject(), &report.render_text())
        .await
}

#[derive(Clone)]
pub struct ForecastingService {
    repository: Repository,
    config: ForecastConfig,
    mailer: Arc<dyn ReportMailer>,
}

impl ForecastingService {
    pub fn new(repository: Repository, config: ForecastConfig, mailer: Arc<dyn ReportMailer>) -> Self {
        Self {
            repository,
            config,
            mailer,
        }
    }

    /// Store historical cost points, all or nothing
    pub async fn upload(&self, data: &UploadRequest) -> AppResult<UploadResponse> {
        if let Some(bad) = data.records.iter().find(|r| r.cost.is_sign_negative() && !r.cost.is_zero()) {
            return Err(AppError::Validation(format!(
                "Cost for {} cannot be negative",
                bad.date
            )));
        }

        let mut tx = self.repository.pool.begin().await?;
        let inserted = self.repository.forecasts.insert_history(&mut tx, &data.records).await?;
        tx.commit().await?;

        tracing::info!(inserted, "Historical costs uploaded");
        Ok(UploadResponse { inserted })
    }

    /// Summarise the uploaded history and store it as a model
    pub async fn train(&self, data: &TrainRequest) -> AppResult<ForecastModel> {
        ensure_named(&data.name, "Model name is required")?;
        let summary = self.repository.forecasts.history_summary().await?;
        if summary.data_points == 0 {
            return Err(AppError::Validation(
                "No historical data uploaded; upload costs before training".to_string(),
            ));
        }

        let parameters = if data.parameters.is_null() {
            json!({})
        } else {
            data.parameters.clone()
        };

        let model = self
            .repository
            .forecasts
            .insert_model(data.name.trim(), &parameters, summary.data_points, summary.mean_cost)
            .await?;

        tracing::info!(model_id = model.id, data_points = model.data_points, "Forecast model trained");
        Ok(model)
    }

    /// Generate and store a forecast
    pub async fn forecast(&self, data: &ForecastRequest) -> AppResult<ForecastWithItems> {
        ensure_named(&data.name, "Forecast name is required")?;
        if data.horizon > self.config.max_horizon_months {
            return Err(AppError::Validation(format!(
                "Horizon must be between 1 and {} months",
                self.config.max_horizon_months
            )));
        }

        let parameters: Value = match (&data.parameters, data.model_id) {
            (Some(_), Some(_)) => {
                return Err(AppError::Validation(
                    "Specify either parameters or model_id, not both".to_string(),
                ))
            }
            (Some(parameters), None) => parameters.clone(),
            (None, Some(model_id)) => self.repository.forecasts.get_model(model_id).await?.parameters,
            (None, None) => json!({}),
        };

        let start = data.start_date.unwrap_or_else(|| Utc::now().date_naive());
        let points = {
            let mut rng = StdRng::from_entropy();
            generate_series(&mut rng, start, data.horizon, &self.config)?
        };

        let mut tx = self.repository.pool.begin().await?;
        let forecast = self
            .repository
            .forecasts
            .create_result(&mut tx, data.name.trim(), &parameters, &points)
            .await?;
        tx.commit().await?;

        tracing::info!(
            forecast_id = forecast.forecast.id,
            horizon = data.horizon,
            "Forecast generated"
        );
        Ok(forecast)
    }

    pub async fn list_results(&self) -> AppResult<Vec<ForecastResult>> {
        self.repository.forecasts.list_results().await
    }

    pub async fn get_result(&self, id: i32) -> AppResult<ForecastWithItems> {
        self.repository.forecasts.get_result(id).await
    }

    pub async fn latest_result(&self) -> AppResult<Option<ForecastResult>> {
        self.repository.forecasts.latest_result().await
    }

    pub async fn report(&self, forecast_id: i32) -> AppResult<ForecastReport> {
        let forecast = self.repository.forecasts.get_result(forecast_id).await?;
        Ok(ForecastReport::build(&forecast))
    }

    /// Build the report and e-mail it
    pub async fn email_report(&self, data: &EmailReportRequest) -> AppResult<EmailReportResponse> {
        let report = self.report(data.forecast_id).await?;
        deliver_report(self.mailer.as_ref(), &report, &data.recipient).await?;

        tracing::info!(forecast_id = data.forecast_id, recipient = %data.recipient, "Forecast report sent");
        Ok(EmailReportResponse {
            forecast_id: data.forecast_id,
            recipient: data.recipient.clone(),
            sent: true,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        models::forecast::{ForecastItem, ForecastResult, ForecastWithItems},
        services::email::MockReportMailer,
    };
    use chrono::NaiveDate;
    use rust_decimal::Decimal;

    fn report() -> ForecastReport {
        ForecastReport::build(&ForecastWithItems {
            forecast: ForecastResult {
                id: 4,
                name: "North site".to_string(),
                duration: 2,
                model_parameters: json!({}),
                created_at: Utc::now(),
            },
            items: vec![
                ForecastItem {
                    id: 1,
                    forecast_id: 4,
                    date: NaiveDate::from_ymd_opt(2025, 7, 1).unwrap(),
                    cost: Decimal::new(800_000, 2),
                },
                ForecastItem {
                    id: 2,
                    forecast_id: 4,
                    date: NaiveDate::from_ymd_opt(2025, 8, 1).unwrap(),
                    cost: Decimal::new(820_000, 2),
                },
            ],
        })
    }

    #[tokio::test]
    async fn test_report_is_sent_to_recipient() {
        let mut mailer = MockReportMailer::new();
        mailer
            .expect_send()
            .withf(|to, subject, body| {
                to.contains("pm@example.com")
                    && subject.contains("North site")
                    && body.contains("Total projected cost")
            })
            .times(1)
            .returning(|_, _, _| Ok(()));

        deliver_report(&mailer, &report(), "pm@example.com").await.unwrap();
    }

    #[tokio::test]
    async fn test_delivery_failure_is_propagated() {
        let mut mailer = MockReportMailer::new();
        mailer
            .expect_send()
            .returning(|_, _, _| Err(AppError::Internal("smtp down".to_string())));

        let err = deliver_report(&mailer, &report(), "pm@example.com").await.unwrap_err();
        assert!(matches!(err, AppError::Internal(_)));
    }
}
