//! Cost forecasting endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::AppResult,
    forecast::ForecastReport,
    models::forecast::{
        EmailReportRequest, EmailReportResponse, ForecastModel, ForecastRequest, ForecastResult,
        ForecastWithItems, ReportRequest, TrainRequest, UploadRequest, UploadResponse,
    },
};

use super::{AuthenticatedUser, ValidatedJson};

/// Upload historical cost data
#[utoipa::path(
    post,
    path = "/forecasting/upload",
    tag = "forecasting",
    security(("bearer_auth" = [])),
    request_body = UploadRequest,
    responses(
        (status = 201, description = "History stored", body = UploadResponse),
        (status = 400, description = "Invalid records", body = crate::error::ErrorResponse)
    )
)]
pub async fn upload(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    ValidatedJson(data): ValidatedJson<UploadRequest>,
) -> AppResult<(StatusCode, Json<UploadResponse>)> {
    claims.require_write()?;
    let response = state.services.forecasting.upload(&data).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

/// Train a model on the uploaded history
#[utoipa::path(
    post,
    path = "/forecasting/train",
    tag = "forecasting",
    security(("bearer_auth" = [])),
    request_body = TrainRequest,
    responses(
        (status = 201, description = "Model stored", body = ForecastModel),
        (status = 400, description = "No history uploaded", body = crate::error::ErrorResponse)
    )
)]
pub async fn train(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    ValidatedJson(data): ValidatedJson<TrainRequest>,
) -> AppResult<(StatusCode, Json<ForecastModel>)> {
    claims.require_write()?;
    let model = state.services.forecasting.train(&data).await?;
    Ok((StatusCode::CREATED, Json(model)))
}

/// Generate a monthly cost forecast
#[utoipa::path(
    post,
    path = "/forecasting/forecast",
    tag = "forecasting",
    security(("bearer_auth" = [])),
    request_body = ForecastRequest,
    responses(
        (status = 201, description = "Forecast generated", body = ForecastWithItems),
        (status = 400, description = "Horizon out of range", body = crate::error::ErrorResponse)
    )
)]
pub async fn forecast(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    ValidatedJson(data): ValidatedJson<ForecastRequest>,
) -> AppResult<(StatusCode, Json<ForecastWithItems>)> {
    claims.require_write()?;
    let forecast = state.services.forecasting.forecast(&data).await?;
    Ok((StatusCode::CREATED, Json(forecast)))
}

/// List stored forecasts
#[utoipa::path(
    get,
    path = "/forecasting/results",
    tag = "forecasting",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Forecast list", body = Vec<ForecastResult>)
    )
)]
pub async fn list_results(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
) -> AppResult<Json<Vec<ForecastResult>>> {
    let results = state.services.forecasting.list_results().await?;
    Ok(Json(results))
}

/// Get a stored forecast with its points
#[utoipa::path(
    get,
    path = "/forecasting/results/{id}",
    tag = "forecasting",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Forecast ID")),
    responses(
        (status = 200, description = "Forecast details", body = ForecastWithItems),
        (status = 404, description = "Forecast not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_result(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<ForecastWithItems>> {
    let forecast = state.services.forecasting.get_result(id).await?;
    Ok(Json(forecast))
}

/// Summarise a stored forecast
#[utoipa::path(
    post,
    path = "/forecasting/report",
    tag = "forecasting",
    security(("bearer_auth" = [])),
    request_body = ReportRequest,
    responses(
        (status = 200, description = "Forecast report", body = ForecastReport),
        (status = 404, description = "Forecast not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn report(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    ValidatedJson(data): ValidatedJson<ReportRequest>,
) -> AppResult<Json<ForecastReport>> {
    let report = state.services.forecasting.report(data.forecast_id).await?;
    Ok(Json(report))
}

/// E-mail a forecast report
#[utoipa::path(
    post,
    path = "/forecasting/email-report",
    tag = "forecasting",
    security(("bearer_auth" = [])),
    request_body = EmailReportRequest,
    responses(
        (status = 200, description = "Report sent", body = EmailReportResponse),
        (status = 500, description = "Delivery failed", body = crate::error::ErrorResponse)
    )
)]
pub async fn email_report(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    ValidatedJson(data): ValidatedJson<EmailReportRequest>,
) -> AppResult<Json<EmailReportResponse>> {
    claims.require_write()?;
    let response = state.services.forecasting.email_report(&data).await?;
    Ok(Json(response))
}
