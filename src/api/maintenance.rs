//! Maintenance schedule API endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::AppResult,
    models::maintenance::{
        CreateMaintenance, MaintenanceOutcome, MaintenanceQuery, MaintenanceSchedule,
        UpdateMaintenance,
    },
};

use super::{AuthenticatedUser, ValidatedJson};

/// List maintenance schedules
#[utoipa::path(
    get,
    path = "/maintenance",
    tag = "maintenance",
    security(("bearer_auth" = [])),
    params(MaintenanceQuery),
    responses(
        (status = 200, description = "Schedule list", body = Vec<MaintenanceSchedule>)
    )
)]
pub async fn list_maintenance(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Query(query): Query<MaintenanceQuery>,
) -> AppResult<Json<Vec<MaintenanceSchedule>>> {
    let schedules = state.services.maintenance.list(&query).await?;
    Ok(Json(schedules))
}

/// Get schedule by ID
#[utoipa::path(
    get,
    path = "/maintenance/{id}",
    tag = "maintenance",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Schedule ID")),
    responses(
        (status = 200, description = "Schedule details", body = MaintenanceSchedule),
        (status = 404, description = "Schedule not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_maintenance(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<MaintenanceSchedule>> {
    let schedule = state.services.maintenance.get_by_id(id).await?;
    Ok(Json(schedule))
}

/// Schedule maintenance for a serial number
#[utoipa::path(
    post,
    path = "/maintenance",
    tag = "maintenance",
    security(("bearer_auth" = [])),
    request_body = CreateMaintenance,
    responses(
        (status = 201, description = "Maintenance scheduled", body = MaintenanceOutcome),
        (status = 404, description = "Tool or serial number not found", body = crate::error::ErrorResponse),
        (status = 409, description = "Serial number is assigned", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_maintenance(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    ValidatedJson(data): ValidatedJson<CreateMaintenance>,
) -> AppResult<(StatusCode, Json<MaintenanceOutcome>)> {
    claims.require_write()?;
    let outcome = state.services.maintenance.create(&data).await?;
    Ok((StatusCode::CREATED, Json(outcome)))
}

/// Update, complete or cancel a schedule
#[utoipa::path(
    patch,
    path = "/maintenance/{id}",
    tag = "maintenance",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Schedule ID")),
    request_body = UpdateMaintenance,
    responses(
        (status = 200, description = "Schedule updated", body = MaintenanceOutcome),
        (status = 409, description = "Schedule already closed", body = crate::error::ErrorResponse)
    )
)]
pub async fn update_maintenance(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
    ValidatedJson(data): ValidatedJson<UpdateMaintenance>,
) -> AppResult<Json<MaintenanceOutcome>> {
    claims.require_write()?;
    let outcome = state.services.maintenance.update(id, &data).await?;
    Ok(Json(outcome))
}
