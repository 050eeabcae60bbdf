//! Material and labor record endpoints

use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::AppResult,
    models::record::{
        CreateLaborRecord, CreateMaterialRecord, LaborRecord, MaterialRecord, RecordQuery,
    },
};

use super::{AuthenticatedUser, ValidatedJson};

/// List material purchases
#[utoipa::path(
    get,
    path = "/materials",
    tag = "records",
    security(("bearer_auth" = [])),
    params(RecordQuery),
    responses(
        (status = 200, description = "Material records", body = Vec<MaterialRecord>)
    )
)]
pub async fn list_materials(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Query(query): Query<RecordQuery>,
) -> AppResult<Json<Vec<MaterialRecord>>> {
    let records = state.services.records.list_materials(&query).await?;
    Ok(Json(records))
}

/// Book a material purchase against a project
#[utoipa::path(
    post,
    path = "/materials",
    tag = "records",
    security(("bearer_auth" = [])),
    request_body = CreateMaterialRecord,
    responses(
        (status = 201, description = "Material recorded", body = MaterialRecord),
        (status = 404, description = "Project not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_material(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    ValidatedJson(data): ValidatedJson<CreateMaterialRecord>,
) -> AppResult<(StatusCode, Json<MaterialRecord>)> {
    claims.require_write()?;
    let record = state.services.records.create_material(&data).await?;
    Ok((StatusCode::CREATED, Json(record)))
}

/// List labor records
#[utoipa::path(
    get,
    path = "/labor",
    tag = "records",
    security(("bearer_auth" = [])),
    params(RecordQuery),
    responses(
        (status = 200, description = "Labor records", body = Vec<LaborRecord>)
    )
)]
pub async fn list_labor(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Query(query): Query<RecordQuery>,
) -> AppResult<Json<Vec<LaborRecord>>> {
    let records = state.services.records.list_labor(&query).await?;
    Ok(Json(records))
}

/// Book hours worked on a project
#[utoipa::path(
    post,
    path = "/labor",
    tag = "records",
    security(("bearer_auth" = [])),
    request_body = CreateLaborRecord,
    responses(
        (status = 201, description = "Labor recorded", body = LaborRecord),
        (status = 404, description = "Project not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_labor(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    ValidatedJson(data): ValidatedJson<CreateLaborRecord>,
) -> AppResult<(StatusCode, Json<LaborRecord>)> {
    claims.require_write()?;
    let record = state.services.records.create_labor(&data).await?;
    Ok((StatusCode::CREATED, Json(record)))
}
