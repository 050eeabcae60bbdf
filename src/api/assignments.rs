//! Tool assignment API endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::AppResult,
    models::assignment::{
        AssignmentOutcome, AssignmentQuery, CreateAssignment, ToolAssignment, UpdateAssignment,
    },
};

use super::{AuthenticatedUser, ValidatedJson};

/// List tool assignments
#[utoipa::path(
    get,
    path = "/tool-assignments",
    tag = "assignments",
    security(("bearer_auth" = [])),
    params(AssignmentQuery),
    responses(
        (status = 200, description = "Assignment list", body = Vec<ToolAssignment>)
    )
)]
pub async fn list_assignments(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Query(query): Query<AssignmentQuery>,
) -> AppResult<Json<Vec<ToolAssignment>>> {
    let assignments = state.services.assignments.list(&query).await?;
    Ok(Json(assignments))
}

/// Get assignment by ID
#[utoipa::path(
    get,
    path = "/tool-assignments/{id}",
    tag = "assignments",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Assignment ID")),
    responses(
        (status = 200, description = "Assignment details", body = ToolAssignment),
        (status = 404, description = "Assignment not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_assignment(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<ToolAssignment>> {
    let assignment = state.services.assignments.get_by_id(id).await?;
    Ok(Json(assignment))
}

/// Assign a serial number to a project
#[utoipa::path(
    post,
    path = "/tool-assignments",
    tag = "assignments",
    security(("bearer_auth" = [])),
    request_body = CreateAssignment,
    responses(
        (status = 201, description = "Serial number assigned", body = AssignmentOutcome),
        (status = 404, description = "Serial number or project not found", body = crate::error::ErrorResponse),
        (status = 409, description = "Serial number not available", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_assignment(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    ValidatedJson(data): ValidatedJson<CreateAssignment>,
) -> AppResult<(StatusCode, Json<AssignmentOutcome>)> {
    claims.require_write()?;
    let outcome = state.services.assignments.create(&data).await?;
    Ok((StatusCode::CREATED, Json(outcome)))
}

/// Update or return an assignment
#[utoipa::path(
    patch,
    path = "/tool-assignments/{id}",
    tag = "assignments",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Assignment ID")),
    request_body = UpdateAssignment,
    responses(
        (status = 200, description = "Assignment updated", body = AssignmentOutcome),
        (status = 409, description = "Assignment already returned", body = crate::error::ErrorResponse)
    )
)]
pub async fn update_assignment(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
    ValidatedJson(data): ValidatedJson<UpdateAssignment>,
) -> AppResult<Json<AssignmentOutcome>> {
    claims.require_write()?;
    let outcome = state.services.assignments.update(id, &data).await?;
    Ok(Json(outcome))
}
