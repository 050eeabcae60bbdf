//! Tool inventory API endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::AppResult,
    models::tool::{CreateTool, ToolDetails, ToolQuery, UpdateTool},
};

use super::{AuthenticatedUser, ValidatedJson};

/// List tools with their serial numbers
#[utoipa::path(
    get,
    path = "/tools",
    tag = "tools",
    security(("bearer_auth" = [])),
    params(ToolQuery),
    responses(
        (status = 200, description = "Tool list", body = Vec<ToolDetails>),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn list_tools(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Query(query): Query<ToolQuery>,
) -> AppResult<Json<Vec<ToolDetails>>> {
    let tools = state.services.tools.list(&query).await?;
    Ok(Json(tools))
}

/// Get tool by ID
#[utoipa::path(
    get,
    path = "/tools/{id}",
    tag = "tools",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Tool ID")),
    responses(
        (status = 200, description = "Tool details", body = ToolDetails),
        (status = 404, description = "Tool not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_tool(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<ToolDetails>> {
    let tool = state.services.tools.get_by_id(id).await?;
    Ok(Json(tool))
}

/// Create a tool and its serial numbers
#[utoipa::path(
    post,
    path = "/tools",
    tag = "tools",
    security(("bearer_auth" = [])),
    request_body = CreateTool,
    responses(
        (status = 201, description = "Tool created", body = ToolDetails),
        (status = 400, description = "Invalid input", body = crate::error::ErrorResponse),
        (status = 409, description = "Duplicate serial number", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_tool(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    ValidatedJson(data): ValidatedJson<CreateTool>,
) -> AppResult<(StatusCode, Json<ToolDetails>)> {
    claims.require_write()?;
    let tool = state.services.tools.create(&data).await?;
    Ok((StatusCode::CREATED, Json(tool)))
}

/// Update a tool; `serial_numbers` replaces the unit list
#[utoipa::path(
    patch,
    path = "/tools/{id}",
    tag = "tools",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Tool ID")),
    request_body = UpdateTool,
    responses(
        (status = 200, description = "Tool updated", body = ToolDetails),
        (status = 404, description = "Tool not found", body = crate::error::ErrorResponse),
        (status = 409, description = "A removed unit is in use", body = crate::error::ErrorResponse)
    )
)]
pub async fn update_tool(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
    ValidatedJson(data): ValidatedJson<UpdateTool>,
) -> AppResult<Json<ToolDetails>> {
    claims.require_write()?;
    let tool = state.services.tools.update(id, &data).await?;
    Ok(Json(tool))
}

/// Delete a tool
#[utoipa::path(
    delete,
    path = "/tools/{id}",
    tag = "tools",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Tool ID")),
    responses(
        (status = 204, description = "Tool deleted"),
        (status = 409, description = "Tool has assigned units", body = crate::error::ErrorResponse)
    )
)]
pub async fn delete_tool(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    claims.require_write()?;
    state.services.tools.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
