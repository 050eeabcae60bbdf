//! Tool inventory service

use std::collections::HashMap;

use sqlx::PgConnection;

use crate::{
    error::{AppError, AppResult},
    inventory::{aggregate, diff_serials, normalize_serials},
    models::{
        enums::{SerialStatus, ToolStatus},
        tool::{CreateTool, SerialNumber, ToolDetails, ToolQuery, UpdateTool},
    },
    repository::Repository,
};

use super::ensure_named;

/// Recompute a tool's aggregate status from all of its units and store it.
///
/// The caller must hold the tool row lock in `conn`.
pub(crate) async fn refresh_tool_status(
    repository: &Repository,
    conn: &mut PgConnection,
    tool_id: i32,
) -> AppResult<ToolStatus> {
    let statuses = repository.serial_numbers.statuses_for_tool(conn, tool_id).await?;
    let status = aggregate(&statuses);
    repository.tools.set_status(conn, tool_id, status).await?;

    tracing::info!(tool_id, units = statuses.len(), status = %status, "Tool status rolled up");
    Ok(status)
}

#[derive(Clone)]
pub struct ToolsService {
    repository: Repository,
}

impl ToolsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// List tools with their serial numbers
    pub async fn list(&self, query: &ToolQuery) -> AppResult<Vec<ToolDetails>> {
        let tools = self.repository.tools.list(query).await?;
        if tools.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<i32> = tools.iter().map(|t| t.id).collect();
        let mut by_tool: HashMap<i32, Vec<SerialNumber>> = HashMap::new();
        for serial in self.repository.tools.serials_for_tools(&ids).await? {
            by_tool.entry(serial.tool_id).or_default().push(serial);
        }

        Ok(tools
            .into_iter()
            .map(|tool| ToolDetails {
                serial_numbers: by_tool.remove(&tool.id).unwrap_or_default(),
                tool,
            })
            .collect())
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<ToolDetails> {
        let tool = self.repository.tools.get_by_id(id).await?;
        let serial_numbers = self.repository.serial_numbers.list_for_tool(id).await?;
        Ok(ToolDetails { tool, serial_numbers })
    }

    /// Create a tool together with its serial numbers
    pub async fn create(&self, data: &CreateTool) -> AppResult<ToolDetails> {
        ensure_named(&data.name, "Tool name is required")?;
        let serials = normalize_serials(&data.serial_numbers)?;
        let quantity = match data.quantity {
            Some(q) => q,
            None => i32::try_from(serials.len())
                .map_err(|_| AppError::Validation("Too many serial numbers".to_string()))?,
        };

        let mut tx = self.repository.pool.begin().await?;
        // New units are all available
        let tool = self
            .repository
            .tools
            .insert(&mut tx, data, quantity, ToolStatus::Available)
            .await?;
        self.repository
            .serial_numbers
            .insert_many(&mut tx, tool.id, &serials)
            .await?;
        tx.commit().await?;

        tracing::info!(tool_id = tool.id, units = serials.len(), "Tool created");
        self.get_by_id(tool.id).await
    }

    /// Update a tool; a supplied serial list replaces the current one
    pub async fn update(&self, id: i32, data: &UpdateTool) -> AppResult<ToolDetails> {
        if let Some(name) = &data.name {
            ensure_named(name, "Tool name cannot be empty")?;
        }
        let requested = data
            .serial_numbers
            .as_deref()
            .map(normalize_serials)
            .transpose()?;

        let mut tx = self.repository.pool.begin().await?;
        self.repository.tools.lock(&mut tx, id).await?;

        let mut quantity = data.quantity;
        if let Some(requested) = &requested {
            let existing = self.repository.serial_numbers.lock_for_tool(&mut tx, id).await?;
            let diff = diff_serials(&existing, requested);

            if let Some(busy) = diff
                .remove
                .iter()
                .find(|s| s.status != SerialStatus::Available)
            {
                return Err(AppError::Conflict(format!(
                    "Serial number {} cannot be removed (current status: {})",
                    busy.serial_number, busy.status
                )));
            }

            if !diff.is_empty() {
                for serial in &diff.remove {
                    self.repository.serial_numbers.delete(&mut tx, serial.id).await?;
                }
                self.repository
                    .serial_numbers
                    .insert_many(&mut tx, id, &diff.add)
                    .await?;
                tracing::info!(
                    tool_id = id,
                    added = diff.add.len(),
                    removed = diff.remove.len(),
                    "Serial numbers updated"
                );
            }

            if quantity.is_none() {
                quantity = Some(
                    i32::try_from(requested.len())
                        .map_err(|_| AppError::Validation("Too many serial numbers".to_string()))?,
                );
            }
        }

        self.repository
            .tools
            .update_fields(&mut tx, id, data, quantity)
            .await?;
        if requested.is_some() {
            refresh_tool_status(&self.repository, &mut tx, id).await?;
        }
        tx.commit().await?;

        self.get_by_id(id).await
    }

    /// Delete a tool unless one of its units is out on a project
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let mut tx = self.repository.pool.begin().await?;
        self.repository.tools.lock(&mut tx, id).await?;

        if self.repository.assignments.has_open_for_tool(&mut tx, id).await? {
            return Err(AppError::Conflict(format!(
                "Tool {} has serial numbers assigned to a project",
                id
            )));
        }

        self.repository.tools.delete(&mut tx, id).await?;
        tx.commit().await?;

        tracing::info!(tool_id = id, "Tool deleted");
        Ok(())
    }

    /// Tool counts per status, every status present
    pub async fn count_by_status(&self) -> AppResult<Vec<(ToolStatus, i64)>> {
        let counts: HashMap<ToolStatus, i64> =
            self.repository.tools.count_by_status().await?.into_iter().collect();
        Ok(ToolStatus::ALL
            .iter()
            .map(|s| (*s, counts.get(s).copied().unwrap_or(0)))
            .collect())
    }
}
