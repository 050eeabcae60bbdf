//! Maintenance scheduling service

use chrono::Utc;

use crate::{
    error::{AppError, AppResult},
    inventory::ensure_repairable,
    models::{
        enums::{MaintenanceStatus, MaintenanceType, SerialStatus},
        maintenance::{
            CreateMaintenance, MaintenanceOutcome, MaintenanceQuery, MaintenanceSchedule,
            UpdateMaintenance,
        },
    },
    repository::Repository,
};

use super::tools::refresh_tool_status;

#[derive(Clone)]
pub struct MaintenanceService {
    repository: Repository,
}

impl MaintenanceService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list(&self, query: &MaintenanceQuery) -> AppResult<Vec<MaintenanceSchedule>> {
        self.repository.maintenance.list(query).await
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<MaintenanceSchedule> {
        self.repository.maintenance.get_by_id(id).await
    }

    /// Schedule maintenance; a repair takes the unit out of service at once
    pub async fn create(&self, data: &CreateMaintenance) -> AppResult<MaintenanceOutcome> {
        let mut tx = self.repository.pool.begin().await?;

        let tool = self.repository.tools.lock(&mut tx, data.tool_id).await?;
        let serial = self
            .repository
            .serial_numbers
            .lock(&mut tx, data.serial_number_id)
            .await?;
        if serial.tool_id != tool.id {
            return Err(AppError::NotFound(format!(
                "Serial number {} does not belong to tool {}",
                serial.id, tool.id
            )));
        }

        let is_repair = data.maintenance_type == MaintenanceType::Repair;
        if is_repair {
            ensure_repairable(&serial.serial_number, serial.status)?;
        }

        let schedule = self.repository.maintenance.insert(&mut tx, data).await?;

        let tool_status = if is_repair {
            self.repository
                .serial_numbers
                .set_status(&mut tx, serial.id, SerialStatus::UnderMaintenance)
                .await?;
            refresh_tool_status(&self.repository, &mut tx, tool.id).await?
        } else {
            tool.status
        };

        tx.commit().await?;

        tracing::info!(
            schedule_id = schedule.id,
            tool_id = tool.id,
            serial = %serial.serial_number,
            maintenance_type = %schedule.maintenance_type,
            "Maintenance scheduled"
        );

        Ok(MaintenanceOutcome { schedule, tool_status })
    }

    /// Move a schedule forward; closing a repair releases its unit
    pub async fn update(&self, id: i32, data: &UpdateMaintenance) -> AppResult<MaintenanceOutcome> {
        let existing = self.repository.maintenance.get_by_id(id).await?;

        let mut tx = self.repository.pool.begin().await?;
        let tool = self.repository.tools.lock(&mut tx, existing.tool_id).await?;
        let current = self.repository.maintenance.lock(&mut tx, id).await?;

        if current.status.is_closed() {
            return Err(AppError::Conflict(format!(
                "Maintenance schedule {} is already {}",
                id, current.status
            )));
        }

        let today = Utc::now().date_naive();
        let completed_date = (data.status == Some(MaintenanceStatus::Completed)).then_some(today);

        let schedule = self
            .repository
            .maintenance
            .update(
                &mut tx,
                id,
                data.status,
                data.scheduled_date,
                data.notes.as_deref(),
                completed_date,
            )
            .await?;

        let mut tool_status = tool.status;
        if schedule.status.is_closed() {
            if current.maintenance_type == MaintenanceType::Repair {
                let serial = self
                    .repository
                    .serial_numbers
                    .lock(&mut tx, current.serial_number_id)
                    .await?;
                let still_held = self
                    .repository
                    .maintenance
                    .has_other_open_repair(&mut tx, serial.id, id)
                    .await?;

                if serial.status == SerialStatus::UnderMaintenance && !still_held {
                    self.repository
                        .serial_numbers
                        .set_status(&mut tx, serial.id, SerialStatus::Available)
                        .await?;
                    tool_status = refresh_tool_status(&self.repository, &mut tx, tool.id).await?;
                }
            }

            if schedule.status == MaintenanceStatus::Completed {
                self.repository
                    .tools
                    .set_last_maintenance_date(&mut tx, tool.id, today)
                    .await?;
            }

            tracing::info!(schedule_id = id, status = %schedule.status, "Maintenance closed");
        }

        tx.commit().await?;

        Ok(MaintenanceOutcome { schedule, tool_status })
    }

    /// Schedules not yet completed or cancelled
    pub async fn count_open(&self) -> AppResult<i64> {
        self.repository.maintenance.count_open().await
    }
}
