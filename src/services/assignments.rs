//! Tool assignment service
//!
//! Assigning and returning a unit changes the unit's status and the
//! aggregate status of its tool in the same transaction.

use chrono::{NaiveDate, Utc};

use crate::{
    error::{AppError, AppResult},
    inventory::ensure_assignable,
    models::{
        assignment::{
            AssignmentOutcome, AssignmentQuery, CreateAssignment, ToolAssignment, UpdateAssignment,
        },
        enums::{AssignmentStatus, SerialStatus},
    },
    repository::{assignments::NewAssignment, Repository},
};

use super::tools::refresh_tool_status;

fn check_return_date(assigned: NaiveDate, returned: Option<NaiveDate>) -> AppResult<()> {
    match returned {
        Some(date) if date < assigned => Err(AppError::Validation(format!(
            "Return date {} is before the assigned date {}",
            date, assigned
        ))),
        _ => Ok(()),
    }
}

#[derive(Clone)]
pub struct AssignmentsService {
    repository: Repository,
}

impl AssignmentsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list(&self, query: &AssignmentQuery) -> AppResult<Vec<ToolAssignment>> {
        self.repository.assignments.list(query).await
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<ToolAssignment> {
        self.repository.assignments.get_by_id(id).await
    }

    /// Assign an available unit to a project
    pub async fn create(&self, data: &CreateAssignment) -> AppResult<AssignmentOutcome> {
        let assigned_date = data.assigned_date.unwrap_or_else(|| Utc::now().date_naive());
        check_return_date(assigned_date, data.return_date)?;

        let mut tx = self.repository.pool.begin().await?;

        let found = self
            .repository
            .serial_numbers
            .find_by_serial(&mut tx, data.serial_number.trim(), data.tool_id)
            .await?;
        self.repository.projects.ensure_exists(&mut tx, data.project_id).await?;

        // Tool before unit
        self.repository.tools.lock(&mut tx, found.tool_id).await?;
        let serial = self.repository.serial_numbers.lock(&mut tx, found.id).await?;
        ensure_assignable(&serial.serial_number, serial.status)?;

        let assignment = self
            .repository
            .assignments
            .insert(
                &mut tx,
                &NewAssignment {
                    project_id: data.project_id,
                    serial_number_id: serial.id,
                    assigned_date,
                    return_date: data.return_date,
                    notes: data.notes.as_deref(),
                },
            )
            .await?;
        self.repository
            .serial_numbers
            .set_status(&mut tx, serial.id, SerialStatus::NotAvailable)
            .await?;
        let tool_status = refresh_tool_status(&self.repository, &mut tx, serial.tool_id).await?;

        tx.commit().await?;

        tracing::info!(
            assignment_id = assignment.id,
            project_id = data.project_id,
            serial = %serial.serial_number,
            "Serial number assigned"
        );

        Ok(AssignmentOutcome {
            assignment: self.repository.assignments.get_by_id(assignment.id).await?,
            tool_id: serial.tool_id,
            tool_status,
        })
    }

    /// Return an assignment or edit its notes and planned return date
    pub async fn update(&self, id: i32, data: &UpdateAssignment) -> AppResult<AssignmentOutcome> {
        let existing = self.repository.assignments.get_by_id(id).await?;
        let tool_id = existing
            .tool_id
            .ok_or_else(|| AppError::Internal(format!("Assignment {} has no tool", id)))?;

        let mut tx = self.repository.pool.begin().await?;
        let tool = self.repository.tools.lock(&mut tx, tool_id).await?;
        let current = self.repository.assignments.lock(&mut tx, id).await?;

        if current.status == AssignmentStatus::Returned {
            return Err(AppError::Conflict(format!(
                "Tool assignment {} has already been returned",
                id
            )));
        }

        let tool_status = match data.status {
            Some(AssignmentStatus::Returned) => {
                let return_date = data.return_date.unwrap_or_else(|| Utc::now().date_naive());
                check_return_date(current.assigned_date, Some(return_date))?;

                self.repository
                    .assignments
                    .mark_returned(&mut tx, id, return_date, data.notes.as_deref())
                    .await?;
                self.repository
                    .serial_numbers
                    .set_status(&mut tx, current.serial_number_id, SerialStatus::Available)
                    .await?;
                let status = refresh_tool_status(&self.repository, &mut tx, tool_id).await?;

                tracing::info!(assignment_id = id, %return_date, "Serial number returned");
                status
            }
            Some(AssignmentStatus::Assigned) | None => {
                check_return_date(current.assigned_date, data.return_date)?;
                self.repository
                    .assignments
                    .update_details(&mut tx, id, data.return_date, data.notes.as_deref())
                    .await?;
                tool.status
            }
        };

        tx.commit().await?;

        Ok(AssignmentOutcome {
            assignment: self.repository.assignments.get_by_id(id).await?,
            tool_id,
            tool_status,
        })
    }

    pub async fn count_open(&self) -> AppResult<i64> {
        self.repository.assignments.count_open().await
    }
}
