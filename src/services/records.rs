//! Material and labor bookkeeping

use chrono::Utc;
use rust_decimal::Decimal;

use crate::{
    error::{AppError, AppResult},
    models::record::{
        CreateLaborRecord, CreateMaterialRecord, LaborRecord, MaterialRecord, RecordQuery,
    },
    repository::Repository,
};

fn ensure_non_negative(field: &str, value: Decimal) -> AppResult<()> {
    if value.is_sign_negative() && !value.is_zero() {
        return Err(AppError::Validation(format!("{} cannot be negative", field)));
    }
    Ok(())
}

#[derive(Clone)]
pub struct RecordsService {
    repository: Repository,
}

impl RecordsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list_materials(&self, query: &RecordQuery) -> AppResult<Vec<MaterialRecord>> {
        self.repository.records.list_materials(query).await
    }

    pub async fn create_material(&self, data: &CreateMaterialRecord) -> AppResult<MaterialRecord> {
        ensure_non_negative("quantity", data.quantity)?;
        ensure_non_negative("unit_cost", data.unit_cost)?;
        self.repository.projects.get_by_id(data.project_id).await?;

        let purchase_date = data.purchase_date.unwrap_or_else(|| Utc::now().date_naive());
        let record = self.repository.records.create_material(data, purchase_date).await?;
        tracing::info!(record_id = record.id, project_id = record.project_id, "Material recorded");
        Ok(record)
    }

    pub async fn list_labor(&self, query: &RecordQuery) -> AppResult<Vec<LaborRecord>> {
        self.repository.records.list_labor(query).await
    }

    pub async fn create_labor(&self, data: &CreateLaborRecord) -> AppResult<LaborRecord> {
        ensure_non_negative("hours", data.hours)?;
        ensure_non_negative("hourly_rate", data.hourly_rate)?;
        self.repository.projects.get_by_id(data.project_id).await?;

        let work_date = data.work_date.unwrap_or_else(|| Utc::now().date_naive());
        let record = self.repository.records.create_labor(data, work_date).await?;
        tracing::info!(record_id = record.id, project_id = record.project_id, "Labor recorded");
        Ok(record)
    }

    /// Material and labor cost totals
    pub async fn cost_totals(&self) -> AppResult<(Decimal, Decimal)> {
        let materials = self.repository.records.material_cost_total().await?;
        let labor = self.repository.records.labor_cost_total().await?;
        Ok((materials, labor))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_and_positive_amounts_pass() {
        assert!(ensure_non_negative("hours", Decimal::ZERO).is_ok());
        assert!(ensure_non_negative("hours", Decimal::new(75, 1)).is_ok());
    }

    #[test]
    fn test_negative_amount_names_the_field() {
        match ensure_non_negative("unit_cost", Decimal::new(-1, 2)) {
            Err(AppError::Validation(msg)) => assert!(msg.contains("unit_cost")),
            other => panic!("unexpected: {:?}", other),
        }
    }
}
