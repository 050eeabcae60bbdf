//! Forecast report built from a stored forecast

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::forecast::ForecastWithItems;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ReportPoint {
    pub date: NaiveDate,
    pub cost: Decimal,
}

/// Totals and extremes of a forecast
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ForecastReport {
    pub forecast_id: i32,
    pub name: String,
    pub duration: i32,
    pub points: usize,
    pub total_cost: Decimal,
    pub average_cost: Decimal,
    pub peak: Option<ReportPoint>,
    pub lowest: Option<ReportPoint>,
    /// Change from the first to the last month, in percent
    pub growth_percent: Option<Decimal>,
    pub generated_at: DateTime<Utc>,
}

impl ForecastReport {
    pub fn build(forecast: &ForecastWithItems) -> Self {
        let items = &forecast.items;
        let total_cost: Decimal = items.iter().map(|i| i.cost).sum();
        let average_cost = if items.is_empty() {
            Decimal::ZERO
        } else {
            (total_cost / Decimal::from(items.len())).round_dp(2)
        };

        let as_point = |i: &crate::models::forecast::ForecastItem| ReportPoint {
            date: i.date,
            cost: i.cost,
        };
        let peak = items.iter().max_by_key(|i| i.cost).map(as_point);
        let lowest = items.iter().min_by_key(|i| i.cost).map(as_point);

        let growth_percent = match (items.first(), items.last()) {
            (Some(first), Some(last)) if first.cost > Decimal::ZERO => {
                Some(((last.cost - first.cost) / first.cost * Decimal::ONE_HUNDRED).round_dp(2))
            }
            _ => None,
        };

        Self {
            forecast_id: forecast.forecast.id,
            name: forecast.forecast.name.clone(),
            duration: forecast.forecast.duration,
            points: items.len(),
            total_cost,
            average_cost,
            peak,
            lowest,
            growth_percent,
            generated_at: Utc::now(),
        }
    }

    pub fn subject(&self) -> String {
        format!("Cost forecast report: {} ({} months)", self.name, self.duration)
    }

    /// Plain-text body used for e-mail
    pub fn render_text(&self) -> String {
        let mut out = String::new();
        out.push_str(&format!("Forecast: {} (#{})\n", self.name, self.forecast_id));
        out.push_str(&format!("Horizon: {} months, {} points\n\n", self.duration, self.points));
        out.push_str(&format!("Total projected cost: {}\n", self.total_cost));
        out.push_str(&format!("Average monthly cost: {}\n", self.average_cost));
        if let Some(peak) = &self.peak {
            out.push_str(&format!("Peak month: {} ({})\n", peak.date.format("%Y-%m"), peak.cost));
        }
        if let Some(lowest) = &self.lowest {
            out.push_str(&format!("Lowest month: {} ({})\n", lowest.date.format("%Y-%m"), lowest.cost));
        }
        if let Some(growth) = self.growth_percent {
            out.push_str(&format!("Growth over the horizon: {}%\n", growth));
        }
        out.push_str(&format!("\nGenerated at {}\n", self.generated_at.format("%Y-%m-%d %H:%M UTC")));
        out
    }
}
