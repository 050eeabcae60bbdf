//! Synthetic monthly cost series

use chrono::{Datelike, Duration, Months, NaiveDate};
use rand::Rng;
use rust_decimal::{prelude::FromPrimitive, Decimal};

use crate::{
    config::ForecastConfig,
    error::{AppError, AppResult},
};

/// Monthly compounding growth range
const TREND_MIN: f64 = 0.005;
const TREND_MAX: f64 = 0.02;
/// Extra cost during the building season
const SEASONAL_MAX: f64 = 0.10;
const SEASON_MONTHS: std::ops::RangeInclusive<u32> = 5..=9;
/// Month-to-month noise (±)
const FLUCTUATION: f64 = 0.05;

/// One generated (date, cost) point
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastPoint {
    pub date: NaiveDate,
    pub cost: Decimal,
}

fn month_start(date: NaiveDate) -> NaiveDate {
    date - Duration::days(i64::from(date.day0()))
}

fn next_month(date: NaiveDate) -> AppResult<NaiveDate> {
    date.checked_add_months(Months::new(1))
        .ok_or_else(|| AppError::Validation("Forecast dates out of range".to_string()))
}

fn to_cents(cost: f64) -> AppResult<Decimal> {
    let value = Decimal::from_f64(cost)
        .ok_or_else(|| AppError::Internal(format!("Generated cost is not representable: {}", cost)))?
        .round_dp(2);
    Ok(value.max(Decimal::new(1, 2)))
}

/// Generate `horizon` points, dated the first day of each month following `start`.
pub fn generate_series<R: Rng + ?Sized>(
    rng: &mut R,
    start: NaiveDate,
    horizon: u32,
    bounds: &ForecastConfig,
) -> AppResult<Vec<ForecastPoint>> {
    let mut points = Vec::with_capacity(horizon as usize);
    let mut date = next_month(month_start(start))?;
    let mut cost = rng.gen_range(bounds.base_cost_min..bounds.base_cost_max);

    for i in 0..horizon {
        if i > 0 {
            date = next_month(date)?;

            let trend = 1.0 + rng.gen_range(TREND_MIN..=TREND_MAX);
            let seasonal = if SEASON_MONTHS.contains(&date.month()) {
                1.0 + rng.gen_range(0.0..=SEASONAL_MAX)
            } else {
                1.0
            };
            let fluctuation = rng.gen_range(1.0 - FLUCTUATION..=1.0 + FLUCTUATION);

            cost *= trend * seasonal * fluctuation;
        }

        points.push(ForecastPoint {
            date,
            cost: to_cents(cost)?,
        });
    }

    Ok(points)
}
