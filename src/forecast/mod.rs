//! Cost forecasting stub
//!
//! The "model" only produces a plausible-looking monthly series (compounding
//! trend, summer bump, noise). It does not look at the uploaded history.

pub mod generator;
pub mod report;

pub use generator::{generate_series, ForecastPoint};
pub use report::ForecastReport;
