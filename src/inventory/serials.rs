//! Serial number list handling for tool create/update

use std::collections::HashSet;

use crate::{
    error::{AppError, AppResult},
    models::tool::SerialNumber,
};

/// Trim serial strings and reject blanks and duplicates
pub fn normalize_serials(serials: &[String]) -> AppResult<Vec<String>> {
    let mut seen = HashSet::new();
    let mut normalized = Vec::with_capacity(serials.len());

    for raw in serials {
        let serial = raw.trim();
        if serial.is_empty() {
            return Err(AppError::Validation("Serial numbers cannot be blank".to_string()));
        }
        if !seen.insert(serial.to_string()) {
            return Err(AppError::Validation(format!("Duplicate serial number: {}", serial)));
        }
        normalized.push(serial.to_string());
    }

    Ok(normalized)
}

/// Rows to insert and delete to turn `existing` into `requested`
#[derive(Debug, Default)]
pub struct SerialDiff<'a> {
    pub add: Vec<String>,
    pub remove: Vec<&'a SerialNumber>,
}

impl SerialDiff<'_> {
    pub fn is_empty(&self) -> bool {
        self.add.is_empty() && self.remove.is_empty()
    }
}

/// Compare by serial string; `requested` must already be normalized
pub fn diff_serials<'a>(existing: &'a [SerialNumber], requested: &[String]) -> SerialDiff<'a> {
    let current: HashSet<&str> = existing.iter().map(|s| s.serial_number.as_str()).collect();
    let wanted: HashSet<&str> = requested.iter().map(String::as_str).collect();

    SerialDiff {
        add: requested
            .iter()
            .filter(|s| !current.contains(s.as_str()))
            .cloned()
            .collect(),
        remove: existing
            .iter()
            .filter(|s| !wanted.contains(s.serial_number.as_str()))
            .collect(),
    }
}
