//! Status roll-up from serial numbers to their tool

use crate::{
    error::{AppError, AppResult},
    models::enums::{SerialStatus, ToolStatus},
};

/// Derive a tool's aggregate status from the statuses of all its units.
///
/// A tool is `Available` while at least one unit is. With no unit left, it is
/// `Under Maintenance` when every unit is in maintenance and `Not Available`
/// otherwise. A tool without units is `Available`.
pub fn aggregate(statuses: &[SerialStatus]) -> ToolStatus {
    if statuses.is_empty() || statuses.contains(&SerialStatus::Available) {
        return ToolStatus::Available;
    }
    if statuses.iter().all(|s| *s == SerialStatus::UnderMaintenance) {
        ToolStatus::UnderMaintenance
    } else {
        ToolStatus::NotAvailable
    }
}

/// Only `Available` units can be assigned
pub fn ensure_assignable(serial: &str, status: SerialStatus) -> AppResult<()> {
    if status == SerialStatus::Available {
        Ok(())
    } else {
        Err(AppError::Conflict(format!(
            "Serial number {} is not available (current status: {})",
            serial, status
        )))
    }
}

/// A unit out on a project must be returned before it goes to repair
pub fn ensure_repairable(serial: &str, status: SerialStatus) -> AppResult<()> {
    if status == SerialStatus::NotAvailable {
        Err(AppError::Conflict(format!(
            "Serial number {} is assigned to a project (current status: {}); return it before scheduling a repair",
            serial, status
        )))
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::enums::SerialStatus::{
        Available as A, NotAvailable as N, UnderMaintenance as M,
    };

    #[test]
    fn test_any_available_unit_keeps_tool_available() {
        assert_eq!(aggregate(&[A]), ToolStatus::Available);
        assert_eq!(aggregate(&[N, A]), ToolStatus::Available);
        assert_eq!(aggregate(&[M, M, A]), ToolStatus::Available);
    }

    #[test]
    fn test_all_assigned_is_not_available() {
        assert_eq!(aggregate(&[N]), ToolStatus::NotAvailable);
        assert_eq!(aggregate(&[N, N, N]), ToolStatus::NotAvailable);
    }

    #[test]
    fn test_all_in_maintenance_is_under_maintenance() {
        assert_eq!(aggregate(&[M]), ToolStatus::UnderMaintenance);
        assert_eq!(aggregate(&[M, M]), ToolStatus::UnderMaintenance);
    }

    #[test]
    fn test_exhausted_mix_is_not_available() {
        assert_eq!(aggregate(&[N, M]), ToolStatus::NotAvailable);
    }

    #[test]
    fn test_tool_without_units_is_available() {
        assert_eq!(aggregate(&[]), ToolStatus::Available);
    }

    #[test]
    fn test_not_available_iff_every_unit_not_available() {
        // Exhaustive over every status combination of up to three units
        // without maintenance.
        let choices = [A, N];
        for len in 1..=3usize {
            for mask in 0..(1u32 << len) {
                let units: Vec<SerialStatus> =
                    (0..len).map(|i| choices[((mask >> i) & 1) as usize]).collect();
                let all_out = units.iter().all(|s| *s == N);
                assert_eq!(aggregate(&units) == ToolStatus::NotAvailable, all_out, "{:?}", units);
            }
        }
    }

    #[test]
    fn test_assignable_only_when_available() {
        assert!(ensure_assignable("DR-001", A).is_ok());

        let err = ensure_assignable("DR-001", N).unwrap_err();
        match err {
            AppError::Conflict(msg) => assert!(msg.contains("Not Available"), "{}", msg),
            other => panic!("unexpected error: {:?}", other),
        }
        let err = ensure_assignable("DR-001", M).unwrap_err();
        assert!(err.to_string().contains("Under Maintenance"));
    }

    #[test]
    fn test_assigned_unit_cannot_go_to_repair() {
        assert!(ensure_repairable("DR-001", A).is_ok());
        assert!(ensure_repairable("DR-001", M).is_ok());
        assert!(matches!(ensure_repairable("DR-001", N), Err(AppError::Conflict(_))));
    }

    /// Drill-1 with units A and B: assign A, assign B, return A.
    #[test]
    fn test_drill_scenario() {
        let mut units = vec![("A", A), ("B", A)];
        let statuses = |u: &[(&str, SerialStatus)]| u.iter().map(|(_, s)| *s).collect::<Vec<_>>();

        ensure_assignable(units[0].0, units[0].1).unwrap();
        units[0].1 = N;
        assert_eq!(aggregate(&statuses(&units)), ToolStatus::Available);

        ensure_assignable(units[1].0, units[1].1).unwrap();
        units[1].1 = N;
        assert_eq!(aggregate(&statuses(&units)), ToolStatus::NotAvailable);

        // A second assignment of A is refused and changes nothing
        assert!(ensure_assignable(units[0].0, units[0].1).is_err());
        assert_eq!(aggregate(&statuses(&units)), ToolStatus::NotAvailable);

        units[0].1 = A;
        assert_eq!(aggregate(&statuses(&units)), ToolStatus::Available);
    }

    #[test]
    fn test_repair_every_unit() {
        let mut units = vec![A, A, A];
        for i in 0..units.len() {
            ensure_repairable("unit", units[i]).unwrap();
            units[i] = M;
            let expected = if i + 1 == units.len() {
                ToolStatus::UnderMaintenance
            } else {
                ToolStatus::Available
            };
            assert_eq!(aggregate(&units), expected);
        }
    }
}
