//! Shared domain enums
//!
//! All of them are persisted as the same human-readable text the API
//! exchanges (`"Not Available"`, `"Under Maintenance"`, ...).

use serde::{Deserialize, Serialize};
use sqlx::{
    encode::IsNull,
    error::BoxDynError,
    postgres::{PgArgumentBuffer, PgTypeInfo, PgValueRef},
    Decode, Encode, Postgres, Type,
};
use std::str::FromStr;
use thiserror::Error;
use utoipa::ToSchema;

/// Text that does not name any variant of a status enum
#[derive(Debug, Error)]
#[error("unknown {kind} value: {value:?}")]
pub struct ParseEnumError {
    pub kind: &'static str,
    pub value: String,
}

macro_rules! text_enum {
    (
        $(#[$meta:meta])*
        $name:ident { $($variant:ident => $text:literal),+ $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
        pub enum $name {
            $(
                #[serde(rename = $text)]
                $variant,
            )+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub const fn as_str(self) -> &'static str {
                match self {
                    $($name::$variant => $text,)+
                }
            }
        }

        impl FromStr for $name {
            type Err = ParseEnumError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($text => Ok($name::$variant),)+
                    other => Err(ParseEnumError {
                        kind: stringify!($name),
                        value: other.to_string(),
                    }),
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl Type<Postgres> for $name {
            fn type_info() -> PgTypeInfo {
                <String as Type<Postgres>>::type_info()
            }

            fn compatible(ty: &PgTypeInfo) -> bool {
                <String as Type<Postgres>>::compatible(ty)
            }
        }

        impl<'r> Decode<'r, Postgres> for $name {
            fn decode(value: PgValueRef<'r>) -> Result<Self, BoxDynError> {
                let text = <&str as Decode<Postgres>>::decode(value)?;
                Ok(text.parse()?)
            }
        }

        impl<'q> Encode<'q, Postgres> for $name {
            fn encode_by_ref(&self, buf: &mut PgArgumentBuffer) -> IsNull {
                <&str as Encode<'q, Postgres>>::encode_by_ref(&self.as_str(), buf)
            }
        }
    };
}

text_enum! {
    /// Aggregate availability of a tool, derived from its serial numbers
    ToolStatus {
        Available => "Available",
        NotAvailable => "Not Available",
        UnderMaintenance => "Under Maintenance",
    }
}

text_enum! {
    /// Availability of one physical unit
    SerialStatus {
        Available => "Available",
        NotAvailable => "Not Available",
        UnderMaintenance => "Under Maintenance",
    }
}

text_enum! {
    /// Tool assignment state
    AssignmentStatus {
        Assigned => "Assigned",
        Returned => "Returned",
    }
}

text_enum! {
    MaintenanceType {
        Repair => "Repair",
        Inspection => "Inspection",
        Service => "Service",
        Calibration => "Calibration",
    }
}

text_enum! {
    /// Maintenance schedule state
    MaintenanceStatus {
        Scheduled => "Scheduled",
        InProgress => "In Progress",
        Completed => "Completed",
        Cancelled => "Cancelled",
    }
}

impl MaintenanceStatus {
    /// Completed and cancelled schedules no longer change
    pub fn is_closed(self) -> bool {
        matches!(self, MaintenanceStatus::Completed | MaintenanceStatus::Cancelled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_round_trip() {
        for status in SerialStatus::ALL {
            assert_eq!(status.as_str().parse::<SerialStatus>().unwrap(), *status);
        }
        for status in MaintenanceStatus::ALL {
            assert_eq!(status.to_string().parse::<MaintenanceStatus>().unwrap(), *status);
        }
    }

    #[test]
    fn test_json_uses_display_text() {
        let json = serde_json::to_string(&ToolStatus::UnderMaintenance).unwrap();
        assert_eq!(json, "\"Under Maintenance\"");

        let parsed: SerialStatus = serde_json::from_str("\"Not Available\"").unwrap();
        assert_eq!(parsed, SerialStatus::NotAvailable);
    }

    #[test]
    fn test_unknown_text_is_rejected() {
        let err = "Lost".parse::<AssignmentStatus>().unwrap_err();
        assert_eq!(err.kind, "AssignmentStatus");
        assert!(serde_json::from_str::<ToolStatus>("\"available\"").is_err());
    }

    #[test]
    fn test_closed_maintenance_states() {
        assert!(MaintenanceStatus::Completed.is_closed());
        assert!(MaintenanceStatus::Cancelled.is_closed());
        assert!(!MaintenanceStatus::Scheduled.is_closed());
        assert!(!MaintenanceStatus::InProgress.is_closed());
    }
}
