//! Data models for BuildTrack

pub mod assignment;
pub mod auth;
pub mod dashboard;
pub mod enums;
pub mod forecast;
pub mod maintenance;
pub mod project;
pub mod record;
pub mod tool;

// Re-export commonly used types
pub use assignment::ToolAssignment;
pub use enums::{AssignmentStatus, MaintenanceStatus, MaintenanceType, SerialStatus, ToolStatus};
pub use maintenance::MaintenanceSchedule;
pub use project::Project;
pub use tool::{SerialNumber, Tool, ToolDetails};
