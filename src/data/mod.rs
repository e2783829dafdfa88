//! Employee and attendance data sources.
//!
//! The engine reads data through the [`EmployeeDirectory`] and
//! [`AttendanceStore`] traits; [`DataSnapshot`] implements both in memory and
//! [`DataLoader`] builds one from CSV exports.

mod csv;
mod loader;
mod snapshot;

pub use loader::DataLoader;
pub use snapshot::{AttendanceStore, DataSnapshot, EmployeeDirectory};
