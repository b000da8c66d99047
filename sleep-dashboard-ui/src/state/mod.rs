//! Application State
//!
//! Page-local state for the dashboard.

pub mod dashboard;
