//! UI Components
//!
//! Reusable Leptos components for the dashboard.

pub mod loading;
pub mod sleep_chart;

pub use loading::Loading;
pub use sleep_chart::SleepChart;
