//! API
//!
//! HTTP access to the sleep dashboard server.

pub mod client;

pub use client::fetch_sleep_data;
