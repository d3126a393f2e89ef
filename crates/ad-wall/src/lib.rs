//! Sponsored ad wall: engagement-weighted ranking and schema-driven form validation.

pub mod ads;
pub mod config;
pub mod error;
pub mod telemetry;
