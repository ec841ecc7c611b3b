//! Warehouse labor cost engine.
//!
//! This crate turns warehouse staffing timesheets into labor cost figures:
//! it validates uploaded rows, works out daily hours, resolves each worker's
//! wage rate and staffing-agency markup as of the work date, and aggregates
//! cost and regular/overtime hours per agency per month. It also keeps
//! workers' wage rate history current and serves everything over HTTP.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
pub mod store;
