//! Configuration loading and management.
//!
//! This module loads the rate policy (base rates per position, static agency
//! markups, overtime thresholds) and seeded agency markup history from YAML.
//!
//! # Example
//!
//! ```no_run
//! use warehouse_labor::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/warehouse").unwrap();
//! println!("Overtime after {} hours", config.policy().weekly_overtime_threshold);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{
    AgenciesConfig, AgencySeed, BaseRates, DEFAULT_APPROACHING_OVERTIME_HOURS,
    DEFAULT_LONG_SHIFT_HOURS, DEFAULT_LUNCH_MINUTES, DEFAULT_WEEKLY_OVERTIME_THRESHOLD,
    RatePolicy, StaticMarkup,
};
