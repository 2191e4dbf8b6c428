//! # Mango Shared
//! 
//! Configuration, telemetry, and start-up errors shared by the menu catalog crates.

pub mod constants;
pub mod telemetry;
pub mod config;
pub mod error;

pub use error::AppError;
