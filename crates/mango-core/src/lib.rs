//! # Mango Core
//! 
//! Menu item entity, repository and asset-store ports, and the service that
//! keeps records and image assets consistent.

pub mod domain;
pub mod services;
pub mod repositories;
pub mod storage;
pub mod error;

// Re-export domain entities
pub use domain::*;
pub use error::DomainError;
