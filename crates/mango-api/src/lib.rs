//! # Mango API
//! 
//! HTTP handlers, multipart DTOs, response envelope, and router for the menu catalog.

pub mod handlers;
pub mod dto;
pub mod error;
pub mod response;
pub mod router;
pub mod state;

pub use router::{build_router, RouterOptions};
pub use state::AppState;
