//! Web layer for the bus route planner.
//!
//! Thin JSON endpoints over the planner. Every request plans against one
//! store snapshot.

mod dto;
mod routes;
mod searches;
mod state;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use searches::SearchLog;
pub use state::AppState;
