//! Web layer for the rotor planner.
//!
//! Provides HTTP endpoints for solving instances.

mod dto;
mod routes;
mod state;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::AppState;
