//! HTTP surface for the task scheduler.
//!
//! Handlers translate JSON requests into [`crate::task::services`] calls and
//! map every failure onto the uniform `{"error", "details"}` body.

pub mod error;
pub mod routes;
pub mod system;
pub mod tasks;
pub mod types;

pub use error::ApiError;
pub use routes::{AppState, build_router, serve};
