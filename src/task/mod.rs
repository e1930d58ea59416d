//! Task lifecycle management.
//!
//! Clients submit tasks with effort estimates, move them through the
//! `pending` / `processing` / `completed` status machine, and ask which
//! pending task to work on next. The module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
