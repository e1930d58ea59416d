//! Tasklane: a task scheduling service.
//!
//! Clients submit units of work with an effort estimate, move them through
//! the `pending`, `processing` and `completed` statuses, and ask which
//! pending task should be processed next.
//!
//! # Architecture
//!
//! Tasklane follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (`PostgreSQL`, in-memory)
//!
//! # Modules
//!
//! - [`task`]: Task submission, status lifecycle and pending work selection
//! - [`api`]: JSON-over-HTTP surface built on `axum`
//! - [`config`]: Environment-driven process configuration

pub mod api;
pub mod config;
pub mod task;
