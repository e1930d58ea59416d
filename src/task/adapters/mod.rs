//! Adapter implementations of the task ports.
//!
//! - [`memory`]: process-local storage for tests and database-less runs
//! - [`postgres`]: Diesel-backed `PostgreSQL` storage

pub mod memory;
pub mod postgres;
