//! Storage Module
//!
//! Provides the concurrency-safe in-memory employee table.

mod employee;
mod store;


// Re-export public types
pub use employee::{Employee, EmployeeId};
pub use store::EmployeeStore;
