//! Request and Response models for the employee API
//!
//! This module defines the DTOs (Data Transfer Objects) used for
//! serializing/deserializing HTTP request and response bodies.

pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use requests::EmployeeRequest;
pub use responses::{CreatedResponse, HealthResponse};
