//! Response DTOs for the employee API
//!
//! Defines the structure of outgoing HTTP response bodies. Employee records
//! themselves are serialized directly from `storage::Employee`.

use serde::Serialize;

use crate::storage::EmployeeId;

/// Response body for the create operation (POST /employee/)
#[derive(Debug, Clone, Serialize)]
pub struct CreatedResponse {
    /// Identifier assigned to the new employee
    pub id: EmployeeId,
}

impl CreatedResponse {
    pub fn new(id: EmployeeId) -> Self {
        Self { id }
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
    /// Number of employees currently stored
    pub employees: usize,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy(employees: usize) -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
            employees,
        }
    }
}
