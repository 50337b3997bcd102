//! Request DTOs for the employee API
//!
//! Defines the structure of incoming HTTP request bodies.

use serde::Deserialize;

/// Request body for create (POST /employee/) and update (PUT /employee/:id/)
///
/// Only `firstName`, `lastName` and `email` are accepted; any other field is a
/// decode error. Omitted fields decode as empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields, default)]
pub struct EmployeeRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}
