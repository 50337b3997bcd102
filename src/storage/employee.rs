//! Employee Record Module
//!
//! Defines the employee record held by the store and its JSON shape.

use serde::{Deserialize, Serialize};

/// Synthetic identifier assigned by the store.
pub type EmployeeId = u64;

// == Employee ==
/// A single employee record.
///
/// Serialized as `{"id": .., "firstName": .., "lastName": .., "email": ..}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    /// Identifier, always equal to the record's key in the store
    pub id: EmployeeId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

impl Employee {
    // == Constructor ==
    pub fn new(
        id: EmployeeId,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            id,
            first_name: first_name.into(),
            last_name: last_name.into(),
            email: email.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_employee_serializes_camel_case() {
        let employee = Employee::new(7, "Ann", "Lee", "a@x.com");
        let value = serde_json::to_value(&employee).unwrap();

        assert_eq!(
            value,
            json!({"id": 7, "firstName": "Ann", "lastName": "Lee", "email": "a@x.com"})
        );
    }

    #[test]
    fn test_employee_deserializes_from_wire_shape() {
        let json = r#"{"id":3,"firstName":"Bo","lastName":"Lee","email":"b@x.com"}"#;
        let employee: Employee = serde_json::from_str(json).unwrap();

        assert_eq!(employee, Employee::new(3, "Bo", "Lee", "b@x.com"));
    }
}
