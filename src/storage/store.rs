//! Employee Store Module
//!
//! In-memory employee table guarded by a single exclusive lock.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::error::{StoreError, StoreResult};
use crate::storage::{Employee, EmployeeId};

// == Employee Table ==
/// Records keyed by id, plus the issuance counter.
#[derive(Debug, Default)]
struct EmployeeTable {
    employees: HashMap<EmployeeId, Employee>,
    /// Always greater than every id issued so far
    next_id: EmployeeId,
}

// == Employee Store ==
/// Concurrency-safe in-memory database of employees.
///
/// Every method takes the one table-wide lock for its whole duration, reads
/// included, so calls are linearizable with respect to each other. The lock
/// is never held across an `.await`.
#[derive(Debug, Default)]
pub struct EmployeeStore {
    table: Mutex<EmployeeTable>,
}

impl EmployeeStore {
    // == Constructor ==
    /// Creates an empty store whose first issued id is 0.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, EmployeeTable> {
        // Every mutation completes before the guard drops, so a poisoned
        // table is still consistent.
        self.table.lock().unwrap_or_else(PoisonError::into_inner)
    }

    // == Create ==
    /// Inserts a new employee and returns its freshly issued id.
    ///
    /// Field contents are not validated here.
    pub fn create(
        &self,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        email: impl Into<String>,
    ) -> EmployeeId {
        let mut table = self.lock();

        let id = table.next_id;
        table
            .employees
            .insert(id, Employee::new(id, first_name, last_name, email));
        table.next_id += 1;
        id
    }

    // == Get All ==
    /// Returns a snapshot of every employee, in no particular order.
    pub fn get_all(&self) -> Vec<Employee> {
        self.lock().employees.values().cloned().collect()
    }

    // == Get ==
    /// Looks up a single employee by id.
    pub fn get(&self, id: EmployeeId) -> StoreResult<Employee> {
        self.lock()
            .employees
            .get(&id)
            .cloned()
            .ok_or(StoreError::NotFound(id))
    }

    // == Delete ==
    /// Removes the employee with the given id.
    pub fn delete(&self, id: EmployeeId) -> StoreResult<()> {
        self.lock()
            .employees
            .remove(&id)
            .map(|_| ())
            .ok_or(StoreError::NotFound(id))
    }

    // == Delete All ==
    /// Removes every employee. The id counter keeps its value.
    pub fn delete_all(&self) {
        self.lock().employees.clear();
    }

    // == Update ==
    /// Replaces every non-id field of an existing employee.
    ///
    /// Omitted values are not merged in: the caller supplies the full record.
    pub fn update(
        &self,
        id: EmployeeId,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        email: impl Into<String>,
    ) -> StoreResult<()> {
        let mut table = self.lock();

        match table.employees.get_mut(&id) {
            Some(employee) => {
                *employee = Employee::new(id, first_name, last_name, email);
                Ok(())
            }
            None => Err(StoreError::NotFound(id)),
        }
    }

    // == Get By Last Name ==
    /// Returns all employees whose last name matches exactly (case-sensitive).
    ///
    /// An empty match set is reported as `StoreError::NoneWithLastName`
    /// rather than an empty list.
    pub fn get_by_last_name(&self, last_name: &str) -> StoreResult<Vec<Employee>> {
        let matches: Vec<Employee> = self
            .lock()
            .employees
            .values()
            .filter(|employee| employee.last_name == last_name)
            .cloned()
            .collect();

        if matches.is_empty() {
            return Err(StoreError::NoneWithLastName(last_name.to_string()));
        }
        Ok(matches)
    }

    // == Length ==
    /// Returns the current number of employees.
    pub fn len(&self) -> usize {
        self.lock().employees.len()
    }

    // == Is Empty ==
    pub fn is_empty(&self) -> bool {
        self.lock().employees.is_empty()
    }
}
