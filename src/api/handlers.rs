//! API Handlers
//!
//! HTTP request handlers for each employee server endpoint. Handlers only
//! translate between HTTP and `EmployeeStore` calls; store errors become
//! `ApiError`s one level up.

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use tracing::{debug, info};

use super::extract::{BasicAuthUser, EmployeeKey, IdPath, JsonBody};
use crate::auth::CredentialStore;
use crate::error::Result;
use crate::models::{CreatedResponse, EmployeeRequest, HealthResponse};
use crate::storage::{Employee, EmployeeStore};

/// Application state shared across all handlers.
///
/// The store guards itself, so handlers share it through a plain `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// Employee table
    pub store: Arc<EmployeeStore>,
    /// Credential source consulted by `BasicAuthUser`
    pub credentials: Arc<dyn CredentialStore>,
}

impl AppState {
    /// Creates a new AppState from a store and a credential source.
    pub fn new(store: EmployeeStore, credentials: impl CredentialStore + 'static) -> Self {
        Self {
            store: Arc::new(store),
            credentials: Arc::new(credentials),
        }
    }

    /// Creates a new AppState from configuration.
    ///
    /// Starts with an empty store and the configured credential table.
    pub fn from_config(config: &crate::config::Config) -> anyhow::Result<Self> {
        let credentials = config.load_credentials()?;
        Ok(Self::new(EmployeeStore::new(), credentials))
    }
}

/// Handler for POST /employee/
///
/// Creates an employee and returns its new id.
pub async fn create_employee_handler(
    State(state): State<AppState>,
    BasicAuthUser(user): BasicAuthUser,
    JsonBody(req): JsonBody<EmployeeRequest>,
) -> Json<CreatedResponse> {
    let id = state.store.create(req.first_name, req.last_name, req.email);
    info!(id, user = %user, "created employee");

    Json(CreatedResponse::new(id))
}

/// Handler for GET /employee/
///
/// Lists every employee, in no particular order.
pub async fn get_all_employees_handler(State(state): State<AppState>) -> Json<Vec<Employee>> {
    let employees = state.store.get_all();
    debug!(count = employees.len(), "listing employees");

    Json(employees)
}

/// Handler for DELETE /employee/
///
/// Removes every employee. Ids keep counting from where they were.
pub async fn delete_all_employees_handler(
    State(state): State<AppState>,
    BasicAuthUser(user): BasicAuthUser,
) -> StatusCode {
    state.store.delete_all();
    info!(user = %user, "deleted all employees");

    StatusCode::OK
}

/// Handler for GET /employee/:key/
///
/// A numeric key fetches one employee; anything else filters by last name.
pub async fn get_by_key_handler(state: State<AppState>, key: EmployeeKey) -> Result<Response> {
    match key {
        EmployeeKey::Id(id) => Ok(get_employee_handler(state, IdPath(id)).await?.into_response()),
        EmployeeKey::LastName(last_name) => {
            Ok(get_by_last_name_handler(state, last_name).await?.into_response())
        }
    }
}

/// Fetches a single employee by id.
pub async fn get_employee_handler(
    State(state): State<AppState>,
    IdPath(id): IdPath,
) -> Result<Json<Employee>> {
    debug!(id, "fetching employee");
    let employee = state.store.get(id)?;

    Ok(Json(employee))
}

/// Lists employees with exactly this last name; no match is a 404.
pub async fn get_by_last_name_handler(
    State(state): State<AppState>,
    last_name: String,
) -> Result<Json<Vec<Employee>>> {
    debug!(last_name = %last_name, "fetching employees by last name");
    let employees = state.store.get_by_last_name(&last_name)?;

    Ok(Json(employees))
}

/// Handler for DELETE /employee/:id/
pub async fn delete_employee_handler(
    State(state): State<AppState>,
    IdPath(id): IdPath,
    BasicAuthUser(user): BasicAuthUser,
) -> Result<StatusCode> {
    state.store.delete(id)?;
    info!(id, user = %user, "deleted employee");

    Ok(StatusCode::OK)
}

/// Handler for PUT /employee/:id/
///
/// Replaces all fields of an existing employee; omitted fields become empty.
pub async fn update_employee_handler(
    State(state): State<AppState>,
    IdPath(id): IdPath,
    BasicAuthUser(user): BasicAuthUser,
    JsonBody(req): JsonBody<EmployeeRequest>,
) -> Result<StatusCode> {
    state
        .store
        .update(id, req.first_name, req.last_name, req.email)?;
    info!(id, user = %user, "updated employee");

    Ok(StatusCode::OK)
}

/// Handler for GET /health
pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse::healthy(state.store.len()))
}
