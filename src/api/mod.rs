//! API Module
//!
//! HTTP handlers, extractors and routing for the employee REST API.
//!
//! # Endpoints
//! - `POST /employee/` - Create an employee (Basic auth)
//! - `GET /employee/` - List all employees
//! - `DELETE /employee/` - Delete all employees (Basic auth)
//! - `GET /employee/:id/` - Get an employee by id
//! - `PUT /employee/:id/` - Replace an employee (Basic auth)
//! - `DELETE /employee/:id/` - Delete an employee (Basic auth)
//! - `GET /employee/:lastName/` - List employees by last name
//! - `GET /health` - Health check endpoint

pub mod extract;
pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::{create_router, with_common_layers};
