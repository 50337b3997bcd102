//! Employee Base - An in-memory employee records server
//!
//! Provides CRUD over employee records with Basic auth on mutating routes
//! and optional TLS 1.3.

pub mod api;
pub mod auth;
pub mod cli;
pub mod config;
pub mod error;
pub mod models;
pub mod storage;
pub mod tls;

pub use api::AppState;
pub use auth::{CredentialStore, StaticCredentials};
pub use cli::Cli;
pub use config::Config;
pub use storage::{Employee, EmployeeId, EmployeeStore};
