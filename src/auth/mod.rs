//! Auth Module
//!
//! Username/password verification for HTTP Basic authentication.

mod credentials;

pub use credentials::StaticCredentials;

/// Source of truth for Basic credentials.
///
/// Implementations must not reveal whether a username exists: an unknown user
/// and a wrong password both return `false`.
pub trait CredentialStore: Send + Sync {
    /// Returns true when `password` is valid for `username`.
    fn verify(&self, username: &str, password: &str) -> bool;
}
