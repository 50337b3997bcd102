//! Static Credential Table
//!
//! Username to bcrypt hash lookup, either built in or loaded from a JSON file.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use anyhow::Context;
use tracing::debug;

use super::CredentialStore;

/// Accounts shipped with the server when no credential file is configured.
const BUILTIN_USERS: &[(&str, &str)] = &[
    (
        "joe",
        "$2a$12$aMfFQpGSiPiYkekov7LOsu63pZFaWzmlfm1T8lvG6JFj2Bh4SZPWS",
    ),
    (
        "mary",
        "$2a$12$u.Q6ehmzh.Qd4UnCM52Gq.2Ip/jQ5/XdtODV//gvLWxMonGZFWQGy",
    ),
];

/// Verified against for unknown usernames so both paths pay the bcrypt cost.
const DUMMY_HASH: &str = "$2a$12$aMfFQpGSiPiYkekov7LOsu63pZFaWzmlfm1T8lvG6JFj2Bh4SZPWS";

// == Static Credentials ==
/// Fixed table of usernames and their bcrypt hashes.
#[derive(Debug, Clone, Default)]
pub struct StaticCredentials {
    users: HashMap<String, String>,
}

impl StaticCredentials {
    /// Creates a table from `(username, bcrypt hash)` pairs.
    pub fn new<I, U, H>(users: I) -> Self
    where
        I: IntoIterator<Item = (U, H)>,
        U: Into<String>,
        H: Into<String>,
    {
        Self {
            users: users
                .into_iter()
                .map(|(user, hash)| (user.into(), hash.into()))
                .collect(),
        }
    }

    /// The built-in account table.
    pub fn builtin() -> Self {
        Self::new(BUILTIN_USERS.iter().copied())
    }

    /// Parses a JSON object of the form `{"username": "<bcrypt hash>"}`.
    pub fn from_json_str(json: &str) -> anyhow::Result<Self> {
        let users: HashMap<String, String> =
            serde_json::from_str(json).context("credential table must be a JSON object of strings")?;
        Ok(Self { users })
    }

    /// Loads the table from a JSON file on disk.
    pub fn from_json_file(path: &Path) -> anyhow::Result<Self> {
        let json = fs::read_to_string(path)
            .with_context(|| format!("failed to read credential file {}", path.display()))?;
        Self::from_json_str(&json)
            .with_context(|| format!("invalid credential file {}", path.display()))
    }

    /// Number of accounts in the table.
    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}

impl CredentialStore for StaticCredentials {
    fn verify(&self, username: &str, password: &str) -> bool {
        match self.users.get(username) {
            Some(hash) => bcrypt::verify(password, hash).unwrap_or_else(|err| {
                debug!(username, error = %err, "stored hash could not be checked");
                false
            }),
            None => {
                let _ = bcrypt::verify(password, DUMMY_HASH);
                false
            }
        }
    }
}
