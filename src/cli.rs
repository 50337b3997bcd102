use std::path::{Path, PathBuf};

use clap::Parser;

/// Command line interface for the employee server
#[derive(Parser, Debug, Clone)]
#[command(name = "employee_base", version, about)]
pub struct Cli {
    /// PEM file with the server certificate chain; enables TLS 1.3
    #[arg(long, value_name = "PATH", requires = "keyfile")]
    pub certfile: Option<PathBuf>,

    /// PEM file with the server private key
    #[arg(long, value_name = "PATH", requires = "certfile")]
    pub keyfile: Option<PathBuf>,
}

impl Cli {
    /// Certificate and key paths when TLS was requested.
    pub fn tls_paths(&self) -> Option<(&Path, &Path)> {
        match (&self.certfile, &self.keyfile) {
            (Some(cert), Some(key)) => Some((cert.as_path(), key.as_path())),
            _ => None,
        }
    }
}
