//! TLS Module
//!
//! Builds the rustls server configuration used when the server is started with
//! `--certfile` and `--keyfile`. Only TLS 1.3 is accepted.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::sync::Arc;

use anyhow::{anyhow, bail, Context};
use axum_server::tls_rustls::RustlsConfig;
use rustls::crypto::ring;
use rustls::pki_types::{CertificateDer, PrivateKeyDer};
use rustls::version::TLS13;
use rustls::ServerConfig;

/// Builds a TLS 1.3-only rustls server config from PEM files.
pub fn server_config(cert_path: &Path, key_path: &Path) -> anyhow::Result<ServerConfig> {
    let certs = load_certs(cert_path)?;
    let key = load_private_key(key_path)?;

    let mut config = ServerConfig::builder_with_provider(Arc::new(ring::default_provider()))
        .with_protocol_versions(&[&TLS13])
        .context("crypto provider does not support TLS 1.3")?
        .with_no_client_auth()
        .with_single_cert(certs, key)
        .context("certificate chain and private key are not usable together")?;
    config.alpn_protocols = vec![b"h2".to_vec(), b"http/1.1".to_vec()];

    Ok(config)
}

/// Wraps `server_config` for use with `axum_server::bind_rustls`.
pub fn rustls_config(cert_path: &Path, key_path: &Path) -> anyhow::Result<RustlsConfig> {
    let config = server_config(cert_path, key_path)?;
    Ok(RustlsConfig::from_config(Arc::new(config)))
}

fn open(path: &Path, what: &str) -> anyhow::Result<BufReader<File>> {
    let file = File::open(path)
        .with_context(|| format!("failed to open {} file {}", what, path.display()))?;
    Ok(BufReader::new(file))
}

fn load_certs(path: &Path) -> anyhow::Result<Vec<CertificateDer<'static>>> {
    let mut reader = open(path, "certificate")?;
    let certs = rustls_pemfile::certs(&mut reader)
        .collect::<Result<Vec<_>, _>>()
        .with_context(|| format!("failed to parse certificates in {}", path.display()))?;

    if certs.is_empty() {
        bail!("no certificates found in {}", path.display());
    }
    Ok(certs)
}

fn load_private_key(path: &Path) -> anyhow::Result<PrivateKeyDer<'static>> {
    let mut reader = open(path, "key")?;
    rustls_pemfile::private_key(&mut reader)
        .with_context(|| format!("failed to parse private key in {}", path.display()))?
        .ok_or_else(|| anyhow!("no private key found in {}", path.display()))
}
