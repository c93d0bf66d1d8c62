//! TLS client configuration for the broker connection.
//!
//! The trust store holds only the certificates from the supplied CA
//! bundle; the platform roots are never consulted. Protocol versions run
//! from the configured minimum (TLS 1.2 by default) up to TLS 1.3.

use std::path::Path;
use std::sync::Arc;

use rumqttc::tokio_rustls::rustls::{self, ClientConfig, ProtocolVersion, RootCertStore};

use crate::error::{MqttError, MqttResult};

/// Lowest protocol version the client will negotiate.
pub const MIN_TLS_VERSION: ProtocolVersion = ProtocolVersion::TLSv1_2;

static TLS12_AND_UP: &[&rustls::SupportedProtocolVersion] =
    &[&rustls::version::TLS13, &rustls::version::TLS12];

static TLS13_ONLY: &[&rustls::SupportedProtocolVersion] = &[&rustls::version::TLS13];

/// Versions the client offers when `min` is the floor.
pub fn protocol_versions(
    min: ProtocolVersion,
) -> MqttResult<&'static [&'static rustls::SupportedProtocolVersion]> {
    match min {
        ProtocolVersion::TLSv1_2 => Ok(TLS12_AND_UP),
        ProtocolVersion::TLSv1_3 => Ok(TLS13_ONLY),
        other => Err(MqttError::Tls(format!(
            "unsupported minimum TLS version {other:?}"
        ))),
    }
}

/// Read a PEM CA bundle from disk.
pub fn load_ca_bundle(path: impl AsRef<Path>) -> MqttResult<Vec<u8>> {
    let path = path.as_ref();
    std::fs::read(path).map_err(|e| {
        MqttError::Io(format!(
            "failed to read CA bundle '{}': {e}",
            path.display()
        ))
    })
}

/// Parse every certificate in a PEM bundle into a root store.
///
/// Fails if the bundle holds no certificates or any of them is rejected.
pub fn root_store(ca_pem: &[u8]) -> MqttResult<RootCertStore> {
    let mut reader = ca_pem;
    let mut roots = RootCertStore::empty();

    for cert in rustls_pemfile::certs(&mut reader) {
        let cert = cert
            .map_err(|e| MqttError::Tls(format!("unreadable certificate in CA bundle: {e}")))?;
        roots
            .add(cert)
            .map_err(|e| MqttError::Tls(format!("CA certificate rejected: {e}")))?;
    }

    if roots.is_empty() {
        return Err(MqttError::Tls("CA bundle contains no certificates".into()));
    }
    Ok(roots)
}

/// Build the shared rustls client config trusting only `ca_pem`.
pub fn client_config(
    ca_pem: &[u8],
    min_version: ProtocolVersion,
) -> MqttResult<Arc<ClientConfig>> {
    let versions = protocol_versions(min_version)?;
    let roots = root_store(ca_pem)?;
    let config = ClientConfig::builder_with_protocol_versions(versions)
        .with_root_certificates(roots)
        .with_no_client_auth();
    Ok(Arc::new(config))
}
