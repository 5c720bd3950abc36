use std::{fs, path::PathBuf};

use lapin::tcp::{OwnedIdentity, OwnedTLSConfig};
use tracing::info;

use crate::factories::tls::{TlsConfig, error::TlsError};

impl TlsConfig {
    /// Build the lapin TLS config. Without any material the transport falls
    /// back to its default root store.
    pub fn build_lapin_config(&self) -> Result<OwnedTLSConfig, TlsError> {
        let mut config = OwnedTLSConfig::default();

        if let Some(ca) = Self::resolve(self.ca.clone(), self.ca_path.clone(), "TLS CA")? {
            info!("🔐 AMQP custom CA configured");
            config.cert_chain = Some(ca);
        }

        let client_cert = Self::resolve(
            self.client_cert.clone(),
            self.client_cert_path.clone(),
            "TLS client certificate",
        )?;
        let client_key = Self::resolve(
            self.client_key.clone(),
            self.client_key_path.clone(),
            "TLS client key",
        )?;

        match (client_cert, client_key) {
            (Some(client_cert), Some(client_key)) => {
                info!("🔐 AMQP client certificate configured");
                config.identity = Some(OwnedIdentity::PKCS8 {
                    pem: client_cert.into_bytes(),
                    key: client_key.into_bytes(),
                });
            }
            (None, None) => {}
            _ => return Err(TlsError::IncompleteIdentity),
        }

        Ok(config)
    }

    fn resolve(
        data: Option<String>,
        path: Option<PathBuf>,
        context: &'static str,
    ) -> Result<Option<String>, TlsError> {
        if let Some(data) = data {
            return Ok(Some(data));
        }

        match path {
            Some(path) => fs::read_to_string(&path)
                .map(Some)
                .map_err(|source| TlsError::Read {
                    context,
                    path,
                    source,
                }),
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_material_yields_default_config() {
        let config = TlsConfig::default().build_lapin_config().unwrap();

        assert!(config.cert_chain.is_none());
        assert!(config.identity.is_none());
    }

    #[test]
    fn inline_ca_is_used() {
        let tls = TlsConfig {
            ca: Some("-----BEGIN CERTIFICATE-----".to_string()),
            ..Default::default()
        };

        let config = tls.build_lapin_config().unwrap();

        assert_eq!(
            config.cert_chain.as_deref(),
            Some("-----BEGIN CERTIFICATE-----")
        );
    }

    #[test]
    fn cert_without_key_is_rejected() {
        let tls = TlsConfig {
            client_cert: Some("cert".to_string()),
            ..Default::default()
        };

        assert!(matches!(
            tls.build_lapin_config(),
            Err(TlsError::IncompleteIdentity)
        ));
    }

    #[test]
    fn unreadable_path_reports_context() {
        let tls = TlsConfig {
            ca_path: Some(PathBuf::from("/nonexistent/servicebus/ca.pem")),
            ..Default::default()
        };

        let err = tls.build_lapin_config().unwrap_err();

        assert!(matches!(err, TlsError::Read { context: "TLS CA", .. }));
    }
}
