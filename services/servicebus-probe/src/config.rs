use std::path::PathBuf;

use factory::factories::{observability::ObservabilityConfig, tls::TlsConfig};
use servicebus_core::{AmqpOptions, SecretString};
use utility::{ConfigError, get_config_value, get_optional_config_value};

#[derive(Clone)]
pub struct Config {
    pub cargo_pkg_name: String,
    pub cargo_pkg_version: String,

    // SERVICE BUS
    pub connection_string: SecretString,
    pub client_id: String,
    pub amqp_options: AmqpOptions,
    pub probe_connect: bool,

    // OBSERVABILITY
    pub observability: ObservabilityConfig,

    // SSL/TLS
    pub tls_config: Option<TlsConfig>,
}

impl Config {
    pub async fn init() -> Result<Self, ConfigError> {
        let base_dir = find_project_root().unwrap_or_else(|| PathBuf::from("."));

        let connection_string = get_config_value(
            "servicebus_connection_string",
            Some("SERVICEBUS_CONNECTION_STRING"),
            None,
            None,
        )
        .await?;
        let client_id = get_config_value(
            "servicebus_client_id",
            Some("SERVICEBUS_CLIENT_ID"),
            None,
            None,
        )
        .await?;

        let defaults = AmqpOptions::default();
        let idle_timeout_millis = get_config_value(
            "AMQP_IDLE_TIMEOUT_MILLIS",
            Some("AMQP_IDLE_TIMEOUT_MILLIS"),
            None,
            Some(defaults.idle_timeout_millis),
        )
        .await?;
        let trace_frames = get_config_value(
            "AMQP_TRACE_FRAMES",
            Some("AMQP_TRACE_FRAMES"),
            None,
            Some(defaults.trace_frames),
        )
        .await?;
        let probe_connect =
            get_config_value("PROBE_CONNECT", Some("PROBE_CONNECT"), None, Some(false)).await?;

        let observability = ObservabilityConfig {
            rust_log: get_optional_config_value("RUST_LOG", Some("RUST_LOG"), None).await?,
            log_format: get_optional_config_value("LOG_FORMAT", Some("LOG_FORMAT"), None).await?,
            tracing_level: get_optional_config_value("TRACING_LEVEL", Some("TRACING_LEVEL"), None)
                .await?,
            with_file: get_optional_config_value("WITH_FILE", Some("WITH_FILE"), None).await?,
            with_line_number: get_optional_config_value(
                "WITH_LINE_NUMBER",
                Some("WITH_LINE_NUMBER"),
                None,
            )
            .await?,
            trace_frames,
        };

        // TLS certs: Docker secrets → env, otherwise the file is handed to TlsConfig
        let tls_config = resolve_tls_config(
            get_optional_config_value("ca.pem", Some("CA"), None).await?,
            base_dir.join("certs/ca/ca.pem"),
            get_optional_config_value("client-cert.pem", Some("CLIENT_CERT"), None).await?,
            base_dir.join("certs/client/client-cert.pem"),
            get_optional_config_value("client-key.pem", Some("CLIENT_KEY"), None).await?,
            base_dir.join("certs/client/client-key.pem"),
        );

        Ok(Config {
            cargo_pkg_name: env!("CARGO_PKG_NAME").to_string(),
            cargo_pkg_version: env!("CARGO_PKG_VERSION").to_string(),
            connection_string,
            client_id,
            amqp_options: AmqpOptions {
                idle_timeout_millis,
                trace_frames,
            },
            probe_connect,
            observability,
            tls_config,
        })
    }
}

fn resolve_tls_config(
    ca: Option<String>,
    ca_path: PathBuf,
    client_cert: Option<String>,
    client_cert_path: PathBuf,
    client_key: Option<String>,
    client_key_path: PathBuf,
) -> Option<TlsConfig> {
    let existing = |path: PathBuf| path.exists().then_some(path);

    let tls = TlsConfig {
        ca,
        ca_path: existing(ca_path),
        client_cert,
        client_cert_path: existing(client_cert_path),
        client_key,
        client_key_path: existing(client_key_path),
    };

    let empty = tls.ca.is_none()
        && tls.ca_path.is_none()
        && tls.client_cert.is_none()
        && tls.client_cert_path.is_none()
        && tls.client_key.is_none()
        && tls.client_key_path.is_none();

    (!empty).then_some(tls)
}

fn find_project_root() -> Option<PathBuf> {
    let mut dir = std::env::current_dir().ok()?;
    loop {
        if dir.join("Cargo.toml").exists() {
            return Some(dir);
        }
        if !dir.pop() {
            return None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_tls_material_means_no_tls_config() {
        let missing = PathBuf::from("/nonexistent/servicebus/certs.pem");

        let tls = resolve_tls_config(None, missing.clone(), None, missing.clone(), None, missing);

        assert!(tls.is_none());
    }

    #[test]
    fn existing_cert_files_are_passed_as_paths() {
        let ca_path = std::env::temp_dir().join("servicebus-probe-ca-test.pem");
        std::fs::write(&ca_path, "-----BEGIN CERTIFICATE-----\n").unwrap();
        let missing = PathBuf::from("/nonexistent/servicebus/client.pem");

        let tls = resolve_tls_config(
            None,
            ca_path.clone(),
            None,
            missing.clone(),
            None,
            missing,
        )
        .unwrap();
        let lapin_config = tls.build_lapin_config().unwrap();

        std::fs::remove_file(&ca_path).unwrap();
        assert_eq!(tls.ca_path.as_deref(), Some(ca_path.as_path()));
        assert!(tls.client_cert_path.is_none());
        assert_eq!(
            lapin_config.cert_chain.as_deref(),
            Some("-----BEGIN CERTIFICATE-----\n")
        );
    }
}
