pub mod config;

use std::path::Path;

use anyhow::anyhow;
use factory::factories::{amqp::LapinConnectionFactory, observability::Observability};
use servicebus_core::{ConnectionFactory, ConnectionFactoryBuilder, parse};
use tokio::signal;
use tracing::{info, warn};

use crate::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    rustls::crypto::ring::default_provider()
        .install_default()
        .map_err(|_| anyhow!("Failed to install rustls crypto provider"))?;

    utility::load_service_env::load_service_env(Path::new(env!("CARGO_MANIFEST_DIR")));
    let config = Config::init().await?;
    let _observability = Observability::init(&config.observability)?;

    let credentials = parse(config.connection_string.expose())?;
    let connection_config =
        ConnectionFactoryBuilder::new(config.amqp_options).build(&credentials, &config.client_id)?;

    info!(
        remote_uri = connection_config.remote_uri(),
        username = connection_config.username(),
        client_id = connection_config.client_id(),
        entity_path = ?credentials.entity_path(),
        "🚀 {} v{} resolved connection config",
        config.cargo_pkg_name,
        config.cargo_pkg_version
    );

    if !config.probe_connect {
        return Ok(());
    }

    let factory = LapinConnectionFactory::new(config.tls_config.clone());

    let amqp = tokio::select! {
        amqp = factory.connect(&connection_config) => amqp?,
        _ = shutdown_signal() => {
            warn!("Shutdown requested before the connection was established");
            return Ok(());
        }
    };

    info!(connected = amqp.is_connected(), "AMQP probe succeeded");
    amqp.close().await?;

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                warn!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
