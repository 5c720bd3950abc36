use std::future::Future;
use std::sync::Arc;

use lapin::{Connection, ConnectionProperties};
use servicebus_core::{ConnectionConfig, ConnectionFactory};
use tracing::{info, warn};

use crate::factories::amqp::error::AmqpError;
use crate::factories::amqp::{Amqp, LapinConnectionFactory};
use crate::factories::tls::TlsConfig;

impl LapinConnectionFactory {
    pub fn new(tls_config: Option<TlsConfig>) -> Self {
        Self { tls_config }
    }
}

impl ConnectionFactory for LapinConnectionFactory {
    type Connection = Amqp;
    type Error = AmqpError;

    fn connect(
        &self,
        config: &ConnectionConfig,
    ) -> impl Future<Output = Result<Amqp, AmqpError>> + Send {
        let uri = lapin_uri(config);
        let host = config.host().to_string();
        let tls = self
            .tls_config
            .as_ref()
            .map(TlsConfig::build_lapin_config)
            .transpose();
        let options =
            ConnectionProperties::default().with_connection_name(config.client_id().into());

        async move {
            let tls = tls?.unwrap_or_default();

            let connection = Connection::connect_with_config(&uri, options, tls)
                .await
                .inspect_err(|e| warn!(host = %host, "AMQP connection failed: {}", e))?;
            info!(host = %host, "✅ AMQP connection established");

            Ok(Amqp {
                connection: Arc::new(connection),
            })
        }
    }
}

impl Amqp {
    pub fn connection(&self) -> &Connection {
        &self.connection
    }

    pub fn is_connected(&self) -> bool {
        self.connection.status().connected()
    }

    pub async fn close(&self) -> Result<(), AmqpError> {
        self.connection.close(200, "OK".into()).await?;
        info!("AMQP connection closed");
        Ok(())
    }
}

/// Heartbeats go out at half the idle timeout so the broker never sees the
/// link idle for a full period.
pub fn heartbeat_seconds(idle_timeout_millis: u64) -> u16 {
    let seconds = idle_timeout_millis / 1000 / 2;
    seconds.clamp(1, u64::from(u16::MAX)) as u16
}

/// lapin's URI form of the descriptor: credentials in the userinfo and the
/// idle timeout mapped onto the heartbeat query parameter.
pub fn lapin_uri(config: &ConnectionConfig) -> String {
    format!(
        "amqps://{}:{}@{}?heartbeat={}",
        urlencoding::encode(config.username()),
        urlencoding::encode(config.password().expose()),
        config.host(),
        heartbeat_seconds(config.options().idle_timeout_millis)
    )
}
