pub mod error;
pub mod implementation;

use std::sync::Arc;

use lapin::Connection;

use crate::factories::tls::TlsConfig;

/// lapin-backed [`servicebus_core::ConnectionFactory`].
#[derive(Clone, Debug, Default)]
pub struct LapinConnectionFactory {
    tls_config: Option<TlsConfig>,
}

#[derive(Clone)]
pub struct Amqp {
    connection: Arc<Connection>,
}
