use std::future::Future;

use crate::schemas::ConnectionConfig;

/// A transport that can open a connection from a [`ConnectionConfig`].
///
/// The configuration is passed in rather than baked into the factory, so one
/// factory (TLS material, runtime handles) can serve many descriptors.
pub trait ConnectionFactory {
    type Connection;
    type Error;

    fn connect(
        &self,
        config: &ConnectionConfig,
    ) -> impl Future<Output = Result<Self::Connection, Self::Error>> + Send;
}
