pub mod error;
pub mod factory;
pub mod implementation;
pub mod schemas;
pub mod secret;

pub use error::{MalformedReason, ServiceBusError};
pub use factory::ConnectionFactory;
pub use implementation::parse;
pub use schemas::{AmqpOptions, ConnectionConfig, ConnectionCredentials, ConnectionFactoryBuilder};
pub use secret::SecretString;
