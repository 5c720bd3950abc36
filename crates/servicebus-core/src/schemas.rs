use serde::Deserialize;

use crate::secret::SecretString;

pub const DEFAULT_IDLE_TIMEOUT_MILLIS: u64 = 120_000;
pub const DEFAULT_TRACE_FRAMES: bool = true;

/// Typed view of a broker connection string.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConnectionCredentials {
    pub(crate) endpoint: String,
    pub(crate) shared_access_key_name: String,
    pub(crate) shared_access_key: SecretString,
    pub(crate) entity_path: Option<String>,
}

#[derive(Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(default)]
pub struct AmqpOptions {
    /// Idle timeout advertised to the broker
    pub idle_timeout_millis: u64,
    /// Low-level AMQP frame tracing
    pub trace_frames: bool,
}

impl Default for AmqpOptions {
    fn default() -> Self {
        Self {
            idle_timeout_millis: DEFAULT_IDLE_TIMEOUT_MILLIS,
            trace_frames: DEFAULT_TRACE_FRAMES,
        }
    }
}

/// Immutable descriptor handed to a transport's connection factory.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConnectionConfig {
    pub(crate) remote_uri: String,
    pub(crate) host: String,
    pub(crate) client_id: String,
    pub(crate) username: String,
    pub(crate) password: SecretString,
    pub(crate) options: AmqpOptions,
}

#[derive(Clone, Debug, Default)]
pub struct ConnectionFactoryBuilder {
    pub(crate) options: AmqpOptions,
}
