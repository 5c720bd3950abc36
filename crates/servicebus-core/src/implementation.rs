use std::str::FromStr;

use tracing::debug;
use url::Url;

use crate::error::{MalformedReason, ServiceBusError};
use crate::schemas::{AmqpOptions, ConnectionConfig, ConnectionCredentials, ConnectionFactoryBuilder};
use crate::secret::SecretString;

const ENDPOINT: &str = "Endpoint";
const SHARED_ACCESS_KEY_NAME: &str = "SharedAccessKeyName";
const SHARED_ACCESS_KEY: &str = "SharedAccessKey";
const ENTITY_PATH: &str = "EntityPath";

/// Parse a `Key=Value;Key=Value` broker connection string.
///
/// Keys are matched case-insensitively and unknown keys are skipped. Values are
/// split on the first `=` only, so base64 padding in keys survives. The
/// `Endpoint` value is reduced to its host component.
pub fn parse(raw: &str) -> Result<ConnectionCredentials, ServiceBusError> {
    if raw.trim().is_empty() {
        return Err(MalformedReason::Empty.into());
    }

    let mut endpoint = None;
    let mut shared_access_key_name = None;
    let mut shared_access_key = None;
    let mut entity_path = None;

    for (index, segment) in raw.split(';').enumerate() {
        let segment = segment.trim();
        if segment.is_empty() {
            continue;
        }

        let (key, value) = segment
            .split_once('=')
            .ok_or(MalformedReason::MissingSeparator { segment: index + 1 })?;
        let (key, value) = (key.trim(), value.trim());

        if key.eq_ignore_ascii_case(ENDPOINT) {
            endpoint = Some(value);
        } else if key.eq_ignore_ascii_case(SHARED_ACCESS_KEY_NAME) {
            shared_access_key_name = Some(value);
        } else if key.eq_ignore_ascii_case(SHARED_ACCESS_KEY) {
            shared_access_key = Some(value);
        } else if key.eq_ignore_ascii_case(ENTITY_PATH) {
            entity_path = Some(value);
        }
    }

    let endpoint = extract_host(required(endpoint, ENDPOINT)?)?;
    let shared_access_key_name = required(shared_access_key_name, SHARED_ACCESS_KEY_NAME)?;
    let shared_access_key = required(shared_access_key, SHARED_ACCESS_KEY)?;

    Ok(ConnectionCredentials {
        endpoint,
        shared_access_key_name: shared_access_key_name.to_string(),
        shared_access_key: SecretString::new(shared_access_key),
        entity_path: entity_path
            .filter(|value| !value.is_empty())
            .map(str::to_string),
    })
}

fn required<'a>(value: Option<&'a str>, key: &'static str) -> Result<&'a str, MalformedReason> {
    value
        .filter(|value| !value.is_empty())
        .ok_or(MalformedReason::MissingKey(key))
}

fn extract_host(endpoint: &str) -> Result<String, MalformedReason> {
    let url =
        Url::parse(endpoint).map_err(|e| MalformedReason::InvalidEndpoint(e.to_string()))?;

    match url.host_str() {
        Some(host) if !host.is_empty() => Ok(host.to_string()),
        _ => Err(MalformedReason::InvalidEndpoint("missing host".to_string())),
    }
}

impl FromStr for ConnectionCredentials {
    type Err = ServiceBusError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        parse(raw)
    }
}

impl ConnectionCredentials {
    /// Namespace host, without scheme or path.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn shared_access_key_name(&self) -> &str {
        &self.shared_access_key_name
    }

    pub fn shared_access_key(&self) -> &SecretString {
        &self.shared_access_key
    }

    pub fn entity_path(&self) -> Option<&str> {
        self.entity_path.as_deref()
    }
}

impl ConnectionFactoryBuilder {
    pub fn new(options: AmqpOptions) -> Self {
        Self { options }
    }

    pub fn idle_timeout_millis(mut self, idle_timeout_millis: u64) -> Self {
        self.options.idle_timeout_millis = idle_timeout_millis;
        self
    }

    pub fn trace_frames(mut self, trace_frames: bool) -> Self {
        self.options.trace_frames = trace_frames;
        self
    }

    pub fn options(&self) -> AmqpOptions {
        self.options
    }

    /// Produce the connection descriptor. No I/O happens here.
    pub fn build(
        &self,
        credentials: &ConnectionCredentials,
        client_id: &str,
    ) -> Result<ConnectionConfig, ServiceBusError> {
        if client_id.trim().is_empty() {
            return Err(ServiceBusError::InvalidClientId);
        }

        let remote_uri = format!(
            "amqps://{}?amqp.idleTimeout={}&amqp.traceFrames={}",
            credentials.endpoint, self.options.idle_timeout_millis, self.options.trace_frames
        );

        debug!(
            host = %credentials.endpoint,
            client_id,
            idle_timeout_millis = self.options.idle_timeout_millis,
            trace_frames = self.options.trace_frames,
            "connection config built"
        );

        Ok(ConnectionConfig {
            remote_uri,
            host: credentials.endpoint.clone(),
            client_id: client_id.to_string(),
            username: credentials.shared_access_key_name.clone(),
            password: credentials.shared_access_key.clone(),
            options: self.options,
        })
    }
}

impl ConnectionConfig {
    pub fn remote_uri(&self) -> &str {
        &self.remote_uri
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn password(&self) -> &SecretString {
        &self.password
    }

    pub fn options(&self) -> AmqpOptions {
        self.options
    }
}
