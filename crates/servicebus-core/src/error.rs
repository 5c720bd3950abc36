use std::fmt;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ServiceBusError {
    #[error("Malformed connection string, {0}")]
    MalformedConnectionString(MalformedReason),

    #[error("Invalid client id, must not be empty")]
    InvalidClientId,
}

/// Why a connection string was rejected.
///
/// Segment text is never carried here: a segment may hold the shared access key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MalformedReason {
    Empty,
    MissingSeparator { segment: usize },
    MissingKey(&'static str),
    InvalidEndpoint(String),
}

impl fmt::Display for MalformedReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "connection string is empty"),
            Self::MissingSeparator { segment } => {
                write!(f, "segment {} has no '=' separator", segment)
            }
            Self::MissingKey(key) => write!(f, "required key '{}' is missing or empty", key),
            Self::InvalidEndpoint(reason) => write!(f, "endpoint is not a valid uri ({})", reason),
        }
    }
}

impl From<MalformedReason> for ServiceBusError {
    fn from(reason: MalformedReason) -> Self {
        Self::MalformedConnectionString(reason)
    }
}
