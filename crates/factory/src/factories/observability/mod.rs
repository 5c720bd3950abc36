pub mod error;
pub mod implementation;

use serde::Deserialize;

#[derive(Deserialize, Clone, Debug, Default)]
pub struct ObservabilityConfig {
    pub rust_log: Option<String>,
    pub log_format: Option<String>,
    pub tracing_level: Option<String>,
    pub with_file: Option<bool>,
    pub with_line_number: Option<bool>,
    /// Raise the AMQP transport crates to trace level
    pub trace_frames: bool,
}

pub struct Observability;
