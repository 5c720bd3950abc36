use time::macros::format_description;
use tracing::Level;
use tracing_subscriber::{
    EnvFilter, Layer, fmt::time::LocalTime, layer::SubscriberExt, util::SubscriberInitExt,
};

use crate::factories::observability::{
    Observability, ObservabilityConfig, error::ObservabilityError,
};

const FRAME_TRACE_DIRECTIVES: [&str; 2] = ["lapin=trace", "amq_protocol=trace"];

/// lapin's io loop traces every outgoing frame, Connection.StartOk included,
/// and that frame carries the SASL PLAIN response with the shared access key.
const OUTGOING_FRAME_CAP: &str = "lapin::io_loop=debug";

impl Observability {
    /// Initialize tracing-subscriber with a json or pretty stdout layer.
    pub fn init(config: &ObservabilityConfig) -> Result<Observability, ObservabilityError> {
        let env_filter = Self::env_filter(config)?;

        let timer = LocalTime::new(format_description!(
            "[year]-[month]-[day] [hour]:[minute]:[second]"
        ));
        let with_file = config.with_file.unwrap_or(true);
        let with_line_number = config.with_line_number.unwrap_or(true);

        let fmt_layer = if config.log_format.as_deref() == Some("pretty") {
            tracing_subscriber::fmt::layer()
                .with_ansi(true)
                .with_timer(timer)
                .with_target(false)
                .with_file(with_file)
                .with_line_number(with_line_number)
                .compact()
                .boxed()
        } else {
            tracing_subscriber::fmt::layer()
                .with_timer(timer)
                .with_target(false)
                .with_file(with_file)
                .with_line_number(with_line_number)
                .json()
                .flatten_event(true)
                .with_span_list(false)
                .boxed()
        };

        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .try_init()?;

        Ok(Observability)
    }

    pub fn level(tracing_level: Option<&str>) -> Level {
        tracing_level
            .and_then(|level| level.trim().parse().ok())
            .unwrap_or(Level::INFO)
    }

    /// `rust_log` wins, then `RUST_LOG`, then the tracing level. Frame
    /// tracing adds transport directives on top of whichever was chosen.
    /// Outgoing frames stay capped below trace whatever the source.
    pub fn env_filter(config: &ObservabilityConfig) -> Result<EnvFilter, ObservabilityError> {
        let level = Self::level(config.tracing_level.as_deref());

        let mut env_filter = match config.rust_log.as_deref() {
            Some(rust_log) => EnvFilter::try_new(rust_log)?,
            None => EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(level.as_str().to_lowercase())),
        };

        if config.trace_frames {
            for directive in FRAME_TRACE_DIRECTIVES {
                env_filter = env_filter.add_directive(directive.parse()?);
            }
        }

        Ok(env_filter.add_directive(OUTGOING_FRAME_CAP.parse()?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use servicebus_core::AmqpOptions;

    fn traces_enabled(env_filter: EnvFilter, target_io_loop: bool) -> bool {
        let subscriber = tracing_subscriber::registry().with(env_filter);

        tracing::subscriber::with_default(subscriber, || {
            if target_io_loop {
                tracing::enabled!(target: "lapin::io_loop", Level::TRACE)
            } else {
                tracing::enabled!(target: "lapin::channels", Level::TRACE)
            }
        })
    }

    #[test]
    fn unknown_level_defaults_to_info() {
        assert_eq!(Observability::level(None), Level::INFO);
        assert_eq!(Observability::level(Some("loud")), Level::INFO);
        assert_eq!(Observability::level(Some("DEBUG")), Level::DEBUG);
    }

    #[test]
    fn level_names_are_case_insensitive() {
        assert_eq!(Observability::level(Some("debug")), Level::DEBUG);
        assert_eq!(Observability::level(Some("Warn")), Level::WARN);
        assert_eq!(Observability::level(Some(" trace ")), Level::TRACE);
    }

    #[test]
    fn default_frame_tracing_never_traces_outgoing_frames() {
        let config = ObservabilityConfig {
            rust_log: Some("info".to_string()),
            trace_frames: AmqpOptions::default().trace_frames,
            ..Default::default()
        };

        let rendered = Observability::env_filter(&config).unwrap().to_string();
        assert!(rendered.contains(OUTGOING_FRAME_CAP));

        assert!(!traces_enabled(Observability::env_filter(&config).unwrap(), true));
        assert!(traces_enabled(Observability::env_filter(&config).unwrap(), false));
    }

    #[test]
    fn explicit_lapin_trace_still_caps_outgoing_frames() {
        let config = ObservabilityConfig {
            rust_log: Some("lapin=trace".to_string()),
            ..Default::default()
        };

        assert!(!traces_enabled(Observability::env_filter(&config).unwrap(), true));
    }

    #[test]
    fn frame_tracing_adds_transport_directives() {
        let config = ObservabilityConfig {
            rust_log: Some("info".to_string()),
            trace_frames: true,
            ..Default::default()
        };

        let rendered = Observability::env_filter(&config).unwrap().to_string();

        assert!(rendered.contains("lapin=trace"));
        assert!(rendered.contains("amq_protocol=trace"));
    }

    #[test]
    fn frame_tracing_off_keeps_filter_as_given() {
        let config = ObservabilityConfig {
            rust_log: Some("warn".to_string()),
            ..Default::default()
        };

        let rendered = Observability::env_filter(&config).unwrap().to_string();

        assert!(!rendered.contains("lapin=trace"));
        assert!(!rendered.contains("amq_protocol"));
    }
}
