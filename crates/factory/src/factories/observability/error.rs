use thiserror::Error;

#[derive(Error, Debug)]
pub enum ObservabilityError {
    #[error("Invalid filter directive, {0}")]
    DirectiveError(#[from] tracing_subscriber::filter::ParseError),
    #[error("Failed to install tracing subscriber, {0}")]
    InitError(#[from] tracing_subscriber::util::TryInitError),
}
