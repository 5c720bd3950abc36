#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Configuration value '{0}' not set (env, secret, or fallback path)")]
    NotSet(String),
    #[error("Configuration value '{name}' from {source_name} couldn't be parsed")]
    Invalid { name: String, source_name: String },
}
