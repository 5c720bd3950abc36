use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::warn;

use crate::error::ConfigError;
use crate::parse_value::parse_value;

const DOCKER_SECRETS_DIR: &str = "/run/secrets";

/// Look a value up as a Docker secret, then an env var, then a file.
/// A source that is present but doesn't parse is an error, not a miss.
pub async fn get_optional_config_value<T>(
    secret_name: &str,
    env_name: Option<&str>,
    fallback_path: Option<&PathBuf>,
) -> Result<Option<T>, ConfigError>
where
    T: DeserializeOwned,
{
    // Docker secret
    let docker_secret = Path::new(DOCKER_SECRETS_DIR).join(secret_name);
    if let Some(parsed) = read_file_value(&docker_secret, secret_name).await? {
        return Ok(Some(parsed));
    }

    // Env var
    if let Some(env_key) = env_name
        && let Ok(val) = dotenvy::var(env_key)
    {
        return match parse_value(&val) {
            Some(parsed) => Ok(Some(parsed)),
            None => Err(invalid(secret_name, format!("env var {}", env_key))),
        };
    }

    // Fallback path
    if let Some(path) = fallback_path {
        return read_file_value(path, secret_name).await;
    }

    Ok(None)
}

async fn read_file_value<T>(path: &Path, secret_name: &str) -> Result<Option<T>, ConfigError>
where
    T: DeserializeOwned,
{
    if !path.exists() {
        return Ok(None);
    }

    let content = match fs::read_to_string(path).await {
        Ok(content) => content,
        Err(e) => {
            warn!("Couldn't read {}: {}", path.display(), e);
            return Ok(None);
        }
    };

    parse_value(&content)
        .map(Some)
        .ok_or_else(|| invalid(secret_name, path.display().to_string()))
}

fn invalid(secret_name: &str, source_name: String) -> ConfigError {
    ConfigError::Invalid {
        name: secret_name.to_string(),
        source_name,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn reads_fallback_file() {
        let path = std::env::temp_dir().join("servicebus-utility-fallback-test.txt");
        fs::write(
            &path,
            "Endpoint=sb://h.example.net/;SharedAccessKeyName=K;SharedAccessKey=S==\n",
        )
        .await
        .unwrap();

        let value: Option<String> =
            get_optional_config_value("servicebus-utility-unset", None, Some(&path))
                .await
                .unwrap();

        assert_eq!(
            value.as_deref(),
            Some("Endpoint=sb://h.example.net/;SharedAccessKeyName=K;SharedAccessKey=S==")
        );

        fs::remove_file(&path).await.unwrap();
    }

    #[tokio::test]
    async fn present_but_unparseable_value_is_an_error() {
        let path = std::env::temp_dir().join("servicebus-utility-invalid-test.txt");
        fs::write(&path, "30s\n").await.unwrap();

        let result =
            get_optional_config_value::<u64>("AMQP_IDLE_TIMEOUT_MILLIS", None, Some(&path)).await;

        fs::remove_file(&path).await.unwrap();
        assert!(matches!(
            result,
            Err(ConfigError::Invalid { name, .. }) if name == "AMQP_IDLE_TIMEOUT_MILLIS"
        ));
    }

    #[tokio::test]
    async fn missing_sources_yield_none() {
        let path = PathBuf::from("/nonexistent/servicebus/value");

        let value: Option<bool> =
            get_optional_config_value("servicebus-utility-unset", None, Some(&path))
                .await
                .unwrap();

        assert_eq!(value, None);
    }
}
