use serde::de::DeserializeOwned;

use crate::error::ConfigError;
use crate::get_optional_config_value::get_optional_config_value;
use std::path::PathBuf;

pub async fn get_config_value<T>(
    secret_name: &str,
    env_name: Option<&str>,
    fallback_path: Option<&PathBuf>,
    fallback: Option<T>,
) -> Result<T, ConfigError>
where
    T: DeserializeOwned,
{
    if let Some(value) = get_optional_config_value::<T>(secret_name, env_name, fallback_path).await?
    {
        return Ok(value);
    }

    fallback.ok_or_else(|| ConfigError::NotSet(secret_name.to_string()))
}
