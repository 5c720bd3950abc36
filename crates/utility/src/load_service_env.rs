use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// `.env` file name for the given `APP_ENV`.
pub fn env_file_name(app_env: &str) -> &'static str {
    match app_env {
        "production" => ".env.production",
        "staging" => ".env.staging",
        _ => ".env",
    }
}

/// Load the service's `.env` file, if any.
///
/// Pass `env!("CARGO_MANIFEST_DIR")` from the binary: it is baked at compile
/// time and won't exist inside a container, where the variables are expected
/// to be set already.
pub fn load_service_env(manifest_dir: &Path) -> Option<PathBuf> {
    let app_env = std::env::var("APP_ENV").unwrap_or_else(|_| "development".into());
    let candidate = manifest_dir.join(env_file_name(&app_env));

    match dotenvy::from_path(&candidate) {
        Ok(_) => {
            info!("✅ Loaded .env from {}", candidate.display());
            Some(candidate)
        }
        Err(e) => {
            warn!(
                "⚠️ No .env file found at {}. Assuming system variables are set.",
                candidate.display()
            );
            warn!("Error detail: {}", e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn picks_env_file_per_environment() {
        assert_eq!(env_file_name("production"), ".env.production");
        assert_eq!(env_file_name("staging"), ".env.staging");
        assert_eq!(env_file_name("development"), ".env");
        assert_eq!(env_file_name(""), ".env");
    }

    #[test]
    fn missing_env_file_is_not_fatal() {
        assert_eq!(load_service_env(Path::new("/nonexistent/servicebus-probe")), None);
    }
}
