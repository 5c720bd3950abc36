pub mod error;
pub mod get_config_value;
pub mod get_optional_config_value;
pub mod load_service_env;
pub mod parse_value;

pub use error::ConfigError;
pub use get_config_value::get_config_value;
pub use get_optional_config_value::get_optional_config_value;
