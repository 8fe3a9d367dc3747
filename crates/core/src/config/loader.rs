use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use std::path::Path;

use super::{types::Config, ConfigError};

/// Variables sharing the `EASYNEWS_` prefix that belong to the binary, not
/// to the config tree.
const NON_CONFIG_VARS: &[&str] = &["config", "log_format"];

/// Load configuration from a TOML file, then apply `EASYNEWS_` environment
/// overrides.
///
/// Nested keys are separated by a double underscore, e.g.
/// `EASYNEWS_EASYNEWS__CREDENTIALS__PASSWORD` sets
/// `easynews.credentials.password`.
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::FileNotFound(path.display().to_string()));
    }

    Figment::new()
        .merge(Toml::file(path))
        .merge(
            Env::prefixed("EASYNEWS_")
                .ignore(NON_CONFIG_VARS)
                .split("__"),
        )
        .extract()
        .map_err(|e| ConfigError::ParseError(e.to_string()))
}

/// Parse configuration from a TOML string, without environment overrides.
pub fn load_config_from_str(toml_str: &str) -> Result<Config, ConfigError> {
    toml::from_str(toml_str).map_err(|e| ConfigError::ParseError(e.to_string()))
}
