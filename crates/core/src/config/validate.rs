use super::{types::Config, ConfigError};

/// Validate configuration.
///
/// Missing credentials are not rejected here; the search client refuses to
/// start without them.
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    let easynews = &config.easynews;

    if easynews.page_size == 0 {
        return Err(ConfigError::ValidationError(
            "easynews.page_size cannot be 0".to_string(),
        ));
    }

    if easynews.timeout_secs == 0 {
        return Err(ConfigError::ValidationError(
            "easynews.timeout_secs cannot be 0".to_string(),
        ));
    }

    if !easynews.base_url.starts_with("http://") && !easynews.base_url.starts_with("https://") {
        return Err(ConfigError::ValidationError(format!(
            "easynews.base_url must be an http(s) URL, got '{}'",
            easynews.base_url
        )));
    }

    Ok(())
}
