//! Environment variable expansion for configuration values.

use crate::ConfigError;

/// Expand `~`, `${VAR}` and `${VAR:-default}` in a configuration value.
///
/// `field` names the config key in error messages.
pub(crate) fn expand_env(value: &str, field: &str) -> Result<String, ConfigError> {
    shellexpand::full(value)
        .map(std::borrow::Cow::into_owned)
        .map_err(|e| ConfigError::EnvVar {
            field: field.to_owned(),
            message: format!("${{{}}} not set", e.var_name),
        })
}
