use serde::Deserialize;

use crate::error::ConversionResult;

/// Override directives for one tracker evaluation. Loaded from environment
/// variables with the prefix `EN_CONVERSION__`, or decoded from the options
/// object a host page passes in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct TrackerConfig {
    /// Convert on this page load even when no decision rule matches.
    #[serde(default = "default_force_convert", alias = "forceConvert")]
    pub force_convert: bool,
    /// Never convert on this page load.
    #[serde(default = "default_force_skip", alias = "forceSkip")]
    pub force_skip: bool,
}

fn default_force_convert() -> bool {
    false
}
fn default_force_skip() -> bool {
    false
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            force_convert: default_force_convert(),
            force_skip: default_force_skip(),
        }
    }
}

impl TrackerConfig {
    pub fn forcing_conversion(mut self) -> Self {
        self.force_convert = true;
        self
    }

    pub fn skipping_conversion(mut self) -> Self {
        self.force_skip = true;
        self
    }

    /// Load configuration from environment variables.
    pub fn load() -> ConversionResult<Self> {
        let builder = config::Config::builder().add_source(
            config::Environment::with_prefix("EN_CONVERSION")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build()?;
        Ok(config.try_deserialize()?)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_off() {
        let config = TrackerConfig::default();
        assert!(!config.force_convert);
        assert!(!config.force_skip);
    }

    #[test]
    fn test_builder_helpers() {
        let config = TrackerConfig::default().forcing_conversion();
        assert!(config.force_convert);
        assert!(!config.force_skip);

        let config = TrackerConfig::default().skipping_conversion();
        assert!(config.force_skip);
    }

    #[test]
    fn test_host_options_object() {
        let config: TrackerConfig =
            serde_json::from_str(r#"{"forceConvert":true}"#).unwrap();
        assert!(config.force_convert);
        assert!(!config.force_skip);

        let config: TrackerConfig = serde_json::from_str(r#"{"force_skip":true}"#).unwrap();
        assert!(config.force_skip);

        let config: TrackerConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, TrackerConfig::default());
    }

    #[test]
    fn test_load_without_env_uses_defaults() {
        let config = TrackerConfig::load().unwrap();
        assert_eq!(config, TrackerConfig::default());
    }
}
