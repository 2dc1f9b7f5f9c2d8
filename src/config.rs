/*
    ABSTRACT: Settings for the sample listener. The library itself takes no configuration, these
    settings only shape what the `basic-threat-event-listener` binary prints.
*/
use ::config::{Config, Environment, File, Map};
use serde::Deserialize;

/// Default configuration file name, looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "threat-event";
/// Prefix for configuration environment variables, e.g. `THREAT_EVENT__PRETTY=false`.
pub const CONFIG_ENV_PREFIX: &str = "THREAT_EVENT";
/// Environment variable for logging configuration.
pub const LOG_ENV_VAR: &str = "THREAT_EVENT_LOG";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// `EnvFilter` directives used when `THREAT_EVENT_LOG` is not set.
    pub log_filter: String,
    /// Expand `listOf` / `setOf` fields of `otherData` before printing.
    pub normalize_other_data: bool,
    /// Pretty-print the received structure.
    pub pretty: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            log_filter: "info".to_string(),
            normalize_other_data: true,
            pretty: true,
        }
    }
}

impl Settings {
    /// Load settings from `threat-event.{yaml,toml,json}` (if present) and the environment.
    ///
    /// Environment variables override the file.
    pub fn load() -> crate::Result<Self> {
        Self::load_with_env(None)
    }

    /// Same as `load`, reading `THREAT_EVENT__*` variables from `env` instead of the process
    /// environment when given.
    fn load_with_env(env: Option<Map<String, String>>) -> crate::Result<Self> {
        let settings = Config::builder()
            .add_source(File::with_name(DEFAULT_CONFIG_FILE).required(false))
            .add_source(
                Environment::with_prefix(CONFIG_ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true)
                    .source(env),
            )
            .build()?;

        Ok(settings.try_deserialize()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.log_filter, "info");
        assert!(settings.normalize_other_data);
        assert!(settings.pretty);
    }

    fn env(vars: &[(&str, &str)]) -> Option<Map<String, String>> {
        Some(
            vars.iter()
                .map(|(key, value)| (key.to_string(), value.to_string()))
                .collect(),
        )
    }

    #[test]
    fn test_load_without_overrides_uses_defaults() {
        let settings = Settings::load_with_env(env(&[])).unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_load_applies_environment_overrides() {
        let settings = Settings::load_with_env(env(&[
            ("THREAT_EVENT__LOG_FILTER", "threat_event_client=debug"),
            ("THREAT_EVENT__NORMALIZE_OTHER_DATA", "false"),
            ("THREAT_EVENT__PRETTY", "false"),
        ]))
        .unwrap();

        assert_eq!(settings.log_filter, "threat_event_client=debug");
        assert!(!settings.normalize_other_data);
        assert!(!settings.pretty);
    }

    #[test]
    fn test_load_ignores_variables_without_double_underscore_prefix() {
        let settings = Settings::load_with_env(env(&[
            ("THREAT_EVENT_PRETTY", "false"),
            ("THREAT_EVENT_LOG", "trace"),
            ("OTHER__PRETTY", "false"),
        ]))
        .unwrap();

        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_load_rejects_unparsable_override() {
        let err = Settings::load_with_env(env(&[("THREAT_EVENT__PRETTY", "sometimes")]))
            .unwrap_err();
        assert!(matches!(err, crate::ThreatEventError::Config(_)));
    }

    #[test]
    fn test_partial_source_keeps_defaults() {
        let settings: Settings = ::config::Config::builder()
            .add_source(::config::File::from_str(
                "pretty: false",
                ::config::FileFormat::Yaml,
            ))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert!(!settings.pretty);
        assert!(settings.normalize_other_data);
        assert_eq!(settings.log_filter, "info");
    }
}
