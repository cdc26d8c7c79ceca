//! Request validator configuration.
//!
//! Fixed at construction time. Defaults reproduce the lenient behaviour:
//! non-JSON requests are skipped, a missing `Content-Type` is treated as
//! `application/json`, and the first value of a repeated query key wins.
//! Override via environment variables, a YAML file, or explicit construction.

use std::path::Path;
use std::str::FromStr;

use jhs_core::DEFAULT_ENC_TYPE;
use serde::{Deserialize, Serialize};

/// How a query key that appears more than once is folded into the JSON
/// object handed to the schema.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DuplicateQueryParams {
    /// Keep the first value, as a string.
    #[default]
    First,
    /// Keep the last value, as a string.
    Last,
    /// Keep every value, as an array of strings. Single values stay strings.
    Array,
}

impl FromStr for DuplicateQueryParams {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "first" => Ok(Self::First),
            "last" => Ok(Self::Last),
            "array" => Ok(Self::Array),
            other => Err(format!("'{other}' is not one of first, last, array")),
        }
    }
}

/// Configuration for a [`RequestValidator`](crate::RequestValidator).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidatorConfig {
    /// Reject non-JSON requests instead of skipping them.
    pub strict_media_type: bool,
    /// Encoding type assumed when a request carries no `Content-Type`.
    pub default_enc_type: String,
    /// Folding policy for repeated query keys.
    pub duplicate_query_params: DuplicateQueryParams,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            strict_media_type: false,
            default_enc_type: DEFAULT_ENC_TYPE.to_string(),
            duplicate_query_params: DuplicateQueryParams::First,
        }
    }
}

impl ValidatorConfig {
    /// Default configuration with media-type strictness enabled.
    pub fn strict() -> Self {
        Self {
            strict_media_type: true,
            ..Self::default()
        }
    }

    /// Load configuration from environment variables.
    ///
    /// Variables:
    /// - `JHS_STRICT_MEDIA_TYPE` (`true`/`false`, default: `false`)
    /// - `JHS_DEFAULT_ENC_TYPE` (default: `application/json`)
    /// - `JHS_DUPLICATE_QUERY_PARAMS` (`first`/`last`/`array`, default: `first`)
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] if a variable is set to a value
    /// that cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(raw) = lookup("JHS_STRICT_MEDIA_TYPE") {
            config.strict_media_type = parse_bool(&raw).ok_or_else(|| ConfigError::InvalidValue {
                var: "JHS_STRICT_MEDIA_TYPE".to_string(),
                reason: format!("'{raw}' is not a boolean"),
            })?;
        }
        if let Some(raw) = lookup("JHS_DEFAULT_ENC_TYPE") {
            config.default_enc_type = raw;
        }
        if let Some(raw) = lookup("JHS_DUPLICATE_QUERY_PARAMS") {
            config.duplicate_query_params =
                raw.parse().map_err(|reason| ConfigError::InvalidValue {
                    var: "JHS_DUPLICATE_QUERY_PARAMS".to_string(),
                    reason,
                })?;
        }

        config.normalized()
    }

    /// Parse configuration from YAML text. Missing fields take defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Load`] naming `source` if the text is not a
    /// valid configuration.
    pub fn from_yaml_str(source: &str, text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(text).map_err(|e| ConfigError::Load {
            path: source.to_string(),
            reason: e.to_string(),
        })?;
        config.normalized()
    }

    /// Load configuration from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Load`] if the file cannot be read or parsed.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| ConfigError::Load {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        Self::from_yaml_str(&path.display().to_string(), &text)
    }

    /// Reduce `default_enc_type` to its lowercase essence and reject blanks.
    pub(crate) fn normalized(mut self) -> Result<Self, ConfigError> {
        self.default_enc_type = jhs_core::media::essence(&self.default_enc_type).ok_or_else(|| {
            ConfigError::InvalidValue {
                var: "default_enc_type".to_string(),
                reason: "must not be empty".to_string(),
            }
        })?;
        Ok(self)
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidValue { var: String, reason: String },
    #[error("cannot load configuration '{path}': {reason}")]
    Load { path: String, reason: String },
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |var| vars.get(var).cloned()
    }

    #[test]
    fn test_defaults() {
        let cfg = ValidatorConfig::default();
        assert!(!cfg.strict_media_type);
        assert_eq!(cfg.default_enc_type, "application/json");
        assert_eq!(cfg.duplicate_query_params, DuplicateQueryParams::First);
        assert!(ValidatorConfig::strict().strict_media_type);
    }

    #[test]
    fn test_lookup_uses_defaults_when_vars_absent() {
        let cfg = ValidatorConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(cfg, ValidatorConfig::default());
    }

    #[test]
    fn test_lookup_reads_every_variable() {
        let cfg = ValidatorConfig::from_lookup(lookup_from(&[
            ("JHS_STRICT_MEDIA_TYPE", "true"),
            ("JHS_DEFAULT_ENC_TYPE", "Application/JSON; charset=utf-8"),
            ("JHS_DUPLICATE_QUERY_PARAMS", "Array"),
        ]))
        .unwrap();
        assert!(cfg.strict_media_type);
        assert_eq!(cfg.default_enc_type, "application/json");
        assert_eq!(cfg.duplicate_query_params, DuplicateQueryParams::Array);
    }

    #[test]
    fn test_lookup_rejects_bad_boolean() {
        let err = ValidatorConfig::from_lookup(lookup_from(&[("JHS_STRICT_MEDIA_TYPE", "maybe")]))
            .unwrap_err();
        assert!(err.to_string().contains("JHS_STRICT_MEDIA_TYPE"));
    }

    #[test]
    fn test_lookup_rejects_bad_duplicate_policy() {
        let err =
            ValidatorConfig::from_lookup(lookup_from(&[("JHS_DUPLICATE_QUERY_PARAMS", "merge")]))
                .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }));
    }

    #[test]
    fn test_lookup_rejects_blank_enc_type() {
        let err = ValidatorConfig::from_lookup(lookup_from(&[("JHS_DEFAULT_ENC_TYPE", "  ")]))
            .unwrap_err();
        assert!(err.to_string().contains("default_enc_type"));
    }

    #[test]
    fn test_from_env_with_unset_vars_is_default() {
        // None of the JHS_* variables are set in the test environment.
        let cfg = ValidatorConfig::from_env().unwrap();
        assert_eq!(cfg.default_enc_type, "application/json");
    }

    #[test]
    fn test_yaml_partial_config_takes_defaults() {
        let cfg = ValidatorConfig::from_yaml_str("inline", "strict_media_type: true\n").unwrap();
        assert!(cfg.strict_media_type);
        assert_eq!(cfg.default_enc_type, "application/json");
        assert_eq!(cfg.duplicate_query_params, DuplicateQueryParams::First);
    }

    #[test]
    fn test_yaml_file() {
        let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        file.write_all(b"duplicate_query_params: last\ndefault_enc_type: text/plain\n")
            .unwrap();
        let cfg = ValidatorConfig::from_yaml_file(file.path()).unwrap();
        assert_eq!(cfg.duplicate_query_params, DuplicateQueryParams::Last);
        assert_eq!(cfg.default_enc_type, "text/plain");
    }

    #[test]
    fn test_yaml_unknown_policy_is_load_error() {
        let err =
            ValidatorConfig::from_yaml_str("inline", "duplicate_query_params: merge\n").unwrap_err();
        assert!(matches!(err, ConfigError::Load { .. }));
    }

    #[test]
    fn test_duplicate_policy_from_str() {
        assert_eq!("first".parse(), Ok(DuplicateQueryParams::First));
        assert_eq!(" LAST ".parse(), Ok(DuplicateQueryParams::Last));
        assert!("both".parse::<DuplicateQueryParams>().is_err());
    }
}
