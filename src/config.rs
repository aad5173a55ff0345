use crate::error::ConfigError;

pub const DEFAULT_PROJECT_ID: &str = "000";
pub const DEFAULT_USER_ID: &str = "3654823";
pub const DEFAULT_REFERENCE_ID_KEY: &str = "diogen_reference_id";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;

/// Settings for reference id generation and backend exchanges.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub project_id: String,
    pub user_id: String,
    /// Base key under which the reference id is persisted.
    pub storage_key: String,
    /// Suffix the storage key with `.{project_id}.{user_id}`.
    pub scoped_storage: bool,
    /// Upper bound a `BlockBackend` should wait for a response.
    pub request_timeout_secs: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            project_id: DEFAULT_PROJECT_ID.to_string(),
            user_id: DEFAULT_USER_ID.to_string(),
            storage_key: DEFAULT_REFERENCE_ID_KEY.to_string(),
            scoped_storage: false,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
        }
    }
}

impl Settings {
    /// Load settings from environment variables, falling back to defaults.
    ///
    /// | Env Var                | Default               |
    /// |------------------------|-----------------------|
    /// | `PROJECT_ID`           | `000`                 |
    /// | `USER_ID`              | `3654823`             |
    /// | `REFERENCE_ID_KEY`     | `diogen_reference_id` |
    /// | `REFERENCE_ID_SCOPED`  | `false`               |
    /// | `REQUEST_TIMEOUT_SECS` | `10`                  |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Same as [`Settings::from_env`], reading values through `lookup`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let non_empty = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let scoped_storage = match non_empty("REFERENCE_ID_SCOPED") {
            Some(value) => parse_flag("REFERENCE_ID_SCOPED", &value)?,
            None => defaults.scoped_storage,
        };

        let request_timeout_secs = match non_empty("REQUEST_TIMEOUT_SECS") {
            Some(value) => value
                .trim()
                .parse()
                .map_err(|e: std::num::ParseIntError| ConfigError::Invalid {
                    name: "REQUEST_TIMEOUT_SECS",
                    value: value.clone(),
                    message: e.to_string(),
                })?,
            None => defaults.request_timeout_secs,
        };

        Ok(Self {
            project_id: non_empty("PROJECT_ID").unwrap_or(defaults.project_id),
            user_id: non_empty("USER_ID").unwrap_or(defaults.user_id),
            storage_key: non_empty("REFERENCE_ID_KEY").unwrap_or(defaults.storage_key),
            scoped_storage,
            request_timeout_secs,
        })
    }

    /// The key the reference id is persisted under.
    pub fn reference_key(&self) -> String {
        if self.scoped_storage {
            format!("{}.{}.{}", self.storage_key, self.project_id, self.user_id)
        } else {
            self.storage_key.clone()
        }
    }
}

fn parse_flag(name: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::Invalid {
            name,
            value: value.to_string(),
            message: "expected a boolean".to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let settings = Settings::from_lookup(|_| None).unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.reference_key(), "diogen_reference_id");
    }

    #[test]
    fn test_overrides_and_scoped_key() {
        let settings = Settings::from_lookup(lookup_from(&[
            ("PROJECT_ID", "001"),
            ("USER_ID", "42"),
            ("REFERENCE_ID_SCOPED", "true"),
            ("REQUEST_TIMEOUT_SECS", "3"),
        ]))
        .unwrap();
        assert_eq!(settings.project_id, "001");
        assert_eq!(settings.request_timeout_secs, 3);
        assert_eq!(settings.reference_key(), "diogen_reference_id.001.42");
    }

    #[test]
    fn test_invalid_timeout() {
        let err = Settings::from_lookup(lookup_from(&[("REQUEST_TIMEOUT_SECS", "soon")]))
            .unwrap_err();
        assert!(err.to_string().contains("REQUEST_TIMEOUT_SECS"));
    }
}
