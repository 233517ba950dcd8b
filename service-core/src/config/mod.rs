use crate::error::AppError;
use config::{Config as Cfg, File};
use serde::Deserialize;
use std::env;

/// Settings every service in the workspace shares. Service crates flatten
/// this into their own config struct and layer their keys on top with
/// [`get_env`].
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_port() -> u16 {
    8080
}

impl Config {
    pub fn load() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();

        let config = Cfg::builder()
            .add_source(File::with_name("configuration").required(false))
            .add_source(config::Environment::with_prefix("APP").separator("__"))
            .build()?;

        Ok(config.try_deserialize()?)
    }
}

/// Read an environment variable with a dev default. In production every key
/// must be set explicitly; a key with no default is required in every
/// environment.
pub fn get_env(key: &str, default: Option<&str>, is_prod: bool) -> Result<String, AppError> {
    match env::var(key) {
        Ok(val) => Ok(val),
        Err(_) => {
            if is_prod {
                Err(AppError::ConfigError(anyhow::anyhow!(format!(
                    "{} is required in production but not set",
                    key
                ))))
            } else if let Some(def) = default {
                Ok(def.to_string())
            } else {
                Err(AppError::ConfigError(anyhow::anyhow!(format!(
                    "{} is required but not set",
                    key
                ))))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_env_prefers_the_set_value() {
        env::set_var("CORE_CONFIG_TEST_SET", "from-env");
        let value = get_env("CORE_CONFIG_TEST_SET", Some("fallback"), false).unwrap();
        env::remove_var("CORE_CONFIG_TEST_SET");
        assert_eq!(value, "from-env");
    }

    #[test]
    fn get_env_falls_back_to_the_dev_default() {
        let value = get_env("CORE_CONFIG_TEST_UNSET", Some("fallback"), false).unwrap();
        assert_eq!(value, "fallback");
    }

    #[test]
    fn get_env_rejects_a_missing_value_in_prod() {
        assert!(get_env("CORE_CONFIG_TEST_UNSET_PROD", Some("fallback"), true).is_err());
    }

    #[test]
    fn get_env_without_a_default_is_required_everywhere() {
        assert!(get_env("CORE_CONFIG_TEST_NO_DEFAULT", None, false).is_err());
    }
}
