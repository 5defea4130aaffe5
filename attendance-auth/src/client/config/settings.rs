use crate::client::token_storage::check_token_key;
use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::time::Duration;

#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
    /// Name of the storage slot holding the bearer token
    #[serde(default = "default_token_key")]
    pub token_key: String,
    /// Per-request timeout, 0 disables it
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

fn default_api_base_url() -> String {
    "http://127.0.0.1:5000".to_string()
}

fn default_token_key() -> String {
    "authToken".to_string()
}

fn default_request_timeout_secs() -> u64 {
    30
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            token_key: default_token_key(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        let config_path =
            std::env::var("ATTENDANCE_CONFIG").unwrap_or_else(|_| "config.toml".to_string());

        Self::load_from(&config_path)
    }

    pub fn load_from(config_path: &str) -> Result<Self, ConfigError> {
        Self::load_with(config_path, Self::environment())
    }

    /// `ATTENDANCE_API_BASE_URL`, `ATTENDANCE_TOKEN_KEY`, ...
    fn environment() -> Environment {
        Environment::with_prefix("ATTENDANCE")
            .prefix_separator("_")
            .separator("__")
    }

    fn load_with(config_path: &str, environment: Environment) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::with_name(config_path).required(false))
            .add_source(environment)
            .build()?;

        settings.try_deserialize()
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.api_base_url.is_empty() {
            return Err("api_base_url is required".to_string());
        }
        if !self.api_base_url.starts_with("http") {
            return Err("api_base_url must be a valid HTTP(S) URL".to_string());
        }
        check_token_key(&self.token_key)
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        match self.request_timeout_secs {
            0 => None,
            secs => Some(Duration::from_secs(secs)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_validate() {
        let settings = Settings::default();
        assert_eq!(settings.api_base_url, "http://127.0.0.1:5000");
        assert_eq!(settings.token_key, "authToken");
        assert_eq!(settings.request_timeout(), Some(Duration::from_secs(30)));
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "api_base_url = \"https://attendance.example.com\"").unwrap();
        writeln!(file, "request_timeout_secs = 0").unwrap();

        let settings = Settings::load_from(file.path().to_str().unwrap()).unwrap();
        assert_eq!(settings.api_base_url, "https://attendance.example.com");
        assert_eq!(settings.token_key, "authToken");
        assert_eq!(settings.request_timeout(), None);
    }

    #[test]
    fn test_missing_file_falls_back_to_defaults() {
        let settings = Settings::load_from("/nonexistent/attendance-config").unwrap();
        assert_eq!(settings.api_base_url, default_api_base_url());
    }

    fn env(vars: &[(&str, &str)]) -> Environment {
        let vars = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect::<config::Map<String, String>>();
        Settings::environment().source(Some(vars))
    }

    #[test]
    fn test_env_overrides_with_single_underscore_prefix() {
        let settings = Settings::load_with(
            "/nonexistent/attendance-config",
            env(&[
                ("ATTENDANCE_API_BASE_URL", "http://single.example"),
                ("ATTENDANCE_TOKEN_KEY", "sessionToken"),
                ("ATTENDANCE_REQUEST_TIMEOUT_SECS", "5"),
            ]),
        )
        .unwrap();

        assert_eq!(settings.api_base_url, "http://single.example");
        assert_eq!(settings.token_key, "sessionToken");
        assert_eq!(settings.request_timeout(), Some(Duration::from_secs(5)));
    }

    #[test]
    fn test_env_overrides_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "api_base_url = \"https://file.example\"").unwrap();

        let settings = Settings::load_with(
            file.path().to_str().unwrap(),
            env(&[("ATTENDANCE_API_BASE_URL", "https://env.example")]),
        )
        .unwrap();
        assert_eq!(settings.api_base_url, "https://env.example");
    }

    #[test]
    fn test_validate_rejects_path_like_token_key() {
        for key in ["../authToken", "tokens/authToken", "tokens\\authToken", ".."] {
            let settings = Settings {
                token_key: key.to_string(),
                ..Settings::default()
            };
            assert!(settings.validate().is_err(), "accepted {:?}", key);
        }
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let settings = Settings {
            api_base_url: "127.0.0.1:5000".to_string(),
            ..Settings::default()
        };
        assert!(settings.validate().is_err());

        let settings = Settings {
            api_base_url: String::new(),
            ..Settings::default()
        };
        assert!(settings.validate().is_err());

        let settings = Settings {
            token_key: "  ".to_string(),
            ..Settings::default()
        };
        assert!(settings.validate().is_err());
    }
}
