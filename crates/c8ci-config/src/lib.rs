//! Layered configuration for the c8ci binary.
//!
//! Defaults, an optional TOML file, and plain environment variables are
//! merged with figment, then translated into the immutable `c8ci_core`
//! run configuration. Secrets never pass through figment; the CLI reads
//! them as clap `env` arguments and hands them in here.

use std::collections::BTreeMap;
use std::path::Path;
use std::time::Duration;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use c8ci_core::config::{DEFAULT_BASE_HOSTNAME, DEFAULT_CHANNEL, DEFAULT_CLUSTER_NAME};
use c8ci_core::template::DEFAULT_CONNECTOR_NAME;
use c8ci_core::{ConsoleConfig, ConsoleCredentials, ConsoleEndpoints, PollConfig, ProvisionConfig};

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{var} is required")]
    Missing { var: &'static str },

    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── Settings ────────────────────────────────────────────────────────

/// Text settings read from the environment, matched case-insensitively.
/// Values are taken verbatim, so `CLUSTER_NAME=12345` stays a string.
pub const TEXT_ENV_KEYS: [&str; 6] = [
    "base_hostname",
    "cluster_name",
    "channel_name",
    "connector_name",
    "console_api_url",
    "console_token_url",
];

/// Numeric settings read from the environment.
pub const NUMERIC_ENV_KEYS: [&str; 2] = ["poll_interval", "poll_timeout"];

/// Non-secret settings, as merged from defaults, file, and environment.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct Settings {
    /// Console domain; API, token, and audience hosts derive from it.
    pub base_hostname: String,
    pub cluster_name: String,
    pub channel_name: String,
    /// Module renamed to `<name>-<version>` by the placeholders command.
    pub connector_name: String,
    /// Seconds between readiness polls.
    pub poll_interval: u64,
    /// Seconds before readiness polling gives up.
    pub poll_timeout: u64,
    /// Per-request HTTP timeout in seconds.
    pub request_timeout: u64,
    /// Overrides `https://api.cloud.<base_hostname>`.
    pub console_api_url: Option<String>,
    /// Overrides `https://login.cloud.<base_hostname>/oauth/token`.
    pub console_token_url: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        let poll = PollConfig::default();
        Self {
            base_hostname: DEFAULT_BASE_HOSTNAME.into(),
            cluster_name: DEFAULT_CLUSTER_NAME.into(),
            channel_name: DEFAULT_CHANNEL.into(),
            connector_name: DEFAULT_CONNECTOR_NAME.into(),
            poll_interval: poll.interval.as_secs(),
            poll_timeout: poll.timeout.as_secs(),
            request_timeout: 30,
            console_api_url: None,
            console_token_url: None,
        }
    }
}

// ── Loading ─────────────────────────────────────────────────────────

/// The merged provider chain: defaults, then `path` (if given), then env.
pub fn figment(path: Option<&Path>) -> Figment {
    let mut figment = Figment::new().merge(Serialized::defaults(Settings::default()));
    if let Some(path) = path {
        figment = figment.merge(Toml::file(path));
    }
    figment
        .merge(text_env())
        .merge(Env::raw().only(&NUMERIC_ENV_KEYS))
}

fn text_env() -> Serialized<BTreeMap<String, String>> {
    let vars = Env::raw()
        .only(&TEXT_ENV_KEYS)
        .iter()
        .map(|(key, value)| (key.as_str().to_owned(), value))
        .collect();
    Serialized::defaults(vars)
}

/// Load settings. An explicitly named config file must exist.
pub fn load_settings(path: Option<&Path>) -> Result<Settings, ConfigError> {
    if let Some(path) = path {
        if !path.is_file() {
            return Err(ConfigError::Validation {
                field: "config".into(),
                reason: format!("file not found: {}", path.display()),
            });
        }
    }

    let settings: Settings = figment(path).extract()?;
    Ok(settings)
}

// ── Translation into core config ────────────────────────────────────

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn parse_url(field: &str, value: &str) -> Result<url::Url, ConfigError> {
    value.parse().map_err(|e| ConfigError::Validation {
        field: field.into(),
        reason: format!("invalid URL '{value}': {e}"),
    })
}

/// Build console credentials from values read off the command line / env.
pub fn credentials(
    client_id: Option<&str>,
    client_secret: Option<&SecretString>,
) -> Result<ConsoleCredentials, ConfigError> {
    let client_id = non_empty(client_id).ok_or(ConfigError::Missing {
        var: "CONSOLE_CLIENT_ID",
    })?;
    let client_secret = client_secret
        .filter(|s| !s.expose_secret().is_empty())
        .ok_or(ConfigError::Missing {
            var: "CONSOLE_CLIENT_SECRET",
        })?;

    Ok(ConsoleCredentials {
        client_id: client_id.to_owned(),
        client_secret: client_secret.clone(),
    })
}

impl Settings {
    /// Endpoints derived from the base hostname, with URL overrides applied.
    pub fn endpoints(&self) -> Result<ConsoleEndpoints, ConfigError> {
        let mut endpoints = ConsoleEndpoints::for_hostname(&self.base_hostname).map_err(|e| {
            ConfigError::Validation {
                field: "base_hostname".into(),
                reason: format!("'{}' does not form a valid URL: {e}", self.base_hostname),
            }
        })?;

        if let Some(api) = non_empty(self.console_api_url.as_deref()) {
            endpoints.api_base_url = parse_url("console_api_url", api)?;
        }
        if let Some(token) = non_empty(self.console_token_url.as_deref()) {
            endpoints.token_url = parse_url("console_token_url", token)?;
        }
        Ok(endpoints)
    }

    /// Audience substituted for `<zeebe-audience>`.
    pub fn zeebe_audience(&self) -> String {
        format!("zeebe.{}", self.base_hostname)
    }

    pub fn poll_config(&self) -> Result<PollConfig, ConfigError> {
        if self.poll_interval == 0 {
            return Err(ConfigError::Validation {
                field: "poll_interval".into(),
                reason: "must be at least 1 second".into(),
            });
        }
        Ok(PollConfig {
            interval: Duration::from_secs(self.poll_interval),
            timeout: Duration::from_secs(self.poll_timeout),
        })
    }

    pub fn console_config(
        &self,
        credentials: ConsoleCredentials,
    ) -> Result<ConsoleConfig, ConfigError> {
        Ok(ConsoleConfig {
            endpoints: self.endpoints()?,
            credentials,
            request_timeout: Duration::from_secs(self.request_timeout),
        })
    }

    /// Provisioning parameters; `desired_generation` is mandatory here.
    pub fn provision_config(
        &self,
        desired_generation: Option<&str>,
    ) -> Result<ProvisionConfig, ConfigError> {
        let desired = non_empty(desired_generation).ok_or(ConfigError::Missing {
            var: "CAMUNDA_DESIRED_GENERATION",
        })?;

        Ok(ProvisionConfig {
            cluster_name: self.cluster_name.clone(),
            channel_name: self.channel_name.clone(),
            desired_generation: desired.to_owned(),
            poll: self.poll_config()?,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use figment::Jail;
    use pretty_assertions::assert_eq;

    fn load(path: Option<&str>) -> figment::error::Result<Settings> {
        load_settings(path.map(Path::new)).map_err(|e| e.to_string().into())
    }

    #[test]
    fn defaults_without_file_or_env() {
        Jail::expect_with(|_jail| {
            let settings = load(None)?;
            assert_eq!(settings, Settings::default());
            assert_eq!(settings.base_hostname, "ultrawombat.com");
            assert_eq!(settings.cluster_name, "SAP-CONNECTORS-E2E-CLUSTER");
            assert_eq!(settings.poll_interval, 20);
            assert_eq!(settings.poll_timeout, 900);
            Ok(())
        });
    }

    #[test]
    fn env_overrides_file() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "c8ci.toml",
                r#"
                    base_hostname = "camunda.io"
                    cluster_name = "from-file"
                    poll_timeout = 60
                "#,
            )?;
            jail.set_env("CLUSTER_NAME", "from-env");
            jail.set_env("POLL_INTERVAL", "5");

            let settings = load(Some("c8ci.toml"))?;
            assert_eq!(settings.base_hostname, "camunda.io");
            assert_eq!(settings.cluster_name, "from-env");
            assert_eq!(settings.poll_interval, 5);
            assert_eq!(settings.poll_timeout, 60);
            Ok(())
        });
    }

    #[test]
    fn unrelated_env_is_ignored() {
        Jail::expect_with(|jail| {
            jail.set_env("REQUEST_TIMEOUT", "1");
            jail.set_env("CONSOLE_CLIENT_SECRET", "nope");

            let settings = load(None)?;
            assert_eq!(settings.request_timeout, 30);
            Ok(())
        });
    }

    #[test]
    fn numeric_looking_env_text_is_kept_verbatim() {
        Jail::expect_with(|jail| {
            jail.set_env("CLUSTER_NAME", "12345");
            jail.set_env("CHANNEL_NAME", "1.50");
            jail.set_env("CONNECTOR_NAME", "true");
            jail.set_env("POLL_TIMEOUT", "90");

            let settings = load(None)?;
            assert_eq!(settings.cluster_name, "12345");
            assert_eq!(settings.channel_name, "1.50");
            assert_eq!(settings.connector_name, "true");
            assert_eq!(settings.poll_timeout, 90);
            Ok(())
        });
    }

    #[test]
    fn env_text_overrides_file() {
        Jail::expect_with(|jail| {
            jail.create_file("c8ci.toml", "cluster_name = \"from-file\"\nchannel_name = \"Alpha\"")?;
            jail.set_env("CLUSTER_NAME", "007");

            let settings = load(Some("c8ci.toml"))?;
            assert_eq!(settings.cluster_name, "007");
            assert_eq!(settings.channel_name, "Alpha");
            Ok(())
        });
    }

    #[test]
    fn missing_explicit_file_is_rejected() {
        Jail::expect_with(|_jail| {
            let err = load_settings(Some(Path::new("absent.toml"))).unwrap_err();
            assert!(matches!(err, ConfigError::Validation { ref field, .. } if field == "config"));
            Ok(())
        });
    }

    #[test]
    fn non_numeric_poll_interval_fails() {
        Jail::expect_with(|jail| {
            jail.set_env("POLL_INTERVAL", "soon");
            assert!(matches!(load_settings(None), Err(ConfigError::Figment(_))));
            Ok(())
        });
    }

    #[test]
    fn endpoints_honour_overrides() {
        let settings = Settings {
            console_api_url: Some("http://127.0.0.1:9000".into()),
            console_token_url: Some(String::new()),
            ..Settings::default()
        };
        let endpoints = settings.endpoints().unwrap();

        assert_eq!(endpoints.api_base_url.as_str(), "http://127.0.0.1:9000/");
        assert_eq!(
            endpoints.token_url.as_str(),
            "https://login.cloud.ultrawombat.com/oauth/token"
        );
        assert_eq!(endpoints.audience, "api.cloud.ultrawombat.com");
    }

    #[test]
    fn invalid_override_url_is_validation_error() {
        let settings = Settings {
            console_token_url: Some("not a url".into()),
            ..Settings::default()
        };
        assert!(matches!(
            settings.endpoints(),
            Err(ConfigError::Validation { ref field, .. }) if field == "console_token_url"
        ));
    }

    #[test]
    fn provision_config_requires_desired_generation() {
        let settings = Settings::default();
        assert!(matches!(
            settings.provision_config(None),
            Err(ConfigError::Missing { var: "CAMUNDA_DESIRED_GENERATION" })
        ));
        assert!(matches!(
            settings.provision_config(Some("  ")),
            Err(ConfigError::Missing { .. })
        ));

        let config = settings.provision_config(Some("8.5")).unwrap();
        assert_eq!(config.desired_generation, "8.5");
        assert_eq!(config.channel_name, "Stable");
        assert_eq!(config.poll, PollConfig::default());
    }

    #[test]
    fn zero_poll_interval_is_rejected() {
        let settings = Settings {
            poll_interval: 0,
            ..Settings::default()
        };
        assert!(matches!(
            settings.poll_config(),
            Err(ConfigError::Validation { .. })
        ));
    }

    #[test]
    fn credentials_require_both_values() {
        let secret = SecretString::from("s3cret".to_owned());
        assert!(matches!(
            credentials(None, Some(&secret)),
            Err(ConfigError::Missing { var: "CONSOLE_CLIENT_ID" })
        ));
        assert!(matches!(
            credentials(Some("id"), None),
            Err(ConfigError::Missing { var: "CONSOLE_CLIENT_SECRET" })
        ));

        let creds = credentials(Some("id"), Some(&secret)).unwrap();
        assert_eq!(creds.client_id, "id");
        assert_eq!(creds.client_secret.expose_secret(), "s3cret");
    }

    #[test]
    fn zeebe_audience_uses_base_hostname() {
        assert_eq!(Settings::default().zeebe_audience(), "zeebe.ultrawombat.com");
    }
}
