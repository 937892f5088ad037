//! CLI-side settings resolution: figment-loaded settings plus flag
//! overrides, translated into `c8ci_core` configuration.
//!
//! Core never sees flags or the environment -- it receives pre-built
//! `ConsoleConfig` / `ProvisionConfig` values.

use secrecy::SecretString;

use c8ci_config::Settings;
use c8ci_core::ConsoleConfig;

use crate::cli::{ConsoleAuthArgs, GlobalOpts};
use crate::error::CliError;

/// Load settings from defaults, `--config`, and env, then apply global flags.
pub fn load(global: &GlobalOpts) -> Result<Settings, CliError> {
    let mut settings = c8ci_config::load_settings(global.config.as_deref())?;

    if let Some(ref host) = global.base_hostname {
        settings.base_hostname.clone_from(host);
    }
    if let Some(timeout) = global.timeout {
        settings.request_timeout = timeout;
    }
    Ok(settings)
}

/// Console endpoints and credentials for an authenticated command.
pub fn console_config(settings: &Settings, auth: &ConsoleAuthArgs) -> Result<ConsoleConfig, CliError> {
    let secret = auth.client_secret.clone().map(SecretString::from);
    let credentials = c8ci_config::credentials(auth.client_id.as_deref(), secret.as_ref())?;
    Ok(settings.console_config(credentials)?)
}
