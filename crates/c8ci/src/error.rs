//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` and `ConfigError` into user-facing errors with
//! actionable help text. Every failure exits with the same status.

use miette::Diagnostic;
use thiserror::Error;

use c8ci_config::ConfigError;
use c8ci_core::CoreError;

pub mod exit_code {
    pub const SUCCESS: i32 = 0;
    pub const FAILURE: i32 = 1;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Configuration ────────────────────────────────────────────────
    #[error("{var} is not set")]
    #[diagnostic(
        code(c8ci::missing_setting),
        help("Export {var} in the job environment, or pass the matching --flag.")
    )]
    MissingSetting { var: &'static str },

    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(c8ci::validation))]
    Validation { field: String, reason: String },

    #[error(transparent)]
    #[diagnostic(
        code(c8ci::config),
        help("Check the --config file and the BASE_HOSTNAME/POLL_* environment variables.")
    )]
    Config(Box<figment::Error>),

    // ── Authentication ───────────────────────────────────────────────
    #[error("Authentication failed: {message}")]
    #[diagnostic(
        code(c8ci::auth),
        help(
            "Verify CONSOLE_CLIENT_ID and CONSOLE_CLIENT_SECRET, and that\n\
             BASE_HOSTNAME points at the console the client was created in."
        )
    )]
    Auth { message: String },

    // ── Console API ──────────────────────────────────────────────────
    #[error("Could not reach the console API: {message}")]
    #[diagnostic(
        code(c8ci::connection),
        help("Check network access to the console, or raise --timeout.")
    )]
    Connection { message: String },

    #[error("Console API error (HTTP {status}): {message}")]
    #[diagnostic(code(c8ci::api))]
    Api { status: u16, message: String },

    #[error("Unexpected console API response: {message}")]
    #[diagnostic(
        code(c8ci::malformed_response),
        help("The console returned data without a field c8ci depends on. Re-run with -vv to trace requests.")
    )]
    MalformedResponse { message: String },

    // ── Selection ────────────────────────────────────────────────────
    #[error("{message}")]
    #[diagnostic(
        code(c8ci::selection),
        help(
            "CAMUNDA_DESIRED_GENERATION must match exactly one generation once the\n\
             \"Camunda \" prefix and \"+genN\" suffix are removed."
        )
    )]
    Selection { message: String },

    // ── Provisioning ─────────────────────────────────────────────────
    #[error("Cluster {cluster_id} became Unhealthy")]
    #[diagnostic(
        code(c8ci::cluster_unhealthy),
        help("Inspect the cluster in the console, then remove it with: c8ci cluster -d {cluster_id}")
    )]
    ClusterUnhealthy { cluster_id: String },

    #[error("Cluster {cluster_id} not Healthy after {waited_secs}s (last state: {last_state})")]
    #[diagnostic(
        code(c8ci::timeout),
        help(
            "Raise POLL_TIMEOUT if the console is slow today.\n\
             The cluster still exists; remove it with: c8ci cluster -d {cluster_id}"
        )
    )]
    Timeout {
        cluster_id: String,
        last_state: String,
        waited_secs: u64,
    },

    // ── IO / Serialization ───────────────────────────────────────────
    #[error("I/O error on {path}")]
    #[diagnostic(code(c8ci::io))]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    #[diagnostic(code(c8ci::io))]
    Stdout(#[from] std::io::Error),

    #[error("Failed to render output: {message}")]
    #[diagnostic(code(c8ci::render))]
    Render { message: String },

    #[error("Invalid template: {message}")]
    #[diagnostic(code(c8ci::template))]
    Template { message: String },
}

// ── Conversions ──────────────────────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Authentication { message } => Self::Auth { message },
            CoreError::Transport { message } => Self::Connection { message },
            CoreError::Api { status, message } => Self::Api { status, message },
            CoreError::MalformedResponse { message } => Self::MalformedResponse { message },
            err @ CoreError::MissingLink { .. } => Self::MalformedResponse {
                message: err.to_string(),
            },
            err @ (CoreError::ChannelNotFound { .. }
            | CoreError::NoMatchingGeneration { .. }
            | CoreError::AmbiguousGeneration { .. }
            | CoreError::NoPlanTypes
            | CoreError::NoRegions) => Self::Selection {
                message: err.to_string(),
            },
            CoreError::InvalidClusterId { cluster_id } => Self::Validation {
                field: "cluster id".into(),
                reason: format!("'{cluster_id}' must be a single non-empty path segment"),
            },
            CoreError::ClusterUnhealthy { cluster_id } => Self::ClusterUnhealthy { cluster_id },
            CoreError::Timeout {
                cluster_id,
                last_state,
                waited_secs,
            } => Self::Timeout {
                cluster_id,
                last_state,
                waited_secs,
            },
            CoreError::Io { path, source } => Self::Io { path, source },
            CoreError::Serialization(e) => Self::Render {
                message: e.to_string(),
            },
            CoreError::Template(e) => Self::Template {
                message: e.to_string(),
            },
            CoreError::Config { message } => Self::Validation {
                field: "configuration".into(),
                reason: message,
            },
        }
    }
}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::Missing { var } => Self::MissingSetting { var },
            ConfigError::Validation { field, reason } => Self::Validation { field, reason },
            ConfigError::Figment(e) => Self::Config(e),
        }
    }
}

impl From<serde_json::Error> for CliError {
    fn from(err: serde_json::Error) -> Self {
        Self::Render {
            message: err.to_string(),
        }
    }
}

impl From<serde_yaml::Error> for CliError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::Render {
            message: err.to_string(),
        }
    }
}
