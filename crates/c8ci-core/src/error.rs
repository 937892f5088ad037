// ── Core error types ──
//
// Domain errors from c8ci-core, grouped by failure class: transport,
// non-success status, malformed response, selection, and timeout.
// Every one is terminal; the CLI turns them into a diagnostic and exit 1.
// The `From<c8ci_api::Error>` impl sorts transport-layer errors into
// those classes.

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Connection errors ────────────────────────────────────────────
    #[error("Failed to obtain access token: {message}")]
    Authentication { message: String },

    #[error("Cannot reach console API: {message}")]
    Transport { message: String },

    // ── API errors ───────────────────────────────────────────────────
    #[error("Console API returned HTTP {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Malformed API response: {message}")]
    MalformedResponse { message: String },

    // ── Selection errors ─────────────────────────────────────────────
    #[error("{channel} channel not present")]
    ChannelNotFound { channel: String },

    #[error("No generations in {channel} match '{desired}'")]
    NoMatchingGeneration { channel: String, desired: String },

    #[error("Multiple generations found matching '{desired}': {}", .candidates.join(", "))]
    AmbiguousGeneration {
        desired: String,
        candidates: Vec<String>,
    },

    #[error("No cluster plan types available")]
    NoPlanTypes,

    #[error("No regions available")]
    NoRegions,

    // ── Provisioning errors ──────────────────────────────────────────
    #[error("Cluster {cluster_id} became Unhealthy")]
    ClusterUnhealthy { cluster_id: String },

    #[error(
        "Timeout waiting for cluster {cluster_id} to become Healthy after {waited_secs}s (last state={last_state})"
    )]
    Timeout {
        cluster_id: String,
        last_state: String,
        waited_secs: u64,
    },

    #[error("Invalid cluster id '{cluster_id}'")]
    InvalidClusterId { cluster_id: String },

    #[error("Missing '{link}' address in cluster links")]
    MissingLink { link: &'static str },

    // ── Local I/O ────────────────────────────────────────────────────
    #[error("I/O error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid template pattern: {0}")]
    Template(#[from] regex::Error),

    // ── Configuration errors ─────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },
}

impl CoreError {
    pub(crate) fn io(path: &std::path::Path, source: std::io::Error) -> Self {
        Self::Io {
            path: path.display().to_string(),
            source,
        }
    }
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<c8ci_api::Error> for CoreError {
    fn from(err: c8ci_api::Error) -> Self {
        match err {
            c8ci_api::Error::Authentication { message } => CoreError::Authentication { message },
            c8ci_api::Error::Unauthorized => CoreError::Authentication {
                message: "access token rejected by console API".into(),
            },
            c8ci_api::Error::Transport(e) => CoreError::Transport {
                message: e.to_string(),
            },
            c8ci_api::Error::HttpClient(message) => CoreError::Transport { message },
            c8ci_api::Error::InvalidUrl(e) => CoreError::Config {
                message: format!("Invalid URL: {e}"),
            },
            c8ci_api::Error::Api { status, message } => CoreError::Api { status, message },
            c8ci_api::Error::Deserialization { message, body: _ } => {
                CoreError::MalformedResponse { message }
            }
            c8ci_api::Error::MissingField { context, field } => CoreError::MalformedResponse {
                message: format!("no {field} in {context} response"),
            },
        }
    }
}
