use thiserror::Error;

/// Top-level error type for the `c8ci-api` crate.
///
/// Covers every failure mode of the console API surface: token exchange,
/// transport, non-success responses, and malformed bodies.
/// `c8ci-core` maps these into domain errors.
#[derive(Debug, Error)]
pub enum Error {
    // ── Authentication ──────────────────────────────────────────────
    /// Token exchange rejected or answered without a token.
    #[error("Authentication failed: {message}")]
    Authentication { message: String },

    /// Bearer token rejected by the console API.
    #[error("Access token rejected (HTTP 401)")]
    Unauthorized,

    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// The underlying HTTP client could not be built.
    #[error("Failed to build HTTP client: {0}")]
    HttpClient(String),

    // ── Console API ─────────────────────────────────────────────────
    /// Non-success status code, with the server-provided message.
    #[error("Console API error (HTTP {status}): {message}")]
    Api { status: u16, message: String },

    // ── Data ────────────────────────────────────────────────────────
    /// JSON deserialization failed, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },

    /// A successful response lacked a field the workflow depends on.
    #[error("Malformed {context} response: missing '{field}'")]
    MissingField {
        context: &'static str,
        field: &'static str,
    },
}
