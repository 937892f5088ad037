// ── Runtime run configuration ──
//
// These types describe where the console lives, how to authenticate, and
// what to provision. They are built once by the CLI and threaded through
// every stage; core never reads the environment or config files.

use std::time::Duration;

use secrecy::SecretString;
use url::Url;

pub const DEFAULT_BASE_HOSTNAME: &str = "ultrawombat.com";
pub const DEFAULT_CLUSTER_NAME: &str = "SAP-CONNECTORS-E2E-CLUSTER";
pub const DEFAULT_CHANNEL: &str = "Stable";

/// Console endpoints derived from a base hostname.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsoleEndpoints {
    /// `https://api.cloud.<host>`
    pub api_base_url: Url,
    /// `https://login.cloud.<host>/oauth/token`
    pub token_url: Url,
    /// `api.cloud.<host>`
    pub audience: String,
}

impl ConsoleEndpoints {
    pub fn for_hostname(base_hostname: &str) -> Result<Self, url::ParseError> {
        Ok(Self {
            api_base_url: Url::parse(&format!("https://api.cloud.{base_hostname}"))?,
            token_url: Url::parse(&format!("https://login.cloud.{base_hostname}/oauth/token"))?,
            audience: format!("api.cloud.{base_hostname}"),
        })
    }
}

/// Console client credentials (`CONSOLE_CLIENT_ID` / `CONSOLE_CLIENT_SECRET`).
#[derive(Debug, Clone)]
pub struct ConsoleCredentials {
    pub client_id: String,
    pub client_secret: SecretString,
}

/// Everything needed to talk to the console API.
#[derive(Debug, Clone)]
pub struct ConsoleConfig {
    pub endpoints: ConsoleEndpoints,
    pub credentials: ConsoleCredentials,
    /// Per-request HTTP timeout.
    pub request_timeout: Duration,
}

/// Fixed-interval readiness poll settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollConfig {
    pub interval: Duration,
    pub timeout: Duration,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(20),
            timeout: Duration::from_secs(900),
        }
    }
}

/// What to provision.
#[derive(Debug, Clone)]
pub struct ProvisionConfig {
    pub cluster_name: String,
    /// Channel the generation must come from (normally `Stable`).
    pub channel_name: String,
    /// Desired generation, e.g. `8.5`, compared against normalized names.
    pub desired_generation: String,
    pub poll: PollConfig,
}

impl ProvisionConfig {
    /// Name of the API client created for the cluster.
    pub fn client_name(&self) -> String {
        format!("client-{}", self.cluster_name)
    }
}
