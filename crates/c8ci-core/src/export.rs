// ── Result export ──
//
// Three sinks for a finished run: the summary document (primary output),
// an optional credentials file, and the GitHub Actions step-output file.
// This is the only place the client secret leaves its `SecretString`.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use secrecy::ExposeSecret;
use serde::Serialize;
use tracing::{info, warn};
use url::Url;

use c8ci_api::console_types::CatalogEntry;

use crate::config::ProvisionConfig;
use crate::error::CoreError;
use crate::workflow::ProvisionOutcome;

// ── Summary document ─────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClusterSummary {
    pub id: String,
    pub name: String,
    pub plan: String,
    pub region: String,
    #[serde(rename = "restAddress")]
    pub rest_address: String,
    #[serde(rename = "grpcAddress")]
    pub grpc_address: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClientSummary {
    pub id: String,
    pub secret: String,
    /// Token endpoint job workers authenticate against.
    pub oauth: String,
}

/// The structured result printed at the end of a provisioning run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProvisionReport {
    pub status: &'static str,
    pub desired_prefix: String,
    pub channel: CatalogEntry,
    pub generation: CatalogEntry,
    pub cluster: ClusterSummary,
    pub client: ClientSummary,
    pub candidate_generations: Vec<CatalogEntry>,
}

impl ProvisionReport {
    pub fn new(outcome: &ProvisionOutcome, config: &ProvisionConfig, token_url: &Url) -> Self {
        let selection = &outcome.selection;
        Self {
            status: "success",
            desired_prefix: config.desired_generation.clone(),
            channel: selection.channel.clone(),
            generation: selection.generation.clone(),
            cluster: ClusterSummary {
                id: outcome.cluster.id.clone(),
                name: outcome.cluster.name.clone(),
                plan: outcome.cluster.plan.clone(),
                region: selection.region.name.clone(),
                rest_address: outcome.addresses.rest.clone(),
                grpc_address: outcome.addresses.grpc.clone(),
            },
            client: ClientSummary {
                id: outcome.client.client_id.clone(),
                secret: outcome.client.client_secret.expose_secret().to_owned(),
                oauth: token_url.to_string(),
            },
            candidate_generations: selection.candidates.clone(),
        }
    }
}

// ── Credentials file ─────────────────────────────────────────────────

/// Client credentials and addresses persisted for later CI steps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CredentialsFile {
    pub client_id: String,
    pub client_secret: String,
    pub grpc_address: String,
    pub rest_address: String,
}

impl CredentialsFile {
    pub fn from_outcome(outcome: &ProvisionOutcome) -> Self {
        Self {
            client_id: outcome.client.client_id.clone(),
            client_secret: outcome.client.client_secret.expose_secret().to_owned(),
            grpc_address: outcome.addresses.grpc.clone(),
            rest_address: outcome.addresses.rest.clone(),
        }
    }

    /// Write as compact JSON, overwriting (with a warning) any existing file.
    pub fn write_to(&self, path: &Path) -> Result<(), CoreError> {
        if path.exists() {
            warn!(path = %path.display(), "file already exists, overwriting");
        }
        let json = serde_json::to_string(self)?;
        std::fs::write(path, json).map_err(|e| CoreError::io(path, e))?;
        info!(path = %path.display(), "wrote client credentials");
        Ok(())
    }
}

// ── GitHub Actions step outputs ──────────────────────────────────────

/// The `$GITHUB_OUTPUT` sink: `key=value` lines plus secret masking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GithubOutput {
    path: PathBuf,
}

impl GithubOutput {
    /// `None` when not running under GitHub Actions (unset or empty path).
    pub fn from_path(path: Option<PathBuf>) -> Option<Self> {
        path.filter(|p| !p.as_os_str().is_empty())
            .map(|path| Self { path })
    }

    /// Workflow command that redacts `secret` from all later log output.
    pub fn mask_directive(secret: &str) -> String {
        format!("::add-mask::{secret}")
    }

    /// The step outputs for a run, in emission order.
    pub fn entries(outcome: &ProvisionOutcome) -> Vec<(&'static str, String)> {
        vec![
            ("client-id", outcome.client.client_id.clone()),
            (
                "client-secret",
                outcome.client.client_secret.expose_secret().to_owned(),
            ),
            ("grpc-address", outcome.addresses.grpc.clone()),
            ("rest-address", outcome.addresses.rest.clone()),
            ("cluster-uuid", outcome.cluster.id.clone()),
        ]
    }

    /// Append the step outputs. The target must already exist as a regular file.
    pub fn append(&self, outcome: &ProvisionOutcome) -> Result<(), CoreError> {
        if !self.path.is_file() {
            return Err(CoreError::io(
                &self.path,
                std::io::Error::new(std::io::ErrorKind::NotFound, "not an existing regular file"),
            ));
        }

        let mut lines = String::new();
        for (key, value) in Self::entries(outcome) {
            lines.push_str(key);
            lines.push('=');
            lines.push_str(&value);
            lines.push('\n');
        }

        let mut file = OpenOptions::new()
            .append(true)
            .open(&self.path)
            .map_err(|e| CoreError::io(&self.path, e))?;
        file.write_all(lines.as_bytes())
            .map_err(|e| CoreError::io(&self.path, e))?;
        Ok(())
    }

    /// Mask the secret on `out`, then append outputs.
    ///
    /// The mask is emitted first, and even when the file is unusable, so the
    /// secret is redacted before the summary document prints it. A failed
    /// append only warns.
    pub fn export(&self, outcome: &ProvisionOutcome, out: &mut impl Write) -> std::io::Result<()> {
        writeln!(
            out,
            "{}",
            Self::mask_directive(outcome.client.client_secret.expose_secret())
        )?;

        match self.append(outcome) {
            Ok(()) => info!(
                path = %self.path.display(),
                "wrote GitHub outputs (client-id, client-secret, grpc-address, rest-address, cluster-uuid)"
            ),
            Err(err) => warn!("failed to write GitHub outputs: {err}"),
        }
        Ok(())
    }
}
