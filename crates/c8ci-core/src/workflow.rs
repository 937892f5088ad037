// ── Provisioning workflow ──
//
// token → parameters → selection → create → poll → addresses → client.
// Each stage consumes the previous stage's output and any failure ends the
// run. The deletion path shares only the authentication stage.

use tracing::info;

use c8ci_api::console_types::{ClientCredentials, ClusterResponse, CreateClusterRequest};
use c8ci_api::{ConsoleClient, TokenIssuer, TransportConfig};

use crate::address::{ResolvedAddresses, derive_addresses};
use crate::config::{ConsoleConfig, ProvisionConfig};
use crate::error::CoreError;
use crate::readiness::wait_until_healthy;
use crate::selection::{Selection, resolve_selection};

/// Exchange console credentials for a token and build an authorized client.
pub async fn connect(config: &ConsoleConfig) -> Result<ConsoleClient, CoreError> {
    let endpoints = &config.endpoints;
    let transport = TransportConfig {
        timeout: config.request_timeout,
    };
    let issuer = TokenIssuer::new(endpoints.token_url.clone(), &transport)?;
    info!(
        token_url = %issuer.token_url(),
        audience = %endpoints.audience,
        "authenticating"
    );

    let token = issuer
        .fetch_token(
            &endpoints.audience,
            &config.credentials.client_id,
            &config.credentials.client_secret,
        )
        .await?;
    info!("obtained access token");

    Ok(ConsoleClient::from_token(
        endpoints.api_base_url.as_str(),
        &token,
        &transport,
    )?)
}

/// Reject ids that would address something other than one cluster
/// (`clusters/`, `clusters/../x`).
pub fn validate_cluster_id(cluster_id: &str) -> Result<&str, CoreError> {
    let trimmed = cluster_id.trim();
    if trimmed.is_empty() || trimmed.contains(['/', '\\', '?', '#']) || matches!(trimmed, "." | "..") {
        return Err(CoreError::InvalidClusterId {
            cluster_id: cluster_id.to_owned(),
        });
    }
    Ok(trimmed)
}

/// Request deletion of a cluster. No polling for absence.
pub async fn delete_cluster(console: &ConsoleClient, cluster_id: &str) -> Result<(), CoreError> {
    let cluster_id = validate_cluster_id(cluster_id)?;
    info!(cluster_id, "deleting cluster");
    console.delete_cluster(cluster_id).await?;
    info!(cluster_id, "cluster deletion request accepted");
    Ok(())
}

/// A healthy cluster and the details reported by its final snapshot.
#[derive(Debug, Clone)]
pub struct ClusterInfo {
    pub id: String,
    pub name: String,
    pub plan: String,
    pub snapshot: ClusterResponse,
}

/// Everything collected by a successful provisioning run.
#[derive(Debug, Clone)]
pub struct ProvisionOutcome {
    pub selection: Selection,
    pub cluster: ClusterInfo,
    pub addresses: ResolvedAddresses,
    pub client: ClientCredentials,
}

/// Drives the provisioning stages against an authorized console client.
pub struct Provisioner<'a> {
    console: &'a ConsoleClient,
    config: &'a ProvisionConfig,
}

impl<'a> Provisioner<'a> {
    pub fn new(console: &'a ConsoleClient, config: &'a ProvisionConfig) -> Self {
        Self { console, config }
    }

    /// Run every stage in order.
    pub async fn run(&self) -> Result<ProvisionOutcome, CoreError> {
        let selection = self.select().await?;
        let cluster = self.create_cluster(&selection).await?;
        let addresses = Self::resolve_addresses(&cluster)?;
        let client = self.issue_client(&cluster.id).await?;

        info!(cluster_id = %cluster.id, client_id = %client.client_id, "provisioning complete");
        Ok(ProvisionOutcome {
            selection,
            cluster,
            addresses,
            client,
        })
    }

    /// Fetch the parameters catalog and pick channel/generation/plan/region.
    pub async fn select(&self) -> Result<Selection, CoreError> {
        info!(base_url = %self.console.base_url(), "fetching cluster parameters");
        let params = self.console.cluster_parameters().await?;
        resolve_selection(
            &params,
            &self.config.channel_name,
            &self.config.desired_generation,
        )
    }

    /// Create the cluster and wait for it to become healthy.
    pub async fn create_cluster(&self, selection: &Selection) -> Result<ClusterInfo, CoreError> {
        info!(
            name = %self.config.cluster_name,
            plan = %selection.plan.name,
            region = %selection.region.name,
            channel = %selection.channel.name,
            generation = %selection.generation.name,
            "creating cluster"
        );

        let req = CreateClusterRequest {
            name: self.config.cluster_name.clone(),
            plan_type_id: selection.plan.uuid.clone(),
            channel_id: selection.channel.uuid.clone(),
            generation_id: selection.generation.uuid.clone(),
            region_id: selection.region.uuid.clone(),
        };
        let cluster_id = self.console.create_cluster(&req).await?;
        info!(cluster_id, "cluster created (pending readiness)");

        let snapshot = wait_until_healthy(self.console, &cluster_id, &self.config.poll).await?;

        let plan = snapshot
            .plan_type
            .as_ref()
            .and_then(|p| p.name.clone())
            .unwrap_or_else(|| selection.plan.name.clone());

        Ok(ClusterInfo {
            id: cluster_id,
            name: self.config.cluster_name.clone(),
            plan,
            snapshot,
        })
    }

    /// Derive the gRPC and REST addresses from the cluster's links.
    pub fn resolve_addresses(cluster: &ClusterInfo) -> Result<ResolvedAddresses, CoreError> {
        let links = cluster.snapshot.links.as_ref();
        let zeebe = links.and_then(|l| l.zeebe.as_deref()).unwrap_or_default();
        let operate = links.and_then(|l| l.operate.as_deref()).unwrap_or_default();

        let addresses = derive_addresses(zeebe, operate)?;
        info!(grpc = %addresses.grpc, rest = %addresses.rest, "processed addresses");
        Ok(addresses)
    }

    /// Create the cluster-scoped API client.
    pub async fn issue_client(&self, cluster_id: &str) -> Result<ClientCredentials, CoreError> {
        let client = self
            .console
            .create_client(cluster_id, &self.config.client_name())
            .await?;
        info!(client_id = %client.client_id, "client created");
        Ok(client)
    }
}
