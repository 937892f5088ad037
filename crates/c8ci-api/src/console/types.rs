//! Console API request/response types.
//!
//! All types match the JSON bodies of the `/clusters` endpoints.
//! Field names use camelCase via `#[serde(rename_all = "camelCase")]`.
//! Fields the workflow requires are modeled as `Option` so their absence
//! surfaces as a malformed-response error rather than a parse failure.

use serde::{Deserialize, Serialize};
use serde_json::Value;

// ── Catalog ──────────────────────────────────────────────────────────

/// A `{name, uuid}` catalog entry (generation, plan type, region).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub name: String,
    pub uuid: String,
}

/// A release channel and the generations it allows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Channel {
    pub name: String,
    pub uuid: String,
    pub allowed_generations: Option<Vec<CatalogEntry>>,
}

/// Parameters document from `GET /clusters/parameters`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClusterParameters {
    pub channels: Option<Vec<Channel>>,
    pub cluster_plan_types: Option<Vec<CatalogEntry>>,
    pub regions: Option<Vec<CatalogEntry>>,
}

// ── Clusters ─────────────────────────────────────────────────────────

/// Body for `POST /clusters`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateClusterRequest {
    pub name: String,
    pub plan_type_id: String,
    pub channel_id: String,
    pub generation_id: String,
    pub region_id: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CreateClusterResponse {
    pub cluster_id: Option<String>,
}

/// Readiness block of a cluster snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClusterStatus {
    /// `Healthy`, `Unhealthy`, or a transitional value such as `Creating`.
    pub ready: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

/// `{name}` reference embedded in a cluster snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamedRef {
    pub name: Option<String>,
}

/// Service links reported by a provisioned cluster.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClusterLinks {
    pub zeebe: Option<String>,
    pub operate: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

/// Cluster snapshot from `GET /clusters/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClusterResponse {
    pub uuid: Option<String>,
    pub name: Option<String>,
    pub status: Option<ClusterStatus>,
    pub plan_type: Option<NamedRef>,
    pub region: Option<NamedRef>,
    pub links: Option<ClusterLinks>,
}

// ── Clients ──────────────────────────────────────────────────────────

/// Body for `POST /clusters/{id}/clients`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateClientRequest {
    pub client_name: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CreateClientResponse {
    pub client_id: Option<String>,
    pub client_secret: Option<String>,
}

/// API client credentials bound to one cluster.
///
/// `Debug` never prints the secret.
#[derive(Debug, Clone)]
pub struct ClientCredentials {
    pub client_id: String,
    pub client_secret: secrecy::SecretString,
}
