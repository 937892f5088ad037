// Hand-crafted async HTTP client for the SaaS console API.
//
// Base path: https://api.cloud.<host>/
// Auth: `Authorization: Bearer <token>` header

use reqwest::header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderValue};
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use super::types::{
    ClientCredentials, ClusterParameters, ClusterResponse, CreateClientRequest,
    CreateClientResponse, CreateClusterRequest, CreateClusterResponse,
};
use crate::error::Error;
use crate::transport::TransportConfig;

// ── Error response shape from the console API ────────────────────────

#[derive(serde::Deserialize)]
struct ErrorResponse {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

// ── Client ───────────────────────────────────────────────────────────

/// Async client for the console cluster-management API.
///
/// Uses bearer-token authentication and communicates via JSON REST
/// endpoints under `/clusters`.
#[derive(Debug)]
pub struct ConsoleClient {
    http: reqwest::Client,
    base_url: Url,
}

impl ConsoleClient {
    // ── Constructors ─────────────────────────────────────────────────

    /// Build from a bearer token and transport config.
    ///
    /// Injects `Authorization: Bearer …` as a sensitive default header
    /// on every request.
    pub fn from_token(
        base_url: &str,
        token: &SecretString,
        transport: &TransportConfig,
    ) -> Result<Self, Error> {
        let mut headers = HeaderMap::new();
        let mut auth_value = HeaderValue::from_str(&format!("Bearer {}", token.expose_secret()))
            .map_err(|e| Error::Authentication {
                message: format!("invalid access token header value: {e}"),
            })?;
        auth_value.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth_value);
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let http = transport.build_client_with_headers(headers)?;
        let base_url = Self::normalize_base_url(base_url)?;

        Ok(Self { http, base_url })
    }

    /// Wrap an existing `reqwest::Client` (caller manages auth headers).
    pub fn from_reqwest(base_url: &str, http: reqwest::Client) -> Result<Self, Error> {
        let base_url = Self::normalize_base_url(base_url)?;
        Ok(Self { http, base_url })
    }

    /// Ensure the base URL ends with `/` so relative joins append.
    fn normalize_base_url(raw: &str) -> Result<Url, Error> {
        let mut url = Url::parse(raw)?;
        let path = url.path().trim_end_matches('/').to_owned();
        url.set_path(&format!("{path}/"));
        Ok(url)
    }

    /// The normalized API base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    // ── URL builder ──────────────────────────────────────────────────

    fn url(&self, path: &str) -> Result<Url, Error> {
        Ok(self.base_url.join(path)?)
    }

    // ── HTTP verbs ───────────────────────────────────────────────────

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, Error> {
        let url = self.url(path)?;
        debug!("GET {url}");

        let resp = self.http.get(url).send().await?;
        self.handle_response(resp).await
    }

    async fn post<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, Error> {
        let url = self.url(path)?;
        debug!("POST {url}");

        let resp = self.http.post(url).json(body).send().await?;
        self.handle_response(resp).await
    }

    async fn delete(&self, path: &str) -> Result<(), Error> {
        let url = self.url(path)?;
        debug!("DELETE {url}");

        let resp = self.http.delete(url).send().await?;
        self.handle_empty(resp).await
    }

    // ── Response handling ────────────────────────────────────────────

    async fn handle_response<T: DeserializeOwned>(
        &self,
        resp: reqwest::Response,
    ) -> Result<T, Error> {
        let status = resp.status();
        if status.is_success() {
            let body = resp.text().await?;
            serde_json::from_str(&body).map_err(|e| {
                let preview: String = body.chars().take(200).collect();
                Error::Deserialization {
                    message: format!("{e} (body preview: {preview:?})"),
                    body,
                }
            })
        } else {
            Err(self.parse_error(status, resp).await)
        }
    }

    async fn handle_empty(&self, resp: reqwest::Response) -> Result<(), Error> {
        let status = resp.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(self.parse_error(status, resp).await)
        }
    }

    async fn parse_error(&self, status: reqwest::StatusCode, resp: reqwest::Response) -> Error {
        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Error::Unauthorized;
        }

        let raw = resp.text().await.unwrap_or_default();

        let message = match serde_json::from_str::<ErrorResponse>(&raw) {
            Ok(ErrorResponse {
                message: Some(message),
                ..
            }) => message,
            Ok(ErrorResponse {
                error: Some(error), ..
            }) => error,
            _ if raw.is_empty() => status.to_string(),
            _ => raw,
        };

        Error::Api {
            status: status.as_u16(),
            message,
        }
    }

    // ── Endpoints ────────────────────────────────────────────────────

    /// Fetch the channel / generation / plan / region catalog.
    ///
    /// `GET /clusters/parameters`
    pub async fn cluster_parameters(&self) -> Result<ClusterParameters, Error> {
        self.get("clusters/parameters").await
    }

    /// Request a new cluster and return its id.
    ///
    /// `POST /clusters`: the cluster is pending until polled healthy.
    pub async fn create_cluster(&self, req: &CreateClusterRequest) -> Result<String, Error> {
        let resp: CreateClusterResponse = self.post("clusters", req).await?;
        resp.cluster_id
            .filter(|id| !id.is_empty())
            .ok_or(Error::MissingField {
                context: "cluster creation",
                field: "clusterId",
            })
    }

    /// Fetch the current snapshot of a cluster.
    ///
    /// `GET /clusters/{id}`
    pub async fn get_cluster(&self, cluster_id: &str) -> Result<ClusterResponse, Error> {
        self.get(&format!("clusters/{cluster_id}")).await
    }

    /// Request deletion of a cluster. Success means the request was accepted.
    ///
    /// `DELETE /clusters/{id}`
    pub async fn delete_cluster(&self, cluster_id: &str) -> Result<(), Error> {
        self.delete(&format!("clusters/{cluster_id}")).await
    }

    /// Create an API client scoped to a cluster.
    ///
    /// `POST /clusters/{id}/clients`: both `clientId` and `clientSecret`
    /// must be present in the response.
    pub async fn create_client(
        &self,
        cluster_id: &str,
        client_name: &str,
    ) -> Result<ClientCredentials, Error> {
        let req = CreateClientRequest {
            client_name: client_name.to_owned(),
        };
        let resp: CreateClientResponse = self
            .post(&format!("clusters/{cluster_id}/clients"), &req)
            .await?;

        let missing = |field| Error::MissingField {
            context: "client creation",
            field,
        };
        let client_id = resp
            .client_id
            .filter(|s| !s.is_empty())
            .ok_or_else(|| missing("clientId"))?;
        let client_secret = resp
            .client_secret
            .filter(|s| !s.is_empty())
            .ok_or_else(|| missing("clientSecret"))?;

        Ok(ClientCredentials {
            client_id,
            client_secret: SecretString::from(client_secret),
        })
    }
}
