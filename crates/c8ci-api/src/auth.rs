// OAuth client-credentials token exchange
//
// One POST against the login host's `/oauth/token` endpoint. The returned
// bearer token authorizes every console API call for the rest of the run.

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use tracing::debug;
use url::Url;

use crate::error::Error;
use crate::transport::TransportConfig;

#[derive(Serialize)]
struct TokenRequest<'a> {
    audience: &'a str,
    grant_type: &'static str,
    client_id: &'a str,
    client_secret: &'a str,
}

#[derive(Deserialize)]
struct TokenResponse {
    #[serde(default)]
    access_token: Option<String>,
}

/// Exchanges console client credentials for a short-lived bearer token.
pub struct TokenIssuer {
    http: reqwest::Client,
    token_url: Url,
}

impl TokenIssuer {
    pub fn new(token_url: Url, transport: &TransportConfig) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Ok(Self { http, token_url })
    }

    /// Wrap an existing `reqwest::Client`.
    pub fn with_client(http: reqwest::Client, token_url: Url) -> Self {
        Self { http, token_url }
    }

    /// The token endpoint this issuer talks to.
    pub fn token_url(&self) -> &Url {
        &self.token_url
    }

    /// Perform a `client_credentials` grant for `audience`.
    ///
    /// Any non-2xx status, or a 2xx body without a non-empty
    /// `access_token`, is an [`Error::Authentication`]. Never retried.
    pub async fn fetch_token(
        &self,
        audience: &str,
        client_id: &str,
        client_secret: &SecretString,
    ) -> Result<SecretString, Error> {
        debug!("POST {} (audience={audience})", self.token_url);

        let body = TokenRequest {
            audience,
            grant_type: "client_credentials",
            client_id,
            client_secret: client_secret.expose_secret(),
        };

        let resp = self
            .http
            .post(self.token_url.clone())
            .json(&body)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(Error::Authentication {
                message: format!("token request failed (HTTP {}): {body}", status.as_u16()),
            });
        }

        let raw = resp.text().await?;
        let parsed: TokenResponse =
            serde_json::from_str(&raw).map_err(|e| Error::Deserialization {
                message: e.to_string(),
                body: String::new(),
            })?;

        match parsed.access_token {
            Some(token) if !token.is_empty() => {
                debug!("token exchange successful");
                Ok(SecretString::from(token))
            }
            _ => Err(Error::Authentication {
                message: "no access_token in response".into(),
            }),
        }
    }
}
