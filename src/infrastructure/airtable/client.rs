//! A client for the Airtable metadata API.

use async_trait::async_trait;
use reqwest::StatusCode;
use tracing::{debug, error, instrument};
use url::{Host, Url};

use super::SchemaSource;
use crate::domain::{
    error::{SchemyError, SchemyResult},
    schema::{BaseId, ErrorResponse, Schema},
};

/// Root of the public Airtable REST API.
pub const AIRTABLE_API_URL: &str = "https://api.airtable.com/v0/";

/// Talks to the Airtable metadata API with a bearer token.
pub struct AirtableClient {
    url: Url,
    token: String,
    client: reqwest::Client,
}

impl AirtableClient {
    /// Create a client for the public Airtable API.
    pub fn new(token: impl Into<String>) -> SchemyResult<Self> {
        Self::with_base_url(token, AIRTABLE_API_URL)
    }

    /// Create a client rooted at `base_url`, which must end in `/`.
    pub fn with_base_url(token: impl Into<String>, base_url: &str) -> SchemyResult<Self> {
        let url = Url::parse(base_url).map_err(|e| SchemyError::Config {
            message: format!("invalid API URL {}: {}", base_url, e),
        })?;

        // Keep no idle connections around, so the one connection we open is
        // closed as soon as its response has been read.
        let mut builder = reqwest::Client::builder().pool_max_idle_per_host(0);
        if is_loopback(&url) {
            builder = builder.no_proxy();
        }
        let client = builder.build()?;

        Ok(AirtableClient {
            url,
            token: token.into(),
            client,
        })
    }

    /// The endpoint listing the tables of `base_id`.
    pub fn tables_url(&self, base_id: &BaseId) -> SchemyResult<Url> {
        self.url
            .join(&format!("meta/bases/{}/tables", base_id))
            .map_err(|e| SchemyError::Config {
                message: format!("cannot build URL for base {}: {}", base_id, e),
            })
    }

    /// Turn a non-success response body into an API error.
    fn api_error(status: StatusCode, body: &str) -> SchemyError {
        match serde_json::from_str::<ErrorResponse>(body) {
            Ok(resp) => SchemyError::Api {
                status: status.as_u16(),
                kind: resp.error.kind().to_owned(),
                message: resp.error.message().to_owned(),
            },
            Err(_) => {
                let body = body.trim();
                let message = if body.is_empty() {
                    status.canonical_reason().unwrap_or("unknown error").to_owned()
                } else {
                    body.to_owned()
                };
                SchemyError::Api {
                    status: status.as_u16(),
                    kind: "UNKNOWN".to_owned(),
                    message,
                }
            }
        }
    }
}

fn is_loopback(url: &Url) -> bool {
    match url.host() {
        Some(Host::Domain(domain)) => domain == "localhost",
        Some(Host::Ipv4(ip)) => ip.is_loopback(),
        Some(Host::Ipv6(ip)) => ip.is_loopback(),
        None => false,
    }
}

#[async_trait]
impl SchemaSource for AirtableClient {
    /// `GET /meta/bases/<base_id>/tables`
    #[instrument(level = "trace", skip_all, fields(base_id = %base_id))]
    async fn get_base_schema(&self, base_id: &BaseId) -> SchemyResult<Schema> {
        let url = self.tables_url(base_id)?;
        debug!("requesting {}", url);

        let resp = self
            .client
            .get(url)
            .bearer_auth(&self.token)
            .send()
            .await?;
        let status = resp.status();
        let body = resp.text().await?;

        if status == StatusCode::OK {
            Ok(serde_json::from_str(&body)?)
        } else {
            let err = Self::api_error(status, &body);
            error!(base_id = %base_id, error = %err, "error getting base schema");
            Err(err)
        }
    }
}
