use crate::error::{IdentityError, IdentityResult};
use reqwest::{Client, StatusCode};
use serde_json::Value;
use std::time::Duration;
use tracing::debug;
use url::Url;

#[derive(Clone)]
pub struct GraphApi {
    client: Client,
    base_url: Url,
}

impl GraphApi {
    pub fn new(base_url: &str, timeout: Duration) -> IdentityResult<Self> {
        let mut base = base_url.to_string();
        if !base.ends_with('/') {
            base.push('/');
        }
        let base_url =
            Url::parse(&base).map_err(|e| IdentityError::Config(format!("graphURL: {e}")))?;

        let client = Client::builder()
            .user_agent(concat!("coraserver/", env!("CARGO_PKG_VERSION")))
            .connect_timeout(Duration::from_secs(5))
            .timeout(timeout)
            .build()
            .unwrap_or_else(|_| Client::new());

        Ok(Self { client, base_url })
    }

    /// GETs `endpoint` (relative to the Graph base) with the caller's bearer token.
    pub async fn get(&self, access_token: &str, endpoint: &str) -> IdentityResult<Value> {
        let url = self
            .base_url
            .join(endpoint)
            .map_err(|e| IdentityError::Config(format!("graph endpoint {endpoint}: {e}")))?;

        let response = self
            .client
            .get(url)
            .bearer_auth(access_token)
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|e| IdentityError::Upstream(e.to_string()))?;

        let status = response.status();
        if status != StatusCode::OK {
            debug!(endpoint, %status, "Graph request rejected");
            return Err(IdentityError::Upstream(format!(
                "unexpected response status: {status}"
            )));
        }

        response
            .json()
            .await
            .map_err(|e| IdentityError::Upstream(format!("unreadable {endpoint} response: {e}")))
    }

    pub async fn me(&self, access_token: &str) -> IdentityResult<Value> {
        self.get(access_token, "me").await
    }

    pub async fn organization(&self, access_token: &str) -> IdentityResult<Value> {
        self.get(access_token, "organization").await
    }
}
