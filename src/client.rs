//! Typed HTTP client for the cluster management API.

use std::collections::HashMap;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use reqwest::{Client, Method, RequestBuilder, Url};
use serde::Deserialize;
use tracing::{debug, warn};

use crate::config::Config;
use crate::domain::drain::{DrainSpec, DrainUpdateRequest, DrainUpdateResponse};
use crate::domain::node::{NodeRecord, NodeSummary};

const TOKEN_HEADER: &str = "X-Cluster-Token";

pub struct ClusterClient {
    base_url: String,
    region: Option<String>,
    token: Option<String>,
    http: Client,
}

/// Subset of the agent "self" document needed to find the local node.
#[derive(Debug, Default, Deserialize)]
pub struct AgentSelf {
    #[serde(default)]
    pub stats: HashMap<String, HashMap<String, String>>,
}

impl AgentSelf {
    /// Node id of the local client agent, if the agent runs in client mode.
    pub fn client_node_id(&self) -> Option<&str> {
        self.stats
            .get("client")
            .and_then(|client| client.get("node_id"))
            .map(String::as_str)
    }
}

impl ClusterClient {
    pub fn new(config: &Config) -> Result<Self> {
        Url::parse(&config.address)
            .with_context(|| format!("invalid cluster address {:?}", config.address))?;
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .context("building HTTP client")?;
        Ok(Self {
            base_url: config.address.trim_end_matches('/').to_string(),
            region: config.region.clone(),
            token: config.token.clone(),
            http,
        })
    }

    pub async fn agent_self(&self) -> Result<AgentSelf> {
        self.get("/v1/agent/self", &[]).await
    }

    pub async fn local_node_id(&self) -> Result<String> {
        let info = self
            .agent_self()
            .await
            .context("error querying agent info")?;
        match info.client_node_id() {
            Some(id) => Ok(id.to_string()),
            None => bail!("failed to determine node ID: not running in client mode"),
        }
    }

    pub async fn node_prefix_list(&self, prefix: &str) -> Result<Vec<NodeSummary>> {
        self.get("/v1/nodes", &[("prefix", prefix)]).await
    }

    pub async fn node_info(&self, id: &str) -> Result<NodeRecord> {
        self.get(&format!("/v1/node/{}", id), &[]).await
    }

    pub async fn update_drain(
        &self,
        id: &str,
        spec: Option<DrainSpec>,
    ) -> Result<DrainUpdateResponse> {
        let path = format!("/v1/node/{}/drain", id);
        let req = self.drain_request(&path, id, spec);
        self.send(Method::POST, req, &path).await
    }

    // ── Internal helpers ───────────────────────────────────

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn drain_request(&self, path: &str, id: &str, spec: Option<DrainSpec>) -> RequestBuilder {
        let body = DrainUpdateRequest { node_id: id, spec };
        self.request(Method::POST, path, &[]).json(&body)
    }

    fn request(&self, method: Method, path: &str, query: &[(&str, &str)]) -> RequestBuilder {
        let mut req = self.http.request(method, self.url(path)).query(query);
        if let Some(region) = &self.region {
            req = req.query(&[("region", region)]);
        }
        if let Some(token) = &self.token {
            req = req.header(TOKEN_HEADER, token);
        }
        req
    }

    async fn get<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<T> {
        let req = self.request(Method::GET, path, query);
        self.send(Method::GET, req, path).await
    }

    async fn send<T: serde::de::DeserializeOwned>(
        &self,
        method: Method,
        req: RequestBuilder,
        path: &str,
    ) -> Result<T> {
        let url = self.url(path);
        debug!(%method, url = %url, "sending request");

        let resp = req
            .send()
            .await
            .with_context(|| format!("{} {}", method, url))?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            warn!(%method, url = %url, status = %status, "management API returned an error");
            bail!("{} {} returned {}: {}", method, url, status, body.trim());
        }

        resp.json()
            .await
            .with_context(|| format!("parsing response from {} {}", method, url))
    }
}
