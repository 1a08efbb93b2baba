//! Snapshot source backed by the console's REST backend

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::error::{Error, Result};
use crate::models::{Module, Snapshot};

use super::SnapshotSource;

/// Fetches `GET {base_url}/api/{module}` for every module
#[derive(Debug, Clone)]
pub struct HttpSource {
    client: Client,
    base_url: String,
}

impl HttpSource {
    /// Create a source for the backend at `base_url`
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("itops/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// URL of a module's collection endpoint
    pub fn url_for(&self, module: Module) -> String {
        format!("{}/api/{}", self.base_url, module.api_path())
    }

    async fn fetch_collection(&self, module: Module) -> Result<Value> {
        let url = self.url_for(module);
        debug!(url = %url, "Fetching collection");

        let response = self.client.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            warn!(url = %url, status = status.as_u16(), "Backend returned an error");
            return Err(Error::upstream(module.key(), status.as_u16()));
        }

        Ok(response.json::<Value>().await?)
    }
}

#[async_trait]
impl SnapshotSource for HttpSource {
    async fn fetch_snapshot(&self) -> Result<Snapshot> {
        let mut snapshot = Snapshot::default();
        for module in Module::ALL {
            let raw = self.fetch_collection(module).await?;
            snapshot.ingest(module, raw)?;
        }

        info!(
            source = %self.describe(),
            rejected = snapshot.rejected,
            "Fetched snapshot"
        );
        Ok(snapshot)
    }

    fn describe(&self) -> String {
        format!("backend at {}", self.base_url)
    }
}
