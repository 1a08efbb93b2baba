//! Collection gateways
//!
//! A [`SnapshotSource`] reads every module collection in one go. Handlers and
//! commands receive a source instead of fetching inline, which keeps the
//! classification and aggregation functions pure.

mod file;
mod http;

pub use file::FileSource;
pub use http::HttpSource;

use std::sync::Arc;

use async_trait::async_trait;

use crate::config::{SourceConfig, SourceKind};
use crate::error::Result;
use crate::models::Snapshot;

/// Something that can produce a snapshot of all module collections
#[async_trait]
pub trait SnapshotSource: Send + Sync {
    /// Read every module collection
    async fn fetch_snapshot(&self) -> Result<Snapshot>;

    /// Short description for logs
    fn describe(&self) -> String;
}

/// A fixed, in-memory snapshot
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    snapshot: Snapshot,
}

impl StaticSource {
    /// Serve the given snapshot
    pub fn new(snapshot: Snapshot) -> Self {
        Self { snapshot }
    }
}

#[async_trait]
impl SnapshotSource for StaticSource {
    async fn fetch_snapshot(&self) -> Result<Snapshot> {
        Ok(self.snapshot.clone())
    }

    fn describe(&self) -> String {
        "static snapshot".to_string()
    }
}

/// Build the source described by the configuration
pub fn from_config(config: &SourceConfig) -> Result<Arc<dyn SnapshotSource>> {
    Ok(match config.kind {
        SourceKind::File => Arc::new(FileSource::new(&config.dir)),
        SourceKind::Http => Arc::new(HttpSource::new(&config.base_url, config.timeout)?),
    })
}
