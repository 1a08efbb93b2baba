//! Snapshot source backed by JSON files

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::models::{Module, Snapshot};

use super::SnapshotSource;

/// Reads `<dir>/<module>.json` for every module
///
/// A missing file is an empty collection.
#[derive(Debug, Clone)]
pub struct FileSource {
    dir: PathBuf,
}

impl FileSource {
    /// Read collections from `dir`
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    /// Path of a module's collection file
    pub fn path_for(&self, module: Module) -> PathBuf {
        self.dir.join(format!("{}.json", module.key()))
    }

    async fn read_collection(&self, module: Module) -> Result<Value> {
        let path = self.path_for(module);
        match tokio::fs::read_to_string(&path).await {
            Ok(contents) => serde_json::from_str(&contents).map_err(|e| {
                Error::validation(format!("{}: {e}", path.display()))
            }),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %path.display(), "Collection file missing, treating as empty");
                Ok(Value::Array(Vec::new()))
            }
            Err(e) => Err(e.into()),
        }
    }
}

#[async_trait]
impl SnapshotSource for FileSource {
    async fn fetch_snapshot(&self) -> Result<Snapshot> {
        let mut snapshot = Snapshot::default();
        for module in Module::ALL {
            let raw = self.read_collection(module).await?;
            snapshot.ingest(module, raw)?;
        }

        info!(
            source = %self.describe(),
            rejected = snapshot.rejected,
            "Loaded snapshot"
        );
        Ok(snapshot)
    }

    fn describe(&self) -> String {
        format!("files in {}", self.dir.display())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write(dir: &Path, name: &str, contents: &str) {
        std::fs::write(dir.join(name), contents).unwrap();
    }

    #[tokio::test]
    async fn test_reads_each_module_file() {
        let dir = tempfile::tempdir().unwrap();
        write(
            dir.path(),
            "contas_mensais.json",
            r#"[{"id": 1, "tipo_conta": "Internet", "data_vencimento": "2024-01-01", "status_pagamento": "pendente"}]"#,
        );
        write(
            dir.path(),
            "inventario.json",
            r#"[{"id": 1, "nome": "Toner", "quantidade": 5, "quantidade_minima": 5}, 42]"#,
        );

        let source = FileSource::new(dir.path());
        let snapshot = source.fetch_snapshot().await.unwrap();

        assert_eq!(snapshot.contas_mensais.len(), 1);
        assert_eq!(snapshot.inventario.len(), 1);
        assert_eq!(snapshot.rejected, 1);
        // Files that do not exist are empty collections
        assert!(snapshot.compras.is_empty());
        assert!(snapshot.chamados.is_empty());
    }

    #[tokio::test]
    async fn test_invalid_json_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "chamados.json", "[{");

        let err = FileSource::new(dir.path()).fetch_snapshot().await.unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
    }

    #[tokio::test]
    async fn test_non_array_collection_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "ativos.json", r#"{"ativos": []}"#);

        let err = FileSource::new(dir.path()).fetch_snapshot().await.unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
    }
}
