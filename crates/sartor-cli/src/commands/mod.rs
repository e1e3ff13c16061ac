//! CLI command implementations for the Sartor CRM.

pub mod check;
pub mod client;
pub mod order;
pub mod schedule;
pub mod tree;

use anyhow::{Context, Result};
use sartor_core::config::ShopConfig;
use sartor_core::snapshot::Snapshot;
use sartor_engine::{CrmEngine, ValidationError};
use sartor_store::{FileStore, SharedStore};
use std::path::Path;

/// Config, engine and store wired together for one invocation.
pub struct Workspace {
    engine: CrmEngine,
    store: SharedStore<FileStore>,
}

impl Workspace {
    pub fn open(config_path: Option<&Path>, data_override: Option<&Path>) -> Result<Self> {
        let config = match config_path {
            Some(path) => ShopConfig::from_file(path)
                .with_context(|| format!("loading config from {}", path.display()))?,
            None => ShopConfig::default(),
        };
        let data_file = data_override
            .map(Path::to_path_buf)
            .unwrap_or_else(|| config.store.data_file.clone());
        tracing::debug!(data = %data_file.display(), "opening snapshot store");

        let store = SharedStore::open(FileStore::new(&data_file))
            .with_context(|| format!("opening snapshot file {}", data_file.display()))?;
        Ok(Self {
            engine: CrmEngine::new(config),
            store,
        })
    }

    pub fn engine(&self) -> &CrmEngine {
        &self.engine
    }

    /// Read the current snapshot without taking a version.
    pub fn snapshot(&self) -> Result<Snapshot> {
        let (_, snapshot) = self.store.read()?;
        Ok(snapshot)
    }

    /// Run one mutation against the current snapshot and commit the result.
    pub fn mutate<F>(&self, f: F) -> Result<()>
    where
        F: FnOnce(&CrmEngine, &Snapshot) -> std::result::Result<Snapshot, ValidationError>,
    {
        let (version, snapshot) = self.store.read()?;
        let next = f(&self.engine, &snapshot)?;
        self.store.commit(version, next)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sartor_engine::NewClient;

    #[test]
    fn workspace_persists_mutations_across_reopens() {
        let dir = tempfile::tempdir().unwrap();
        let data = dir.path().join("crm.json");

        let ws = Workspace::open(None, Some(&data)).unwrap();
        ws.mutate(|engine, snapshot| {
            engine.create_client(
                &NewClient {
                    first_name: "Ada".into(),
                    last_name: "Marsh".into(),
                    ..Default::default()
                },
                snapshot,
            )
        })
        .unwrap();
        drop(ws);

        let reopened = Workspace::open(None, Some(&data)).unwrap();
        let snapshot = reopened.snapshot().unwrap();
        assert_eq!(snapshot.clients.len(), 1);
        assert_eq!(snapshot.clients[0].full_name(), "Ada Marsh");
    }

    #[test]
    fn failed_mutation_commits_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let ws = Workspace::open(None, Some(&dir.path().join("crm.json"))).unwrap();

        let err = ws.mutate(|engine, snapshot| {
            engine.create_client(&NewClient::default(), snapshot)
        });
        assert!(err.is_err());
        assert!(ws.snapshot().unwrap().clients.is_empty());
    }
}
