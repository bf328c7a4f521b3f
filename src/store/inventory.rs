// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Mediamap-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of mediamap and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::model::{Node, NodeId};
use crate::sync::{ConnectionSource, FetchError, RawConnection};

/// A node as cached by the backend inventory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeRecord {
    pub id: NodeId,
    pub kind: String,
    pub title: String,
    pub name: String,
    #[serde(default)]
    pub data: Value,
}

impl NodeRecord {
    pub fn to_node(&self) -> Node {
        Node::new(self.id.clone(), self.kind.clone(), self.title.clone(), self.name.clone())
            .with_data(self.data.clone())
    }
}

/// A saved diagram or tile layout: a name and the node ids it covers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedNodeSet {
    pub name: String,
    #[serde(default)]
    pub nodes: Vec<NodeId>,
}

impl NamedNodeSet {
    pub fn node_set(&self) -> BTreeSet<NodeId> {
        self.nodes.iter().cloned().collect()
    }
}

/// Cached inventory: discovered nodes, connection records per kind, and saved layouts.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct InventorySnapshot {
    pub nodes: Vec<NodeRecord>,
    pub connections: BTreeMap<String, Vec<RawConnection>>,
    pub diagrams: Vec<NamedNodeSet>,
    pub tiles: Vec<NamedNodeSet>,
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("io error at {path:?}: {source}")]
    Io { path: PathBuf, source: io::Error },
    #[error("invalid inventory json at {path:?}: {source}")]
    Json { path: PathBuf, source: serde_json::Error },
}

impl InventorySnapshot {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path)
            .map_err(|source| StoreError::Io { path: path.to_path_buf(), source })?;
        serde_json::from_str(&raw).map_err(|source| StoreError::Json { path: path.to_path_buf(), source })
    }

    /// Writes pretty JSON next to `path` and renames it into place.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), StoreError> {
        let path = path.as_ref();
        let mut contents = serde_json::to_vec_pretty(self)
            .map_err(|source| StoreError::Json { path: path.to_path_buf(), source })?;
        contents.push(b'\n');

        let tmp_path = tmp_path_for(path);
        fs::write(&tmp_path, &contents)
            .map_err(|source| StoreError::Io { path: tmp_path.clone(), source })?;
        rename_overwrite(&tmp_path, path).map_err(|source| {
            let _ = fs::remove_file(&tmp_path);
            StoreError::Io { path: path.to_path_buf(), source }
        })
    }

    pub fn to_nodes(&self) -> Vec<Node> {
        self.nodes.iter().map(NodeRecord::to_node).collect()
    }
}

#[async_trait]
impl ConnectionSource for InventorySnapshot {
    async fn fetch_connections(&self, kind: &str) -> Result<Vec<RawConnection>, FetchError> {
        Ok(self.connections.get(kind).cloned().unwrap_or_default())
    }
}

fn tmp_path_for(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(|name| name.to_os_string()).unwrap_or_default();
    name.push(format!(".tmp-{}", std::process::id()));
    path.with_file_name(name)
}

fn rename_overwrite(from: &Path, to: &Path) -> io::Result<()> {
    #[cfg(windows)]
    {
        match fs::rename(from, to) {
            Ok(()) => Ok(()),
            Err(err)
                if matches!(err.kind(), io::ErrorKind::AlreadyExists | io::ErrorKind::PermissionDenied) =>
            {
                let _ = fs::remove_file(to);
                fs::rename(from, to)
            }
            Err(err) => Err(err),
        }
    }

    #[cfg(not(windows))]
    {
        fs::rename(from, to)
    }
}

#[cfg(test)]
mod tests {
    use std::env;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::{SystemTime, UNIX_EPOCH};

    use super::{InventorySnapshot, StoreError};
    use crate::sync::ConnectionSource;

    static TEMP_DIR_COUNTER: AtomicUsize = AtomicUsize::new(0);

    struct TempDir {
        path: std::path::PathBuf,
    }

    impl TempDir {
        fn new(prefix: &str) -> Self {
            let nanos = SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or_default().as_nanos();
            let counter = TEMP_DIR_COUNTER.fetch_add(1, Ordering::Relaxed);
            let mut path = env::temp_dir();
            path.push(format!("mediamap-{prefix}-{}-{nanos}-{counter}", std::process::id()));
            std::fs::create_dir_all(&path).unwrap();
            Self { path }
        }
    }

    impl Drop for TempDir {
        fn drop(&mut self) {
            let _ = std::fs::remove_dir_all(&self.path);
        }
    }

    const SAMPLE: &str = r#"{
  "nodes": [
    {"id": "arn:ml:1", "kind": "medialive-channel", "title": "MediaLive Channel", "name": "News", "data": {"State": "RUNNING"}},
    {"id": "arn:pkg:1", "kind": "mediapackage-channel", "title": "MediaPackage Channel", "name": "news-pkg"}
  ],
  "connections": {
    "medialive-channel-mediapackage-channel": [
      {"arn": "arn:ml:1:arn:pkg:1:0", "from": "arn:ml:1", "to": "arn:pkg:1", "data": "{\"pipeline\":0}"}
    ]
  },
  "diagrams": [{"name": "News", "nodes": ["arn:ml:1", "arn:pkg:1"]}]
}"#;

    #[test]
    fn loads_sample_and_defaults_missing_sections() {
        let tmp = TempDir::new("inventory-load");
        let path = tmp.path.join("inventory.json");
        std::fs::write(&path, SAMPLE).unwrap();

        let snapshot = InventorySnapshot::load(&path).unwrap();

        assert_eq!(snapshot.nodes.len(), 2);
        assert_eq!(snapshot.to_nodes()[0].data()["State"], "RUNNING");
        assert!(snapshot.nodes[1].data.is_null());
        assert_eq!(snapshot.diagrams[0].node_set().len(), 2);
        assert!(snapshot.tiles.is_empty());
    }

    #[test]
    fn save_then_load_preserves_snapshot() {
        let tmp = TempDir::new("inventory-save");
        let path = tmp.path.join("inventory.json");
        let snapshot: InventorySnapshot = serde_json::from_str(SAMPLE).unwrap();

        snapshot.save(&path).unwrap();
        let loaded = InventorySnapshot::load(&path).unwrap();

        assert_eq!(loaded, snapshot);
        let leftovers = std::fs::read_dir(&tmp.path).unwrap().count();
        assert_eq!(leftovers, 1);
    }

    #[test]
    fn load_reports_invalid_json_and_empty_ids() {
        let tmp = TempDir::new("inventory-invalid");
        let path = tmp.path.join("inventory.json");
        std::fs::write(&path, r#"{"nodes": [{"id": "", "kind": "s3", "title": "S3", "name": "b"}]}"#).unwrap();

        match InventorySnapshot::load(&path).unwrap_err() {
            StoreError::Json { .. } => {}
            other => panic!("expected Json error, got: {other:?}"),
        }
    }

    #[tokio::test]
    async fn serves_connections_per_kind() {
        let snapshot: InventorySnapshot = serde_json::from_str(SAMPLE).unwrap();

        let hls = snapshot.fetch_connections("medialive-channel-mediapackage-channel").await.unwrap();
        let none = snapshot.fetch_connections("mediaconnect-flow-medialive-input").await.unwrap();

        assert_eq!(hls.len(), 1);
        assert!(none.is_empty());
    }
}
