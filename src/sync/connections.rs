// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Mediamap-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of mediamap and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::model::{Edge, EdgeId, IdError, NodeId};

/// A connection record as cached by the backend. `data` is a JSON document encoded as a string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawConnection {
    pub arn: String,
    pub from: String,
    pub to: String,
    #[serde(default)]
    pub data: String,
}

/// How an edge label is derived from a connection of a given kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LabelRule {
    Fixed(String),
    /// The payload's `scheme` field, with its first `_` turned into a space.
    Scheme,
}

/// Describes one family of connections served by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionKind {
    pub key: String,
    pub module_name: String,
    pub label: LabelRule,
    #[serde(default)]
    pub detect_parallel: bool,
}

impl ConnectionKind {
    pub fn builtin() -> Vec<ConnectionKind> {
        vec![
            ConnectionKind {
                key: "medialive-channel-mediapackage-channel".to_owned(),
                module_name: "MediaLive Channel to MediaPackage Channel".to_owned(),
                label: LabelRule::Fixed("HLS".to_owned()),
                detect_parallel: true,
            },
            ConnectionKind {
                key: "mediaconnect-flow-medialive-input".to_owned(),
                module_name: "MediaConnect Flow to MediaLive Input".to_owned(),
                label: LabelRule::Scheme,
                detect_parallel: false,
            },
        ]
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConnectionError {
    #[error("connection has an invalid {field} id: {source}")]
    InvalidId {
        field: &'static str,
        #[source]
        source: IdError,
    },
    #[error("connection {id} carries undecodable data: {source}")]
    MalformedData {
        id: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("connection {id} has no string 'scheme' in its data")]
    MissingScheme { id: String },
}

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("connection source unavailable: {0}")]
    Unavailable(String),
}

/// Backend collaborator serving connection records per kind. May resolve to an empty list.
#[async_trait]
pub trait ConnectionSource: Send + Sync {
    async fn fetch_connections(&self, kind: &str) -> Result<Vec<RawConnection>, FetchError>;
}

/// Shapes one raw record into a draft edge. Curvature is left straight.
pub fn decode_connection(kind: &ConnectionKind, raw: &RawConnection) -> Result<Edge, ConnectionError> {
    let id = EdgeId::new(raw.arn.clone())
        .map_err(|source| ConnectionError::InvalidId { field: "arn", source })?;
    let from = NodeId::new(raw.from.clone())
        .map_err(|source| ConnectionError::InvalidId { field: "from", source })?;
    let to = NodeId::new(raw.to.clone())
        .map_err(|source| ConnectionError::InvalidId { field: "to", source })?;
    let data: Value = serde_json::from_str(&raw.data)
        .map_err(|source| ConnectionError::MalformedData { id: raw.arn.clone(), source })?;

    let label = match &kind.label {
        LabelRule::Fixed(label) => label.clone(),
        LabelRule::Scheme => data
            .get("scheme")
            .and_then(Value::as_str)
            .map(|scheme| scheme.replacen('_', " ", 1))
            .ok_or_else(|| ConnectionError::MissingScheme { id: raw.arn.clone() })?,
    };

    Ok(Edge::new_with(id, from, to, label, data))
}

/// Decodes a whole batch; a bad record is reported without affecting the others.
pub fn decode_batch(
    kind: &ConnectionKind,
    raws: &[RawConnection],
) -> (Vec<Edge>, Vec<ConnectionError>) {
    let mut edges = Vec::with_capacity(raws.len());
    let mut rejected = Vec::new();
    for raw in raws {
        match decode_connection(kind, raw) {
            Ok(edge) => edges.push(edge),
            Err(err) => rejected.push(err),
        }
    }
    (edges, rejected)
}
