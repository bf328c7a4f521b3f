// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Mediamap-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of mediamap and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Runtime configuration, read from an optional JSON file.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::query::SearchOptions;
use crate::sync::{ConnectionKind, DEFAULT_CURVE_ROUNDNESS};

pub const DEFAULT_BLINK_COUNT: u32 = 10;
pub const LOG_ENV_VAR: &str = "MEDIAMAP_LOG";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub blink_count: u32,
    pub curve_roundness: f64,
    pub log_filter: String,
    pub search: SearchOptions,
    pub connection_kinds: Vec<ConnectionKind>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            blink_count: DEFAULT_BLINK_COUNT,
            curve_roundness: DEFAULT_CURVE_ROUNDNESS,
            log_filter: "info".to_owned(),
            search: SearchOptions::default(),
            connection_kinds: ConnectionKind::builtin(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {path:?}: {source}")]
    Io { path: PathBuf, source: std::io::Error },
    #[error("failed to parse config {path:?}: {source}")]
    Json { path: PathBuf, source: serde_json::Error },
}

impl Config {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path)
            .map_err(|source| ConfigError::Io { path: path.to_path_buf(), source })?;
        serde_json::from_str(&raw).map_err(|source| ConfigError::Json { path: path.to_path_buf(), source })
    }

    /// Loads `path` when given, otherwise the defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    pub fn connection_kind(&self, key: &str) -> Option<&ConnectionKind> {
        self.connection_kinds.iter().find(|kind| kind.key == key)
    }
}
