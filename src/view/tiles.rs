// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Mediamap-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of mediamap and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::sync::{Arc, Weak};

use tracing::debug;

use super::TileView;
use crate::model::NodeId;

/// Named tiles and the node ids each one covers.
#[derive(Default)]
pub struct TileRegistry {
    tiles: BTreeMap<String, BTreeSet<NodeId>>,
    view: Option<Weak<dyn TileView>>,
}

impl fmt::Debug for TileRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TileRegistry")
            .field("tiles", &self.tiles)
            .field("view_live", &self.view_live())
            .finish()
    }
}

impl TileRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn attach_view(&mut self, view: &Arc<dyn TileView>) {
        self.view = Some(Arc::downgrade(view));
    }

    pub fn view_live(&self) -> bool {
        self.view.as_ref().is_some_and(|view| view.strong_count() > 0)
    }

    pub fn set_tile(&mut self, name: impl Into<String>, nodes: BTreeSet<NodeId>) {
        self.tiles.insert(name.into(), nodes);
    }

    pub fn remove_tile(&mut self, name: &str) -> Option<BTreeSet<NodeId>> {
        self.tiles.remove(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.tiles.contains_key(name)
    }

    pub fn tiles(&self) -> &BTreeMap<String, BTreeSet<NodeId>> {
        &self.tiles
    }

    /// Brings the tile surface forward and highlights `name`. False for unknown tiles or a closed
    /// tile surface.
    pub fn blink(&self, name: &str) -> bool {
        if !self.tiles.contains_key(name) {
            debug!(tile = name, "skipping blink for unknown tile");
            return false;
        }
        let Some(view) = self.view.as_ref().and_then(Weak::upgrade) else {
            debug!(tile = name, "skipping blink, tile view is closed");
            return false;
        };
        view.show();
        view.blink(name);
        true
    }
}
