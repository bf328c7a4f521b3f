// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Mediamap-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of mediamap and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use serde::Serialize;
use serde_json::Value;

use super::ids::NodeId;

/// Rendered artifacts for a node's two display states.
///
/// Always derived from the node's alarm flag and kind; the reconciler only
/// replaces it when a freshly rendered pair differs from this one.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct NodeImage {
    selected: String,
    unselected: String,
}

impl NodeImage {
    pub fn new(selected: impl Into<String>, unselected: impl Into<String>) -> Self {
        Self { selected: selected.into(), unselected: unselected.into() }
    }

    pub fn selected(&self) -> &str {
        &self.selected
    }

    pub fn unselected(&self) -> &str {
        &self.unselected
    }
}

/// A vertex representing one discovered cloud resource.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Node {
    id: NodeId,
    kind: String,
    title: String,
    name: String,
    data: Value,
    alarming: bool,
    image: NodeImage,
}

impl Node {
    pub fn new(
        id: NodeId,
        kind: impl Into<String>,
        title: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            id,
            kind: kind.into(),
            title: title.into(),
            name: name.into(),
            data: Value::Null,
            alarming: false,
            image: NodeImage::default(),
        }
    }

    pub fn with_data(mut self, data: Value) -> Self {
        self.data = data;
        self
    }

    pub fn id(&self) -> &NodeId {
        &self.id
    }

    /// Resource kind, e.g. `medialive-channel`; selects the renderer.
    pub fn kind(&self) -> &str {
        &self.kind
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn data(&self) -> &Value {
        &self.data
    }

    pub fn set_data(&mut self, data: Value) {
        self.data = data;
    }

    pub fn alarming(&self) -> bool {
        self.alarming
    }

    pub fn set_alarming(&mut self, alarming: bool) {
        self.alarming = alarming;
    }

    pub fn image(&self) -> &NodeImage {
        &self.image
    }

    pub fn set_image(&mut self, image: NodeImage) {
        self.image = image;
    }
}
