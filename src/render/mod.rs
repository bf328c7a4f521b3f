// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Mediamap-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of mediamap and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Node image rendering.
//!
//! A renderer is four pure functions of a node: normal and alert styles, each in a selected and
//! an unselected variant. Renderers are picked per node kind, with a shared fallback.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use crate::model::{Node, NodeImage};

pub mod svg;

pub use svg::SvgBadgeRenderer;

pub trait NodeRenderer: Send + Sync {
    fn normal_selected(&self, node: &Node) -> String;
    fn normal_unselected(&self, node: &Node) -> String;
    fn alert_selected(&self, node: &Node) -> String;
    fn alert_unselected(&self, node: &Node) -> String;

    /// The image pair matching `alarming`.
    fn image(&self, node: &Node, alarming: bool) -> NodeImage {
        if alarming {
            NodeImage::new(self.alert_selected(node), self.alert_unselected(node))
        } else {
            NodeImage::new(self.normal_selected(node), self.normal_unselected(node))
        }
    }
}

/// Renderer lookup keyed by node kind.
#[derive(Clone)]
pub struct Renderers {
    by_kind: BTreeMap<String, Arc<dyn NodeRenderer>>,
    fallback: Arc<dyn NodeRenderer>,
}

impl Default for Renderers {
    fn default() -> Self {
        Self::new(Arc::new(SvgBadgeRenderer::default()))
    }
}

impl fmt::Debug for Renderers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Renderers")
            .field("kinds", &self.by_kind.keys().collect::<Vec<_>>())
            .finish_non_exhaustive()
    }
}

impl Renderers {
    pub fn new(fallback: Arc<dyn NodeRenderer>) -> Self {
        Self { by_kind: BTreeMap::new(), fallback }
    }

    pub fn register(&mut self, kind: impl Into<String>, renderer: Arc<dyn NodeRenderer>) {
        self.by_kind.insert(kind.into(), renderer);
    }

    pub fn for_kind(&self, kind: &str) -> &dyn NodeRenderer {
        self.by_kind.get(kind).map(|renderer| renderer.as_ref()).unwrap_or(self.fallback.as_ref())
    }

    /// Renders the image pair `node` should carry for the given alarm state.
    pub fn image(&self, node: &Node, alarming: bool) -> NodeImage {
        self.for_kind(node.kind()).image(node, alarming)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::{NodeRenderer, Renderers};
    use crate::model::{Node, NodeId};

    struct Fixed(&'static str);

    impl NodeRenderer for Fixed {
        fn normal_selected(&self, _node: &Node) -> String {
            format!("{}:normal:selected", self.0)
        }
        fn normal_unselected(&self, _node: &Node) -> String {
            format!("{}:normal:unselected", self.0)
        }
        fn alert_selected(&self, _node: &Node) -> String {
            format!("{}:alert:selected", self.0)
        }
        fn alert_unselected(&self, _node: &Node) -> String {
            format!("{}:alert:unselected", self.0)
        }
    }

    #[test]
    fn renderers_pick_by_kind_and_fall_back() {
        let mut renderers = Renderers::new(Arc::new(Fixed("fallback")));
        renderers.register("s3", Arc::new(Fixed("s3")));

        let bucket = Node::new(NodeId::new("b").expect("node id"), "s3", "S3 Bucket", "b");
        let channel =
            Node::new(NodeId::new("c").expect("node id"), "medialive-channel", "Channel", "c");

        assert_eq!(renderers.image(&bucket, true).selected(), "s3:alert:selected");
        assert_eq!(renderers.image(&bucket, false).unselected(), "s3:normal:unselected");
        assert_eq!(renderers.image(&channel, false).selected(), "fallback:normal:selected");
    }
}
