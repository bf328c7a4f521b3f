// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Mediamap-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of mediamap and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::BTreeMap;

use super::edge::Edge;
use super::ids::{EdgeId, NodeId};
use super::node::Node;

/// Either kind of record held by the [`GraphModel`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Entity<'a> {
    Node(&'a Node),
    Edge(&'a Edge),
}

/// Canonical store of every node and edge known to the process.
///
/// The store is deliberately dumb: `update_*` always replaces the stored record
/// and reports what was there before. Deciding whether a change is worth
/// propagating to views is the caller's job.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GraphModel {
    nodes: BTreeMap<NodeId, Node>,
    edges: BTreeMap<EdgeId, Edge>,
}

impl GraphModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn nodes(&self) -> &BTreeMap<NodeId, Node> {
        &self.nodes
    }

    pub fn edges(&self) -> &BTreeMap<EdgeId, Edge> {
        &self.edges
    }

    /// Looks up any record by raw id, nodes first.
    pub fn get(&self, id: &str) -> Option<Entity<'_>> {
        if let Some(node) = self.nodes.get(id) {
            return Some(Entity::Node(node));
        }
        self.edges.get(id).map(Entity::Edge)
    }

    pub fn node(&self, id: &str) -> Option<&Node> {
        self.nodes.get(id)
    }

    pub fn edge(&self, id: &str) -> Option<&Edge> {
        self.edges.get(id)
    }

    pub fn contains_node(&self, id: &str) -> bool {
        self.nodes.contains_key(id)
    }

    /// Replaces the stored node with the same id, returning the previous record.
    pub fn update_node(&mut self, node: Node) -> Option<Node> {
        self.nodes.insert(node.id().clone(), node)
    }

    /// Replaces the stored edge with the same id, returning the previous record.
    pub fn update_edge(&mut self, edge: Edge) -> Option<Edge> {
        self.edges.insert(edge.id().clone(), edge)
    }

    pub fn remove_node(&mut self, id: &str) -> Option<Node> {
        self.nodes.remove(id)
    }

    pub fn remove_edge(&mut self, id: &str) -> Option<Edge> {
        self.edges.remove(id)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }
}

#[cfg(test)]
mod tests {
    use super::{Entity, GraphModel};
    use crate::model::fixtures::{eid, nid};
    use crate::model::{Edge, Node};

    #[test]
    fn get_finds_nodes_and_edges_by_raw_id() {
        let mut graph = GraphModel::new();
        graph.update_node(Node::new(nid("a"), "medialive-channel", "MediaLive Channel", "A"));
        graph.update_edge(Edge::new(eid("a-b-0"), nid("a"), nid("b")));

        assert!(matches!(graph.get("a"), Some(Entity::Node(node)) if node.name() == "A"));
        assert!(matches!(graph.get("a-b-0"), Some(Entity::Edge(edge)) if edge.to().as_str() == "b"));
        assert!(graph.get("missing").is_none());
    }

    #[test]
    fn update_replaces_and_returns_previous_record() {
        let mut graph = GraphModel::new();
        let first = Node::new(nid("a"), "s3", "S3 Bucket", "old");
        assert!(graph.update_node(first.clone()).is_none());

        let second = Node::new(nid("a"), "s3", "S3 Bucket", "new");
        let previous = graph.update_node(second.clone());

        assert_eq!(previous, Some(first));
        assert_eq!(graph.node("a"), Some(&second));
        assert_eq!(graph.node_count(), 1);
    }

    #[test]
    fn identical_update_leaves_store_unchanged() {
        let mut graph = GraphModel::new();
        let node = Node::new(nid("a"), "s3", "S3 Bucket", "bucket");
        graph.update_node(node.clone());
        let before = graph.clone();

        let previous = graph.update_node(node.clone());

        assert_eq!(previous.as_ref(), Some(&node));
        assert_eq!(graph, before);
    }
}
