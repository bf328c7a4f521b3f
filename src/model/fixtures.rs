// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Mediamap-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of mediamap and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

use super::edge::Edge;
use super::ids::{EdgeId, NodeId};
use super::node::Node;
use crate::render::NodeRenderer;
use crate::view::{DiagramView, TileView};

pub(crate) fn nid(value: &str) -> NodeId {
    NodeId::new(value).expect("node id")
}

pub(crate) fn eid(value: &str) -> EdgeId {
    EdgeId::new(value).expect("edge id")
}

pub(crate) fn node(id: &str) -> Node {
    Node::new(nid(id), "medialive-channel", "MediaLive Channel", id)
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum ViewEvent {
    Show,
    Fit(Option<Vec<String>>),
    Blink(u32, Option<String>),
    UpdateNode(String),
    UpdateEdge(String),
    Alert(bool),
}

/// Diagram double that records every call made on it.
#[derive(Debug, Default)]
pub(crate) struct RecordingView {
    shown: AtomicBool,
    events: Mutex<Vec<ViewEvent>>,
}

impl RecordingView {
    pub(crate) fn set_shown(&self, shown: bool) {
        self.shown.store(shown, Ordering::SeqCst);
    }

    pub(crate) fn events(&self) -> Vec<ViewEvent> {
        self.events.lock().expect("events lock").clone()
    }

    pub(crate) fn node_updates(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                ViewEvent::UpdateNode(id) => Some(id),
                _ => None,
            })
            .collect()
    }

    pub(crate) fn edge_updates(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                ViewEvent::UpdateEdge(id) => Some(id),
                _ => None,
            })
            .collect()
    }

    pub(crate) fn clear(&self) {
        self.events.lock().expect("events lock").clear();
    }

    fn push(&self, event: ViewEvent) {
        self.events.lock().expect("events lock").push(event);
    }
}

impl DiagramView for RecordingView {
    fn shown(&self) -> bool {
        self.shown.load(Ordering::SeqCst)
    }

    fn show(&self) {
        self.set_shown(true);
        self.push(ViewEvent::Show);
    }

    fn fit(&self, nodes: Option<&[NodeId]>) {
        let nodes = nodes.map(|nodes| nodes.iter().map(|n| n.to_string()).collect());
        self.push(ViewEvent::Fit(nodes));
    }

    fn blink(&self, count: u32, node: Option<&NodeId>) {
        self.push(ViewEvent::Blink(count, node.map(ToString::to_string)));
    }

    fn update_node(&self, node: &Node) {
        self.push(ViewEvent::UpdateNode(node.id().to_string()));
    }

    fn update_edge(&self, edge: &Edge) {
        self.push(ViewEvent::UpdateEdge(edge.id().to_string()));
    }

    fn alert(&self, active: bool) {
        self.push(ViewEvent::Alert(active));
    }
}

#[derive(Debug, Default)]
pub(crate) struct RecordingTiles {
    shows: AtomicUsize,
    blinked: Mutex<Vec<String>>,
}

impl RecordingTiles {
    pub(crate) fn shows(&self) -> usize {
        self.shows.load(Ordering::SeqCst)
    }

    pub(crate) fn blinked(&self) -> Vec<String> {
        self.blinked.lock().expect("blinked lock").clone()
    }
}

impl TileView for RecordingTiles {
    fn show(&self) {
        self.shows.fetch_add(1, Ordering::SeqCst);
    }

    fn blink(&self, tile: &str) {
        self.blinked.lock().expect("blinked lock").push(tile.to_owned());
    }
}

/// Renderer that encodes the requested variant in the output and counts calls.
#[derive(Debug, Default)]
pub(crate) struct CountingRenderer {
    calls: AtomicUsize,
}

impl CountingRenderer {
    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn render(&self, node: &Node, variant: &str) -> String {
        self.calls.fetch_add(1, Ordering::SeqCst);
        format!("{}:{variant}", node.id())
    }
}

impl NodeRenderer for CountingRenderer {
    fn normal_selected(&self, node: &Node) -> String {
        self.render(node, "normal-selected")
    }

    fn normal_unselected(&self, node: &Node) -> String {
        self.render(node, "normal-unselected")
    }

    fn alert_selected(&self, node: &Node) -> String {
        self.render(node, "alert-selected")
    }

    fn alert_unselected(&self, node: &Node) -> String {
        self.render(node, "alert-unselected")
    }
}
