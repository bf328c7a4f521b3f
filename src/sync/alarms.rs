// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Mediamap-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of mediamap and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::model::{GraphModel, NodeId};
use crate::render::Renderers;
use crate::view::DiagramRegistry;

/// One delivery from the alarm feed.
///
/// `previous` is optional: when the feed does not supply it, the reconciler's own snapshot from
/// the last cycle is used.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlarmEvent {
    pub current: Vec<String>,
    #[serde(default)]
    pub previous: Option<Vec<String>>,
}

impl AlarmEvent {
    pub fn new(current: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self { current: current.into_iter().map(Into::into).collect(), previous: None }
    }

    pub fn with_previous(mut self, previous: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.previous = Some(previous.into_iter().map(Into::into).collect());
        self
    }
}

/// What one reconciliation cycle changed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReconcileReport {
    /// Nodes whose image flipped to the alert variant and were pushed to views.
    pub raised: Vec<NodeId>,
    /// Nodes whose image flipped back to normal and were pushed to views.
    pub cleared: Vec<NodeId>,
    pub notified_views: usize,
    pub skipped_unknown: usize,
}

impl ReconcileReport {
    pub fn is_quiet(&self) -> bool {
        self.raised.is_empty() && self.cleared.is_empty()
    }
}

/// Diffs alarm sets between cycles and flips node images only where they actually change.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AlarmReconciler {
    previous: BTreeSet<String>,
}

impl AlarmReconciler {
    pub fn new() -> Self {
        Self::default()
    }

    /// The alarming set recorded by the last cycle.
    pub fn previous(&self) -> &BTreeSet<String> {
        &self.previous
    }

    pub fn reconcile(
        &mut self,
        graph: &mut GraphModel,
        renderers: &Renderers,
        diagrams: &DiagramRegistry,
        event: AlarmEvent,
    ) -> ReconcileReport {
        let AlarmEvent { current, previous } = event;
        let previous = match previous {
            Some(previous) => previous.into_iter().collect::<BTreeSet<_>>(),
            None => std::mem::take(&mut self.previous),
        };

        let mut report = ReconcileReport::default();
        let mut confirmed: BTreeSet<&str> = BTreeSet::new();

        for id in &current {
            if confirmed.contains(id.as_str()) {
                continue;
            }
            if !graph.contains_node(id) {
                debug!(resource = %id, "alarm for unknown resource");
                report.skipped_unknown += 1;
                continue;
            }
            confirmed.insert(id.as_str());
            if let Some((node_id, notified)) = set_alarm_state(graph, renderers, diagrams, id, true) {
                report.raised.push(node_id);
                report.notified_views += notified;
            }
        }

        for id in previous.iter().filter(|id| !confirmed.contains(id.as_str())) {
            if !graph.contains_node(id) {
                continue;
            }
            if let Some((node_id, notified)) = set_alarm_state(graph, renderers, diagrams, id, false) {
                report.cleared.push(node_id);
                report.notified_views += notified;
            }
        }

        self.previous = current.into_iter().collect();
        report
    }
}

/// Sets a node's alarm flag and re-renders it.
///
/// The model is written whenever the flag or image changes, but views are only told about image
/// changes. Returns the node id and how many views were notified when the image changed.
fn set_alarm_state(
    graph: &mut GraphModel,
    renderers: &Renderers,
    diagrams: &DiagramRegistry,
    id: &str,
    alarming: bool,
) -> Option<(NodeId, usize)> {
    let stored = graph.node(id)?;
    let image = renderers.image(stored, alarming);
    let image_changed = &image != stored.image();
    if !image_changed && stored.alarming() == alarming {
        return None;
    }

    let mut node = stored.clone();
    node.set_alarming(alarming);
    if !image_changed {
        graph.update_node(node);
        return None;
    }
    node.set_image(image);

    let mut notified = 0;
    for view in diagrams.views_containing(&[node.id()]) {
        if diagrams.dispatch_update(view, &node) {
            diagrams.dispatch_alert(view, alarming);
            notified += 1;
        }
    }

    let node_id = node.id().clone();
    graph.update_node(node);
    Some((node_id, notified))
}
