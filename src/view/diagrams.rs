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

use super::DiagramView;
use crate::model::{Edge, Node, NodeId};

/// Non-owning handle to a registered diagram view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ViewId(u64);

impl ViewId {
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ViewId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "view#{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    #[error("a diagram named '{name}' is already open")]
    DuplicateName { name: String },
}

struct ViewEntry {
    name: String,
    displayed: BTreeSet<NodeId>,
    view: Weak<dyn DiagramView>,
}

impl ViewEntry {
    fn is_live(&self) -> bool {
        self.view.strong_count() > 0
    }
}

/// Tracks every open diagram and which node ids it displays.
#[derive(Default)]
pub struct DiagramRegistry {
    next_id: u64,
    entries: BTreeMap<ViewId, ViewEntry>,
}

impl fmt::Debug for DiagramRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut map = f.debug_map();
        for (id, entry) in &self.entries {
            map.entry(id, &(&entry.name, entry.displayed.len(), entry.is_live()));
        }
        map.finish()
    }
}

impl DiagramRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a view under a unique name. Stale entries holding the name are dropped first.
    pub fn register(
        &mut self,
        name: impl Into<String>,
        view: &Arc<dyn DiagramView>,
    ) -> Result<ViewId, RegistryError> {
        let name = name.into();
        self.entries.retain(|_, entry| entry.is_live() || entry.name != name);
        if self.entries.values().any(|entry| entry.name == name) {
            return Err(RegistryError::DuplicateName { name });
        }

        self.next_id = self.next_id.wrapping_add(1);
        let id = ViewId(self.next_id);
        self.entries.insert(
            id,
            ViewEntry { name, displayed: BTreeSet::new(), view: Arc::downgrade(view) },
        );
        Ok(id)
    }

    pub fn deregister(&mut self, id: ViewId) -> bool {
        self.entries.remove(&id).is_some()
    }

    /// Drops entries whose view has been destroyed. Returns how many were removed.
    pub fn prune(&mut self) -> usize {
        let before = self.entries.len();
        self.entries.retain(|_, entry| entry.is_live());
        before - self.entries.len()
    }

    /// Registered entries, including ones whose view has not been pruned yet.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn is_live(&self, id: ViewId) -> bool {
        self.entries.get(&id).is_some_and(ViewEntry::is_live)
    }

    pub fn view(&self, id: ViewId) -> Option<Arc<dyn DiagramView>> {
        self.entries.get(&id).and_then(|entry| entry.view.upgrade())
    }

    pub fn name(&self, id: ViewId) -> Option<&str> {
        self.entries.get(&id).filter(|entry| entry.is_live()).map(|entry| entry.name.as_str())
    }

    pub fn get_by_name(&self, name: &str) -> Option<ViewId> {
        self.entries
            .iter()
            .find(|(_, entry)| entry.is_live() && entry.name == name)
            .map(|(id, _)| *id)
    }

    /// Live views as `(id, name)`, in registration order.
    pub fn live(&self) -> impl Iterator<Item = (ViewId, &str)> + '_ {
        self.entries
            .iter()
            .filter(|(_, entry)| entry.is_live())
            .map(|(id, entry)| (*id, entry.name.as_str()))
    }

    pub fn displayed(&self, id: ViewId) -> Option<&BTreeSet<NodeId>> {
        self.entries.get(&id).filter(|entry| entry.is_live()).map(|entry| &entry.displayed)
    }

    pub fn add_nodes(&mut self, id: ViewId, nodes: impl IntoIterator<Item = NodeId>) -> bool {
        let Some(entry) = self.entries.get_mut(&id) else {
            return false;
        };
        entry.displayed.extend(nodes);
        true
    }

    pub fn remove_nodes<Q: AsRef<str>>(&mut self, id: ViewId, nodes: &[Q]) -> bool {
        let Some(entry) = self.entries.get_mut(&id) else {
            return false;
        };
        for node in nodes {
            entry.displayed.remove(node.as_ref());
        }
        true
    }

    pub fn set_nodes(&mut self, id: ViewId, nodes: BTreeSet<NodeId>) -> bool {
        let Some(entry) = self.entries.get_mut(&id) else {
            return false;
        };
        entry.displayed = nodes;
        true
    }

    /// Every live view whose displayed set is a superset of `node_ids`.
    pub fn views_containing<Q: AsRef<str>>(&self, node_ids: &[Q]) -> Vec<ViewId> {
        self.entries
            .iter()
            .filter(|(_, entry)| entry.is_live())
            .filter(|(_, entry)| node_ids.iter().all(|id| entry.displayed.contains(id.as_ref())))
            .map(|(id, _)| *id)
            .collect()
    }

    pub fn dispatch_update(&self, id: ViewId, node: &Node) -> bool {
        self.with_view(id, |view| view.update_node(node))
    }

    pub fn dispatch_edge(&self, id: ViewId, edge: &Edge) -> bool {
        self.with_view(id, |view| view.update_edge(edge))
    }

    pub fn dispatch_alert(&self, id: ViewId, active: bool) -> bool {
        self.with_view(id, |view| view.alert(active))
    }

    /// Brings a diagram forward and frames it.
    ///
    /// With a node, the view is fitted to that node and blinks it `blinks` times; otherwise the
    /// whole diagram is fitted.
    pub fn focus(&self, id: ViewId, node: Option<&NodeId>, blinks: u32) -> bool {
        self.with_view(id, |view| {
            if !view.shown() {
                view.show();
            }
            match node {
                Some(node) => {
                    view.fit(Some(std::slice::from_ref(node)));
                    view.blink(blinks, Some(node));
                }
                None => view.fit(None),
            }
        })
    }

    fn with_view(&self, id: ViewId, f: impl FnOnce(&dyn DiagramView)) -> bool {
        match self.view(id) {
            Some(view) => {
                f(view.as_ref());
                true
            }
            None => {
                debug!(view = %id, "skipping dispatch to closed diagram");
                false
            }
        }
    }
}
