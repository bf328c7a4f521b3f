// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Mediamap-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of mediamap and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! The owning context that ties the model, renderers, views and reconcilers together.
//!
//! All mutation goes through a [`Topology`]; [`SharedTopology`] serializes access to it on a
//! multi-threaded runtime with a single lock, and keeps network waits outside that lock.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use tokio::sync::{mpsc, Mutex, MutexGuard};
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::model::{Edge, EdgeId, GraphModel, Node, NodeId};
use crate::query::{SearchError, SearchIndex, SearchResults};
use crate::render::Renderers;
use crate::sync::{
    decode_batch, disambiguate, AlarmEvent, AlarmReconciler, ConnectionError, ConnectionSource,
    FetchError, RawConnection, ReconcileReport,
};
use crate::view::{DiagramRegistry, DiagramView, RegistryError, TileRegistry, ViewId};

/// Orders fetches of one connection kind so a slow, older batch cannot overwrite a newer one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FetchTicket(u64);

#[derive(Debug, Clone, Copy, Default)]
struct TicketState {
    issued: u64,
    committed: u64,
}

#[derive(Debug, thiserror::Error)]
pub enum TopologyError {
    #[error("unknown connection kind '{0}'")]
    UnknownConnectionKind(String),
    #[error(transparent)]
    Fetch(#[from] FetchError),
}

/// Outcome of a connection batch commit.
#[derive(Debug)]
pub enum CommitOutcome {
    Committed(CommitReport),
    /// A newer batch of the same kind was already committed; this one was dropped.
    Stale { ticket: FetchTicket, latest: FetchTicket },
}

#[derive(Debug, Default)]
pub struct CommitReport {
    /// Edges whose stored record changed.
    pub changed: Vec<EdgeId>,
    pub unchanged: usize,
    pub curved: usize,
    pub rejected: Vec<ConnectionError>,
    pub notified_views: usize,
}

pub struct Topology {
    config: Config,
    graph: GraphModel,
    renderers: Renderers,
    diagrams: DiagramRegistry,
    tiles: TileRegistry,
    alarms: AlarmReconciler,
    tickets: BTreeMap<String, TicketState>,
}

impl Topology {
    pub fn new(config: Config) -> Self {
        Self::with_renderers(config, Renderers::default())
    }

    pub fn with_renderers(config: Config, renderers: Renderers) -> Self {
        Self {
            config,
            graph: GraphModel::new(),
            renderers,
            diagrams: DiagramRegistry::new(),
            tiles: TileRegistry::new(),
            alarms: AlarmReconciler::new(),
            tickets: BTreeMap::new(),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn graph(&self) -> &GraphModel {
        &self.graph
    }

    pub fn renderers_mut(&mut self) -> &mut Renderers {
        &mut self.renderers
    }

    pub fn diagrams(&self) -> &DiagramRegistry {
        &self.diagrams
    }

    pub fn diagrams_mut(&mut self) -> &mut DiagramRegistry {
        &mut self.diagrams
    }

    pub fn tiles(&self) -> &TileRegistry {
        &self.tiles
    }

    pub fn tiles_mut(&mut self) -> &mut TileRegistry {
        &mut self.tiles
    }

    pub fn alarms(&self) -> &AlarmReconciler {
        &self.alarms
    }

    /// Upserts mapper output into the model.
    ///
    /// A known node keeps its alarm flag; every node gets the image pair for its flag. Views are
    /// only told about nodes whose stored record changed. Returns the ids that changed.
    pub fn commit_nodes(&mut self, nodes: impl IntoIterator<Item = Node>) -> Vec<NodeId> {
        let mut changed = Vec::new();
        for mut node in nodes {
            let alarming = self.graph.node(node.id().as_str()).map_or(node.alarming(), Node::alarming);
            node.set_alarming(alarming);
            node.set_image(self.renderers.image(&node, alarming));

            if self.graph.node(node.id().as_str()) == Some(&node) {
                continue;
            }
            for view in self.diagrams.views_containing(&[node.id()]) {
                self.diagrams.dispatch_update(view, &node);
            }
            changed.push(node.id().clone());
            self.graph.update_node(node);
        }
        if !changed.is_empty() {
            info!(changed = changed.len(), "committed nodes");
        }
        changed
    }

    /// Registers a view and pushes it every known record it displays.
    ///
    /// Entries of views the UI dropped without closing them are pruned first.
    pub fn open_diagram(
        &mut self,
        name: impl Into<String>,
        view: &Arc<dyn DiagramView>,
        nodes: impl IntoIterator<Item = NodeId>,
    ) -> Result<ViewId, RegistryError> {
        let pruned = self.diagrams.prune();
        if pruned > 0 {
            debug!(pruned, "pruned dropped diagrams");
        }
        let id = self.diagrams.register(name, view)?;
        let displayed = nodes.into_iter().collect::<BTreeSet<_>>();

        for node_id in &displayed {
            if let Some(node) = self.graph.node(node_id.as_str()) {
                view.update_node(node);
            }
        }
        for edge in self.graph.edges().values() {
            if displayed.contains(edge.from()) && displayed.contains(edge.to()) {
                view.update_edge(edge);
            }
        }

        self.diagrams.set_nodes(id, displayed);
        Ok(id)
    }

    pub fn close_diagram(&mut self, id: ViewId) -> bool {
        self.diagrams.deregister(id)
    }

    /// Reserves the next fetch slot for a connection kind.
    pub fn issue_ticket(&mut self, kind: &str) -> Result<FetchTicket, TopologyError> {
        if self.config.connection_kind(kind).is_none() {
            return Err(TopologyError::UnknownConnectionKind(kind.to_owned()));
        }
        let state = self.tickets.entry(kind.to_owned()).or_default();
        state.issued = state.issued.saturating_add(1);
        Ok(FetchTicket(state.issued))
    }

    /// Decodes, disambiguates and commits one fetched batch of connections.
    ///
    /// Records that fail to decode are reported and skipped. A batch older than the latest
    /// committed one for the same kind is dropped whole.
    pub fn commit_connections(
        &mut self,
        kind: &str,
        ticket: FetchTicket,
        raws: &[RawConnection],
    ) -> Result<CommitOutcome, TopologyError> {
        let Some(connection_kind) = self.config.connection_kind(kind) else {
            return Err(TopologyError::UnknownConnectionKind(kind.to_owned()));
        };

        let state = self.tickets.entry(kind.to_owned()).or_default();
        if ticket.0 < state.committed {
            let latest = FetchTicket(state.committed);
            warn!(kind, ticket = ticket.0, latest = latest.0, "dropping stale connection batch");
            return Ok(CommitOutcome::Stale { ticket, latest });
        }
        state.committed = ticket.0;
        state.issued = state.issued.max(ticket.0);

        let (mut edges, rejected) = decode_batch(connection_kind, raws);
        for err in &rejected {
            warn!(kind, error = %err, "rejected connection record");
        }

        let mut report = CommitReport { rejected, ..CommitReport::default() };
        if connection_kind.detect_parallel {
            report.curved = disambiguate(&mut edges, self.config.curve_roundness);
        }

        for edge in edges {
            if self.graph.edge(edge.id().as_str()) == Some(&edge) {
                report.unchanged += 1;
                continue;
            }
            report.notified_views += self.fan_out_edge(&edge);
            report.changed.push(edge.id().clone());
            self.graph.update_edge(edge);
        }

        info!(
            kind,
            changed = report.changed.len(),
            unchanged = report.unchanged,
            rejected = report.rejected.len(),
            "committed connections"
        );
        Ok(CommitOutcome::Committed(report))
    }

    fn fan_out_edge(&self, edge: &Edge) -> usize {
        self.diagrams
            .views_containing(&[edge.from(), edge.to()])
            .into_iter()
            .filter(|view| self.diagrams.dispatch_edge(*view, edge))
            .count()
    }

    /// Runs one reconciliation cycle.
    pub fn reconcile_alarms(&mut self, event: AlarmEvent) -> ReconcileReport {
        let report = self.alarms.reconcile(&mut self.graph, &self.renderers, &self.diagrams, event);
        if report.is_quiet() {
            debug!(skipped = report.skipped_unknown, "alarm cycle without changes");
        } else {
            info!(
                raised = report.raised.len(),
                cleared = report.cleared.len(),
                views = report.notified_views,
                "alarm cycle applied"
            );
        }
        report
    }

    pub fn search(&self, query: &str) -> Result<SearchResults, SearchError> {
        SearchIndex::new(&self.graph, &self.diagrams, &self.tiles)
            .with_options(self.config.search)
            .search(query)
    }

    /// Shows and frames a diagram by name, blinking `node` when given.
    pub fn focus_diagram(&self, name: &str, node: Option<&NodeId>) -> bool {
        let Some(id) = self.diagrams.get_by_name(name) else {
            debug!(diagram = name, "focus on unknown diagram");
            return false;
        };
        self.diagrams.focus(id, node, self.config.blink_count)
    }

    pub fn focus_tile(&self, name: &str) -> bool {
        self.tiles.blink(name)
    }
}

/// A [`Topology`] behind one async lock.
#[derive(Clone)]
pub struct SharedTopology {
    inner: Arc<Mutex<Topology>>,
}

impl SharedTopology {
    pub fn new(topology: Topology) -> Self {
        Self { inner: Arc::new(Mutex::new(topology)) }
    }

    pub async fn lock(&self) -> MutexGuard<'_, Topology> {
        self.inner.lock().await
    }

    /// Fetches one kind of connection and commits it.
    ///
    /// The lock is released while the source is awaited; the commit itself is atomic.
    pub async fn refresh_connections(
        &self,
        source: &dyn ConnectionSource,
        kind: &str,
    ) -> Result<CommitOutcome, TopologyError> {
        let ticket = self.inner.lock().await.issue_ticket(kind)?;
        let raws = source.fetch_connections(kind).await?;
        self.inner.lock().await.commit_connections(kind, ticket, &raws)
    }

    /// Reconciles every event from the feed until the sender side closes.
    ///
    /// Returns the number of cycles run.
    pub async fn run_alarm_feed(&self, mut events: mpsc::Receiver<AlarmEvent>) -> usize {
        let mut cycles = 0;
        while let Some(event) = events.recv().await {
            self.inner.lock().await.reconcile_alarms(event);
            cycles += 1;
        }
        debug!(cycles, "alarm feed closed");
        cycles
    }
}
