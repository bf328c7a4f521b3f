// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Mediamap-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of mediamap and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Mediamap CLI entrypoint.
//!
//! Loads an inventory snapshot, opens a logging view per saved diagram, refreshes every
//! configured connection kind, replays an alarm feed and prints search results as JSON.

use std::error::Error;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use clap::Parser;
use tokio::sync::mpsc;
use tracing_subscriber::EnvFilter;

use mediamap::config::{Config, LOG_ENV_VAR};
use mediamap::model::{Edge, Node, NodeId};
use mediamap::store::InventorySnapshot;
use mediamap::sync::AlarmEvent;
use mediamap::topology::CommitOutcome;
use mediamap::view::{DiagramView, TileView};
use mediamap::{SharedTopology, Topology};

const ALARM_FEED_CAPACITY: usize = 64;

/// Replay an inventory snapshot through the shared topology.
#[derive(Parser, Debug)]
#[command(name = "mediamap")]
#[command(about = "Shared topology model and alarm fan-out for media infrastructure diagrams")]
struct Cli {
    /// Inventory snapshot (JSON)
    #[arg(long)]
    inventory: PathBuf,

    /// Configuration file (JSON); defaults apply when omitted
    #[arg(long)]
    config: Option<PathBuf>,

    /// Alarm feed to replay, one JSON event per line
    #[arg(long)]
    alarms: Option<PathBuf>,

    /// Text to search for after the replay (repeatable)
    #[arg(long = "search")]
    searches: Vec<String>,
}

/// A diagram that reports what the core asks of it.
struct LoggingView {
    name: String,
    shown: AtomicBool,
}

impl LoggingView {
    fn new(name: &str) -> Self {
        Self { name: name.to_owned(), shown: AtomicBool::new(false) }
    }
}

impl DiagramView for LoggingView {
    fn shown(&self) -> bool {
        self.shown.load(Ordering::Relaxed)
    }

    fn show(&self) {
        self.shown.store(true, Ordering::Relaxed);
        tracing::info!(diagram = %self.name, "show");
    }

    fn fit(&self, nodes: Option<&[NodeId]>) {
        tracing::info!(diagram = %self.name, nodes = ?nodes, "fit");
    }

    fn blink(&self, count: u32, node: Option<&NodeId>) {
        tracing::info!(diagram = %self.name, count, node = ?node, "blink");
    }

    fn update_node(&self, node: &Node) {
        tracing::info!(diagram = %self.name, node = %node.id(), alarming = node.alarming(), "node updated");
    }

    fn update_edge(&self, edge: &Edge) {
        tracing::info!(
            diagram = %self.name,
            edge = %edge.id(),
            label = edge.label(),
            shape = %edge.curvature().shape(),
            "edge updated"
        );
    }

    fn alert(&self, active: bool) {
        tracing::info!(diagram = %self.name, active, "alert");
    }
}

struct LoggingTiles;

impl TileView for LoggingTiles {
    fn show(&self) {
        tracing::info!("tiles shown");
    }

    fn blink(&self, tile: &str) {
        tracing::info!(tile, "tile blink");
    }
}

fn init_logging(default_filter: &str) {
    let filter = EnvFilter::try_from_env(LOG_ENV_VAR).unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).with_ansi(false).init();
}

/// Reads a JSON-lines alarm feed. A line that fails to decode is logged and skipped.
fn read_alarm_events(path: &Path) -> Result<Vec<AlarmEvent>, Box<dyn Error>> {
    let raw = std::fs::read_to_string(path)?;
    let mut events = Vec::new();
    for (index, line) in raw.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        match serde_json::from_str(line) {
            Ok(event) => events.push(event),
            Err(err) => {
                tracing::warn!(path = %path.display(), line = index + 1, error = %err, "skipping invalid alarm event");
            }
        }
    }
    Ok(events)
}

async fn run(cli: Cli, config: Config, snapshot: InventorySnapshot) -> Result<(), Box<dyn Error>> {
    let kinds = config.connection_kinds.iter().map(|kind| kind.key.clone()).collect::<Vec<_>>();
    let shared = SharedTopology::new(Topology::new(config));

    // Views must outlive the replay; the registries only hold weak handles.
    let mut views: Vec<Arc<dyn DiagramView>> = Vec::new();
    let tiles: Arc<dyn TileView> = Arc::new(LoggingTiles);
    {
        let mut topology = shared.lock().await;
        topology.commit_nodes(snapshot.to_nodes());
        topology.tiles_mut().attach_view(&tiles);
        for tile in &snapshot.tiles {
            topology.tiles_mut().set_tile(tile.name.clone(), tile.node_set());
        }
        for diagram in &snapshot.diagrams {
            let view: Arc<dyn DiagramView> = Arc::new(LoggingView::new(&diagram.name));
            topology.open_diagram(diagram.name.clone(), &view, diagram.nodes.iter().cloned())?;
            views.push(view);
        }
    }

    for kind in &kinds {
        match shared.refresh_connections(&snapshot, kind).await {
            Ok(CommitOutcome::Committed(report)) => {
                tracing::debug!(kind = %kind, curved = report.curved, "refresh done");
            }
            Ok(CommitOutcome::Stale { .. }) => {}
            Err(err) => tracing::warn!(kind = %kind, error = %err, "connection refresh failed"),
        }
    }

    if let Some(path) = &cli.alarms {
        let events = read_alarm_events(path)?;
        let (tx, rx) = mpsc::channel(ALARM_FEED_CAPACITY);
        let producer = tokio::spawn(async move {
            for event in events {
                if tx.send(event).await.is_err() {
                    break;
                }
            }
        });
        let cycles = shared.run_alarm_feed(rx).await;
        producer.await?;
        tracing::info!(cycles, "alarm feed replayed");
    }

    let topology = shared.lock().await;
    let mut results = Vec::with_capacity(cli.searches.len());
    for text in &cli.searches {
        let found = topology.search(text)?;
        for hit in &found.diagram_contents {
            topology.focus_diagram(&hit.diagram, hit.found.first());
        }
        results.push(found);
    }
    if !results.is_empty() {
        println!("{}", serde_json::to_string_pretty(&results)?);
    }

    drop(topology);
    drop(views);
    Ok(())
}

fn main() {
    let result = (|| -> Result<(), Box<dyn Error>> {
        let cli = Cli::parse();
        let config = Config::load_or_default(cli.config.as_deref())?;
        init_logging(&config.log_filter);

        let snapshot = InventorySnapshot::load(&cli.inventory)?;
        tracing::info!(
            nodes = snapshot.nodes.len(),
            diagrams = snapshot.diagrams.len(),
            tiles = snapshot.tiles.len(),
            "inventory loaded"
        );

        let runtime = tokio::runtime::Builder::new_current_thread().enable_all().build()?;
        runtime.block_on(run(cli, config, snapshot))
    })();

    if let Err(err) = result {
        eprintln!("mediamap: {err}");
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::{read_alarm_events, Cli};
    use mediamap::sync::AlarmEvent;

    #[test]
    fn parses_repeated_searches() {
        let cli = Cli::try_parse_from(["mediamap", "--inventory", "inv.json", "--search", "news", "--search", "hls"])
            .expect("parse");

        assert_eq!(cli.inventory.to_str(), Some("inv.json"));
        assert_eq!(cli.searches, vec!["news".to_owned(), "hls".to_owned()]);
        assert!(cli.alarms.is_none());
    }

    #[test]
    fn inventory_is_required() {
        assert!(Cli::try_parse_from(["mediamap", "--search", "news"]).is_err());
    }

    #[test]
    fn invalid_alarm_lines_are_skipped() {
        let path = std::env::temp_dir().join(format!("mediamap-alarms-{}.jsonl", std::process::id()));
        std::fs::write(
            &path,
            "{\"current\": [\"arn:a\"]}\n{\"current\": not-json}\n\n{\"current\": [], \"previous\": [\"arn:a\"]}\n",
        )
        .expect("write feed");

        let events = read_alarm_events(&path);
        let _ = std::fs::remove_file(&path);

        assert_eq!(
            events.expect("read feed"),
            vec![AlarmEvent::new(["arn:a"]), AlarmEvent::new(Vec::<String>::new()).with_previous(["arn:a"])]
        );
    }

    #[test]
    fn missing_alarm_file_is_an_error() {
        assert!(read_alarm_events(std::path::Path::new("/nonexistent/mediamap-alarms.jsonl")).is_err());
    }
}
