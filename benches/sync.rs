// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Mediamap-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of mediamap and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::sync::Arc;

use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion, Throughput};
use serde_json::json;

use mediamap::config::Config;
use mediamap::model::{Edge, EdgeId, Node, NodeId};
use mediamap::sync::{disambiguate, AlarmEvent, DEFAULT_CURVE_ROUNDNESS};
use mediamap::view::DiagramView;
use mediamap::Topology;

mod profiler;

// Benchmark identity (keep stable):
// - Groups: `sync.reconcile`, `sync.disambiguate`
// - Case IDs (after the `/`) must not be renamed so results stay comparable.

struct NullView;

impl DiagramView for NullView {
    fn shown(&self) -> bool {
        true
    }
    fn show(&self) {}
    fn fit(&self, _nodes: Option<&[NodeId]>) {}
    fn blink(&self, _count: u32, _node: Option<&NodeId>) {}
    fn update_node(&self, node: &Node) {
        black_box(node);
    }
    fn update_edge(&self, edge: &Edge) {
        black_box(edge);
    }
    fn alert(&self, active: bool) {
        black_box(active);
    }
}

fn node_id(index: usize) -> NodeId {
    NodeId::new(format!("arn:aws:medialive:channel:{index:05}")).expect("node id")
}

/// A topology with `nodes` channels spread over `views` diagrams of 50 nodes each.
fn topology_fixture(nodes: usize, views: usize) -> (Topology, Vec<Arc<dyn DiagramView>>) {
    let mut topology = Topology::new(Config::default());
    topology.commit_nodes((0..nodes).map(|index| {
        Node::new(node_id(index), "medialive-channel", "MediaLive Channel", format!("channel-{index}"))
    }));

    let mut handles = Vec::with_capacity(views);
    for view_index in 0..views {
        let view: Arc<dyn DiagramView> = Arc::new(NullView);
        let start = (view_index * 50) % nodes.max(1);
        let displayed = (start..(start + 50).min(nodes)).map(node_id);
        topology.open_diagram(format!("diagram-{view_index}"), &view, displayed).expect("open");
        handles.push(view);
    }
    (topology, handles)
}

fn alarm_ids(range: std::ops::Range<usize>) -> Vec<String> {
    range.map(|index| node_id(index).as_str().to_owned()).collect()
}

fn parallel_batch(pairs: usize) -> Vec<Edge> {
    let mut edges = Vec::with_capacity(pairs * 2);
    for pair in 0..pairs {
        for pipeline in 0..2 {
            let id = EdgeId::new(format!("arn:ml:{pair}:arn:pkg:{pair}:{pipeline}")).expect("edge id");
            edges.push(Edge::new_with(
                id,
                node_id(pair),
                node_id(pairs + pair),
                "HLS",
                json!({ "pipeline": pipeline }),
            ));
        }
    }
    edges
}

fn benches_reconcile(c: &mut Criterion) {
    let mut group = c.benchmark_group("sync.reconcile");

    for (case, nodes, views, raised) in [("small", 200, 4, 10), ("large", 5_000, 40, 500)] {
        let raise = AlarmEvent::new(alarm_ids(0..raised));
        group.throughput(Throughput::Elements(raised as u64));
        group.bench_function(case, |b| {
            b.iter_batched(
                || topology_fixture(nodes, views),
                |(mut topology, handles)| {
                    let report = topology.reconcile_alarms(black_box(raise.clone()));
                    black_box((report.raised.len(), handles.len()))
                },
                BatchSize::LargeInput,
            )
        });
    }

    let steady = AlarmEvent::new(alarm_ids(0..100));
    group.bench_function("steady_no_change", |b| {
        b.iter_batched(
            || {
                let (mut topology, handles) = topology_fixture(2_000, 10);
                topology.reconcile_alarms(steady.clone());
                (topology, handles)
            },
            |(mut topology, handles)| {
                let report = topology.reconcile_alarms(black_box(steady.clone()));
                black_box((report.is_quiet(), handles.len()))
            },
            BatchSize::LargeInput,
        )
    });

    group.finish();
}

fn benches_disambiguate(c: &mut Criterion) {
    let mut group = c.benchmark_group("sync.disambiguate");

    for (case, pairs) in [("pairs_50", 50), ("pairs_1000", 1_000)] {
        let batch = parallel_batch(pairs);
        group.throughput(Throughput::Elements(batch.len() as u64));
        group.bench_function(case, |b| {
            b.iter_batched(
                || batch.clone(),
                |mut edges| black_box(disambiguate(&mut edges, DEFAULT_CURVE_ROUNDNESS)),
                BatchSize::SmallInput,
            )
        });
    }

    group.finish();
}

criterion_group! {
    name = benches;
    config = profiler::criterion();
    targets = benches_reconcile, benches_disambiguate
}
criterion_main!(benches);
