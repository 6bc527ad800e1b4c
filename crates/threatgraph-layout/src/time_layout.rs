//! Timeline layout: timestamp bucketing into at most 120 layers (spec
//! §4.6 "Time").

use crate::common::{LayoutConfig, LayoutResult};
use crate::placement::place_layers;
use rustc_hash::FxHashMap;
use threatgraph_core::{EdgeIdx, Graph, VertexIdx};

const MAX_LAYERS: usize = 120;

/// Stamps each vertex with the earliest `(ts, record_id)` seen on any
/// incident edge, partitions vertices into layers by unique timestamp
/// (bucketed uniformly into [`MAX_LAYERS`] layers when there are more
/// unique timestamps than that), and places vertices with no timestamp
/// in a final "unknown" layer (spec §4.6).
pub fn layout_time(graph: &Graph, vertices: &[VertexIdx], edges: &[EdgeIdx], config: &LayoutConfig) -> LayoutResult {
    let stamps = earliest_stamp_per_vertex(graph, vertices, edges);

    let mut known: Vec<(VertexIdx, f64)> = stamps.iter().filter_map(|(&v, &ts)| ts.map(|t| (v, t))).collect();
    let unknown: Vec<VertexIdx> = stamps.iter().filter(|(_, ts)| ts.is_none()).map(|(&v, _)| v).collect();
    known.sort_by(|a, b| a.1.partial_cmp(&b.1).unwrap().then_with(|| graph.identifier(a.0).cmp(graph.identifier(b.0))));

    let mut unique_ts: Vec<f64> = known.iter().map(|(_, ts)| *ts).collect();
    unique_ts.dedup_by(|a, b| a == b);

    let layer_of = |ts: f64| -> usize {
        if unique_ts.len() <= MAX_LAYERS {
            unique_ts.iter().position(|&u| u == ts).unwrap_or(0)
        } else {
            let min_ts = unique_ts[0];
            let max_ts = *unique_ts.last().unwrap();
            if (max_ts - min_ts).abs() < f64::EPSILON {
                0
            } else {
                let width = (max_ts - min_ts) / MAX_LAYERS as f64;
                (((ts - min_ts) / width).floor() as usize).min(MAX_LAYERS - 1)
            }
        }
    };

    let num_layers = unique_ts.len().min(MAX_LAYERS).max(1);
    let mut layers: Vec<Vec<VertexIdx>> = vec![Vec::new(); num_layers];
    for (v, ts) in known {
        layers[layer_of(ts)].push(v);
    }
    if !unknown.is_empty() {
        let mut trailing: Vec<VertexIdx> = unknown;
        trailing.sort_by(|a, b| graph.identifier(*a).cmp(graph.identifier(*b)));
        layers.push(trailing);
    }

    place_layers(graph, &layers, config)
}

fn earliest_stamp_per_vertex(graph: &Graph, vertices: &[VertexIdx], edges: &[EdgeIdx]) -> FxHashMap<VertexIdx, Option<f64>> {
    let mut stamps: FxHashMap<VertexIdx, Option<f64>> = vertices.iter().map(|&v| (v, None)).collect();
    for &eidx in edges {
        let edge = graph.edge(eidx);
        let Some(ts) = edge.ordering_key.as_ref().and_then(|k| k.ts) else { continue };
        for endpoint in [edge.from, edge.to] {
            let entry = stamps.entry(endpoint).or_insert(None);
            *entry = Some(entry.map_or(ts, |current| current.min(ts)));
        }
    }
    stamps
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::rc::Rc;
    use threatgraph_core::{DataBag, EdgeRecord, TimeKey};

    fn edge(graph: &mut Graph, from: &str, to: &str, ts: f64) -> EdgeIdx {
        let from = graph.intern_vertex(from);
        let to = graph.intern_vertex(to);
        graph
            .push_edge(EdgeRecord {
                from,
                to,
                edge_type: Rc::from("X"),
                ordering_key: Some(TimeKey::new(Some(ts), None)),
                event_id: None,
                ioa_tags: vec![],
                data: DataBag::new(),
            })
            .unwrap()
    }

    #[test]
    fn vertices_order_by_earliest_incident_timestamp() {
        let mut graph = Graph::new();
        let ab = edge(&mut graph, "proc:A", "proc:B", 5.0);
        let bc = edge(&mut graph, "proc:B", "proc:C", 1.0);
        let a = graph.lookup_identifier("proc:A").unwrap();
        let b = graph.lookup_identifier("proc:B").unwrap();
        let c = graph.lookup_identifier("proc:C").unwrap();
        let vertices = vec![a, b, c];
        let edges = vec![ab, bc];
        let result = layout_time(&graph, &vertices, &edges, &LayoutConfig::default());
        // B's earliest incident ts is 1.0 (from B->C), earlier than A's 5.0.
        assert!(result.positions[&b].y < result.positions[&a].y);
        assert!(result.positions[&b].y <= result.positions[&c].y);
    }

    #[test]
    fn vertex_with_no_incident_edges_lands_in_unknown_layer() {
        let mut graph = Graph::new();
        let ab = edge(&mut graph, "proc:A", "proc:B", 1.0);
        let lonely = graph.intern_vertex("proc:Lonely");
        let a = graph.lookup_identifier("proc:A").unwrap();
        let b = graph.lookup_identifier("proc:B").unwrap();
        let vertices = vec![a, b, lonely];
        let edges = vec![ab];
        let result = layout_time(&graph, &vertices, &edges, &LayoutConfig::default());
        assert!(result.positions[&lonely].y > result.positions[&a].y);
    }
}
