//! Adjacency-format loading: two linear scans over a JSONL feed (spec
//! §4.1).

use crate::filter::LoadFilterConfig;
use crate::proc_meta::{maybe_fill_proc_meta, maybe_fill_proc_meta_from_image_edge, should_skip_file_edge};
use serde_json::Value;
use std::rc::Rc;
use threatgraph_core::{parse_record_id, parse_ts, DataBag, EdgeRecord, Graph, IoaTag, TimeKey, VertexKind};

/// Parses an adjacency-format JSONL document into a [`Graph`], applying
/// `filters` to the edge pass.
pub fn load_adjacency(content: &str, filters: &LoadFilterConfig) -> Graph {
    let mut graph = Graph::new();
    load_vertex_pass(content, &mut graph);
    load_edge_pass(content, &mut graph, filters);
    graph
}

fn load_vertex_pass(content: &str, graph: &mut Graph) {
    for value in parse_lines(content) {
        let Some(obj) = value.as_object() else { continue };
        if obj.get("record_type").and_then(Value::as_str) != Some("vertex") {
            continue;
        }
        let Some(vertex_id) = obj.get("vertex_id").and_then(Value::as_str) else { continue };
        let idx = graph.intern_vertex(vertex_id);
        let data = DataBag::from_value(obj.get("data").cloned());
        graph.set_vertex_data(idx, data);
    }
}

fn load_edge_pass(content: &str, graph: &mut Graph, filters: &LoadFilterConfig) {
    let mut kept = 0usize;

    'lines: for value in parse_lines(content) {
        let Some(obj) = value.as_object() else { continue };
        if obj.get("record_type").and_then(Value::as_str) != Some("edge") {
            continue;
        }
        let Some(from_id) = obj.get("vertex_id").and_then(Value::as_str) else {
            tracing::debug!("skipping edge record with missing vertex_id");
            continue;
        };
        let Some(to_id) = obj.get("adjacent_id").and_then(Value::as_str) else {
            tracing::debug!("skipping edge record with missing adjacent_id");
            continue;
        };
        let Some(edge_type) = obj.get("type").and_then(Value::as_str) else {
            tracing::debug!("skipping edge record with missing type");
            continue;
        };

        // 1. match filter on either endpoint.
        if let Some(needle) = &filters.match_substring {
            if !from_id.contains(needle.as_str()) && !to_id.contains(needle.as_str()) {
                continue;
            }
        }

        let ts = parse_ts(obj.get("ts"));
        // start-ts: once set, edges with unknown timing are dropped too.
        if let Some(floor) = filters.start_ts {
            match ts {
                Some(value) if value >= floor => {}
                _ => continue,
            }
        }

        // 2. edge_types set membership.
        if let Some(types) = &filters.edge_types {
            if !types.contains(edge_type) {
                continue;
            }
        }

        // 3. allowed_kinds containment for both endpoints.
        let from_kind = VertexKind::from_identifier(from_id);
        let to_kind = VertexKind::from_identifier(to_id);
        if !filters.kind_allowed(from_kind.as_str()) || !filters.kind_allowed(to_kind.as_str()) {
            continue;
        }

        let record_id = parse_record_id(obj.get("record_id"));
        let ordering_key = if ts.is_none() && record_id.is_none() {
            None
        } else {
            Some(TimeKey::new(ts, record_id))
        };
        let event_id = obj.get("event_id").map(|v| match v {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        });
        let ioa_tags = obj
            .get("ioa_tags")
            .and_then(Value::as_array)
            .map(|arr| arr.iter().filter_map(IoaTag::from_value).collect())
            .unwrap_or_default();
        let data = DataBag::from_value(obj.get("data").cloned());

        let from = graph.intern_vertex(from_id);
        let to = graph.intern_vertex(to_id);
        let edge = EdgeRecord { from, to, edge_type: Rc::from(edge_type), ordering_key, event_id, ioa_tags, data };

        // 4. process-metadata enrichment.
        maybe_fill_proc_meta(graph, &edge);
        maybe_fill_proc_meta_from_image_edge(graph, &edge);

        // 5. system-process file-edge suppression.
        if should_skip_file_edge(graph, &edge, &filters.system_process_prefixes) {
            continue;
        }

        // 6. (from, to, type) de-duplication, enforced by the graph.
        if graph.push_edge(edge).is_none() {
            continue;
        }

        // 7. optional edge-count cap.
        kept += 1;
        if let Some(limit) = filters.limit {
            if kept >= limit {
                break 'lines;
            }
        }
    }
}

fn parse_lines(content: &str) -> impl Iterator<Item = Value> + '_ {
    content.lines().filter_map(|line| {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return None;
        }
        match serde_json::from_str::<Value>(trimmed) {
            Ok(value) => Some(value),
            Err(err) => {
                tracing::debug!(%err, "skipping malformed JSON line");
                None
            }
        }
    })
}
