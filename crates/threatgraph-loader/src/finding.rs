//! Finding-format loading: expands each finding's `sequence` into
//! synthetic edges (spec §4.1).

use crate::filter::LoadFilterConfig;
use serde_json::Value;
use std::rc::Rc;
use threatgraph_core::{parse_record_id, parse_ts, DataBag, EdgeRecord, Graph, IoaTag, TimeKey};

/// Parses a finding-format JSONL document, adding synthetic edges to
/// `graph` and returning the finding roots (seed candidates; seeding
/// itself is handled by the caller, per spec §4.1).
pub fn load_finding(content: &str, graph: &mut Graph, filters: &LoadFilterConfig) -> Vec<String> {
    let mut roots = Vec::new();

    for line in content.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        let value: Value = match serde_json::from_str(trimmed) {
            Ok(v) => v,
            Err(err) => {
                tracing::debug!(%err, "skipping malformed finding line");
                continue;
            }
        };
        let Some(obj) = value.as_object() else { continue };
        if let Some(root) = obj.get("root").and_then(Value::as_str) {
            roots.push(root.to_string());
        }
        let rule_id = obj.get("rule_id").and_then(Value::as_str).map(str::to_string);
        let Some(sequence) = obj.get("sequence").and_then(Value::as_array) else { continue };

        for item in sequence {
            let Some(item_obj) = item.as_object() else { continue };
            let (Some(from_id), Some(to_id)) = (
                item_obj.get("from").and_then(Value::as_str),
                item_obj.get("to").and_then(Value::as_str),
            ) else {
                continue;
            };
            let edge_type = item_obj.get("type").and_then(Value::as_str).unwrap_or("edge");
            let ts = parse_ts(item_obj.get("ts"));
            let record_id = parse_record_id(item_obj.get("record_id"));
            let ordering_key =
                if ts.is_none() && record_id.is_none() { None } else { Some(TimeKey::new(ts, record_id)) };

            let name = item_obj.get("name").and_then(Value::as_str).map(str::to_string);
            let mut data = DataBag::new();
            if let Some(name) = &name {
                data.set_str("name", name.clone());
            }

            let ioa_tags = if filters.synthesize_finding_ioa {
                vec![IoaTag { name: rule_id.clone(), ..Default::default() }]
            } else {
                Vec::new()
            };

            let from = graph.intern_vertex(from_id);
            let to = graph.intern_vertex(to_id);
            let edge = EdgeRecord { from, to, edge_type: Rc::from(edge_type), ordering_key, event_id: rule_id.clone(), ioa_tags, data };
            graph.push_edge(edge);
        }
    }

    roots
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expands_sequence_into_edges_and_collects_roots() {
        let content = "{\"root\":\"proc:A\",\"rule_id\":\"T1055\",\"sequence\":[{\"from\":\"proc:A\",\"to\":\"proc:B\",\"type\":\"ParentOfEdge\",\"ts\":1,\"record_id\":1,\"name\":\"stage1\"}]}\n";
        let mut graph = Graph::new();
        let roots = load_finding(content, &mut graph, &LoadFilterConfig::default());
        assert_eq!(roots, vec!["proc:A".to_string()]);
        assert_eq!(graph.edge_count(), 1);
        assert_eq!(&*graph.edges()[0].edge_type, "ParentOfEdge");
        assert_eq!(graph.edges()[0].data.str_field("name"), Some("stage1"));
        assert_eq!(graph.edges()[0].event_id.as_deref(), Some("T1055"));
    }

    #[test]
    fn data_name_is_not_backfilled_from_rule_id_when_item_has_no_name() {
        let content = "{\"rule_id\":\"T1055\",\"sequence\":[{\"from\":\"proc:A\",\"to\":\"proc:B\"}]}\n";
        let mut graph = Graph::new();
        load_finding(content, &mut graph, &LoadFilterConfig::default());
        assert_eq!(graph.edges()[0].data.str_field("name"), None);
        assert_eq!(graph.edges()[0].event_id.as_deref(), Some("T1055"));
    }

    #[test]
    fn event_id_is_none_when_rule_id_absent() {
        let content = "{\"sequence\":[{\"from\":\"proc:A\",\"to\":\"proc:B\"}]}\n";
        let mut graph = Graph::new();
        load_finding(content, &mut graph, &LoadFilterConfig::default());
        assert_eq!(graph.edges()[0].event_id, None);
    }

    #[test]
    fn defaults_edge_type_to_edge_when_absent() {
        let content = "{\"sequence\":[{\"from\":\"proc:A\",\"to\":\"proc:B\"}]}\n";
        let mut graph = Graph::new();
        load_finding(content, &mut graph, &LoadFilterConfig::default());
        assert_eq!(&*graph.edges()[0].edge_type, "edge");
    }

    #[test]
    fn does_not_synthesize_ioa_tags_by_default() {
        let content = "{\"rule_id\":\"T1055\",\"sequence\":[{\"from\":\"proc:A\",\"to\":\"proc:B\"}]}\n";
        let mut graph = Graph::new();
        load_finding(content, &mut graph, &LoadFilterConfig::default());
        assert!(graph.edges()[0].ioa_tags.is_empty());
    }

    #[test]
    fn synthesizes_ioa_tags_when_configured() {
        let content = "{\"rule_id\":\"T1055\",\"sequence\":[{\"from\":\"proc:A\",\"to\":\"proc:B\"}]}\n";
        let mut graph = Graph::new();
        let filters = LoadFilterConfig { synthesize_finding_ioa: true, ..Default::default() };
        load_finding(content, &mut graph, &filters);
        assert_eq!(graph.edges()[0].ioa_tags[0].name.as_deref(), Some("T1055"));
    }
}
