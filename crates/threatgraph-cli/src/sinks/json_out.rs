//! Structured subgraph JSON sink (spec §6 `json-out`): `{seeds, nodes,
//! edges}`, nodes identifier-sorted, edges in retention order.

use crate::pipeline::PipelineOutput;
use serde::Serialize;
use serde_json::Value;
use threatgraph_core::{Graph, Result};

#[derive(Serialize)]
struct NodeOut {
    id: String,
    kind: String,
    label: String,
}

#[derive(Serialize)]
struct EdgeOut {
    from: String,
    to: String,
    #[serde(rename = "type")]
    edge_type: String,
    ts: Option<Value>,
    record_id: Option<i64>,
    ioa_tags: Vec<IoaOut>,
}

#[derive(Serialize)]
struct IoaOut {
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    severity: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tactic: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    technique: Option<String>,
}

#[derive(Serialize)]
struct SubgraphOut {
    seeds: Vec<String>,
    nodes: Vec<NodeOut>,
    edges: Vec<EdgeOut>,
}

/// Renders the subgraph JSON document (spec §6). `vertices`/`edges` are
/// consumed in the order the pipeline already sorted/retained them —
/// identifier order for nodes, retention order for edges.
pub fn render(graph: &Graph, output: &PipelineOutput) -> String {
    let seeds = output.seeds.iter().map(|&v| graph.identifier(v).to_string()).collect();

    let nodes = output
        .vertices
        .iter()
        .map(|&v| NodeOut {
            id: graph.identifier(v).to_string(),
            kind: graph.vertex(v).kind.as_str().to_string(),
            label: threatgraph_layout::build_label(graph, v),
        })
        .collect();

    let edges = output
        .edges
        .iter()
        .map(|&e| {
            let edge = graph.edge(e);
            EdgeOut {
                from: graph.identifier(edge.from).to_string(),
                to: graph.identifier(edge.to).to_string(),
                edge_type: edge.edge_type.to_string(),
                ts: edge.ordering_key.as_ref().and_then(|k| k.ts).map(|t| Value::from(t)),
                record_id: edge.ordering_key.as_ref().and_then(|k| k.record_id),
                ioa_tags: edge
                    .ioa_tags
                    .iter()
                    .map(|tag| IoaOut {
                        name: tag.name.clone(),
                        severity: tag.severity.clone(),
                        tactic: tag.tactic.clone(),
                        technique: tag.technique.clone(),
                    })
                    .collect(),
            }
        })
        .collect();

    let doc = SubgraphOut { seeds, nodes, edges };
    serde_json::to_string_pretty(&doc).expect("subgraph output is always representable as JSON")
}

pub fn write(path: &std::path::Path, graph: &Graph, output: &PipelineOutput) -> Result<()> {
    crate::sinks::write_atomic(path, &render(graph, output))
}
