//! Graphviz DOT sink: a text rendering of the subgraph honoring the
//! color/shape conventions of spec §4.10, independent of `--render`
//! (spec §6). We emit DOT text only — shelling out to Graphviz's `dot`
//! binary is explicitly out of scope (spec §1).

use crate::pipeline::PipelineOutput;
use crate::sinks::colors::{edge_color, node_fill, node_shape};
use std::fmt::Write as _;
use std::path::Path;
use threatgraph_core::{Graph, Result};

fn dot_shape(shape: &str) -> &'static str {
    match shape {
        "roundrect" => "box",
        "rect" => "box",
        "ellipse" => "ellipse",
        "diamond" => "diamond",
        "hexagon" => "hexagon",
        _ => "box",
    }
}

fn escape(s: &str) -> String {
    s.replace('\\', "\\\\").replace('"', "\\\"")
}

pub fn render(graph: &Graph, output: &PipelineOutput) -> String {
    let mut out = String::new();
    out.push_str("digraph threatgraph {\n");
    out.push_str("  rankdir=TB;\n");

    for &v in &output.vertices {
        let vertex = graph.vertex(v);
        let label = escape(&threatgraph_layout::build_label(graph, v).replace('\n', "\\n"));
        let shape = dot_shape(node_shape(&vertex.kind));
        let fill = node_fill(&vertex.kind);
        let id = escape(graph.identifier(v));
        let _ = writeln!(
            out,
            "  \"{id}\" [label=\"{label}\", shape={shape}, style=filled, fillcolor=\"{fill}\"];"
        );
    }

    for &e in &output.edges {
        let edge = graph.edge(e);
        let from = escape(graph.identifier(edge.from));
        let to = escape(graph.identifier(edge.to));
        let color = edge_color(&edge.edge_type);
        let _ = writeln!(out, "  \"{from}\" -> \"{to}\" [color=\"{color}\", label=\"{}\"];", escape(&edge.edge_type));
    }

    out.push_str("}\n");
    out
}

pub fn write(path: &Path, graph: &Graph, output: &PipelineOutput) -> Result<()> {
    crate::sinks::write_atomic(path, &render(graph, output))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::rc::Rc;
    use threatgraph_core::{DataBag, EdgeRecord, Graph as G};

    #[test]
    fn renders_a_single_node_single_edge_graph() {
        let mut graph = G::new();
        let a = graph.intern_vertex("proc:A");
        let b = graph.intern_vertex("proc:B");
        graph
            .push_edge(EdgeRecord {
                from: a,
                to: b,
                edge_type: Rc::from("ConnectEdge"),
                ordering_key: None,
                event_id: None,
                ioa_tags: vec![],
                data: DataBag::new(),
            })
            .unwrap();
        let output = PipelineOutput {
            graph: G::new(),
            seeds: vec![],
            vertices: vec![a, b],
            edges: vec![threatgraph_core::EdgeIdx(0)],
            layout: threatgraph_layout::LayoutResult::default(),
            routed: vec![],
        };
        let text = render(&graph, &output);
        assert!(text.contains("digraph threatgraph"));
        assert!(text.contains("proc:A"));
        assert!(text.contains("#27ae60"));
    }
}
