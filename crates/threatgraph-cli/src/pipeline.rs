//! Wires loader → structural filter → (optional) paths-through →
//! (optional) seed BFS → IOA pruner → label/sizing → layout → overlap
//! separation → normalization → edge routing (spec §2 data flow).

use crate::config::EngineConfig;
use crate::seeds::resolve_seeds;
use rustc_hash::FxHashSet;
use std::path::Path;
use threatgraph_core::{EdgeIdx, Graph, Result, ThreatGraphError, VertexIdx};
use threatgraph_graph::{filter_paths_through, prune_to_ioa, seed_bfs};
use threatgraph_layout::{
    layout_circle, layout_force, layout_layered, layout_time, layout_tree, normalize, route_edges, separate_overlaps,
    LayoutResult, RoutedEdge,
};
use threatgraph_loader::{load_finding, load_from_path, LoadFilterConfig};

pub struct PipelineOutput {
    pub graph: Graph,
    pub seeds: Vec<VertexIdx>,
    pub vertices: Vec<VertexIdx>,
    pub edges: Vec<EdgeIdx>,
    pub layout: LayoutResult,
    pub routed: Vec<RoutedEdge>,
}

pub fn run(input: &Path, config: &EngineConfig, extra_finding_roots: &[String]) -> Result<PipelineOutput> {
    let outcome = load_from_path(input, config.input_kind, &config.filters)?;
    let graph = outcome.graph;
    let mut finding_roots = outcome.finding_roots;
    finding_roots.extend(extra_finding_roots.iter().cloned());

    fail_if_empty(graph.edge_count(), "loaded graph has no edges after structural filters")?;

    let all_edges: Vec<EdgeIdx> = (0..graph.edge_count() as u32).map(EdgeIdx).collect();

    let after_paths_through = if config.through_edges.is_empty() {
        all_edges
    } else {
        let restricted = filter_paths_through(&graph, &all_edges, &config.through_edges);
        fail_if_empty(restricted.len(), "paths-through filter left no edges")?;
        restricted
    };

    let seeds = resolve_seeds(&graph, config.focus.as_deref(), &finding_roots, config.proc_name.as_deref());

    let walk = if seeds.is_empty() {
        threatgraph_graph::WalkResult { edges: after_paths_through, tree_edges: FxHashSet::default() }
    } else {
        let walk = seed_bfs(&graph, &after_paths_through, &seeds);
        fail_if_empty(walk.edges.len(), "seed traversal reached no edges")?;
        walk
    };

    let pruned = prune_to_ioa(&graph, &walk.edges, &walk.tree_edges);
    fail_if_empty(pruned.edges.len(), "no IOA-tagged edge in the retained graph: nothing to anchor a subgraph on")?;

    let vertices = active_vertices(&graph, &pruned.edges);

    let is_tree = matches!(config.layout_kind, threatgraph_layout::LayoutKind::Tree);
    let mut layout = match config.layout_kind {
        threatgraph_layout::LayoutKind::Force => layout_force(&graph, &vertices, &pruned.edges, &config.layout),
        threatgraph_layout::LayoutKind::Circle => layout_circle(&vertices),
        threatgraph_layout::LayoutKind::Layered => layout_layered(&graph, &vertices, &pruned.edges, &config.layout),
        threatgraph_layout::LayoutKind::Tree => {
            layout_tree(&graph, &vertices, &pruned.edges, &pruned.tree_edges, &seeds, &config.layout)
        }
        threatgraph_layout::LayoutKind::Time => layout_time(&graph, &vertices, &pruned.edges, &config.layout),
    };

    if !is_tree {
        separate_overlaps(&graph, &mut layout.positions, &vertices, &config.layout);
    }

    let (width, height) =
        normalize(&graph, &mut layout.positions, &vertices, config.layout.node_padding, config.layout.legend, config.layout.max_size);
    layout.width = width;
    layout.height = height;

    let routed = route_edges(&graph, &layout.positions, &vertices, &pruned.edges, is_tree, &config.layout);

    Ok(PipelineOutput { graph, seeds, vertices, edges: pruned.edges, layout, routed })
}

/// Loads a secondary finding-format file (`--finding-input`) purely for
/// its seed roots, optionally restricted to a single record by
/// `--finding-index` (spec §6 "Source selection").
pub fn load_finding_roots(path: &Path, filters: &LoadFilterConfig, index: Option<usize>) -> Result<Vec<String>> {
    let content = std::fs::read_to_string(path).map_err(|err| match err.kind() {
        std::io::ErrorKind::NotFound => ThreatGraphError::InputMissing(path.display().to_string()),
        _ => ThreatGraphError::Io(err),
    })?;

    let selected = match index {
        None => content,
        Some(i) => content
            .lines()
            .filter(|l| !l.trim().is_empty())
            .nth(i)
            .map(str::to_string)
            .unwrap_or_default(),
    };

    let mut scratch = Graph::new();
    Ok(load_finding(&selected, &mut scratch, filters))
}

fn active_vertices(graph: &Graph, edges: &[EdgeIdx]) -> Vec<VertexIdx> {
    let mut seen = FxHashSet::default();
    for &eidx in edges {
        let edge = graph.edge(eidx);
        seen.insert(edge.from);
        seen.insert(edge.to);
    }
    let mut vertices: Vec<VertexIdx> = seen.into_iter().collect();
    vertices.sort_by(|&a, &b| graph.identifier(a).cmp(graph.identifier(b)));
    vertices
}

fn fail_if_empty(len: usize, message: &str) -> Result<()> {
    if len == 0 {
        Err(ThreatGraphError::EmptyResult(message.to_string()))
    } else {
        Ok(())
    }
}
