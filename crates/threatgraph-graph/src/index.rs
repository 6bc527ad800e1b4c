//! Out/in edge indexes sorted by ordering key, built once per traversal
//! (spec §4.2: "build an adjacency map src → edges sorted by (ts,
//! record_id); absent keys sort last").

use threatgraph_core::{EdgeIdx, Graph, OrderingKey, TimeKey, VertexIdx};

/// Out-edges and in-edges grouped by endpoint, each group sorted
/// ascending by ordering key with unknown-timing edges sorted last.
/// Built over a caller-supplied candidate edge set so downstream filters
/// (paths-through, IOA pruning) can restrict traversal to whatever
/// subset of the graph is currently under consideration.
pub struct Index {
    out: Vec<Vec<EdgeIdx>>,
    inn: Vec<Vec<EdgeIdx>>,
}

impl Index {
    pub fn build(graph: &Graph, candidate_edges: &[EdgeIdx]) -> Self {
        let n = graph.vertex_count();
        let mut out = vec![Vec::new(); n];
        let mut inn = vec![Vec::new(); n];
        for &eidx in candidate_edges {
            let edge = graph.edge(eidx);
            out[edge.from.index()].push(eidx);
            inn[edge.to.index()].push(eidx);
        }
        for bucket in out.iter_mut().chain(inn.iter_mut()) {
            bucket.sort_by(|&a, &b| {
                sort_key(&graph.edge(a).ordering_key).partial_cmp(&sort_key(&graph.edge(b).ordering_key)).unwrap()
            });
        }
        Self { out, inn }
    }

    pub fn out_edges(&self, v: VertexIdx) -> &[EdgeIdx] {
        self.out.get(v.index()).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn in_edges(&self, v: VertexIdx) -> &[EdgeIdx] {
        self.inn.get(v.index()).map(Vec::as_slice).unwrap_or(&[])
    }
}

/// Stable sort key placing known timestamps first (ascending), then
/// known-record-id-only keys, then fully unknown timing last.
fn sort_key(key: &OrderingKey) -> (u8, f64, i64) {
    match key {
        Some(TimeKey { ts: Some(ts), record_id }) => (0, *ts, record_id.unwrap_or(i64::MAX)),
        Some(TimeKey { ts: None, record_id }) => (1, f64::MAX, record_id.unwrap_or(i64::MAX)),
        None => (2, f64::MAX, i64::MAX),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::rc::Rc;
    use threatgraph_core::{DataBag, EdgeRecord};

    #[test]
    fn edges_with_unknown_timing_sort_last() {
        let mut graph = Graph::new();
        let a = graph.intern_vertex("proc:A");
        let b = graph.intern_vertex("proc:B");
        let c = graph.intern_vertex("proc:C");
        let e_unknown = graph
            .push_edge(EdgeRecord { from: a, to: b, edge_type: Rc::from("X"), ordering_key: None, event_id: None, ioa_tags: vec![], data: DataBag::new() })
            .unwrap();
        let e_known = graph
            .push_edge(EdgeRecord {
                from: a,
                to: c,
                edge_type: Rc::from("Y"),
                ordering_key: Some(TimeKey::new(Some(1.0), None)),
                event_id: None,
                ioa_tags: vec![],
                data: DataBag::new(),
            })
            .unwrap();
        let candidates = vec![e_unknown, e_known];
        let index = Index::build(&graph, &candidates);
        assert_eq!(index.out_edges(a), &[e_known, e_unknown]);
    }
}
