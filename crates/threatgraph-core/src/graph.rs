//! The arena-backed graph (spec Design Notes §9: "prefer arena + integer
//! indices"). Vertex identifiers are interned once; every downstream
//! crate (`threatgraph-loader`, `threatgraph-graph`, `threatgraph-layout`)
//! operates on `VertexIdx` and edge indices rather than `String` keys.

use crate::ids::{StringInterner, VertexIdx};
use crate::model::{DataBag, EdgeRecord, Vertex};
use rustc_hash::FxHashSet;
use std::rc::Rc;

/// Dense index of an edge within [`Graph::edges`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EdgeIdx(pub u32);

impl EdgeIdx {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// The immutable-after-construction graph (spec §3 "Lifecycle").
#[derive(Debug, Default)]
pub struct Graph {
    interner: StringInterner,
    vertices: Vec<Vertex>,
    edges: Vec<EdgeRecord>,
    dedup: FxHashSet<(VertexIdx, VertexIdx, Rc<str>)>,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Interns `identifier`, creating a default-metadata vertex on first
    /// sight. Returns the existing vertex's index if already known.
    pub fn intern_vertex(&mut self, identifier: &str) -> VertexIdx {
        if let Some(idx) = self.interner.get(identifier) {
            return idx;
        }
        let idx = self.interner.intern(identifier);
        let rc: Rc<str> = Rc::from(identifier);
        debug_assert_eq!(idx.index(), self.vertices.len());
        self.vertices.push(Vertex::new(idx, rc, DataBag::new()));
        idx
    }

    /// Merges `data` fields into an already-known vertex's attribute bag,
    /// without overwriting fields the vertex already has (the loader
    /// calls this when enriching `proc` metadata after the fact).
    pub fn merge_vertex_data(&mut self, idx: VertexIdx, data: DataBag) {
        let vertex = &mut self.vertices[idx.index()];
        for (key, value) in data.0 {
            vertex.data.0.entry(key).or_insert(value);
        }
    }

    pub fn set_vertex_data(&mut self, idx: VertexIdx, data: DataBag) {
        self.vertices[idx.index()].data = data;
    }

    pub fn vertex(&self, idx: VertexIdx) -> &Vertex {
        &self.vertices[idx.index()]
    }

    pub fn identifier(&self, idx: VertexIdx) -> &str {
        self.interner.resolve(idx)
    }

    pub fn lookup_identifier(&self, identifier: &str) -> Option<VertexIdx> {
        self.interner.get(identifier)
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Pushes an edge, enforcing the `(from, to, type)` uniqueness
    /// invariant (spec §3). Returns `None` if the edge is a duplicate.
    pub fn push_edge(&mut self, edge: EdgeRecord) -> Option<EdgeIdx> {
        let key = (edge.from, edge.to, edge.edge_type.clone());
        if !self.dedup.insert(key) {
            return None;
        }
        let idx = EdgeIdx(self.edges.len() as u32);
        self.edges.push(edge);
        Some(idx)
    }

    pub fn edge(&self, idx: EdgeIdx) -> &EdgeRecord {
        &self.edges[idx.index()]
    }

    pub fn edges(&self) -> &[EdgeRecord] {
        &self.edges
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }
}
