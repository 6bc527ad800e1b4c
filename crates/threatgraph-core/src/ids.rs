//! Vertex identifier interning (spec Design Notes §9): human-readable
//! string ids are interned once at load time into a dense `VertexIdx`
//! space so traversal and layout never hash a `String` again.
//!
//! Grounded on `codegraph-core::memory::string_interner`, simplified to
//! single-threaded use: this engine never shares a `Graph` across threads
//! (spec §5), so the teacher's `Arc<str>` + `RwLock` pair collapses to
//! `Rc<str>` + a plain `FxHashMap`.

use rustc_hash::FxHashMap;
use std::rc::Rc;

/// Dense index of an interned vertex identifier. Cheap to copy, used as
/// the key everywhere in `threatgraph-graph` and `threatgraph-layout`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VertexIdx(pub u32);

impl VertexIdx {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Interns vertex identifier strings into a dense `VertexIdx` space.
///
/// Identifiers are interned exactly once; repeated interning of the same
/// string returns the same index.
#[derive(Debug, Default)]
pub struct StringInterner {
    strings: Vec<Rc<str>>,
    lookup: FxHashMap<Rc<str>, VertexIdx>,
}

impl StringInterner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Interns `s`, returning its existing index if already known.
    pub fn intern(&mut self, s: &str) -> VertexIdx {
        if let Some(idx) = self.lookup.get(s) {
            return *idx;
        }
        let rc: Rc<str> = Rc::from(s);
        let idx = VertexIdx(self.strings.len() as u32);
        self.strings.push(rc.clone());
        self.lookup.insert(rc, idx);
        idx
    }

    /// Looks up an already-interned string without inserting it.
    pub fn get(&self, s: &str) -> Option<VertexIdx> {
        self.lookup.get(s).copied()
    }

    /// Resolves an index back to its original string.
    pub fn resolve(&self, idx: VertexIdx) -> &str {
        &self.strings[idx.index()]
    }

    pub fn len(&self) -> usize {
        self.strings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strings.is_empty()
    }
}
