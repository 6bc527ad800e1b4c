//! The typed in-memory record model (spec §3): vertices, edges, IOA tags,
//! and the loosely typed per-vertex/edge attribute bag.

use crate::ids::VertexIdx;
use crate::time::OrderingKey;
use serde_json::{Map, Value};
use std::rc::Rc;

/// The closed set of vertex kinds (spec §3). Mirrors the teacher's
/// `EdgeType`-with-fallback pattern (`codegraph-core::types`), but applied
/// here to `VertexKind` since the vertex kind set — unlike edge types — is
/// explicitly closed (`unknown` is the only escape hatch).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum VertexKind {
    Proc,
    Path,
    File,
    Net,
    Domain,
    Event,
    Unknown,
}

impl VertexKind {
    /// Derives a kind from a vertex identifier's `kind:payload` prefix.
    pub fn from_identifier(id: &str) -> Self {
        match id.split_once(':') {
            Some((prefix, _)) => Self::from_prefix(prefix),
            None => VertexKind::Unknown,
        }
    }

    fn from_prefix(prefix: &str) -> Self {
        match prefix {
            "proc" => VertexKind::Proc,
            "path" => VertexKind::Path,
            "file" => VertexKind::File,
            "net" => VertexKind::Net,
            "domain" => VertexKind::Domain,
            "event" => VertexKind::Event,
            _ => VertexKind::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            VertexKind::Proc => "proc",
            VertexKind::Path => "path",
            VertexKind::File => "file",
            VertexKind::Net => "net",
            VertexKind::Domain => "domain",
            VertexKind::Event => "event",
            VertexKind::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for VertexKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A loosely typed attribute bag (spec §3: "loosely typed attribute
/// bag"). Kept as a thin wrapper over `serde_json::Map` rather than a
/// rigid struct, since the source data's field set varies by vertex kind
/// and is further enriched in place by the loader.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DataBag(pub Map<String, Value>);

impl DataBag {
    pub fn new() -> Self {
        Self(Map::new())
    }

    pub fn from_value(value: Option<Value>) -> Self {
        match value {
            Some(Value::Object(map)) => Self(map),
            _ => Self::new(),
        }
    }

    /// Reads a field as a string, accepting only JSON string values.
    pub fn str_field(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(Value::as_str)
    }

    pub fn get_any(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn set_str(&mut self, key: &str, value: impl Into<String>) {
        self.0.insert(key.to_string(), Value::String(value.into()));
    }

    pub fn has(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }
}

/// A vertex: its interned identifier, kind, and attribute bag (spec §3
/// "Vertex metadata").
#[derive(Debug, Clone)]
pub struct Vertex {
    pub id: VertexIdx,
    pub identifier: Rc<str>,
    pub kind: VertexKind,
    pub data: DataBag,
}

impl Vertex {
    pub fn new(id: VertexIdx, identifier: Rc<str>, data: DataBag) -> Self {
        let kind = VertexKind::from_identifier(&identifier);
        Self { id, identifier, kind, data }
    }
}

/// A single Indicator-of-Attack tag (spec §3).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IoaTag {
    pub name: Option<String>,
    pub severity: Option<String>,
    pub tactic: Option<String>,
    pub technique: Option<String>,
}

impl IoaTag {
    pub fn from_value(value: &Value) -> Option<Self> {
        let obj = value.as_object()?;
        Some(Self {
            name: obj.get("name").and_then(Value::as_str).map(str::to_string),
            severity: obj.get("severity").and_then(Value::as_str).map(str::to_string),
            tactic: obj.get("tactic").and_then(Value::as_str).map(str::to_string),
            technique: obj.get("technique").and_then(Value::as_str).map(str::to_string),
        })
    }
}

/// A directed edge record (spec §3). `edge_type` is an open, interned
/// string rather than a closed enum: spec.md §3 lists the type set with a
/// trailing "…", signalling it is extensible by the upstream telemetry
/// format, unlike the closed `VertexKind` set.
#[derive(Debug, Clone)]
pub struct EdgeRecord {
    pub from: VertexIdx,
    pub to: VertexIdx,
    pub edge_type: Rc<str>,
    pub ordering_key: OrderingKey,
    pub event_id: Option<String>,
    pub ioa_tags: Vec<IoaTag>,
    pub data: DataBag,
}

impl EdgeRecord {
    pub fn is_ioa(&self) -> bool {
        !self.ioa_tags.is_empty()
    }
}
