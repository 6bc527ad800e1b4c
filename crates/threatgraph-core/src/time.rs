//! Time algebra shared by the loader, subgraph builder, paths-through filter,
//! and time layout. See spec §3 ("Ordering key") and §9 ("Time comparisons
//! with partial information").

use serde_json::Value;

/// `(ts_epoch, record_id)` as seen on a single edge. Either field may be
/// absent; a key with `ts: None` can still carry a `record_id`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeKey {
    pub ts: Option<f64>,
    pub record_id: Option<i64>,
}

impl TimeKey {
    pub fn new(ts: Option<f64>, record_id: Option<i64>) -> Self {
        Self { ts, record_id }
    }
}

/// The edge-level ordering key. `None` means the edge carried neither `ts`
/// nor `record_id` at all — not merely that one of the two is absent.
pub type OrderingKey = Option<TimeKey>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeOrdering {
    Less,
    Equal,
    Greater,
    Incomparable,
}

/// The single comparator used throughout traversal (spec §9). Returns
/// `Incomparable` whenever either side is entirely unknown or its `ts` is
/// unknown; ties on `ts` are broken by `record_id`, where an unknown
/// `record_id` on either side compares `Equal`.
pub fn compare(left: &OrderingKey, right: &OrderingKey) -> TimeOrdering {
    let (Some(left), Some(right)) = (left, right) else {
        return TimeOrdering::Incomparable;
    };
    let (Some(lts), Some(rts)) = (left.ts, right.ts) else {
        return TimeOrdering::Incomparable;
    };
    if lts < rts {
        return TimeOrdering::Less;
    }
    if lts > rts {
        return TimeOrdering::Greater;
    }
    match (left.record_id, right.record_id) {
        (Some(l), Some(r)) => {
            if l < r {
                TimeOrdering::Less
            } else if l > r {
                TimeOrdering::Greater
            } else {
                TimeOrdering::Equal
            }
        }
        _ => TimeOrdering::Equal,
    }
}

/// Admission test for forward traversal: is `edge_time` allowed to follow a
/// node whose best-known arrival time is `node_time`? True unless the edge
/// is strictly earlier than the node's arrival time; unknown timing on
/// either side is always permissive.
pub fn time_ge(edge_time: &OrderingKey, node_time: &OrderingKey) -> bool {
    !matches!(compare(edge_time, node_time), TimeOrdering::Less)
}

/// Admission test for reverse traversal: mirror of [`time_ge`].
pub fn time_le(edge_time: &OrderingKey, node_time: &OrderingKey) -> bool {
    !matches!(compare(edge_time, node_time), TimeOrdering::Greater)
}

/// Whether `new` should replace `old` as a node's best-known arrival time
/// during *forward* relaxation (earliest wins). `old == None` represents
/// "no lower bound" (a seed) and can never be beaten.
pub fn should_update_forward(old: &OrderingKey, new: &OrderingKey) -> bool {
    if old.is_none() {
        return false;
    }
    if new.is_none() {
        return true;
    }
    matches!(compare(new, old), TimeOrdering::Less)
}

/// Whether `new` should replace `old` during *reverse* relaxation (latest
/// wins). Mirror of [`should_update_forward`].
pub fn should_update_reverse(old: &OrderingKey, new: &OrderingKey) -> bool {
    if old.is_none() {
        return false;
    }
    if new.is_none() {
        return true;
    }
    matches!(compare(new, old), TimeOrdering::Greater)
}

/// Parses a `ts` field that may be an ISO-8601 string or an epoch number.
pub fn parse_ts(value: Option<&Value>) -> Option<f64> {
    match value? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => parse_iso8601(s),
        _ => None,
    }
}

/// Parses an ISO-8601 timestamp (accepting a trailing `Z`) into epoch
/// seconds, matching the original tool's `datetime.fromisoformat` usage.
pub fn parse_iso8601(s: &str) -> Option<f64> {
    let normalized = s.replace('Z', "+00:00");
    chrono::DateTime::parse_from_rfc3339(&normalized)
        .ok()
        .map(|dt| dt.timestamp() as f64 + dt.timestamp_subsec_nanos() as f64 / 1e9)
}

/// Parses a `record_id` field, tolerating numbers and numeric strings.
pub fn parse_record_id(value: Option<&Value>) -> Option<i64> {
    match value? {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.parse::<i64>().ok(),
        _ => None,
    }
}
