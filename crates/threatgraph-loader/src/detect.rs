//! Input kind auto-detection (spec §4.1).

use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    Adjacency,
    Finding,
}

/// Hint passed on the CLI: `auto` defers to [`detect_from_record`], the
/// other two pin the kind outright.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKindHint {
    Auto,
    Adjacency,
    Finding,
}

/// Scans a single parsed record to decide adjacency vs. finding: a
/// `record_type` of `vertex`/`edge` implies adjacency, a `sequence` array
/// implies finding.
pub fn detect_from_record(value: &Value) -> Option<InputKind> {
    let obj = value.as_object()?;
    if let Some(rt) = obj.get("record_type").and_then(Value::as_str) {
        if rt == "vertex" || rt == "edge" {
            return Some(InputKind::Adjacency);
        }
    }
    if obj.get("sequence").map(Value::is_array).unwrap_or(false) {
        return Some(InputKind::Finding);
    }
    None
}

/// Scans the first well-formed JSON line of `lines` to resolve the
/// `auto` hint. Malformed lines are skipped, matching the loader's
/// general tolerance for bad input (spec §4.1 "Failure modes").
pub fn detect_input_kind<'a>(lines: impl Iterator<Item = &'a str>) -> InputKind {
    for line in lines {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        if let Ok(value) = serde_json::from_str::<Value>(trimmed) {
            if let Some(kind) = detect_from_record(&value) {
                return kind;
            }
        }
    }
    InputKind::Adjacency
}
